/// Converts a byte count into the number of whole words needed to hold it,
/// rounding up.
///
/// # Examples
///
/// ```rust
/// use holeman::words;
///
/// assert_eq!(words!(24, 8), 3);
/// assert_eq!(words!(25, 8), 4);
/// assert_eq!(words!(1, 4), 1);
/// ```
#[macro_export]
macro_rules! words {
  ($bytes:expr, $word_size:expr) => {
    ($bytes as usize).div_ceil($word_size as usize)
  };
}

/// Rounds a byte count up to the next multiple of the word size.
///
/// ```rust
/// use holeman::align;
///
/// assert_eq!(align!(13, 8), 16);
/// assert_eq!(align!(16, 8), 16);
/// ```
#[macro_export]
macro_rules! align {
  ($bytes:expr, $word_size:expr) => {
    $crate::words!($bytes, $word_size) * ($word_size as usize)
  };
}

#[cfg(test)]
mod tests {
  #[test]
  fn test_words_and_align() {
    for word_size in [1usize, 2, 4, 8, 16] {
      for i in 0..10 {
        for size in (word_size * i + 1)..=(word_size * (i + 1)) {
          assert_eq!(i + 1, words!(size, word_size));
          assert_eq!(word_size * (i + 1), align!(size, word_size));
        }
      }
    }

    assert_eq!(0, words!(0, 8));
    assert_eq!(0, align!(0, 8));
  }

  #[test]
  fn test_words_does_not_overflow() {
    assert_eq!(usize::MAX.div_ceil(8), words!(usize::MAX, 8));
  }
}
