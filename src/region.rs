use std::fmt;

/// A `[offset, offset + length)` span of the arena, measured in words.
///
/// Both ledgers are made of these. The byte address of a region is
/// `arena base + offset * word size`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Region {
  pub offset: usize,
  pub length: usize,
}

impl Region {
  pub const fn new(
    offset: usize,
    length: usize,
  ) -> Self {
    Self { offset, length }
  }

  /// First word index past the end of the region.
  pub const fn end(&self) -> usize {
    self.offset + self.length
  }

  /// True when `next` starts exactly where `self` ends.
  pub const fn is_adjacent_to(
    &self,
    next: &Region,
  ) -> bool {
    self.end() == next.offset
  }

  pub const fn contains_word(
    &self,
    word: usize,
  ) -> bool {
    word >= self.offset && word < self.end()
  }

  pub const fn overlaps(
    &self,
    other: &Region,
  ) -> bool {
    self.offset < other.end() && other.offset < self.end()
  }
}

/// Renders as `[offset, length]`, the record format of the memory map dump.
impl fmt::Display for Region {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    write!(f, "[{}, {}]", self.offset, self.length)
  }
}
