//! Read-only views of the manager's state: the hole snapshot, the occupancy
//! bitmap and the memory map dump.
//!
//! ```text
//!   Occupancy bitmap wire layout (little-endian prefix):
//!
//!   ┌─────────┬─────────┬──────────┬──────────┬─────┐
//!   │ len lo  │ len hi  │ words 0-7│words 8-15│ ... │
//!   └─────────┴─────────┴──────────┴──────────┴─────┘
//!                         bit i % 8 of byte i / 8 = word i occupied
//!
//!   Memory map dump:  [0, 4] - [8, 2]
//! ```

use std::{fs, ops::Deref, path::Path};

use tracing::debug;

use crate::{
  error::{Error, Result},
  region::Region,
};

/// An owned, ordered copy of the free list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FreeSnapshot {
  regions: Vec<Region>,
}

impl FreeSnapshot {
  pub fn new(regions: &[Region]) -> Self {
    Self {
      regions: regions.to_vec(),
    }
  }

  pub fn regions(&self) -> &[Region] {
    &self.regions
  }

  /// `(offset, length)` pairs in ascending offset order.
  pub fn pairs(&self) -> Vec<(usize, usize)> {
    self.regions.iter().map(|r| (r.offset, r.length)).collect()
  }

  /// The compact `[count, offset, length, ...]` encoding with 16-bit fields.
  ///
  /// Returns `None` when the count or any offset or length does not fit in
  /// a `u16`.
  pub fn to_words(&self) -> Option<Vec<u16>> {
    let mut words = Vec::with_capacity(1 + self.regions.len() * 2);
    words.push(u16::try_from(self.regions.len()).ok()?);

    for region in &self.regions {
      words.push(u16::try_from(region.offset).ok()?);
      words.push(u16::try_from(region.length).ok()?);
    }

    Some(words)
  }
}

impl Deref for FreeSnapshot {
  type Target = [Region];

  fn deref(&self) -> &Self::Target {
    &self.regions
  }
}

/// One bit per arena word, set when the word belongs to a live allocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyBitmap {
  words: usize,
  bits: Vec<u8>,
}

impl OccupancyBitmap {
  /// Builds the bitmap of an arena of `words` words.
  ///
  /// `words` must not exceed [`MAX_BITMAP_WORDS`](crate::MAX_BITMAP_WORDS);
  /// the manager's configuration guarantees it.
  pub(crate) fn from_regions(
    words: usize,
    occupied: &[Region],
  ) -> Self {
    let mut bits = vec![0u8; words.div_ceil(8)];

    for word in occupied.iter().flat_map(|r| r.offset..r.end()) {
      bits[word / 8] |= 1 << (word % 8);
    }

    Self { words, bits }
  }

  /// Number of arena words the bitmap covers.
  pub fn words(&self) -> usize {
    self.words
  }

  /// Bitmap bytes without the length prefix.
  pub fn bits(&self) -> &[u8] {
    &self.bits
  }

  pub fn is_occupied(
    &self,
    word: usize,
  ) -> bool {
    word < self.words && self.bits[word / 8] & (1 << (word % 8)) != 0
  }

  pub fn occupied_words(&self) -> usize {
    self.bits.iter().map(|byte| byte.count_ones() as usize).sum()
  }

  /// Bitmap bytes preceded by their count as a little-endian `u16`.
  pub fn to_bytes(&self) -> Vec<u8> {
    debug_assert!(self.bits.len() <= u16::MAX as usize);

    let mut bytes = Vec::with_capacity(2 + self.bits.len());
    bytes.extend_from_slice(&(self.bits.len() as u16).to_le_bytes());
    bytes.extend_from_slice(&self.bits);
    bytes
  }
}

/// Renders holes as `[offset, length]` records joined by `" - "`.
pub fn render_memory_map(holes: &[Region]) -> String {
  holes
    .iter()
    .map(Region::to_string)
    .collect::<Vec<_>>()
    .join(" - ")
}

/// Writes [`render_memory_map`] output to `path`, creating or truncating it.
pub fn write_memory_map(
  path: &Path,
  holes: &[Region],
) -> Result<()> {
  let map = render_memory_map(holes);

  fs::write(path, &map).map_err(|source| Error::Io {
    path: path.to_path_buf(),
    source,
  })?;

  debug!(path = %path.display(), holes = holes.len(), "memory map written");

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_render_memory_map() {
    let holes = [Region::new(0, 4), Region::new(8, 2)];

    assert_eq!("[0, 4] - [8, 2]", render_memory_map(&holes));
    assert_eq!("[0, 32]", render_memory_map(&[Region::new(0, 32)]));
    assert_eq!("", render_memory_map(&[]));
  }

  #[test]
  fn test_snapshot_words_encoding() {
    let snapshot = FreeSnapshot::new(&[Region::new(7, 5), Region::new(14, 18)]);

    assert_eq!(Some(vec![2, 7, 5, 14, 18]), snapshot.to_words());
    assert_eq!(vec![(7, 5), (14, 18)], snapshot.pairs());
    assert_eq!(2, snapshot.len());
  }

  #[test]
  fn test_snapshot_words_encoding_out_of_range() {
    let snapshot = FreeSnapshot::new(&[Region::new(70000, 5)]);

    assert_eq!(None, snapshot.to_words());
  }

  #[test]
  fn test_bitmap_layout() {
    let bitmap = OccupancyBitmap::from_regions(20, &[Region::new(0, 4), Region::new(9, 2)]);

    assert_eq!(3, bitmap.bits().len());
    assert_eq!(vec![3, 0, 0b0000_1111, 0b0000_0110, 0], bitmap.to_bytes());
    assert!(bitmap.is_occupied(3));
    assert!(!bitmap.is_occupied(4));
    assert!(bitmap.is_occupied(10));
    assert!(!bitmap.is_occupied(20));
    assert_eq!(6, bitmap.occupied_words());
  }

  #[test]
  fn test_write_memory_map_truncates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("memory_map.txt");

    fs::write(&path, "stale contents that are longer than the map").unwrap();
    write_memory_map(&path, &[Region::new(0, 4), Region::new(8, 2)]).unwrap();

    assert_eq!("[0, 4] - [8, 2]", fs::read_to_string(&path).unwrap());
  }

  #[test]
  fn test_write_memory_map_reports_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("memory_map.txt");

    let result = write_memory_map(&path, &[]);

    assert!(matches!(result, Err(Error::Io { path: p, .. }) if p == path));
  }
}
