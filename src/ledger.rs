//! The two region ledgers the manager keeps over its arena.
//!
//! ```text
//!   word:   0       4               12  14                              32
//!           ┌───────┬───────────────┬───┬───────────────────────────────┐
//!           │ used  │     hole      │use│             hole              │
//!           └───────┴───────────────┴───┴───────────────────────────────┘
//!
//!   OccupiedList: [0, 4] - [12, 2]
//!   FreeList:     [4, 8] - [14, 18]
//! ```
//!
//! Both lists are sorted ascending by offset. The free list is kept in
//! maximal-merge form: after every mutation that goes through the manager
//! no two holes touch.

use crate::region::Region;

/// Sorted list of holes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FreeList {
  regions: Vec<Region>,
}

impl FreeList {
  pub fn new() -> Self {
    Self::default()
  }

  /// A list holding a single hole that spans `words` words from offset 0.
  pub fn spanning(words: usize) -> Self {
    Self {
      regions: vec![Region::new(0, words)],
    }
  }

  pub fn regions(&self) -> &[Region] {
    &self.regions
  }

  pub fn len(&self) -> usize {
    self.regions.len()
  }

  pub fn is_empty(&self) -> bool {
    self.regions.is_empty()
  }

  pub fn clear(&mut self) {
    self.regions.clear();
  }

  pub fn total_words(&self) -> usize {
    self.regions.iter().map(|r| r.length).sum()
  }

  /// Carves `words` words from the front of the hole starting exactly at
  /// `offset`.
  ///
  /// An exact fit removes the hole. A partial fit advances its offset and
  /// shrinks it, keeping the trailing endpoint. Returns `false` without
  /// touching the list if no hole starts at `offset` or the hole is too small.
  pub fn carve(
    &mut self,
    offset: usize,
    words: usize,
  ) -> bool {
    let Ok(index) = self.regions.binary_search_by_key(&offset, |r| r.offset) else {
      return false;
    };

    let hole = &mut self.regions[index];

    if words == 0 || hole.length < words {
      return false;
    }

    if hole.length == words {
      self.regions.remove(index);
    } else {
      hole.offset += words;
      hole.length -= words;
    }

    true
  }

  /// Inserts `region` at its sorted position. Does not coalesce.
  pub fn insert(
    &mut self,
    region: Region,
  ) {
    let index = self.regions.partition_point(|r| r.offset < region.offset);
    self.regions.insert(index, region);
  }

  /// Merges every run of touching holes in one left-to-right sweep and
  /// returns how many merges happened.
  ///
  /// A merged hole stays in place and is compared again with its new
  /// neighbour, so chains of any length collapse in the same pass.
  pub fn coalesce(&mut self) -> usize {
    let before = self.regions.len();

    self.regions.dedup_by(|later, earlier| {
      if earlier.is_adjacent_to(later) {
        earlier.length += later.length;
        true
      } else {
        false
      }
    });

    before - self.regions.len()
  }
}

/// Sorted list of live allocations, one entry per block handed out.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OccupiedList {
  regions: Vec<Region>,
}

impl OccupiedList {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn regions(&self) -> &[Region] {
    &self.regions
  }

  pub fn len(&self) -> usize {
    self.regions.len()
  }

  pub fn is_empty(&self) -> bool {
    self.regions.is_empty()
  }

  pub fn clear(&mut self) {
    self.regions.clear();
  }

  pub fn total_words(&self) -> usize {
    self.regions.iter().map(|r| r.length).sum()
  }

  pub fn insert(
    &mut self,
    region: Region,
  ) {
    let index = self.regions.partition_point(|r| r.offset < region.offset);
    self.regions.insert(index, region);
  }

  /// Removes and returns the block starting exactly at `offset`.
  pub fn remove(
    &mut self,
    offset: usize,
  ) -> Option<Region> {
    let index = self.regions.binary_search_by_key(&offset, |r| r.offset).ok()?;
    Some(self.regions.remove(index))
  }
}
