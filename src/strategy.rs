//! Placement strategies.
//!
//! A strategy looks at a read-only view of the holes, ordered by offset,
//! and picks the offset of the hole a request of `words` words should be
//! carved from. It never sees the live ledger, so it cannot change the
//! manager's state.
//!
//! ```text
//!   holes:      [0, 8]     [12, 3]      [20, 12]
//!   request:    3 words
//!
//!   best-fit  -> 12   (smallest hole that fits)
//!   worst-fit -> 20   (largest hole that fits)
//! ```

use crate::region::Region;

pub trait Strategy {
  /// Returns the offset of the chosen hole, or `None` if no hole fits.
  fn select(
    &self,
    words: usize,
    holes: &[Region],
  ) -> Option<usize>;

  fn name(&self) -> &str {
    "custom"
  }
}

impl<F> Strategy for F
where
  F: Fn(usize, &[Region]) -> Option<usize>,
{
  fn select(
    &self,
    words: usize,
    holes: &[Region],
  ) -> Option<usize> {
    self(words, holes)
  }
}

/// Smallest hole with at least `words` words. Ties go to the lowest offset.
pub fn best_fit(
  words: usize,
  holes: &[Region],
) -> Option<usize> {
  holes
    .iter()
    .filter(|hole| hole.length >= words)
    .min_by_key(|hole| hole.length)
    .map(|hole| hole.offset)
}

/// Largest hole with at least `words` words. Ties go to the lowest offset.
pub fn worst_fit(
  words: usize,
  holes: &[Region],
) -> Option<usize> {
  holes
    .iter()
    .filter(|hole| hole.length >= words)
    .reduce(|best, hole| if hole.length > best.length { hole } else { best })
    .map(|hole| hole.offset)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BestFit;

impl Strategy for BestFit {
  fn select(
    &self,
    words: usize,
    holes: &[Region],
  ) -> Option<usize> {
    best_fit(words, holes)
  }

  fn name(&self) -> &str {
    "best-fit"
  }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorstFit;

impl Strategy for WorstFit {
  fn select(
    &self,
    words: usize,
    holes: &[Region],
  ) -> Option<usize> {
    worst_fit(words, holes)
  }

  fn name(&self) -> &str {
    "worst-fit"
  }
}

/// The built-in strategies, for places that need a plain value such as
/// [`Config`](crate::Config).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StrategyKind {
  #[default]
  BestFit,
  WorstFit,
}

impl Strategy for StrategyKind {
  fn select(
    &self,
    words: usize,
    holes: &[Region],
  ) -> Option<usize> {
    match self {
      StrategyKind::BestFit => best_fit(words, holes),
      StrategyKind::WorstFit => worst_fit(words, holes),
    }
  }

  fn name(&self) -> &str {
    match self {
      StrategyKind::BestFit => "best-fit",
      StrategyKind::WorstFit => "worst-fit",
    }
  }
}
