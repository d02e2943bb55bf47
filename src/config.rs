use std::mem;

use crate::{
  error::{Error, Result},
  strategy::StrategyKind,
};

/// Largest arena, in words, accepted by default.
pub const DEFAULT_MAX_WORDS: usize = 65535;

/// Largest arena, in words, whose occupancy bitmap still fits the bitmap's
/// 16-bit byte-length prefix.
pub const MAX_BITMAP_WORDS: usize = u16::MAX as usize * 8;

/// Settings a [`MemoryManager`](crate::MemoryManager) is created with.
///
/// ```rust
/// use holeman::{Config, StrategyKind};
///
/// let config = Config::builder()
///   .word_size(8)
///   .strategy(StrategyKind::WorstFit)
///   .build()
///   .unwrap();
///
/// assert_eq!(8, config.word_size());
/// assert_eq!(holeman::DEFAULT_MAX_WORDS, config.max_words());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
  word_size: usize,
  max_words: usize,
  strategy: StrategyKind,
}

impl Config {
  pub fn builder() -> ConfigBuilder {
    ConfigBuilder::default()
  }

  /// Bytes per word.
  pub fn word_size(&self) -> usize {
    self.word_size
  }

  /// Largest arena `initialize` accepts, in words.
  pub fn max_words(&self) -> usize {
    self.max_words
  }

  pub fn strategy(&self) -> StrategyKind {
    self.strategy
  }
}

impl Default for Config {
  fn default() -> Self {
    Self {
      word_size: mem::size_of::<usize>(),
      max_words: DEFAULT_MAX_WORDS,
      strategy: StrategyKind::default(),
    }
  }
}

#[derive(Clone, Debug, Default)]
pub struct ConfigBuilder {
  config: Config,
}

impl ConfigBuilder {
  pub fn word_size(
    mut self,
    word_size: usize,
  ) -> Self {
    self.config.word_size = word_size;
    self
  }

  pub fn max_words(
    mut self,
    max_words: usize,
  ) -> Self {
    self.config.max_words = max_words;
    self
  }

  pub fn strategy(
    mut self,
    strategy: StrategyKind,
  ) -> Self {
    self.config.strategy = strategy;
    self
  }

  pub fn build(self) -> Result<Config> {
    let config = self.config;

    if config.word_size == 0 {
      return Err(Error::InvalidConfig {
        reason: "word size must be at least one byte".into(),
      });
    }

    if config.max_words == 0 || config.max_words > MAX_BITMAP_WORDS {
      return Err(Error::InvalidConfig {
        reason: format!(
          "max words must be in range 1 to {MAX_BITMAP_WORDS}, got {}",
          config.max_words
        ),
      });
    }

    Ok(config)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults() {
    let config = Config::builder().build().unwrap();

    assert_eq!(mem::size_of::<usize>(), config.word_size());
    assert_eq!(DEFAULT_MAX_WORDS, config.max_words());
    assert_eq!(StrategyKind::BestFit, config.strategy());
  }

  #[test]
  fn test_rejects_zero_word_size() {
    let result = Config::builder().word_size(0).build();

    assert!(matches!(result, Err(Error::InvalidConfig { .. })));
  }

  #[test]
  fn test_max_words_bounded_by_bitmap_prefix() {
    assert!(Config::builder().max_words(MAX_BITMAP_WORDS).build().is_ok());
    assert!(Config::builder().max_words(MAX_BITMAP_WORDS + 1).build().is_err());
    assert!(Config::builder().max_words(0).build().is_err());
  }
}
