//! Errors surfaced by the memory manager.
//!
//! Only three things are reported to callers: a bad arena size, the OS
//! refusing to back the arena, and a failed memory map dump. Zero-byte
//! requests, frees of unknown addresses and use before `initialize` are
//! answered with "no result" values instead.

use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
  /// Arena size of zero words or above the configured maximum.
  #[error("invalid arena size: expected 1 to {max} words, got {requested}")]
  InvalidSize {
    requested: usize,
    max: usize,
  },

  /// The OS could not back an arena of `bytes` bytes.
  #[error("failed to reserve an arena of {bytes} bytes: {source}")]
  ArenaReservationFailed {
    bytes: usize,
    #[source]
    source: io::Error,
  },

  /// Writing the memory map dump failed.
  #[error("failed to write memory map to {}: {source}", .path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  /// A [`Config`](crate::Config) value that cannot be used.
  #[error("invalid configuration: {reason}")]
  InvalidConfig { reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
