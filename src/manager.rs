use std::{fmt, io, path::Path, ptr::NonNull};

use tracing::{debug, info, warn};

use crate::{
  align,
  arena::Arena,
  config::Config,
  error::{Error, Result},
  inspect::{self, FreeSnapshot, OccupancyBitmap},
  ledger::{FreeList, OccupiedList},
  region::Region,
  strategy::Strategy,
  words,
};

/// A hole-list memory manager over one fixed-size arena.
///
/// The arena and both ledgers are created together by
/// [`initialize`](Self::initialize) and torn down together by
/// [`shutdown`](Self::shutdown). Between the two, every word of the arena
/// belongs to exactly one hole or one allocated block.
///
/// Not thread-safe: callers sharing a manager must serialize access.
pub struct MemoryManager {
  word_size: usize,
  max_words: usize,
  strategy: Box<dyn Strategy>,
  arena: Option<Arena>,
  holes: FreeList,
  blocks: OccupiedList,
}

impl MemoryManager {
  /// Creates an uninitialized manager with `word_size` bytes per word.
  pub fn new(
    word_size: usize,
    strategy: impl Strategy + 'static,
  ) -> Result<Self> {
    let config = Config::builder().word_size(word_size).build()?;

    let mut manager = Self::with_config(config);
    manager.set_allocator(strategy);

    Ok(manager)
  }

  /// Creates an uninitialized manager from a validated [`Config`].
  pub fn with_config(config: Config) -> Self {
    Self {
      word_size: config.word_size(),
      max_words: config.max_words(),
      strategy: Box::new(config.strategy()),
      arena: None,
      holes: FreeList::new(),
      blocks: OccupiedList::new(),
    }
  }

  /// Reserves an arena of `size_in_words` words and seeds a single hole
  /// spanning it.
  ///
  /// An arena that is already held is released first, even if the new size
  /// turns out to be invalid.
  pub fn initialize(
    &mut self,
    size_in_words: usize,
  ) -> Result<()> {
    if self.arena.is_some() {
      self.shutdown();
    }

    if size_in_words == 0 || size_in_words > self.max_words {
      return Err(Error::InvalidSize {
        requested: size_in_words,
        max: self.max_words,
      });
    }

    let bytes = size_in_words
      .checked_mul(self.word_size)
      .ok_or_else(|| Error::ArenaReservationFailed {
        bytes: usize::MAX,
        source: io::Error::new(io::ErrorKind::OutOfMemory, "arena size overflows usize"),
      })?;

    let arena = Arena::reserve(bytes).map_err(|source| Error::ArenaReservationFailed { bytes, source })?;

    self.arena = Some(arena);
    self.holes = FreeList::spanning(size_in_words);
    self.blocks.clear();

    info!(
      words = size_in_words,
      word_size = self.word_size,
      strategy = self.strategy.name(),
      "memory manager initialized"
    );

    Ok(())
  }

  /// Releases the arena, if any, and clears both ledgers. Safe to call any
  /// number of times.
  pub fn shutdown(&mut self) {
    if let Some(arena) = self.arena.take() {
      debug!(
        live_blocks = self.blocks.len(),
        live_words = self.blocks.total_words(),
        "shutting down memory manager"
      );
      drop(arena);
    }

    self.holes.clear();
    self.blocks.clear();
  }

  /// Hands out `size_in_bytes` bytes, rounded up to whole words, carved
  /// from the front of the hole the active strategy picks.
  ///
  /// Returns `None` before `initialize`, for a zero-byte request, and when no
  /// hole is large enough.
  pub fn allocate(
    &mut self,
    size_in_bytes: usize,
  ) -> Option<NonNull<u8>> {
    let arena = self.arena.as_ref()?;

    if size_in_bytes == 0 || self.holes.is_empty() {
      return None;
    }

    let words = words!(size_in_bytes, self.word_size);

    let Some(offset) = self.strategy.select(words, self.holes.regions()) else {
      debug!(words, strategy = self.strategy.name(), "no hole fits request");
      return None;
    };

    if !self.holes.carve(offset, words) {
      warn!(
        offset,
        words,
        strategy = self.strategy.name(),
        "strategy picked an offset that is not a large enough hole"
      );
      return None;
    }

    self.blocks.insert(Region::new(offset, words));

    debug!(
      offset,
      words,
      bytes = align!(size_in_bytes, self.word_size),
      "block allocated"
    );

    arena.at(offset * self.word_size)
  }

  /// Returns the block whose first word holds `address` to the free list and
  /// coalesces.
  ///
  /// The word index is `(address - base) / word size`, so any byte of a
  /// block's first word identifies it. Returns `true` when a block was
  /// released. A null address, an address outside the arena, and an address
  /// in any other word all leave the manager untouched and return `false`.
  pub fn free(
    &mut self,
    address: *mut u8,
  ) -> bool {
    let Some(arena) = self.arena.as_ref() else {
      return false;
    };

    if address.is_null() {
      return false;
    }

    let Some(byte_offset) = arena.offset_of(address) else {
      debug!(?address, "free of address outside the arena ignored");
      return false;
    };

    let offset = byte_offset / self.word_size;

    let Some(block) = self.blocks.remove(offset) else {
      debug!(offset, "free of untracked address ignored");
      return false;
    };

    self.holes.insert(block);
    let merged = self.holes.coalesce();

    debug!(
      offset,
      words = block.length,
      merged,
      holes = self.holes.len(),
      "block freed"
    );

    true
  }

  /// Replaces the placement strategy used by subsequent allocations.
  pub fn set_allocator(
    &mut self,
    strategy: impl Strategy + 'static,
  ) {
    self.strategy = Box::new(strategy);
    debug!(strategy = self.strategy.name(), "strategy changed");
  }

  /// Name of the active strategy, `"custom"` for closures.
  pub fn strategy_name(&self) -> &str {
    self.strategy.name()
  }

  pub fn free_snapshot(&self) -> FreeSnapshot {
    FreeSnapshot::new(self.holes.regions())
  }

  /// Live blocks in ascending offset order.
  pub fn occupied(&self) -> &[Region] {
    self.blocks.regions()
  }

  /// `None` while uninitialized.
  pub fn occupancy_bitmap(&self) -> Option<OccupancyBitmap> {
    self.arena.as_ref()?;

    Some(OccupancyBitmap::from_regions(self.size_in_words(), self.blocks.regions()))
  }

  pub fn word_size(&self) -> usize {
    self.word_size
  }

  /// Largest arena `initialize` accepts, in words.
  pub fn max_words(&self) -> usize {
    self.max_words
  }

  pub fn memory_start(&self) -> Option<NonNull<u8>> {
    self.arena.as_ref().map(Arena::base)
  }

  /// Arena size in bytes, 0 while uninitialized.
  pub fn memory_limit(&self) -> usize {
    self.arena.as_ref().map_or(0, Arena::len)
  }

  pub fn size_in_words(&self) -> usize {
    self.memory_limit() / self.word_size
  }

  pub fn free_words(&self) -> usize {
    self.holes.total_words()
  }

  pub fn is_initialized(&self) -> bool {
    self.arena.is_some()
  }

  /// The free list as `[offset, length] - [offset, length] - ...`.
  pub fn render_memory_map(&self) -> String {
    inspect::render_memory_map(self.holes.regions())
  }

  /// Writes [`render_memory_map`](Self::render_memory_map) to `path`,
  /// creating or truncating the file.
  pub fn dump_memory_map(
    &self,
    path: impl AsRef<Path>,
  ) -> Result<()> {
    inspect::write_memory_map(path.as_ref(), self.holes.regions())
  }
}

impl Drop for MemoryManager {
  fn drop(&mut self) {
    self.shutdown();
  }
}

impl fmt::Debug for MemoryManager {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    f.debug_struct("MemoryManager")
      .field("word_size", &self.word_size)
      .field("max_words", &self.max_words)
      .field("strategy", &self.strategy.name())
      .field("arena", &self.arena)
      .field("holes", &self.holes.regions())
      .field("blocks", &self.blocks.regions())
      .finish()
  }
}
