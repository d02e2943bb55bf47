//! # holeman - A Hole-List Memory Manager
//!
//! This crate manages a single fixed-size arena, obtained from the OS with
//! `mmap`, using word-granular bookkeeping: a sorted list of holes and a
//! sorted list of allocated blocks. Where a request lands is decided by a
//! pluggable placement [`Strategy`].
//!
//! ## Overview
//!
//! ```text
//!   Arena of 32 words after allocating 4, 8 and 2 words, then freeing the 8:
//!
//!   word  0       4               12  14                              32
//!         ┌───────┬───────────────┬───┬───────────────────────────────┐
//!         │  A1   │     hole      │A3 │             hole              │
//!         └───────┴───────────────┴───┴───────────────────────────────┘
//!
//!   OccupiedList: [0, 4] - [12, 2]
//!   FreeList:     [4, 8] - [14, 18]
//!
//!   Every word is in exactly one hole or one block. Holes never touch:
//!   freeing a block next to a hole merges the two.
//! ```
//!
//! ## Crate Structure
//!
//! ```text
//!   holeman
//!   ├── align      - Word rounding macros (words!, align!)
//!   ├── region     - Region {offset, length} in words
//!   ├── ledger     - FreeList (coalescing) and OccupiedList
//!   ├── strategy   - Strategy trait, BestFit, WorstFit
//!   ├── arena      - mmap-backed Arena, released on drop
//!   ├── inspect    - FreeSnapshot, OccupancyBitmap, memory map dump
//!   ├── config     - Config builder
//!   ├── error      - Error and Result
//!   └── manager    - MemoryManager
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use holeman::{BestFit, MemoryManager};
//!
//! let mut manager = MemoryManager::new(8, BestFit).unwrap();
//! manager.initialize(32).unwrap();
//!
//! let block = manager.allocate(20).unwrap(); // 3 words
//! unsafe { block.cast::<u64>().write(42) };
//!
//! assert_eq!(vec![(3, 29)], manager.free_snapshot().pairs());
//!
//! assert!(manager.free(block.as_ptr()));
//! assert_eq!("[0, 32]", manager.render_memory_map());
//! ```
//!
//! ## How It Works
//!
//! An allocation asks the active strategy for a hole and carves the
//! request from its front:
//!
//! ```text
//!   request 3 words, strategy picks hole [4, 8]
//!
//!   before:  ──┬───────────────┬──        after:  ──┬─────┬─────────┬──
//!              │   [4, 8]      │                    │ A   │ [7, 5]  │
//!            ──┴───────────────┴──                ──┴─────┴─────────┴──
//!              4              12                    4     7        12
//! ```
//!
//! Freeing puts the block back in the free list at its sorted position and
//! coalesces neighbours:
//!
//! ```text
//!   [0, 8] - [16, 8] - [24, 8]   ──coalesce──▶   [0, 8] - [16, 16]
//! ```
//!
//! ## Limitations
//!
//! - **Single-threaded only**: No synchronization primitives
//! - **Fixed capacity**: The arena never grows after `initialize`
//! - **Unix-only**: Requires `libc` and `mmap` (POSIX systems)
//!
//! ## Safety
//!
//! The manager itself is safe to drive: it only hands out and takes back
//! addresses. Reading or writing through a returned pointer is `unsafe` and
//! only valid until the block is freed or the manager shuts down.

pub mod align;
mod arena;
mod config;
mod error;
mod inspect;
mod ledger;
mod manager;
mod region;
mod strategy;

pub use arena::Arena;
pub use config::{Config, ConfigBuilder, DEFAULT_MAX_WORDS, MAX_BITMAP_WORDS};
pub use error::{Error, Result};
pub use inspect::{FreeSnapshot, OccupancyBitmap, render_memory_map, write_memory_map};
pub use ledger::{FreeList, OccupiedList};
pub use manager::MemoryManager;
pub use region::Region;
pub use strategy::{BestFit, Strategy, StrategyKind, WorstFit, best_fit, worst_fit};
