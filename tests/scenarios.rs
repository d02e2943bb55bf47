use std::fs;

use holeman::{BestFit, Config, Error, MemoryManager, Region, StrategyKind};

const WORD: usize = 8;

fn pairs(manager: &MemoryManager) -> Vec<(usize, usize)> {
  manager.free_snapshot().pairs()
}

#[test]
fn fragmentation_then_best_fit_reuses_middle_hole() {
  let mut manager = MemoryManager::new(WORD, BestFit).unwrap();
  manager.initialize(32).unwrap();

  let _a = manager.allocate(32).unwrap();
  let b = manager.allocate(64).unwrap();
  let _c = manager.allocate(16).unwrap();

  assert_eq!(
    &[Region::new(0, 4), Region::new(4, 8), Region::new(12, 2)],
    manager.occupied()
  );
  assert_eq!(vec![(14, 18)], pairs(&manager));

  manager.free(b.as_ptr());
  assert_eq!(vec![(4, 8), (14, 18)], pairs(&manager));

  let d = manager.allocate(24).unwrap();
  assert_eq!(b, d);
  assert_eq!(vec![(7, 5), (14, 18)], pairs(&manager));
}

#[test]
fn worst_fit_takes_the_trailing_hole() {
  let config = Config::builder()
    .word_size(WORD)
    .strategy(StrategyKind::WorstFit)
    .build()
    .unwrap();
  let mut manager = MemoryManager::with_config(config);
  manager.initialize(32).unwrap();

  manager.allocate(32).unwrap();
  let b = manager.allocate(64).unwrap();
  manager.allocate(16).unwrap();
  manager.free(b.as_ptr());

  let d = manager.allocate(24).unwrap();
  let base = manager.memory_start().unwrap().as_ptr() as usize;

  assert_eq!(14 * WORD, d.as_ptr() as usize - base);
  assert_eq!(vec![(4, 8), (17, 15)], pairs(&manager));
}

#[test]
fn freeing_three_blocks_coalesces_back_to_one_hole() {
  let mut manager = MemoryManager::new(WORD, BestFit).unwrap();
  manager.initialize(32).unwrap();

  let c1 = manager.allocate(64).unwrap();
  let c2 = manager.allocate(64).unwrap();
  let c3 = manager.allocate(64).unwrap();
  assert_eq!(vec![(24, 8)], pairs(&manager));

  assert!(manager.free(c1.as_ptr()));
  assert_eq!(vec![(0, 8), (24, 8)], pairs(&manager));

  assert!(manager.free(c3.as_ptr()));
  assert_eq!(vec![(0, 8), (16, 16)], pairs(&manager));

  assert!(manager.free(c2.as_ptr()));
  assert_eq!(vec![(0, 32)], pairs(&manager));
}

#[test]
fn dump_of_full_or_uninitialized_arena_is_empty() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("memory_map.txt");

  let mut manager = MemoryManager::new(WORD, BestFit).unwrap();
  manager.dump_memory_map(&path).unwrap();
  assert_eq!("", fs::read_to_string(&path).unwrap());

  manager.initialize(4).unwrap();
  manager.allocate(4 * WORD).unwrap();
  manager.dump_memory_map(&path).unwrap();
  assert_eq!("", fs::read_to_string(&path).unwrap());
}

#[test]
fn dump_matches_two_hole_format() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("memory_map.txt");

  let mut manager = MemoryManager::new(WORD, BestFit).unwrap();
  manager.initialize(10).unwrap();

  let a = manager.allocate(32).unwrap();
  manager.allocate(32).unwrap();
  let c = manager.allocate(16).unwrap();
  manager.free(a.as_ptr());
  manager.free(c.as_ptr());

  manager.dump_memory_map(&path).unwrap();

  assert_eq!(b"[0, 4] - [8, 2]".to_vec(), fs::read(&path).unwrap());
}

#[test]
fn dump_to_unwritable_path_is_an_io_error() {
  let dir = tempfile::tempdir().unwrap();
  let mut manager = MemoryManager::new(WORD, BestFit).unwrap();
  manager.initialize(4).unwrap();

  let result = manager.dump_memory_map(dir.path().join("no_such_dir").join("map.txt"));

  assert!(matches!(result, Err(Error::Io { .. })));
}

#[test]
fn bitmap_and_snapshot_encodings() {
  let mut manager = MemoryManager::new(WORD, BestFit).unwrap();
  manager.initialize(32).unwrap();

  manager.allocate(32).unwrap();
  let b = manager.allocate(64).unwrap();
  manager.allocate(16).unwrap();
  manager.free(b.as_ptr());

  assert_eq!(Some(vec![2, 4, 8, 14, 18]), manager.free_snapshot().to_words());
  assert_eq!(
    vec![4, 0, 0x0F, 0x30, 0x00, 0x00],
    manager.occupancy_bitmap().unwrap().to_bytes()
  );
}

#[test]
fn custom_strategy_first_fit() {
  let first_fit = |words: usize, holes: &[Region]| {
    holes.iter().find(|hole| hole.length >= words).map(|hole| hole.offset)
  };

  let mut manager = MemoryManager::new(WORD, first_fit).unwrap();
  manager.initialize(32).unwrap();

  manager.allocate(16).unwrap();
  let b = manager.allocate(64).unwrap();
  manager.allocate(16).unwrap();
  manager.free(b.as_ptr());

  let c = manager.allocate(8).unwrap();

  assert_eq!(b, c);
  assert_eq!("custom", manager.strategy_name());
}
