use std::ptr::NonNull;

use holeman::{BestFit, MemoryManager, Result, WorstFit};
use tracing_subscriber::EnvFilter;

const WORD_SIZE: usize = 8;
const POOL_SIZE: usize = 32;

/// Prints the free list in `[offset, length] - ...` form.
fn print_holes(manager: &MemoryManager) {
  let map = manager.render_memory_map();

  if map.is_empty() {
    println!("  Hole list: (empty)");
  } else {
    println!("  Hole list: {map}");
  }
}

fn print_block(
  label: &str,
  block: Option<NonNull<u8>>,
) {
  match block {
    Some(ptr) => println!("  {label} address: {ptr:?}"),
    None => println!("  {label}: allocation failed"),
  }
}

fn print_separator(title: &str) {
  println!("\n{}", "=".repeat(50));
  println!("{title}");
  println!("{}", "=".repeat(50));
}

fn release(
  manager: &mut MemoryManager,
  block: Option<NonNull<u8>>,
) {
  if let Some(ptr) = block {
    manager.free(ptr.as_ptr());
  }
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
    .init();

  println!("Memory Manager Demo");
  println!("Word size: {WORD_SIZE} bytes");
  println!("Pool size: {POOL_SIZE} words ({} bytes)", POOL_SIZE * WORD_SIZE);

  // --------------------------------------------------------------------
  // 1) Best-fit: fragment the arena, then fill the middle hole.
  // --------------------------------------------------------------------
  print_separator("Demo 1: Best-Fit Allocation");

  let mut manager = MemoryManager::new(WORD_SIZE, BestFit)?;
  manager.initialize(POOL_SIZE)?;

  println!("\nInitial state:");
  print_holes(&manager);

  println!("\nAllocating 32 bytes (4 words)...");
  let block1 = manager.allocate(32);
  print_block("Block 1", block1);
  print_holes(&manager);

  println!("\nAllocating 64 bytes (8 words)...");
  let block2 = manager.allocate(64);
  print_block("Block 2", block2);
  print_holes(&manager);

  println!("\nAllocating 16 bytes (2 words)...");
  let block3 = manager.allocate(16);
  print_block("Block 3", block3);
  print_holes(&manager);

  println!("\nFreeing Block 2 (creates hole in middle)...");
  release(&mut manager, block2);
  print_holes(&manager);

  println!("\nAllocating 24 bytes (3 words) - best-fit selects smallest sufficient hole...");
  let block4 = manager.allocate(24);
  print_block("Block 4", block4);
  print_holes(&manager);

  manager.shutdown();

  // --------------------------------------------------------------------
  // 2) Worst-fit on the same fragmentation pattern.
  // --------------------------------------------------------------------
  print_separator("Demo 2: Worst-Fit Allocation");

  let mut manager = MemoryManager::new(WORD_SIZE, WorstFit)?;
  manager.initialize(POOL_SIZE)?;

  manager.allocate(32);
  let middle = manager.allocate(64);
  manager.allocate(16);
  release(&mut manager, middle);

  println!("\nSame setup: freed middle 8-word block");
  print_holes(&manager);

  println!("\nAllocating 24 bytes (3 words) - worst-fit selects largest hole...");
  let block = manager.allocate(24);
  print_block("Block", block);
  print_holes(&manager);

  manager.shutdown();

  // --------------------------------------------------------------------
  // 3) Coalescing: free three neighbours in an order that merges late.
  // --------------------------------------------------------------------
  print_separator("Demo 3: Hole Coalescing");

  let mut manager = MemoryManager::new(WORD_SIZE, BestFit)?;
  manager.initialize(POOL_SIZE)?;

  let c1 = manager.allocate(64);
  let c2 = manager.allocate(64);
  let c3 = manager.allocate(64);

  println!("\nAllocated three 8-word blocks:");
  print_holes(&manager);

  println!("\nFreeing first block (non-adjacent, no coalesce)...");
  release(&mut manager, c1);
  print_holes(&manager);

  println!("\nFreeing third block (adjacent to trailing hole - coalesces)...");
  release(&mut manager, c3);
  print_holes(&manager);

  println!("\nFreeing second block (adjacent to both holes - coalesces)...");
  release(&mut manager, c2);
  print_holes(&manager);

  manager.shutdown();

  // --------------------------------------------------------------------
  // 4) Dump the free list to a file.
  // --------------------------------------------------------------------
  print_separator("Demo 4: Memory Map Dump");

  let mut manager = MemoryManager::new(WORD_SIZE, BestFit)?;
  manager.initialize(POOL_SIZE)?;

  manager.allocate(32);
  manager.allocate(48);

  let filename = "memory_map.txt";
  manager.dump_memory_map(filename)?;

  println!("\nMemory map written to: {filename}");
  println!("Contents show hole list in format: [offset, length]");

  if let Some(bitmap) = manager.occupancy_bitmap() {
    println!("Occupied words: {} of {}", bitmap.occupied_words(), bitmap.words());
  }

  manager.shutdown();

  print_separator("Demo Complete");

  Ok(())
}
