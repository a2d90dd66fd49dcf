//! Reusable region configs and pre-populated allocators.
//!
//! - [`eight_slot_pairs`]: 8 slots, every block exactly 2 slots.
//! - [`tiny_config`]: 16 slots, blocks of 1..=4 slots.
//! - [`filled_default`]: the full-size region packed by a seeded fill,
//!   returned with the rng so later steps continue the same stream.
//! - [`striped`]: blocks of distinct values laid out back to back.

use rand_chacha::ChaCha8Rng;
use slotmem_arena::SlotAllocator;
use slotmem_core::{Block, SlotConfig};

use crate::seeded_rng;

/// 8 slots of 4 units; every block is exactly 2 slots long.
pub fn eight_slot_pairs() -> SlotConfig {
    SlotConfig::new(32, 4)
        .with_largest_block(8)
        .with_min_slots_per_block(2)
}

/// 16 slots of 4 units; blocks of 1 to 4 slots.
pub fn tiny_config() -> SlotConfig {
    SlotConfig::new(64, 4).with_largest_block(16)
}

/// Default-sized allocator packed by `fill_empty_memory` with `seed`,
/// together with the rng positioned just after the fill.
pub fn filled_default(seed: u64) -> (SlotAllocator, ChaCha8Rng) {
    let mut alloc = SlotAllocator::default();
    let mut rng = seeded_rng(seed);
    alloc
        .fill_empty_memory(&mut rng)
        .expect("default config always fills");
    (alloc, rng)
}

/// Allocator with one block per entry of `lens`, placed back to back
/// from slot 0, block `i` carrying value `i + 1`.
pub fn striped(config: SlotConfig, lens: &[usize]) -> SlotAllocator {
    let mut alloc = SlotAllocator::new(config).expect("fixture config is valid");
    let mut first = 0;
    for (i, &len) in lens.iter().enumerate() {
        let block = Block::with_len(i as u32 + 1, first, len).expect("non-zero length");
        alloc.allocate(block).expect("striped blocks fit");
        first = block.last_slot + 1;
    }
    alloc
}
