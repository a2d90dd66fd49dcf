//! Test utilities and fixtures for slotmem development.
//!
//! Provides seeded random sources, small region configs that keep
//! scenarios readable, and assertion helpers that check allocator
//! consistency with a useful failure message.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use slotmem_arena::SlotAllocator;
use slotmem_core::Block;

/// Deterministic random source for a given seed.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Panic with the violation if the allocator is inconsistent.
#[track_caller]
pub fn assert_consistent(alloc: &SlotAllocator) {
    if let Err(violation) = alloc.check_invariants() {
        panic!("allocator invariant violated: {violation}");
    }
}

/// Assert that every block is packed from slot 0 with no gaps and that
/// all remaining slots are empty.
#[track_caller]
pub fn assert_left_packed(alloc: &SlotAllocator) {
    let mut expected_first = 0;
    for block in alloc.blocks_in_slot_order() {
        assert_eq!(
            block.first_slot, expected_first,
            "gap before block {block}"
        );
        expected_first = block.last_slot + 1;
    }
    assert!(
        alloc.slots()[expected_first..]
            .iter()
            .all(|s| !s.is_occupied()),
        "occupied slot after packed prefix ending at {expected_first}"
    );
}

/// Allocated blocks from slot 0 upward.
pub fn blocks_by_address(alloc: &SlotAllocator) -> Vec<Block> {
    alloc.blocks_in_slot_order().copied().collect()
}

/// First slots of allocated blocks from slot 0 upward.
pub fn first_slots(alloc: &SlotAllocator) -> Vec<usize> {
    alloc.blocks_in_slot_order().map(|b| b.first_slot).collect()
}

/// Sorted table keys, read through the table rather than the slots.
pub fn table_keys(alloc: &SlotAllocator) -> Vec<usize> {
    let mut keys: Vec<usize> = alloc.blocks().map(|b| b.first_slot).collect();
    keys.sort_unstable();
    keys
}
