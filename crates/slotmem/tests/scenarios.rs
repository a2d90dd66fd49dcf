//! Integration test: end-to-end fill, release, and compaction scenarios.
//!
//! Exercises the allocator through the facade crate the way the demo
//! binary does, checking table/slot consistency after every step.

use std::collections::HashSet;

use slotmem::prelude::*;
use slotmem_test_utils::fixtures::{eight_slot_pairs, filled_default, striped, tiny_config};
use slotmem_test_utils::{
    assert_consistent, assert_left_packed, blocks_by_address, first_slots, seeded_rng, table_keys,
};

#[test]
fn eight_slots_release_middle_then_compact() {
    let mut alloc = SlotAllocator::new(eight_slot_pairs()).unwrap();
    assert_eq!(alloc.fill_empty_memory(&mut seeded_rng(42)).unwrap(), 4);
    assert_eq!(table_keys(&alloc), vec![0, 2, 4, 6]);
    assert_consistent(&alloc);

    let released = alloc.release(2).unwrap();
    assert_eq!(released, Block::new(5, 2, 3));
    assert_consistent(&alloc);

    alloc.compact();
    assert_consistent(&alloc);
    assert_left_packed(&alloc);
    assert_eq!(table_keys(&alloc), vec![0, 2, 4]);
    assert_eq!(first_slots(&alloc), vec![0, 2, 4]);
    assert_eq!(alloc.process_count(), 3);
}

#[test]
fn eight_slots_distinct_values_keep_order() {
    let mut alloc = striped(eight_slot_pairs(), &[2, 2, 2, 2]);
    alloc.release(2).unwrap();
    alloc.compact();

    assert_eq!(
        blocks_by_address(&alloc),
        vec![Block::new(1, 0, 1), Block::new(3, 2, 3), Block::new(4, 4, 5)]
    );
    assert_eq!(alloc.slot(6), Some(&Slot::Empty));
    assert_eq!(alloc.slot(7), Some(&Slot::Empty));
}

#[test]
fn half_of_four_without_replacement() {
    for seed in 0..32 {
        let mut alloc = SlotAllocator::new(eight_slot_pairs()).unwrap();
        alloc.fill_empty_memory(&mut seeded_rng(seed)).unwrap();

        let released = alloc.release_percent(0.5, &mut seeded_rng(seed + 1000)).unwrap();
        assert_eq!(released.len(), 2, "seed {seed}");
        let keys: HashSet<usize> = released.iter().map(|b| b.first_slot).collect();
        assert_eq!(keys.len(), 2, "seed {seed} released a block twice");
        assert_eq!(alloc.process_count(), 2);
        assert_consistent(&alloc);
    }
}

#[test]
fn release_frees_exactly_block_length() {
    let mut alloc = striped(tiny_config(), &[1, 4, 3, 2]);
    let before = alloc.occupied_slots();
    let count = alloc.process_count();

    let block = *alloc.get(1).unwrap();
    alloc.release_block(&block).unwrap();

    assert_eq!(alloc.occupied_slots(), before - block.len());
    assert_eq!(alloc.process_count(), count - 1);
    assert!(!alloc.contains(block.first_slot));
    assert_consistent(&alloc);
}

#[test]
fn release_of_unknown_block_is_reported() {
    let mut alloc = striped(tiny_config(), &[2, 2]);
    let phantom = Block::new(5, 9, 10);
    assert_eq!(
        alloc.release_block(&phantom),
        Err(AllocError::NotAllocated { first_slot: 9 })
    );
    assert_eq!(alloc.process_count(), 2);
}

#[test]
fn full_demo_sequence_on_default_region() {
    // One stream drives fill and release, as in `demo::run`.
    let (mut alloc, mut rng) = filled_default(slotmem::demo::DEMO_SEED);
    assert!(alloc.is_full());
    let n = alloc.process_count();

    let values_before: Vec<Block> = blocks_by_address(&alloc);
    let released = alloc.release_percent(0.5, &mut rng).unwrap();
    assert_eq!(released.len(), n / 2);
    assert_consistent(&alloc);

    let survivors: Vec<usize> = blocks_by_address(&alloc).iter().map(Block::len).collect();
    let frag = alloc.fragmentation();
    assert_eq!(frag.free_slots, released.iter().map(Block::len).sum::<usize>());

    let report = alloc.compact();
    assert_consistent(&alloc);
    assert_left_packed(&alloc);
    assert_eq!(report.slots_reclaimed, frag.free_slots);
    assert_eq!(alloc.fragmentation().ratio, 0.0);

    let lens_after: Vec<usize> = blocks_by_address(&alloc).iter().map(Block::len).collect();
    assert_eq!(survivors, lens_after);
    assert!(values_before.len() > lens_after.len() || n < 2);
}

#[test]
fn fixture_release_matches_demo_run() {
    let (mut alloc, mut rng) = filled_default(slotmem::demo::DEMO_SEED);
    let released = alloc.release_percent(0.5, &mut rng).unwrap();

    let report = slotmem::demo::run(
        SlotConfig::default(),
        &mut seeded_rng(slotmem::demo::DEMO_SEED),
    )
    .unwrap();
    assert_eq!(released, report.released);
}

#[test]
fn repeated_churn_cycles_stay_consistent() {
    let mut alloc = SlotAllocator::default();
    let mut rng = seeded_rng(7);

    for _ in 0..20 {
        alloc.fill_empty_memory(&mut rng).unwrap();
        assert!(alloc.is_full());
        assert_consistent(&alloc);

        alloc.release_percent(0.5, &mut rng).unwrap();
        assert_consistent(&alloc);

        alloc.compact();
        assert_consistent(&alloc);
        assert_left_packed(&alloc);
    }
}

#[test]
fn inconsistent_bounds_fail_instead_of_spinning() {
    // 9 slots, blocks of exactly 2: the last slot can never be filled.
    let config = SlotConfig::new(36, 4)
        .with_largest_block(8)
        .with_min_slots_per_block(2);
    let mut alloc = SlotAllocator::new(config).unwrap();
    let err = alloc.fill_empty_memory(&mut seeded_rng(0)).unwrap_err();

    assert_eq!(
        err,
        AllocError::UnfillableRegion {
            cursor: 8,
            remaining: 1
        }
    );
    assert_consistent(&alloc);
}

#[test]
fn retry_bound_stops_unlucky_draws() {
    // Five slots, blocks of 2..=4, one draw per position: only 2+3 or 3+2
    // packs exactly. Every other sequence must error out, never spin.
    let config = SlotConfig::new(5, 1)
        .with_largest_block(4)
        .with_min_slots_per_block(2)
        .with_max_fill_retries(1);
    let mut saw_error = false;
    for seed in 0..64 {
        let mut alloc = SlotAllocator::new(config.clone()).unwrap();
        match alloc.fill_empty_memory(&mut seeded_rng(seed)) {
            Ok(_) => assert!(alloc.is_full()),
            Err(AllocError::UnfillableRegion { .. }) => saw_error = true,
            Err(other) => panic!("unexpected error {other}"),
        }
        assert_consistent(&alloc);
    }
    assert!(saw_error);
}
