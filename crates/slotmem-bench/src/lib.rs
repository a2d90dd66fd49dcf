//! Benchmark profiles for the slotmem allocator.
//!
//! - [`reference_profile`]: the 256-slot demo region
//! - [`stress_profile`]: 65,536 slots with blocks of up to 100 slots
//! - [`fragmented`]: a profile filled and half-released, ready to compact

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use slotmem_arena::SlotAllocator;
use slotmem_core::{AllocError, SlotConfig};

/// The demo region: 1024 units in 4-unit slots, blocks of 1..=25 slots.
pub fn reference_profile() -> SlotConfig {
    SlotConfig::default()
}

/// A large region: 262,144 units in 4-unit slots, blocks of 1..=100 slots.
pub fn stress_profile() -> SlotConfig {
    SlotConfig::new(262_144, 4).with_largest_block(400)
}

/// Fill `config` with `seed`, then release half the blocks.
///
/// # Errors
///
/// Propagates errors from building or filling the allocator.
pub fn fragmented(config: SlotConfig, seed: u64) -> Result<SlotAllocator, AllocError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut alloc = SlotAllocator::new(config)?;
    alloc.fill_empty_memory(&mut rng)?;
    alloc.release_percent(0.5, &mut rng)?;
    Ok(alloc)
}
