//! The fixed demo sequence: fill, report, release, compact, report.
//!
//! [`run`] executes the sequence against a fresh allocator and returns a
//! [`DemoReport`] whose `Display` output is exactly what the `slotmem`
//! binary writes to stdout.

use std::fmt;

use rand::Rng;
use slotmem_arena::{CompactionReport, SlotAllocator};
use slotmem_core::{AllocError, Block, SlotConfig};
use tracing::info;

/// Seed used by the binary so every run shows the same layout.
pub const DEMO_SEED: u64 = 1;

/// Everything the demo observed, in output order.
#[derive(Clone, Debug)]
pub struct DemoReport {
    /// Status grid after the initial fill.
    pub status_before: String,
    /// Live blocks after the initial fill.
    pub count_before: usize,
    /// Blocks freed by the partial release, in release order.
    pub released: Vec<Block>,
    /// Result of the compaction pass.
    pub compaction: CompactionReport,
    /// Status grid after compaction.
    pub status_after: String,
    /// Live blocks after compaction.
    pub count_after: usize,
}

/// The stdout line for one released block.
pub fn release_notice(block: &Block) -> String {
    format!(
        "Block with val <{}> removed from <{}-{}>",
        block.value, block.first_slot, block.last_slot
    )
}

/// Run fill, partial release of `config.release_fraction`, and compaction.
///
/// # Errors
///
/// Propagates any [`AllocError`] from building the allocator or from the
/// randomized operations.
pub fn run<R: Rng + ?Sized>(config: SlotConfig, rng: &mut R) -> Result<DemoReport, AllocError> {
    let fraction = config.release_fraction;
    let mut alloc = SlotAllocator::new(config)?;

    let placed = alloc.fill_empty_memory(rng)?;
    info!(placed, "initial fill");
    let status_before = alloc.status().to_string();
    let count_before = alloc.process_count();

    let released = alloc.release_percent(fraction, rng)?;
    let compaction = alloc.compact();
    info!(
        released = released.len(),
        moved = compaction.blocks_moved,
        "release and compaction"
    );

    Ok(DemoReport {
        status_before,
        count_before,
        released,
        compaction,
        status_after: alloc.status().to_string(),
        count_after: alloc.process_count(),
    })
}

impl fmt::Display for DemoReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.status_before)?;
        writeln!(f, "NUM PROCESSES: {}", self.count_before)?;
        writeln!(f)?;
        for block in &self.released {
            writeln!(f, "{}", release_notice(block))?;
        }
        f.write_str(&self.status_after)?;
        writeln!(f, "NUM PROCESSES: {}", self.count_after)
    }
}
