//! Fragmentation statistics.
//!
//! `ratio = 1 - largest_free_run / free_slots`, so 0.0 means all free
//! space is one contiguous run (or there is none) and values near 1.0
//! mean free space is scattered across many small holes.

use crate::allocator::SlotAllocator;

/// Snapshot of how free space is laid out.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FragmentationStats {
    /// Total empty slots.
    pub free_slots: usize,
    /// Longest run of consecutive empty slots.
    pub largest_free_run: usize,
    /// Number of maximal runs of empty slots.
    pub free_runs: usize,
    /// Fragmentation ratio in `[0, 1]`.
    pub ratio: f64,
}

impl FragmentationStats {
    fn ratio_of(free_slots: usize, largest_free_run: usize) -> f64 {
        if free_slots == 0 {
            return 0.0;
        }
        let largest = largest_free_run.min(free_slots) as f64;
        (1.0 - largest / free_slots as f64).clamp(0.0, 1.0)
    }
}

impl SlotAllocator {
    /// Measure the current free-space layout.
    pub fn fragmentation(&self) -> FragmentationStats {
        let mut stats = FragmentationStats::default();
        let mut run = 0;

        for slot in &self.slots {
            if slot.is_occupied() {
                run = 0;
                continue;
            }
            if run == 0 {
                stats.free_runs += 1;
            }
            run += 1;
            stats.free_slots += 1;
            stats.largest_free_run = stats.largest_free_run.max(run);
        }

        stats.ratio = FragmentationStats::ratio_of(stats.free_slots, stats.largest_free_run);
        stats
    }
}
