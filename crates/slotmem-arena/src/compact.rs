//! Compaction: slide every block toward slot 0.

use indexmap::IndexMap;
use slotmem_core::Slot;
use tracing::debug;

use crate::allocator::SlotAllocator;

/// Summary of one [`compact`](SlotAllocator::compact) pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompactionReport {
    /// Blocks whose bounds changed.
    pub blocks_moved: usize,
    /// Empty slots gathered into the contiguous tail after compaction.
    pub slots_reclaimed: usize,
}

impl SlotAllocator {
    /// Remove every gap by moving blocks left, keeping their order.
    ///
    /// Works one block at a time in ascending `first_slot` order. Each
    /// block is shifted left by the number of empty slots that precede
    /// it, written at its new position, and re-keyed in the table. All
    /// slots after the last block are cleared. Block lengths, values,
    /// and the process count are unchanged; on memory with no gaps this
    /// is a no-op.
    pub fn compact(&mut self) -> CompactionReport {
        let mut ordered: Vec<_> = self.table.values().copied().collect();
        ordered.sort_unstable_by_key(|b| b.first_slot);

        let mut table = IndexMap::with_capacity(ordered.len());
        let mut report = CompactionReport::default();
        let mut cursor = 0;

        for block in ordered {
            // Blocks before this one are already packed up to `cursor`,
            // so the distance is the number of empty slots preceding it.
            let gap = block.first_slot - cursor;
            let moved = block.shifted_left(gap);
            if gap > 0 {
                for slot in &mut self.slots[moved.range()] {
                    *slot = Slot::Occupied(moved);
                }
                report.blocks_moved += 1;
            }
            table.insert(moved.first_slot, moved);
            cursor = moved.last_slot + 1;
        }

        for slot in &mut self.slots[cursor..] {
            *slot = Slot::Empty;
        }
        self.table = table;
        report.slots_reclaimed = self.slots.len() - cursor;

        debug!(
            blocks_moved = report.blocks_moved,
            slots_reclaimed = report.slots_reclaimed,
            "compaction complete"
        );
        debug_assert!(self.check_invariants().is_ok());
        report
    }
}
