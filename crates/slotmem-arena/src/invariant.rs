//! Consistency checks between the slot array and the allocation table.

use std::error::Error;
use std::fmt;

use slotmem_core::Slot;

use crate::allocator::SlotAllocator;

/// The first inconsistency found by
/// [`check_invariants`](SlotAllocator::check_invariants).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// The process count differs from the number of table entries.
    CountMismatch {
        /// Live allocation counter.
        process_count: usize,
        /// Number of table entries.
        table_len: usize,
    },
    /// A table key is not the `first_slot` of the block stored under it.
    KeyMismatch {
        /// The table key.
        key: usize,
        /// The block's recorded first slot.
        first_slot: usize,
    },
    /// A table entry has reversed or out-of-bounds bounds.
    MalformedBlock {
        /// The table key.
        key: usize,
    },
    /// A slot inside a table entry's range does not hold that block.
    SlotMismatch {
        /// The offending slot index.
        slot: usize,
        /// The table key of the block expected to own it.
        owner: usize,
    },
    /// An occupied slot belongs to no table entry.
    StraySlot {
        /// The offending slot index.
        slot: usize,
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CountMismatch {
                process_count,
                table_len,
            } => {
                write!(
                    f,
                    "process count {process_count} != allocation table size {table_len}"
                )
            }
            Self::KeyMismatch { key, first_slot } => {
                write!(f, "table key {key} holds block starting at {first_slot}")
            }
            Self::MalformedBlock { key } => {
                write!(f, "table entry {key} has invalid bounds")
            }
            Self::SlotMismatch { slot, owner } => {
                write!(f, "slot {slot} does not hold block {owner}")
            }
            Self::StraySlot { slot } => {
                write!(f, "slot {slot} is occupied by an untracked block")
            }
        }
    }
}

impl Error for InvariantViolation {}

impl SlotAllocator {
    /// Verify that the slots, the table, and the process count agree.
    ///
    /// Holds after every public operation: the table's keys are exactly
    /// the first slots of the resident blocks, each block's slots hold a
    /// copy of it (so block ranges are disjoint), every occupied slot is
    /// covered by some table entry, and the process count equals the
    /// table size.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] encountered.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if self.process_count != self.table.len() {
            return Err(InvariantViolation::CountMismatch {
                process_count: self.process_count,
                table_len: self.table.len(),
            });
        }

        for (&key, block) in &self.table {
            if key != block.first_slot {
                return Err(InvariantViolation::KeyMismatch {
                    key,
                    first_slot: block.first_slot,
                });
            }
            if block.is_empty() || block.last_slot >= self.slots.len() {
                return Err(InvariantViolation::MalformedBlock { key });
            }
            for slot in block.range() {
                if self.slots[slot] != Slot::Occupied(*block) {
                    return Err(InvariantViolation::SlotMismatch { slot, owner: key });
                }
            }
        }

        for (slot, contents) in self.slots.iter().enumerate() {
            if let Slot::Occupied(block) = contents {
                if self.table.get(&block.first_slot) != Some(block) {
                    return Err(InvariantViolation::StraySlot { slot });
                }
            }
        }
        Ok(())
    }
}
