//! Block and slot records stored in simulated memory.

use std::fmt;
use std::ops::RangeInclusive;

/// One allocated region of contiguous slots.
///
/// `first_slot` and `last_slot` are inclusive slot indices. A block is
/// never mutated in place once allocated: compaction produces a shifted
/// copy with [`shifted_left`](Block::shifted_left) and re-inserts it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Block {
    /// Opaque payload tag carried by the block.
    pub value: u32,
    /// Index of the first slot owned by this block.
    pub first_slot: usize,
    /// Index of the last slot owned by this block (inclusive).
    pub last_slot: usize,
}

impl Block {
    /// Create a block covering `first_slot..=last_slot`.
    pub fn new(value: u32, first_slot: usize, last_slot: usize) -> Self {
        Self {
            value,
            first_slot,
            last_slot,
        }
    }

    /// Create a block of `len` slots starting at `first_slot`.
    ///
    /// Returns `None` if `len` is zero or the end index overflows.
    pub fn with_len(value: u32, first_slot: usize, len: usize) -> Option<Self> {
        let last_slot = first_slot.checked_add(len.checked_sub(1)?)?;
        Some(Self::new(value, first_slot, last_slot))
    }

    /// Number of slots covered. Zero only for a malformed (reversed) block.
    pub fn len(&self) -> usize {
        if self.last_slot < self.first_slot {
            return 0;
        }
        (self.last_slot - self.first_slot).saturating_add(1)
    }

    /// Whether the bounds are reversed. Well-formed blocks are never empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The inclusive slot range owned by this block.
    pub fn range(&self) -> RangeInclusive<usize> {
        self.first_slot..=self.last_slot
    }

    /// Whether `slot` lies inside this block.
    pub fn contains(&self, slot: usize) -> bool {
        self.range().contains(&slot)
    }

    /// A copy of this block moved `by` slots toward slot 0.
    ///
    /// # Panics
    ///
    /// Panics if `by > first_slot`.
    pub fn shifted_left(&self, by: usize) -> Self {
        Self {
            value: self.value,
            first_slot: self.first_slot - by,
            last_slot: self.last_slot - by,
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "block(val={}, slots {}-{})",
            self.value, self.first_slot, self.last_slot
        )
    }
}

/// Occupancy of a single slot.
///
/// Occupied slots hold a copy of the owning block so that the owner of
/// any slot is an O(1) lookup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Slot {
    /// No block covers this slot.
    #[default]
    Empty,
    /// The slot belongs to the given block.
    Occupied(Block),
}

impl Slot {
    /// Whether the slot is covered by a block.
    pub fn is_occupied(&self) -> bool {
        matches!(self, Self::Occupied(_))
    }

    /// The owning block, if any.
    pub fn block(&self) -> Option<&Block> {
        match self {
            Self::Occupied(block) => Some(block),
            Self::Empty => None,
        }
    }

    /// The payload of the owning block, if any.
    pub fn value(&self) -> Option<u32> {
        self.block().map(|b| b.value)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("-"),
            Self::Occupied(block) => write!(f, "{}", block.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn len_is_inclusive() {
        assert_eq!(Block::new(5, 3, 3).len(), 1);
        assert_eq!(Block::new(5, 0, 24).len(), 25);
    }

    #[test]
    fn len_of_whole_address_space_saturates() {
        assert_eq!(Block::new(5, 0, usize::MAX).len(), usize::MAX);
    }

    #[test]
    fn reversed_block_is_empty() {
        let b = Block::new(5, 4, 2);
        assert!(b.is_empty());
        assert_eq!(b.len(), 0);
    }

    #[test]
    fn with_len_rejects_zero() {
        assert!(Block::with_len(1, 0, 0).is_none());
        assert_eq!(Block::with_len(1, 10, 3), Some(Block::new(1, 10, 12)));
    }

    #[test]
    fn with_len_rejects_overflow() {
        assert!(Block::with_len(1, usize::MAX, 2).is_none());
    }

    #[test]
    fn contains_respects_bounds() {
        let b = Block::new(7, 4, 6);
        assert!(!b.contains(3));
        assert!(b.contains(4));
        assert!(b.contains(6));
        assert!(!b.contains(7));
    }

    #[test]
    fn shifted_left_preserves_len_and_value() {
        let b = Block::new(9, 10, 14);
        let moved = b.shifted_left(6);
        assert_eq!(moved, Block::new(9, 4, 8));
        assert_eq!(moved.len(), b.len());
    }

    #[test]
    fn zero_value_is_a_real_payload() {
        let slot = Slot::Occupied(Block::new(0, 0, 0));
        assert!(slot.is_occupied());
        assert_eq!(slot.value(), Some(0));
        assert_eq!(Slot::Empty.value(), None);
    }

    #[test]
    fn slot_display() {
        assert_eq!(Slot::Empty.to_string(), "-");
        assert_eq!(Slot::Occupied(Block::new(5, 0, 1)).to_string(), "5");
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn with_len_round_trips_len(first in 0usize..10_000, len in 1usize..100) {
                let block = Block::with_len(1, first, len).unwrap();
                prop_assert_eq!(block.len(), len);
                prop_assert!(block.contains(first));
                prop_assert!(!block.contains(first + len));
            }

            #[test]
            fn shift_keeps_shape(first in 0usize..1000, len in 1usize..50, by in 0usize..1000) {
                let by = by.min(first);
                let block = Block::with_len(3, first, len).unwrap();
                let moved = block.shifted_left(by);
                prop_assert_eq!(moved.len(), block.len());
                prop_assert_eq!(moved.value, block.value);
                prop_assert_eq!(moved.first_slot + by, block.first_slot);
            }
        }
    }
}
