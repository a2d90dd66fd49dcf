//! The slot allocator state and its single-block operations.
//!
//! [`SlotAllocator`] owns the slot array, the allocation table, and the
//! process count. [`allocate`](SlotAllocator::allocate) and
//! [`release`](SlotAllocator::release) are the only operations that add
//! or remove blocks; the randomized routines in [`churn`](crate::churn)
//! are built on top of them.

use indexmap::IndexMap;
use slotmem_core::{AllocError, Block, RangeFault, Slot, SlotConfig};
use tracing::{info, trace};

/// A fixed-capacity region of equal-size slots.
///
/// Every slot of an allocated block holds a copy of that block, trading
/// memory for O(1) slot-to-owner lookup. The allocation table maps each
/// block's `first_slot` to the block and is the source of truth for
/// random selection during partial release.
#[derive(Clone, Debug)]
pub struct SlotAllocator {
    pub(crate) config: SlotConfig,
    pub(crate) slots: Vec<Slot>,
    pub(crate) table: IndexMap<usize, Block>,
    pub(crate) process_count: usize,
}

impl SlotAllocator {
    /// Create an empty allocator sized by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError::Config`] if `config` fails validation.
    pub fn new(config: SlotConfig) -> Result<Self, AllocError> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: SlotConfig) -> Self {
        let num_slots = config.num_slots();
        Self {
            config,
            slots: vec![Slot::Empty; num_slots],
            table: IndexMap::new(),
            process_count: 0,
        }
    }

    /// Place `block` into memory and record it in the allocation table.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError::InvalidBlockRange`] if the range is reversed,
    /// out of bounds, overlaps an allocated slot, or has a length outside
    /// the configured bounds. State is unchanged on error.
    pub fn allocate(&mut self, block: Block) -> Result<(), AllocError> {
        self.check_placement(&block)?;

        for slot in &mut self.slots[block.range()] {
            *slot = Slot::Occupied(block);
        }
        self.table.insert(block.first_slot, block);
        self.process_count += 1;

        trace!(
            value = block.value,
            first_slot = block.first_slot,
            last_slot = block.last_slot,
            "block allocated"
        );
        debug_assert!(self.check_invariants().is_ok());
        Ok(())
    }

    /// Free the block starting at `first_slot` and return it.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError::NotAllocated`] if no block starts at
    /// `first_slot`. State is unchanged on error.
    pub fn release(&mut self, first_slot: usize) -> Result<Block, AllocError> {
        let block = self
            .table
            .swap_remove(&first_slot)
            .ok_or(AllocError::NotAllocated { first_slot })?;

        for slot in &mut self.slots[block.range()] {
            *slot = Slot::Empty;
        }
        self.process_count -= 1;

        info!(
            value = block.value,
            first_slot = block.first_slot,
            last_slot = block.last_slot,
            "block released"
        );
        debug_assert!(self.check_invariants().is_ok());
        Ok(block)
    }

    /// Free a block previously read from the allocation table.
    ///
    /// Keyed by `block.first_slot`; the rest of `block` is not consulted.
    pub fn release_block(&mut self, block: &Block) -> Result<Block, AllocError> {
        self.release(block.first_slot)
    }

    fn check_placement(&self, block: &Block) -> Result<(), AllocError> {
        let reject = |fault| AllocError::InvalidBlockRange {
            first_slot: block.first_slot,
            last_slot: block.last_slot,
            fault,
        };

        if block.first_slot > block.last_slot {
            return Err(reject(RangeFault::Reversed));
        }
        if block.last_slot >= self.slots.len() {
            return Err(reject(RangeFault::OutOfBounds {
                num_slots: self.slots.len(),
            }));
        }
        let (min, max) = (
            self.config.min_slots_per_block,
            self.config.max_slots_per_block(),
        );
        let len = block.len();
        if len < min || len > max {
            return Err(reject(RangeFault::LengthOutOfBounds { len, min, max }));
        }
        if let Some(offset) = self.slots[block.range()]
            .iter()
            .position(Slot::is_occupied)
        {
            return Err(reject(RangeFault::Overlaps {
                slot: block.first_slot + offset,
            }));
        }
        Ok(())
    }

    /// The configuration this allocator was built from.
    pub fn config(&self) -> &SlotConfig {
        &self.config
    }

    /// Number of slots in the region.
    pub fn num_slots(&self) -> usize {
        self.slots.len()
    }

    /// The whole slot array, in address order.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// The slot at `index`, or `None` if out of range.
    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    /// The block covering slot `index`, if any.
    pub fn owner_of(&self, index: usize) -> Option<&Block> {
        self.slot(index).and_then(Slot::block)
    }

    /// The block starting at `first_slot`, if any.
    pub fn get(&self, first_slot: usize) -> Option<&Block> {
        self.table.get(&first_slot)
    }

    /// Whether a block starts at `first_slot`.
    pub fn contains(&self, first_slot: usize) -> bool {
        self.table.contains_key(&first_slot)
    }

    /// Iterate over allocated blocks in table order.
    ///
    /// Table order is unspecified after releases; use
    /// [`blocks_in_slot_order`](Self::blocks_in_slot_order) for address order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.table.values()
    }

    /// Iterate over allocated blocks from slot 0 upward.
    pub fn blocks_in_slot_order(&self) -> impl Iterator<Item = &Block> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.block().filter(|b| b.first_slot == i))
    }

    /// Number of live allocations.
    pub fn process_count(&self) -> usize {
        self.process_count
    }

    /// Number of slots covered by allocated blocks.
    pub fn occupied_slots(&self) -> usize {
        self.slots.iter().filter(|s| s.is_occupied()).count()
    }

    /// Number of empty slots.
    pub fn free_slots(&self) -> usize {
        self.num_slots() - self.occupied_slots()
    }

    /// Whether every slot is occupied.
    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Slot::is_occupied)
    }

    /// Whether no block is allocated.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Default for SlotAllocator {
    fn default() -> Self {
        Self::from_valid(SlotConfig::default())
    }
}
