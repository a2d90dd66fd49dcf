//! Randomized fill and partial release.
//!
//! Both routines take the random source as a parameter so that a seeded
//! `ChaCha8Rng` reproduces the same block layout and the same release
//! order on every run.

use rand::Rng;
use slotmem_core::{AllocError, Block};
use tracing::{debug, trace};

use crate::allocator::SlotAllocator;

impl SlotAllocator {
    /// Pack randomly sized blocks from the first vacant slot to the end.
    ///
    /// Placement starts just past the last occupied slot (slot 0 on a
    /// fresh allocator). Each block carries `config.fill_value` and a
    /// length drawn uniformly from `[min_slots_per_block,
    /// max_slots_per_block]`. A draw that would run past the end of
    /// memory is discarded and redrawn at the same position. Returns the
    /// number of blocks placed.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError::UnfillableRegion`] if the space left at the
    /// cursor is shorter than the minimum block, or if
    /// `config.max_fill_retries` draws in a row all overrun the end.
    /// Blocks placed before the failure stay allocated.
    pub fn fill_empty_memory<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<usize, AllocError> {
        let num_slots = self.num_slots();
        let mut cursor = self
            .slots
            .iter()
            .rposition(|s| s.is_occupied())
            .map_or(0, |last| last + 1);
        let mut placed = 0;

        while cursor < num_slots {
            let block = self.draw_block(rng, cursor)?;
            self.allocate(block)?;
            cursor = block.last_slot + 1;
            placed += 1;
        }

        debug!(placed, process_count = self.process_count, "memory filled");
        Ok(placed)
    }

    fn draw_block<R: Rng + ?Sized>(&self, rng: &mut R, cursor: usize) -> Result<Block, AllocError> {
        let remaining = self.num_slots() - cursor;
        let min = self.config.min_slots_per_block;
        let max = self.config.max_slots_per_block();
        let unfillable = AllocError::UnfillableRegion { cursor, remaining };

        if remaining < min {
            return Err(unfillable);
        }

        for _ in 0..self.config.max_fill_retries {
            let len = rng.random_range(min..=max);
            if len <= remaining {
                return Ok(Block::new(self.config.fill_value, cursor, cursor + len - 1));
            }
            trace!(len, remaining, cursor, "block overruns memory, redrawing");
        }
        Err(unfillable)
    }

    /// Release `floor(process_count * fraction)` distinct random blocks.
    ///
    /// The count is fixed on entry. Each pick is uniform over the blocks
    /// still allocated at that moment, so no block is released twice.
    /// Returns the released blocks in release order.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError::InvalidFraction`] if `fraction` is NaN or
    /// outside `[0, 1]`.
    pub fn release_percent<R: Rng + ?Sized>(
        &mut self,
        fraction: f64,
        rng: &mut R,
    ) -> Result<Vec<Block>, AllocError> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(AllocError::InvalidFraction { fraction });
        }

        let num_to_release = (self.process_count as f64 * fraction).floor() as usize;
        let mut released = Vec::with_capacity(num_to_release);

        for _ in 0..num_to_release {
            if self.table.is_empty() {
                break;
            }
            let pick = rng.random_range(0..self.table.len());
            let Some((&first_slot, _)) = self.table.get_index(pick) else {
                break;
            };
            released.push(self.release(first_slot)?);
        }

        debug!(
            requested = num_to_release,
            released = released.len(),
            process_count = self.process_count,
            "partial release complete"
        );
        Ok(released)
    }
}
