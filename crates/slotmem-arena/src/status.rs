//! Human-readable slot grid.

use std::fmt;

use slotmem_core::Slot;

use crate::allocator::SlotAllocator;

/// Number of columns in the status grid.
pub const COLUMNS: usize = 4;

/// Read-only view that renders every slot's value in four columns.
///
/// With `rows = num_slots / 4`, row `i` shows slots `i`, `i + rows`,
/// `i + 2 * rows`, and `i + 3 * rows`. Slots left over when the slot
/// count is not a multiple of four go on one final row. Empty slots
/// render as `-`.
#[derive(Clone, Copy, Debug)]
pub struct StatusGrid<'a> {
    slots: &'a [Slot],
}

impl<'a> StatusGrid<'a> {
    /// Wrap a slot array for display.
    pub fn new(slots: &'a [Slot]) -> Self {
        Self { slots }
    }

    /// Number of full rows.
    pub fn rows(&self) -> usize {
        self.slots.len() / COLUMNS
    }

    fn write_row(
        &self,
        f: &mut fmt::Formatter<'_>,
        indices: impl Iterator<Item = usize>,
    ) -> fmt::Result {
        for (col, index) in indices.enumerate() {
            if col > 0 {
                f.write_str(" ")?;
            }
            write!(f, "index {index}: {}\t", self.slots[index])?;
        }
        writeln!(f)
    }
}

impl fmt::Display for StatusGrid<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self.rows();
        for row in 0..rows {
            self.write_row(f, (0..COLUMNS).map(|col| row + col * rows))?;
        }
        let tail = rows * COLUMNS;
        if tail < self.slots.len() {
            self.write_row(f, tail..self.slots.len())?;
        }
        Ok(())
    }
}

impl SlotAllocator {
    /// A displayable grid of every slot's value.
    pub fn status(&self) -> StatusGrid<'_> {
        StatusGrid::new(&self.slots)
    }

    /// Print the status grid to standard output.
    pub fn print_status(&self) {
        print!("{}", self.status());
    }
}
