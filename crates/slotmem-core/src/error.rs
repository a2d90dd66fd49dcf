//! Error types for the slotmem allocator.
//!
//! [`AllocError`] covers caller contract violations and runtime failures
//! of allocator operations. [`ConfigError`] covers inconsistent region
//! sizing detected by [`SlotConfig::validate`](crate::SlotConfig::validate).

use std::error::Error;
use std::fmt;

/// Why a block range was rejected by `allocate`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RangeFault {
    /// `last_slot` is at or past the end of memory.
    OutOfBounds {
        /// Number of slots in the region.
        num_slots: usize,
    },
    /// `first_slot > last_slot`.
    Reversed,
    /// A slot in the range already belongs to another block.
    Overlaps {
        /// First occupied slot found inside the range.
        slot: usize,
    },
    /// The block length is outside the configured bounds.
    LengthOutOfBounds {
        /// Length of the rejected block in slots.
        len: usize,
        /// Minimum allowed length.
        min: usize,
        /// Maximum allowed length.
        max: usize,
    },
}

impl fmt::Display for RangeFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { num_slots } => {
                write!(f, "range exceeds memory of {num_slots} slots")
            }
            Self::Reversed => write!(f, "first slot is after last slot"),
            Self::Overlaps { slot } => write!(f, "slot {slot} is already occupied"),
            Self::LengthOutOfBounds { len, min, max } => {
                write!(f, "length {len} outside [{min}, {max}]")
            }
        }
    }
}

/// Errors from allocator operations.
#[derive(Clone, Debug, PartialEq)]
pub enum AllocError {
    /// A block handed to `allocate` violates the caller contract.
    InvalidBlockRange {
        /// First slot of the rejected block.
        first_slot: usize,
        /// Last slot of the rejected block.
        last_slot: usize,
        /// Which part of the contract was broken.
        fault: RangeFault,
    },
    /// No block starts at the given slot.
    NotAllocated {
        /// The unknown first-slot key.
        first_slot: usize,
    },
    /// Fill could not place any block at the vacancy cursor.
    UnfillableRegion {
        /// Slot where placement was attempted.
        cursor: usize,
        /// Vacant slots left between the cursor and the end of memory.
        remaining: usize,
    },
    /// Release fraction is NaN or outside `[0, 1]`.
    InvalidFraction {
        /// The rejected fraction.
        fraction: f64,
    },
    /// The allocator was built from an invalid configuration.
    Config(ConfigError),
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBlockRange {
                first_slot,
                last_slot,
                fault,
            } => {
                write!(f, "invalid block range {first_slot}-{last_slot}: {fault}")
            }
            Self::NotAllocated { first_slot } => {
                write!(f, "no block allocated at slot {first_slot}")
            }
            Self::UnfillableRegion { cursor, remaining } => {
                write!(
                    f,
                    "no block size fits the {remaining} slots remaining at slot {cursor}"
                )
            }
            Self::InvalidFraction { fraction } => {
                write!(f, "release fraction must be in [0, 1], got {fraction}")
            }
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl Error for AllocError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for AllocError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Errors detected by [`SlotConfig::validate`](crate::SlotConfig::validate).
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// `slot_size` is zero.
    ZeroSlotSize,
    /// `mem_capacity` is not a whole number of slots.
    CapacityNotMultiple {
        /// Configured capacity.
        mem_capacity: usize,
        /// Configured slot size.
        slot_size: usize,
    },
    /// The region holds no slots.
    EmptyRegion,
    /// `min_slots_per_block` is zero.
    ZeroMinBlock,
    /// `min_slots_per_block` exceeds `max_slots_per_block`.
    BlockBoundsInverted {
        /// Minimum block length in slots.
        min: usize,
        /// Maximum block length in slots.
        max: usize,
    },
    /// The minimum block length does not fit in the region.
    BlockLargerThanRegion {
        /// Minimum block length in slots.
        min: usize,
        /// Number of slots in the region.
        num_slots: usize,
    },
    /// `max_fill_retries` is zero.
    ZeroFillRetries,
    /// `release_fraction` is NaN or outside `[0, 1]`.
    InvalidReleaseFraction {
        /// The rejected fraction.
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroSlotSize => write!(f, "slot_size must be at least 1"),
            Self::CapacityNotMultiple {
                mem_capacity,
                slot_size,
            } => {
                write!(
                    f,
                    "mem_capacity {mem_capacity} is not a multiple of slot_size {slot_size}"
                )
            }
            Self::EmptyRegion => write!(f, "region has zero slots"),
            Self::ZeroMinBlock => write!(f, "min_slots_per_block must be at least 1"),
            Self::BlockBoundsInverted { min, max } => {
                write!(
                    f,
                    "min_slots_per_block {min} exceeds max_slots_per_block {max}"
                )
            }
            Self::BlockLargerThanRegion { min, num_slots } => {
                write!(
                    f,
                    "min_slots_per_block {min} exceeds region of {num_slots} slots"
                )
            }
            Self::ZeroFillRetries => write!(f, "max_fill_retries must be at least 1"),
            Self::InvalidReleaseFraction { value } => {
                write!(f, "release_fraction must be in [0, 1], got {value}")
            }
        }
    }
}

impl Error for ConfigError {}
