//! Region sizing and allocator tuning.

use crate::error::ConfigError;

/// Configuration for a slot allocator.
///
/// All sizes other than the `*_slots_*` fields are in capacity units;
/// one slot holds `slot_size` units. Checked by
/// [`validate`](SlotConfig::validate) when an allocator is built.
#[derive(Clone, Debug, PartialEq)]
pub struct SlotConfig {
    /// Total capacity of the region in units.
    ///
    /// Default: 1024. Must be a non-zero multiple of `slot_size`.
    pub mem_capacity: usize,

    /// Units held by each slot. Default: 4.
    pub slot_size: usize,

    /// Largest block in units. `largest_block / slot_size` gives the
    /// maximum block length in slots (rounded down).
    ///
    /// Default: 100 (25 slots at the default slot size).
    pub largest_block: usize,

    /// Smallest block length in slots. Default: 1.
    pub min_slots_per_block: usize,

    /// Payload written into blocks synthesized by the fill routine. Default: 5.
    pub fill_value: u32,

    /// Fraction of live blocks freed by the demo's partial release. Default: 0.5.
    pub release_fraction: f64,

    /// Size draws allowed at one cursor position before fill gives up.
    ///
    /// Default: 1024. Only reachable when the block bounds are
    /// inconsistent with the remaining space.
    pub max_fill_retries: u32,
}

impl SlotConfig {
    /// Default region capacity in units.
    pub const DEFAULT_MEM_CAPACITY: usize = 1024;

    /// Default slot size in units.
    pub const DEFAULT_SLOT_SIZE: usize = 4;

    /// Default largest block in units.
    pub const DEFAULT_LARGEST_BLOCK: usize = 100;

    /// Default minimum block length in slots.
    pub const DEFAULT_MIN_SLOTS_PER_BLOCK: usize = 1;

    /// Default payload for filled blocks.
    pub const DEFAULT_FILL_VALUE: u32 = 5;

    /// Default partial release fraction.
    pub const DEFAULT_RELEASE_FRACTION: f64 = 0.5;

    /// Default retry bound for the fill routine.
    pub const DEFAULT_MAX_FILL_RETRIES: u32 = 1024;

    /// Create a config for the given capacity and slot size.
    ///
    /// Uses default values for all other parameters.
    pub fn new(mem_capacity: usize, slot_size: usize) -> Self {
        Self {
            mem_capacity,
            slot_size,
            largest_block: Self::DEFAULT_LARGEST_BLOCK,
            min_slots_per_block: Self::DEFAULT_MIN_SLOTS_PER_BLOCK,
            fill_value: Self::DEFAULT_FILL_VALUE,
            release_fraction: Self::DEFAULT_RELEASE_FRACTION,
            max_fill_retries: Self::DEFAULT_MAX_FILL_RETRIES,
        }
    }

    /// Set the largest block size in units.
    pub fn with_largest_block(mut self, largest_block: usize) -> Self {
        self.largest_block = largest_block;
        self
    }

    /// Set the minimum block length in slots.
    pub fn with_min_slots_per_block(mut self, min: usize) -> Self {
        self.min_slots_per_block = min;
        self
    }

    /// Set the payload used by the fill routine.
    pub fn with_fill_value(mut self, value: u32) -> Self {
        self.fill_value = value;
        self
    }

    /// Set the partial release fraction.
    pub fn with_release_fraction(mut self, fraction: f64) -> Self {
        self.release_fraction = fraction;
        self
    }

    /// Set the fill retry bound.
    pub fn with_max_fill_retries(mut self, retries: u32) -> Self {
        self.max_fill_retries = retries;
        self
    }

    /// Number of slots in the region.
    ///
    /// Zero if `slot_size` is zero.
    pub fn num_slots(&self) -> usize {
        self.mem_capacity.checked_div(self.slot_size).unwrap_or(0)
    }

    /// Maximum block length in slots.
    pub fn max_slots_per_block(&self) -> usize {
        self.largest_block.checked_div(self.slot_size).unwrap_or(0)
    }

    /// Check structural invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint, checked in field order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slot_size == 0 {
            return Err(ConfigError::ZeroSlotSize);
        }
        if self.mem_capacity % self.slot_size != 0 {
            return Err(ConfigError::CapacityNotMultiple {
                mem_capacity: self.mem_capacity,
                slot_size: self.slot_size,
            });
        }
        let num_slots = self.num_slots();
        if num_slots == 0 {
            return Err(ConfigError::EmptyRegion);
        }
        if self.min_slots_per_block == 0 {
            return Err(ConfigError::ZeroMinBlock);
        }
        let max = self.max_slots_per_block();
        if self.min_slots_per_block > max {
            return Err(ConfigError::BlockBoundsInverted {
                min: self.min_slots_per_block,
                max,
            });
        }
        if self.min_slots_per_block > num_slots {
            return Err(ConfigError::BlockLargerThanRegion {
                min: self.min_slots_per_block,
                num_slots,
            });
        }
        if self.max_fill_retries == 0 {
            return Err(ConfigError::ZeroFillRetries);
        }
        if !(0.0..=1.0).contains(&self.release_fraction) {
            return Err(ConfigError::InvalidReleaseFraction {
                value: self.release_fraction,
            });
        }
        Ok(())
    }
}

impl Default for SlotConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MEM_CAPACITY, Self::DEFAULT_SLOT_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_give_256_slots_of_at_most_25() {
        let config = SlotConfig::default();
        assert_eq!(config.num_slots(), 256);
        assert_eq!(config.max_slots_per_block(), 25);
        assert_eq!(config.min_slots_per_block, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_slot_size_rejected() {
        let config = SlotConfig::new(1024, 0);
        assert_eq!(config.num_slots(), 0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroSlotSize));
    }

    #[test]
    fn ragged_capacity_rejected() {
        let config = SlotConfig::new(1023, 4);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::CapacityNotMultiple { .. })
        ));
    }

    #[test]
    fn empty_region_rejected() {
        assert_eq!(
            SlotConfig::new(0, 4).validate(),
            Err(ConfigError::EmptyRegion)
        );
    }

    #[test]
    fn inverted_bounds_rejected() {
        let config = SlotConfig::default().with_min_slots_per_block(30);
        assert_eq!(
            config.validate(),
            Err(ConfigError::BlockBoundsInverted { min: 30, max: 25 })
        );
    }

    #[test]
    fn min_block_larger_than_region_rejected() {
        let config = SlotConfig::new(16, 4)
            .with_largest_block(40)
            .with_min_slots_per_block(5);
        assert_eq!(
            config.validate(),
            Err(ConfigError::BlockLargerThanRegion {
                min: 5,
                num_slots: 4
            })
        );
    }

    #[test]
    fn zero_retries_rejected() {
        let config = SlotConfig::default().with_max_fill_retries(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroFillRetries));
    }

    #[test]
    fn nan_fraction_rejected() {
        let config = SlotConfig::default().with_release_fraction(f64::NAN);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidReleaseFraction { .. })
        ));
    }

    #[test]
    fn small_region_for_scenarios() {
        let config = SlotConfig::new(32, 4)
            .with_largest_block(8)
            .with_min_slots_per_block(2);
        assert_eq!(config.num_slots(), 8);
        assert_eq!(config.max_slots_per_block(), 2);
        assert!(config.validate().is_ok());
    }
}
