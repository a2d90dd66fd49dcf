//! slotmem: a fixed-slot memory allocator simulation.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the slotmem sub-crates and hosts the fixed demo sequence run by the
//! `slotmem` binary.
//!
//! # Quick start
//!
//! ```rust
//! use slotmem::prelude::*;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(1);
//! let mut alloc = SlotAllocator::default();
//! alloc.fill_empty_memory(&mut rng).unwrap();
//! assert!(alloc.is_full());
//!
//! let live = alloc.process_count();
//! let released = alloc.release_percent(0.5, &mut rng).unwrap();
//! assert_eq!(released.len(), live / 2);
//! assert_eq!(alloc.process_count(), live - released.len());
//!
//! alloc.compact();
//! assert!(alloc.check_invariants().is_ok());
//! assert_eq!(alloc.fragmentation().ratio, 0.0);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `slotmem-core` | `Block`, `Slot`, `SlotConfig`, error types |
//! | [`arena`] | `slotmem-arena` | `SlotAllocator` and its reports |
//! | [`demo`] | this crate | The fill, release, compact demo sequence |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, configuration, and errors (`slotmem-core`).
pub use slotmem_core as types;

/// The allocator and its reports (`slotmem-arena`).
pub use slotmem_arena as arena;

pub mod demo;

/// Commonly used types, importable with `use slotmem::prelude::*`.
pub mod prelude {
    pub use slotmem_arena::{
        CompactionReport, FragmentationStats, InvariantViolation, SlotAllocator, StatusGrid,
    };
    pub use slotmem_core::{AllocError, Block, ConfigError, RangeFault, Slot, SlotConfig};
}
