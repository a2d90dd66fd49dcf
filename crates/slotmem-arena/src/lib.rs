//! Fixed-slot allocator with random fill, partial release, and compaction.
//!
//! A [`SlotAllocator`] owns a region of equal-size slots, an allocation
//! table keyed by each block's first slot, and a count of live blocks.
//!
//! # Architecture
//!
//! ```text
//! SlotAllocator
//! ├── slots: Vec<Slot>             (Empty | Occupied(Block) per slot)
//! ├── table: IndexMap<usize, Block> (first_slot → block, O(1) random pick)
//! └── process_count                 (always == table.len())
//! ```
//!
//! # Operations
//!
//! - **allocate / release:** place or free one block ([`allocator`]).
//! - **fill_empty_memory / release_percent:** randomized churn driven by
//!   an injected [`rand::Rng`] ([`churn`]).
//! - **compact:** slide every block toward slot 0 ([`compact`]).
//! - **status / fragmentation:** read-only reports ([`status`], [`stats`]).
//!
//! All mutation takes `&mut self`, so each operation is a single
//! exclusive critical section over both the slots and the table.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod allocator;
pub mod churn;
pub mod compact;
pub mod invariant;
pub mod stats;
pub mod status;

pub use allocator::SlotAllocator;
pub use compact::CompactionReport;
pub use invariant::InvariantViolation;
pub use stats::FragmentationStats;
pub use status::StatusGrid;
