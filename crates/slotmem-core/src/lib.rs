//! Core types, configuration, and errors for the slotmem allocator.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the block and slot records stored in simulated memory, the
//! [`SlotConfig`] that sizes the region, and the error types shared by
//! every operation on it.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod block;
pub mod config;
pub mod error;

pub use block::{Block, Slot};
pub use config::SlotConfig;
pub use error::{AllocError, ConfigError, RangeFault};
