#![no_std]

//! BFAST Core - Binary Buffer Container Format Definitions
//!
//! This crate provides the wire format, alignment arithmetic and validation
//! rules for BFAST containers: a header, a table of byte ranges and an
//! aligned data section holding an ordered sequence of raw buffers.
//!
//! Nothing here performs I/O. Encoding sinks and file-backed decoding live in
//! the `bfast` crate.

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod error;
pub mod format;
pub mod traits;
pub mod validation;

pub use error::*;
pub use format::*;
pub use traits::StorageBackend;
pub use validation::{
    checked_next_alignment, is_aligned, next_alignment, padding, validate_name, validate_ranges,
    MAX_OFFSET,
};
