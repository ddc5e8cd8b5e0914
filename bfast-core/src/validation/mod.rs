//! Validation utilities for the BFAST format
//!
//! Pure functions with no I/O: alignment arithmetic, range table checks and
//! buffer name rules.

pub mod alignment;
pub mod container;
pub mod names;

pub use alignment::{
    align_to_boundary, checked_next_alignment, is_aligned, next_alignment, padding, MAX_OFFSET,
};
pub use container::validate_ranges;
pub use names::validate_name;
