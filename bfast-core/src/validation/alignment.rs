//! Alignment arithmetic for the BFAST data section
//!
//! Pure functions over byte offsets. `next_alignment`, `is_aligned` and
//! `padding` always agree: `is_aligned(n) == (padding(n) == 0)`.
//!
//! Offsets are defined over `0..=i64::MAX`, the range every header field and
//! range entry is validated against. Use [`checked_next_alignment`] for
//! values that have not been through that check.

use crate::format::constants::ALIGNMENT;

/// Largest offset the alignment functions accept
pub const MAX_OFFSET: u64 = i64::MAX as u64;

/// Align an offset up to a power-of-two boundary, `None` on overflow
pub const fn align_to_boundary(offset: u64, boundary: u64) -> Option<u64> {
    match offset.checked_add(boundary - 1) {
        Some(bumped) => Some(bumped & !(boundary - 1)),
        None => None,
    }
}

/// Smallest multiple of [`ALIGNMENT`] that is `>= offset`, `None` if it
/// does not fit in a `u64`
pub const fn checked_next_alignment(offset: u64) -> Option<u64> {
    align_to_boundary(offset, ALIGNMENT)
}

/// Smallest multiple of [`ALIGNMENT`] that is `>= offset`
///
/// `offset` must not exceed [`MAX_OFFSET`]; the result then always fits.
pub const fn next_alignment(offset: u64) -> u64 {
    debug_assert!(offset <= MAX_OFFSET);
    (offset + (ALIGNMENT - 1)) & !(ALIGNMENT - 1)
}

/// Whether `offset` sits on an [`ALIGNMENT`] boundary
pub const fn is_aligned(offset: u64) -> bool {
    offset % ALIGNMENT == 0
}

/// Zero bytes needed to move `offset` to the next boundary
///
/// Same domain as [`next_alignment`].
pub const fn padding(offset: u64) -> u64 {
    next_alignment(offset) - offset
}
