//! Format constants for the BFAST specification

/// Magic value stored in the first eight bytes, in the producer's byte order
pub const MAGIC: u64 = 0xBFA5;

/// Magic as seen by a reader whose byte order differs from the producer's
pub const MAGIC_SWAPPED: u64 = MAGIC.swap_bytes();

/// Alignment boundary for the data section and every buffer start
pub const ALIGNMENT: u64 = 32;

/// Size of the fixed header in bytes
pub const HEADER_SIZE: u64 = 32;

/// Size of one range table entry (begin, end) in bytes
pub const RANGE_SIZE: u64 = 16;

/// Maximum length of a buffer name in bytes
pub const MAX_NAME_LEN: usize = 1024;

/// Name recorded for the names buffer itself
pub const NAMES_BUFFER_NAME: &str = "";
