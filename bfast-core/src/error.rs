//! Error types for BFAST operations

use core::fmt;

/// Structural invariant that a container header or range table violated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Malformation {
    /// First eight bytes are neither the same-endian nor the swapped magic
    BadMagic { found: u64 },
    /// A stored field is above `i64::MAX`, i.e. negative for signed writers
    NegativeValue { field: &'static str, value: u64 },
    /// Computing an offset for `field` overflowed 64 bits
    OffsetOverflow { field: &'static str, value: u64 },
    /// Data section ends before it starts
    DataEndBeforeStart { data_start: u64, data_end: u64 },
    /// Data section begins inside the fixed header
    DataStartInHeader { data_start: u64 },
    /// Data section is not on an alignment boundary
    UnalignedDataStart { data_start: u64 },
    /// `header_size + num_buffers * range_size` does not fit in 64 bits
    RangeTableOverflow { num_buffers: u64 },
    /// Header plus range table run past the start of the data section
    RangesOverlapData { ranges_end: u64, data_start: u64 },
    /// A range begins after it ends
    InvertedRange { index: u64, begin: u64, end: u64 },
    /// A range lies partly outside `[data_start, data_end]`
    RangeOutOfBounds {
        index: u64,
        begin: u64,
        end: u64,
        data_start: u64,
        data_end: u64,
    },
    /// A range starts before the previous one ended
    OverlappingRange { index: u64, begin: u64, previous_end: u64 },
}

impl fmt::Display for Malformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Malformation::BadMagic { found } => write!(f, "bad magic {found:#018x}"),
            Malformation::NegativeValue { field, value } => {
                write!(f, "{field} is negative when read as i64 ({value:#x})")
            }
            Malformation::OffsetOverflow { field, value } => {
                write!(f, "{field} offset overflows after adding {value}")
            }
            Malformation::DataEndBeforeStart {
                data_start,
                data_end,
            } => write!(f, "data_end {data_end} is before data_start {data_start}"),
            Malformation::DataStartInHeader { data_start } => {
                write!(f, "data_start {data_start} lies inside the header")
            }
            Malformation::UnalignedDataStart { data_start } => {
                write!(f, "data_start {data_start} is not aligned")
            }
            Malformation::RangeTableOverflow { num_buffers } => {
                write!(f, "range table for {num_buffers} buffers overflows")
            }
            Malformation::RangesOverlapData {
                ranges_end,
                data_start,
            } => write!(
                f,
                "range table ends at {ranges_end}, past data_start {data_start}"
            ),
            Malformation::InvertedRange { index, begin, end } => {
                write!(f, "range {index} is inverted ({begin}..{end})")
            }
            Malformation::RangeOutOfBounds {
                index,
                begin,
                end,
                data_start,
                data_end,
            } => write!(
                f,
                "range {index} ({begin}..{end}) outside data section {data_start}..{data_end}"
            ),
            Malformation::OverlappingRange {
                index,
                begin,
                previous_end,
            } => write!(
                f,
                "range {index} begins at {begin}, before previous end {previous_end}"
            ),
        }
    }
}

/// Reasons a buffer name is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameError {
    Empty,
    TooLong { len: usize },
    ContainsNul,
    InvalidUtf8 { index: usize },
}

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            NameError::Empty => write!(f, "buffer name is empty"),
            NameError::TooLong { len } => write!(f, "buffer name is {len} bytes long"),
            NameError::ContainsNul => write!(f, "buffer name contains a NUL byte"),
            NameError::InvalidUtf8 { index } => write!(f, "name {index} is not valid UTF-8"),
        }
    }
}

/// Errors that can occur during BFAST operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BfastError {
    /// Header or range table violates a structural invariant
    Malformed(Malformation),
    /// Source is shorter than the header, range table or data section requires
    TooSmall { required: u64, actual: u64 },
    /// Requested buffer index is not below the buffer count
    IndexOutOfRange { index: usize, count: usize },
    /// Buffer name rejected by the naming convention
    InvalidName(NameError),
}

/// Coarse classification of errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Malformed,
    TooSmall,
    IndexOutOfRange,
    InvalidName,
    /// Buffer bytes do not fit the element type a caller asked for
    TypeMismatch,
    Io,
}

impl BfastError {
    /// Get the category of this error
    pub const fn category(&self) -> ErrorCategory {
        match self {
            BfastError::Malformed(_) => ErrorCategory::Malformed,
            BfastError::TooSmall { .. } => ErrorCategory::TooSmall,
            BfastError::IndexOutOfRange { .. } => ErrorCategory::IndexOutOfRange,
            BfastError::InvalidName(_) => ErrorCategory::InvalidName,
        }
    }
}

impl From<Malformation> for BfastError {
    fn from(value: Malformation) -> Self {
        BfastError::Malformed(value)
    }
}

impl From<NameError> for BfastError {
    fn from(value: NameError) -> Self {
        BfastError::InvalidName(value)
    }
}

impl fmt::Display for BfastError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BfastError::Malformed(m) => write!(f, "Malformed BFAST container: {m}"),
            BfastError::TooSmall { required, actual } => write!(
                f,
                "Source too small: {required} bytes required, {actual} available"
            ),
            BfastError::IndexOutOfRange { index, count } => {
                write!(f, "Buffer index {index} out of range (count {count})")
            }
            BfastError::InvalidName(e) => write!(f, "Invalid buffer name: {e}"),
        }
    }
}

impl core::error::Error for BfastError {}

/// Result type for BFAST operations
pub type Result<T> = core::result::Result<T, BfastError>;
