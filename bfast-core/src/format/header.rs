//! Core BFAST header format definitions
//!
//! The header is four 8-byte integers at the start of every container:
//!
//! | Field       | Offset | Size |
//! |-------------|--------|------|
//! | magic       | 0      | 8    |
//! | data_start  | 8      | 8    |
//! | data_end    | 16     | 8    |
//! | num_buffers | 24     | 8    |
//!
//! All integers use the byte order announced by the magic.

use super::byte_order::{u64_at, ByteOrder};
use super::constants::{ALIGNMENT, HEADER_SIZE, MAGIC, RANGE_SIZE};
use crate::error::{BfastError, Malformation, Result};
use crate::validation::{is_aligned, next_alignment};

/// Fixed-size header for BFAST containers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BfastHeader {
    /// Byte order recorded by the magic
    pub byte_order: ByteOrder,
    /// Offset of the first byte of the data section
    pub data_start: u64,
    /// Offset one past the last data byte (excludes trailing padding)
    pub data_end: u64,
    /// Number of buffers in the range table
    pub num_buffers: u64,
}

impl BfastHeader {
    /// Size of the header in bytes
    pub const SIZE: usize = HEADER_SIZE as usize;

    /// Header of an empty container
    pub const fn new(byte_order: ByteOrder) -> Self {
        let data_start = next_alignment(HEADER_SIZE);
        Self {
            byte_order,
            data_start,
            data_end: data_start,
            num_buffers: 0,
        }
    }

    /// Offset one past the end of the range table, `None` on overflow
    pub const fn ranges_end(&self) -> Option<u64> {
        match self.num_buffers.checked_mul(RANGE_SIZE) {
            Some(table) => HEADER_SIZE.checked_add(table),
            None => None,
        }
    }

    /// True when the container was written with the opposite byte order
    pub fn is_swapped(&self) -> bool {
        self.byte_order != ByteOrder::native()
    }

    /// Check the header invariants
    ///
    /// Checks run in a fixed order and the first violation is reported.
    pub fn validate(&self) -> Result<()> {
        check_signed("data_start", self.data_start)?;
        check_signed("data_end", self.data_end)?;
        if self.data_end < self.data_start {
            return Err(Malformation::DataEndBeforeStart {
                data_start: self.data_start,
                data_end: self.data_end,
            }
            .into());
        }

        check_signed("num_buffers", self.num_buffers)?;
        if self.data_start < HEADER_SIZE {
            return Err(Malformation::DataStartInHeader {
                data_start: self.data_start,
            }
            .into());
        }
        let ranges_end = self.ranges_end().ok_or(Malformation::RangeTableOverflow {
            num_buffers: self.num_buffers,
        })?;
        if ranges_end > self.data_start {
            return Err(Malformation::RangesOverlapData {
                ranges_end,
                data_start: self.data_start,
            }
            .into());
        }

        if !is_aligned(self.data_start) {
            return Err(Malformation::UnalignedDataStart {
                data_start: self.data_start,
            }
            .into());
        }

        Ok(())
    }

    /// Parse and validate a header from the start of `bytes`
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < Self::SIZE {
            return Err(BfastError::TooSmall {
                required: HEADER_SIZE,
                actual: bytes.len() as u64,
            });
        }

        let mut magic = [0u8; 8];
        magic.copy_from_slice(&bytes[0..8]);
        let byte_order = ByteOrder::detect(magic).ok_or(Malformation::BadMagic {
            found: u64::from_le_bytes(magic),
        })?;

        let header = Self {
            byte_order,
            data_start: u64_at(bytes, 8, byte_order),
            data_end: u64_at(bytes, 16, byte_order),
            num_buffers: u64_at(bytes, 24, byte_order),
        };
        header.validate()?;
        Ok(header)
    }

    /// Serialize the header in its own byte order
    pub const fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        let fields = [MAGIC, self.data_start, self.data_end, self.num_buffers];

        let mut i = 0;
        while i < fields.len() {
            let raw = self.byte_order.write_u64(fields[i]);
            let mut j = 0;
            while j < 8 {
                bytes[i * 8 + j] = raw[j];
                j += 1;
            }
            i += 1;
        }

        bytes
    }
}

impl Default for BfastHeader {
    fn default() -> Self {
        Self::new(ByteOrder::native())
    }
}

/// Reject values a signed 64-bit reader would see as negative
pub(crate) fn check_signed(field: &'static str, value: u64) -> Result<()> {
    if value > i64::MAX as u64 {
        return Err(Malformation::NegativeValue { field, value }.into());
    }
    Ok(())
}

const _: () = assert!(ALIGNMENT.is_power_of_two());
