//! Container layout planning
//!
//! Computes where every buffer lands before anything is written. The
//! encoder in the `bfast` crate serializes exactly this plan.

use alloc::vec::Vec;

use super::byte_order::ByteOrder;
use super::constants::{HEADER_SIZE, RANGE_SIZE};
use super::header::{check_signed, BfastHeader};
use super::range::BufferRange;
use crate::error::{Malformation, Result};
use crate::validation::{checked_next_alignment, next_alignment, validate_ranges};

/// Header and range table for an ordered list of buffer sizes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub header: BfastHeader,
    pub ranges: Vec<BufferRange>,
}

impl Layout {
    /// Plan a container holding buffers of the given byte lengths
    ///
    /// The result is validated before it is returned; an error means the
    /// sizes cannot be represented (offsets past `i64::MAX`).
    pub fn plan<I>(sizes: I, byte_order: ByteOrder) -> Result<Self>
    where
        I: IntoIterator<Item = u64>,
    {
        let sizes = sizes.into_iter();
        let mut ranges = Vec::with_capacity(sizes.size_hint().0);

        // The cursor is provisional until the buffer count is known
        let mut cursor = 0u64;
        for size in sizes {
            let begin = cursor;
            let end = begin.checked_add(size).ok_or(overflow("end", size))?;
            check_signed("end", end)?;
            ranges.push(BufferRange { begin, end });
            cursor = next_alignment(end);
        }

        let num_buffers = ranges.len() as u64;
        let ranges_end = num_buffers
            .checked_mul(RANGE_SIZE)
            .and_then(|table| table.checked_add(HEADER_SIZE))
            .ok_or(Malformation::RangeTableOverflow { num_buffers })?;
        let data_start = checked_next_alignment(ranges_end)
            .ok_or(Malformation::RangeTableOverflow { num_buffers })?;

        for range in &mut ranges {
            range.begin = range
                .begin
                .checked_add(data_start)
                .ok_or(overflow("begin", data_start))?;
            range.end = range
                .end
                .checked_add(data_start)
                .ok_or(overflow("end", data_start))?;
        }

        let data_end = ranges.last().map_or(data_start, |r| r.end);
        let header = BfastHeader {
            byte_order,
            data_start,
            data_end,
            num_buffers,
        };

        header.validate()?;
        validate_ranges(&header, ranges.iter().copied())?;

        Ok(Self { header, ranges })
    }

    /// Physical length of the serialized container, including tail padding
    pub fn file_len(&self) -> u64 {
        next_alignment(self.header.data_end)
    }

    /// Header, range table and zero padding up to `data_start`
    pub fn prelude_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.header.data_start as usize);
        bytes.extend_from_slice(&self.header.to_bytes());
        for range in &self.ranges {
            bytes.extend_from_slice(&range.to_bytes(self.header.byte_order));
        }
        bytes.resize(self.header.data_start as usize, 0);
        bytes
    }
}

fn overflow(field: &'static str, value: u64) -> Malformation {
    Malformation::OffsetOverflow { field, value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BfastError;
    use crate::format::range::RangeTable;

    #[test]
    fn test_plan_mixed_sizes() {
        let layout = Layout::plan([3, 0, 8], ByteOrder::Little).unwrap();
        assert_eq!(layout.header.num_buffers, 3);
        assert_eq!(layout.header.data_start, 96);
        assert_eq!(
            layout.ranges,
            [
                BufferRange::new(96, 99),
                BufferRange::new(128, 128),
                BufferRange::new(128, 136),
            ]
        );
        assert_eq!(layout.header.data_end, 136);
        assert_eq!(layout.file_len(), 160);
    }

    #[test]
    fn test_plan_empty() {
        let layout = Layout::plan([0u64; 0], ByteOrder::Big).unwrap();
        assert_eq!(layout.header, BfastHeader::new(ByteOrder::Big));
        assert!(layout.ranges.is_empty());
        assert_eq!(layout.prelude_bytes().len(), 32);
    }

    #[test]
    fn test_prelude_round_trip() {
        let layout = Layout::plan([5, 40, 1], ByteOrder::Big).unwrap();
        let bytes = layout.prelude_bytes();
        assert_eq!(bytes.len() as u64, layout.header.data_start);

        let header = BfastHeader::from_bytes(&bytes).unwrap();
        assert_eq!(header, layout.header);
        let table = RangeTable::new(&bytes[32..], header.num_buffers, header.byte_order).unwrap();
        assert!(table.iter().eq(layout.ranges.iter().copied()));
        assert!(bytes[80..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_plan_rejects_oversized() {
        assert_eq!(
            Layout::plan([u64::MAX], ByteOrder::Little),
            Err(BfastError::Malformed(Malformation::NegativeValue {
                field: "end",
                value: u64::MAX
            }))
        );
        assert_eq!(
            Layout::plan([i64::MAX as u64, 1], ByteOrder::Little),
            Err(BfastError::Malformed(Malformation::NegativeValue {
                field: "end",
                value: (1 << 63) + 1
            }))
        );

        // Second buffer starts at 2^63 and cannot grow by u64::MAX
        assert_eq!(
            Layout::plan([i64::MAX as u64, u64::MAX], ByteOrder::Little),
            Err(BfastError::Malformed(Malformation::OffsetOverflow {
                field: "end",
                value: u64::MAX
            }))
        );
    }
}
