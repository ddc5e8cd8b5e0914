//! Range table definitions
//!
//! The range table follows the header and holds one `(begin, end)` pair of
//! absolute byte offsets per buffer, in buffer order.

use core::ops::Range;

use super::byte_order::{u64_at, ByteOrder};
use super::constants::RANGE_SIZE;
use crate::error::{BfastError, Result};

/// Location of one buffer inside the container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BufferRange {
    pub begin: u64,
    pub end: u64,
}

impl BufferRange {
    pub const SIZE: usize = RANGE_SIZE as usize;

    pub const fn new(begin: u64, end: u64) -> Self {
        Self { begin, end }
    }

    /// Number of bytes in the buffer
    pub const fn len(&self) -> u64 {
        self.end.saturating_sub(self.begin)
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Byte range usable for slicing, `None` if it does not fit in `usize`
    pub fn to_usize_range(&self) -> Option<Range<usize>> {
        let begin = usize::try_from(self.begin).ok()?;
        let end = usize::try_from(self.end).ok()?;
        Some(begin..end)
    }

    pub const fn to_bytes(&self, order: ByteOrder) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        let begin = order.write_u64(self.begin);
        let end = order.write_u64(self.end);
        let mut i = 0;
        while i < 8 {
            bytes[i] = begin[i];
            bytes[8 + i] = end[i];
            i += 1;
        }
        bytes
    }
}

/// Borrowed view over a serialized range table
///
/// Entries are decoded on access, so the table never needs to be copied out
/// of the backing storage.
#[derive(Debug, Clone, Copy)]
pub struct RangeTable<'a> {
    bytes: &'a [u8],
    order: ByteOrder,
}

impl<'a> RangeTable<'a> {
    /// Wrap `count` entries at the start of `bytes`
    pub fn new(bytes: &'a [u8], count: u64, order: ByteOrder) -> Result<Self> {
        let required = count.checked_mul(RANGE_SIZE).unwrap_or(u64::MAX);
        if (bytes.len() as u64) < required {
            return Err(BfastError::TooSmall {
                required,
                actual: bytes.len() as u64,
            });
        }
        Ok(Self {
            bytes: &bytes[..required as usize],
            order,
        })
    }

    pub fn len(&self) -> usize {
        self.bytes.len() / Self::ENTRY
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Decode entry `index`
    pub fn get(&self, index: usize) -> Option<BufferRange> {
        if index >= self.len() {
            return None;
        }
        let offset = index * Self::ENTRY;
        Some(BufferRange {
            begin: u64_at(self.bytes, offset, self.order),
            end: u64_at(self.bytes, offset + 8, self.order),
        })
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = BufferRange> + 'a {
        let order = self.order;
        self.bytes
            .chunks_exact(Self::ENTRY)
            .map(move |entry| BufferRange {
                begin: u64_at(entry, 0, order),
                end: u64_at(entry, 8, order),
            })
    }

    const ENTRY: usize = BufferRange::SIZE;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_table() {
        let mut bytes = [0u8; 32];
        bytes[..16].copy_from_slice(&BufferRange::new(64, 67).to_bytes(ByteOrder::Big));
        bytes[16..].copy_from_slice(&BufferRange::new(96, 96).to_bytes(ByteOrder::Big));

        let table = RangeTable::new(&bytes, 2, ByteOrder::Big).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(0), Some(BufferRange::new(64, 67)));
        assert_eq!(table.get(1).map(|r| r.is_empty()), Some(true));
        assert_eq!(table.get(2), None);
        assert_eq!(table.iter().len(), 2);
        assert_eq!(table.iter().map(|r| r.len()).sum::<u64>(), 3);
    }

    #[test]
    fn test_range_table_too_small() {
        assert_eq!(
            RangeTable::new(&[0u8; 20], 2, ByteOrder::Little).err(),
            Some(BfastError::TooSmall {
                required: 32,
                actual: 20
            })
        );
        assert!(RangeTable::new(&[], u64::MAX, ByteOrder::Little).is_err());
    }
}
