//! Unified BFAST decoder
//!
//! [`Bfast`] parses a container once and then hands out read-only views of
//! individual buffers. The byte source is chosen by the backend type:
//! a borrowed slice, an owned allocation, or a memory-mapped file (see
//! [`crate::mmap_backend`]). Only the header and range table are read while
//! parsing; buffer bytes are touched when a caller asks for them.
//!
//! A `Bfast` value only exists once parsing succeeded. A source that fails
//! validation yields an error and no decoder, so nothing can be read from it.

use bfast_core::{
    validate_ranges, BfastError, BfastHeader, BufferRange, Malformation, RangeTable,
    Result as CoreResult, StorageBackend,
};
use tracing::debug;

use crate::error::{Error, Result};

/// Parsed, validated container over a storage backend
#[derive(Debug, Clone)]
pub struct Bfast<B: StorageBackend> {
    backend: B,
    header: BfastHeader,
    ranges: Vec<BufferRange>,
}

impl<B: StorageBackend> Bfast<B> {
    /// Parse and validate the container held by `backend`
    pub fn parse(backend: B) -> Result<Self> {
        let bytes = backend.as_slice();
        let (header, ranges) = parse_container(bytes).inspect_err(|e| {
            debug!(error = %e, size = bytes.len(), "rejected BFAST container");
        })?;

        debug!(
            buffers = header.num_buffers,
            data_start = header.data_start,
            data_end = header.data_end,
            byte_order = %header.byte_order,
            size = bytes.len(),
            "parsed BFAST container"
        );

        Ok(Self {
            backend,
            header,
            ranges,
        })
    }

    pub fn header(&self) -> &BfastHeader {
        &self.header
    }

    /// Number of buffers in the container
    pub fn buffer_count(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// All buffer ranges in table order
    pub fn ranges(&self) -> &[BufferRange] {
        &self.ranges
    }

    /// Byte range of buffer `index`
    pub fn range(&self, index: usize) -> Result<BufferRange> {
        self.ranges
            .get(index)
            .copied()
            .ok_or_else(|| self.out_of_range(index))
    }

    /// Borrow the bytes of buffer `index`
    pub fn buffer(&self, index: usize) -> Result<&[u8]> {
        let range = self.range(index)?;
        let bytes = self.backend.as_slice();
        range
            .to_usize_range()
            .and_then(|r| bytes.get(r))
            .ok_or_else(|| {
                BfastError::TooSmall {
                    required: range.end,
                    actual: bytes.len() as u64,
                }
                .into()
            })
    }

    /// Borrow buffer `index` as a slice of plain-old-data elements
    ///
    /// Fails if the byte length is not a multiple of `size_of::<T>()` or the
    /// bytes are not aligned for `T`. Never copies.
    pub fn buffer_as<T: bytemuck::Pod>(&self, index: usize) -> Result<&[T]> {
        let bytes = self.buffer(index)?;
        bytemuck::try_cast_slice(bytes).map_err(|reason| Error::TypedView {
            index,
            type_name: std::any::type_name::<T>(),
            reason,
        })
    }

    /// Iterate over every buffer in table order
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &[u8]> + '_ {
        let bytes = self.backend.as_slice();
        self.ranges
            .iter()
            .map(move |r| &bytes[r.begin as usize..r.end as usize])
    }

    /// The whole data section, padding included
    pub fn data_section(&self) -> &[u8] {
        &self.backend.as_slice()[self.header.data_start as usize..self.header.data_end as usize]
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Release the decoder and return its backend
    pub fn into_backend(self) -> B {
        self.backend
    }

    fn out_of_range(&self, index: usize) -> Error {
        BfastError::IndexOutOfRange {
            index,
            count: self.ranges.len(),
        }
        .into()
    }
}

impl<'a> Bfast<&'a [u8]> {
    /// Decode a container borrowed from memory
    pub fn from_slice(bytes: &'a [u8]) -> Result<Self> {
        Self::parse(bytes)
    }
}

impl Bfast<Vec<u8>> {
    /// Decode a container that takes ownership of its bytes
    pub fn from_vec(bytes: Vec<u8>) -> Result<Self> {
        Self::parse(bytes)
    }
}

/// Decode a container borrowed from memory
pub fn decode(bytes: &[u8]) -> Result<Bfast<&[u8]>> {
    Bfast::from_slice(bytes)
}

/// Validate the header and range table of a complete container
///
/// Every length check happens before the bytes it guards are read, so a
/// truncated source fails with `TooSmall` rather than an out-of-bounds read.
pub fn parse_container(bytes: &[u8]) -> CoreResult<(BfastHeader, Vec<BufferRange>)> {
    let header = BfastHeader::from_bytes(bytes)?;
    let actual = bytes.len() as u64;

    let ranges_end = header
        .ranges_end()
        .ok_or(Malformation::RangeTableOverflow {
            num_buffers: header.num_buffers,
        })?;
    if actual < ranges_end {
        return Err(BfastError::TooSmall {
            required: ranges_end,
            actual,
        });
    }

    let table = RangeTable::new(
        &bytes[BfastHeader::SIZE..],
        header.num_buffers,
        header.byte_order,
    )?;
    validate_ranges(&header, table.iter())?;

    if actual < header.data_end {
        return Err(BfastError::TooSmall {
            required: header.data_end,
            actual,
        });
    }

    Ok((header, table.iter().collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::{encode, Encoder, EncoderConfig};
    use bfast_core::ErrorCategory;

    fn sample() -> Vec<u8> {
        Encoder::new(EncoderConfig::little_endian())
            .encode(&[b"abc".as_slice(), b"", b"xyz12345"])
            .unwrap()
    }

    #[test]
    fn test_decode_buffers() {
        let bytes = sample();
        let bfast = decode(&bytes).unwrap();
        assert_eq!(bfast.buffer_count(), 3);
        assert_eq!(bfast.buffer(0).unwrap(), b"abc");
        assert_eq!(bfast.buffer(1).unwrap(), b"");
        assert_eq!(bfast.buffer(2).unwrap(), b"xyz12345");
        assert_eq!(bfast.range(1).unwrap(), BufferRange::new(128, 128));

        let all: Vec<&[u8]> = bfast.iter().collect();
        assert_eq!(all, [b"abc".as_slice(), b"", b"xyz12345"]);
    }

    #[test]
    fn test_index_out_of_range() {
        let bytes = sample();
        let bfast = decode(&bytes).unwrap();
        for index in [3, usize::MAX] {
            let err = bfast.buffer(index).unwrap_err();
            assert_eq!(err.category(), ErrorCategory::IndexOutOfRange);
            assert!(matches!(
                err,
                Error::Format(BfastError::IndexOutOfRange { count: 3, .. })
            ));
        }
    }

    #[test]
    fn test_rejects_short_source() {
        let err = decode(&[0u8; 10]).unwrap_err();
        assert!(matches!(
            err,
            Error::Format(BfastError::TooSmall {
                required: 32,
                actual: 10
            })
        ));
    }

    #[test]
    fn test_rejects_flipped_magic() {
        let mut bytes = sample();
        bytes[1] ^= 0x01;
        let err = decode(&bytes).unwrap_err();
        assert!(matches!(err.malformation(), Some(Malformation::BadMagic { .. })));
    }

    #[test]
    fn test_rejects_inverted_data_section() {
        let mut bytes = sample();
        bytes[16..24].copy_from_slice(&64u64.to_le_bytes());
        let err = Bfast::from_vec(bytes).unwrap_err();
        assert_eq!(
            err.malformation(),
            Some(Malformation::DataEndBeforeStart {
                data_start: 96,
                data_end: 64
            })
        );
    }

    #[test]
    fn test_rejects_inflated_buffer_count() {
        for count in [4u64, 1_000, u32::MAX as u64, u64::MAX] {
            let mut bytes = sample();
            bytes[24..32].copy_from_slice(&count.to_le_bytes());
            let err = decode(&bytes).unwrap_err();
            assert!(matches!(
                err.category(),
                ErrorCategory::Malformed | ErrorCategory::TooSmall
            ));
        }
    }

    #[test]
    fn test_rejects_truncated_data() {
        let bytes = sample();
        let err = decode(&bytes[..130]).unwrap_err();
        assert!(matches!(
            err,
            Error::Format(BfastError::TooSmall {
                required: 136,
                actual: 130
            })
        ));
    }

    #[test]
    fn test_rejects_overlapping_ranges() {
        let mut bytes = sample();
        // range[2] now begins before range[1] ends
        bytes[64..72].copy_from_slice(&97u64.to_le_bytes());
        let err = decode(&bytes).unwrap_err();
        assert!(matches!(
            err.malformation(),
            Some(Malformation::OverlappingRange { index: 2, .. })
        ));
    }

    #[test]
    fn test_big_endian_container() {
        let bytes = Encoder::new(EncoderConfig::big_endian())
            .encode(&[b"big".as_slice(), b"endian"])
            .unwrap();
        let bfast = decode(&bytes).unwrap();
        assert_eq!(bfast.header().byte_order, bfast_core::ByteOrder::Big);
        assert_eq!(bfast.buffer(0).unwrap(), b"big");
        assert_eq!(bfast.buffer(1).unwrap(), b"endian");
    }

    #[test]
    fn test_typed_view() {
        let values: [u32; 4] = [1, 2, 3, 0xdead_beef];
        let bytes = encode(&[bytemuck::cast_slice::<u32, u8>(&values), b"xyz"]).unwrap();

        // Owned bytes with a u64 backing store keep the container 8-byte aligned
        let mut words = vec![0u64; bytes.len() / 8];
        bytemuck::cast_slice_mut::<u64, u8>(&mut words).copy_from_slice(&bytes);
        let bfast = Bfast::parse(bytemuck::cast_slice::<u64, u8>(&words)).unwrap();

        assert_eq!(bfast.buffer_as::<u32>(0).unwrap(), &values);
        let err = bfast.buffer_as::<u16>(1).unwrap_err();
        assert!(matches!(err, Error::TypedView { index: 1, .. }));
        assert_eq!(err.category(), ErrorCategory::TypeMismatch);

        // Misaligned start on an otherwise valid container
        let aligned = bytemuck::cast_slice::<u64, u8>(&words);
        let mut storage = vec![0u8; aligned.len() + 2];
        let start = if (storage.as_ptr() as usize + 1) % 4 == 0 { 2 } else { 1 };
        storage[start..start + aligned.len()].copy_from_slice(aligned);
        let bfast = Bfast::parse(&storage[start..start + aligned.len()]).unwrap();
        let err = bfast.buffer_as::<u32>(0).unwrap_err();
        assert!(matches!(
            err,
            Error::TypedView {
                reason: bytemuck::PodCastError::TargetAlignmentGreaterAndInputNotAligned,
                ..
            }
        ));
        assert_eq!(err.category(), ErrorCategory::TypeMismatch);
    }

    #[test]
    fn test_data_section() {
        let bytes = sample();
        let bfast = decode(&bytes).unwrap();
        let data = bfast.data_section();
        assert_eq!(data.len(), 40);
        assert_eq!(&data[..3], b"abc");
        assert_eq!(bfast.into_backend().len(), bytes.len());
    }
}
