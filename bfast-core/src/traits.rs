//! Storage backend abstraction for BFAST decoders
//!
//! A backend hands the decoder a contiguous byte view of a complete
//! container. The view may be an owned allocation, a borrowed block or a
//! memory mapping; the decoder only ever reads the parts it needs.

/// Trait for backends that can hold container bytes
pub trait StorageBackend {
    /// Get the full container bytes
    fn as_slice(&self) -> &[u8];

    /// Get the size of the data in bytes
    fn size(&self) -> usize {
        self.as_slice().len()
    }
}

impl StorageBackend for &[u8] {
    fn as_slice(&self) -> &[u8] {
        self
    }
}

impl<const N: usize> StorageBackend for [u8; N] {
    fn as_slice(&self) -> &[u8] {
        self
    }
}

#[cfg(feature = "alloc")]
impl StorageBackend for alloc::vec::Vec<u8> {
    fn as_slice(&self) -> &[u8] {
        self
    }
}

#[cfg(feature = "alloc")]
impl StorageBackend for alloc::boxed::Box<[u8]> {
    fn as_slice(&self) -> &[u8] {
        self
    }
}

#[cfg(feature = "alloc")]
impl StorageBackend for alloc::sync::Arc<[u8]> {
    fn as_slice(&self) -> &[u8] {
        self
    }
}
