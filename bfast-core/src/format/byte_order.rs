//! Byte order detection and integer codecs for header fields

use super::constants::{MAGIC, MAGIC_SWAPPED};

/// Byte order of the integers stored in a container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ByteOrder {
    Little,
    Big,
}

impl ByteOrder {
    /// Byte order of the running target
    pub const fn native() -> Self {
        if cfg!(target_endian = "big") {
            ByteOrder::Big
        } else {
            ByteOrder::Little
        }
    }

    /// Detect the container byte order from its raw magic bytes
    pub const fn detect(magic: [u8; 8]) -> Option<Self> {
        match u64::from_le_bytes(magic) {
            MAGIC => Some(ByteOrder::Little),
            MAGIC_SWAPPED => Some(ByteOrder::Big),
            _ => None,
        }
    }

    pub const fn read_u64(self, bytes: [u8; 8]) -> u64 {
        match self {
            ByteOrder::Little => u64::from_le_bytes(bytes),
            ByteOrder::Big => u64::from_be_bytes(bytes),
        }
    }

    pub const fn write_u64(self, value: u64) -> [u8; 8] {
        match self {
            ByteOrder::Little => value.to_le_bytes(),
            ByteOrder::Big => value.to_be_bytes(),
        }
    }
}

impl Default for ByteOrder {
    fn default() -> Self {
        Self::native()
    }
}

impl core::fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ByteOrder::Little => write!(f, "little-endian"),
            ByteOrder::Big => write!(f, "big-endian"),
        }
    }
}

/// Read the eight bytes at `offset`; caller guarantees the bounds
#[inline]
pub(crate) fn u64_at(bytes: &[u8], offset: usize, order: ByteOrder) -> u64 {
    let mut raw = [0u8; 8];
    raw.copy_from_slice(&bytes[offset..offset + 8]);
    order.read_u64(raw)
}
