//! BFAST - Binary Buffer Container Implementation
//!
//! Packs an ordered sequence of raw byte buffers into one aligned container
//! and reads any buffer back in O(1) without loading the whole file.
//!
//! ## Architecture
//!
//! - **bfast-core**: Format definitions, alignment arithmetic and validation (no I/O)
//! - **bfast**: Encoder, decoders over memory and memory-mapped files, named buffers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bfast::{Bfast, NamedBuffers};
//!
//! fn example() -> bfast::Result<()> {
//!     let positions: Vec<f32> = vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
//!     let mut container = NamedBuffers::new();
//!     container.push_pod("positions", &positions)?;
//!     container.write_file("mesh.bfast")?;
//!
//!     let bfast = Bfast::open("mesh.bfast")?;
//!     if let Some(bytes) = bfast.buffer_by_name("positions")? {
//!         println!("positions: {} bytes", bytes.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **mmap** (default): `Bfast::open` over a read-only memory mapping
//! - **serde** (default): serde derives on header, byte order and ranges

pub use bfast_core::{
    // Format definitions
    BfastHeader, BufferRange, ByteOrder, Layout, RangeTable, ALIGNMENT, HEADER_SIZE, MAGIC,
    MAGIC_SWAPPED, RANGE_SIZE,
    // Error handling
    BfastError, ErrorCategory, Malformation, NameError,
    // Storage abstraction
    StorageBackend,
    // Alignment and validation utilities
    checked_next_alignment, is_aligned, next_alignment, padding, validate_name, MAX_OFFSET,
};

pub mod decoder;
pub mod encoder;
pub mod error;
#[cfg(feature = "mmap")]
pub mod mmap_backend;
pub mod names;

pub use decoder::{decode, parse_container, Bfast};
pub use encoder::{encode, Encoder, EncoderConfig};
pub use error::{Error, Result};
#[cfg(feature = "mmap")]
pub use mmap_backend::{MappedFile, MmapConfig};
pub use names::{encode_names, parse_names, NameTable, NamedBuffers};
