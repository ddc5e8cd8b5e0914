//! Binary format definitions for the BFAST container
//!
//! Pure data structure definitions for the wire format. No I/O.

pub mod byte_order;
pub mod constants;
pub mod header;
#[cfg(feature = "alloc")]
pub mod layout;
pub mod range;

pub use byte_order::ByteOrder;
pub use constants::*;
pub use header::BfastHeader;
#[cfg(feature = "alloc")]
pub use layout::Layout;
pub use range::{BufferRange, RangeTable};
