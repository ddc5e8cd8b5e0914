//! Range table validation
//!
//! Header invariants are checked by [`BfastHeader::validate`]. This module
//! checks every range against a header that already passed.

use crate::error::{Malformation, Result};
use crate::format::header::check_signed;
use crate::format::{BfastHeader, BufferRange};

/// Validate an ordered range table against its header
///
/// Every range must satisfy `data_start <= begin <= end <= data_end`, and
/// ranges must appear in byte order without overlapping. Checks all entries
/// and stops at the first violation.
pub fn validate_ranges<I>(header: &BfastHeader, ranges: I) -> Result<()>
where
    I: IntoIterator<Item = BufferRange>,
{
    let mut previous_end = header.data_start;

    for (index, range) in ranges.into_iter().enumerate() {
        let index = index as u64;
        let BufferRange { begin, end } = range;

        check_signed("range begin", begin)?;
        check_signed("range end", end)?;
        if begin > end {
            return Err(Malformation::InvertedRange { index, begin, end }.into());
        }
        if begin < header.data_start || end > header.data_end {
            return Err(Malformation::RangeOutOfBounds {
                index,
                begin,
                end,
                data_start: header.data_start,
                data_end: header.data_end,
            }
            .into());
        }
        if begin < previous_end {
            return Err(Malformation::OverlappingRange {
                index,
                begin,
                previous_end,
            }
            .into());
        }

        previous_end = end;
    }

    Ok(())
}
