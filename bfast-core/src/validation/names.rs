//! Buffer name validation
//!
//! Names are stored NUL-terminated in the first buffer, so a name can never
//! contain a NUL byte itself.

use crate::error::{NameError, Result};
use crate::format::constants::MAX_NAME_LEN;

/// Validate a user supplied buffer name
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(NameError::Empty.into());
    }

    if name.len() > MAX_NAME_LEN {
        return Err(NameError::TooLong { len: name.len() }.into());
    }

    if name.bytes().any(|b| b == 0) {
        return Err(NameError::ContainsNul.into());
    }

    Ok(())
}
