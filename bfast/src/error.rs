//! Error types for the BFAST encoder and decoders

use bfast_core::{BfastError, ErrorCategory, Malformation, NameError};

/// Errors returned by encoding, decoding and named-buffer lookups
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Container structure or buffer access rejected by the format rules
    #[error(transparent)]
    Format(#[from] BfastError),

    /// Underlying open, map, read or write failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Names buffer does not list exactly one name per buffer
    #[error("names buffer lists {names} names for {buffers} buffers")]
    NameCount { names: usize, buffers: usize },

    /// Buffer bytes cannot be reinterpreted as the requested element type
    #[error("buffer {index} cannot be viewed as [{type_name}]: {reason:?}")]
    TypedView {
        index: usize,
        type_name: &'static str,
        reason: bytemuck::PodCastError,
    },
}

impl Error {
    /// Get the category of this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Format(e) => e.category(),
            Error::Io(_) => ErrorCategory::Io,
            Error::NameCount { .. } => ErrorCategory::Malformed,
            Error::TypedView { .. } => ErrorCategory::TypeMismatch,
        }
    }

    /// The structural violation, if this is a malformed container
    pub fn malformation(&self) -> Option<Malformation> {
        match self {
            Error::Format(BfastError::Malformed(m)) => Some(*m),
            _ => None,
        }
    }
}

impl From<Malformation> for Error {
    fn from(value: Malformation) -> Self {
        Error::Format(value.into())
    }
}

impl From<NameError> for Error {
    fn from(value: NameError) -> Self {
        Error::Format(value.into())
    }
}

/// Result type for BFAST operations
pub type Result<T> = std::result::Result<T, Error>;
