//! Application error types.
//!
//! All errors use `thiserror` for automatic Error trait derivation and provide
//! clear error messages with context.
//!
//! Request-time rejections (claim exceeded, resources unavailable, unsafe
//! result) are *not* errors — they are [`Decision`](crate::banker::Decision)
//! variants. Errors here mean the caller supplied something the core cannot
//! work with at all.

use thiserror::Error;

/// Application result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error enum for the banker core.
#[derive(Error, Debug)]
pub enum Error {
    /// Initial state rejected at construction: dimension mismatch or an
    /// allocation exceeding its declared maximum.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Process or resource index outside `[0, bound)`.
    #[error("index {index} out of range (bound {bound})")]
    IndexOutOfRange { index: usize, bound: usize },

    /// Request vector length does not match the resource count.
    #[error("request has {got} components, expected {expected}")]
    RequestShape { got: usize, expected: usize },

    /// Serialization/deserialization errors (config loading).
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O errors (config loading).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

// Convenience constructors
impl Error {
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    pub fn index_out_of_range(index: usize, bound: usize) -> Self {
        Self::IndexOutOfRange { index, bound }
    }

    pub fn request_shape(got: usize, expected: usize) -> Self {
        Self::RequestShape { got, expected }
    }
}
