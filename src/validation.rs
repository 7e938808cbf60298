//! Request validation utilities.

use crate::types::{Error, Result};

/// Validate that a process or resource index is within `[0, bound)`.
pub fn validate_index(index: usize, bound: usize) -> Result<()> {
    if index >= bound {
        return Err(Error::index_out_of_range(index, bound));
    }
    Ok(())
}

/// Validate that a request vector has exactly one component per resource type.
pub fn validate_request_shape(got: usize, expected: usize) -> Result<()> {
    if got != expected {
        return Err(Error::request_shape(got, expected));
    }
    Ok(())
}
