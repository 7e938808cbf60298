//! Core types for the banker kernel.
//!
//! This module provides foundational types used throughout the system:
//! - **Errors**: Application error types with thiserror derives
//! - **Config**: Configuration structures for observability and initial state

mod config;
mod errors;

pub use config::{Config, InitialState, ObservabilityConfig};
pub use errors::{Error, Result};
