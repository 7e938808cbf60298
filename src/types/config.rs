//! Configuration structures.
//!
//! Configuration is loaded from a JSON file or falls back to built-in
//! defaults. The default initial state is the classic five-process,
//! three-resource textbook scenario, so the simulator runs with no arguments.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::banker::ResourceState;
use crate::types::Result;

/// Global simulator configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// Initial system state (available/max/allocation).
    #[serde(default)]
    pub initial: InitialState,
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Tracing log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable JSON log formatting.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

/// Initial system state as supplied by the operator.
///
/// Validated against the state invariants when converted via
/// [`InitialState::into_state`]; a config that violates them is rejected,
/// it does not produce a half-consistent simulator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitialState {
    /// Units of each resource type currently unallocated.
    pub available: Vec<u32>,

    /// Declared maximum claim per process per resource type.
    pub max: Vec<Vec<u32>>,

    /// Units currently held per process per resource type.
    pub allocation: Vec<Vec<u32>>,
}

impl InitialState {
    /// Build the validated [`ResourceState`] from these values.
    pub fn into_state(self) -> Result<ResourceState> {
        ResourceState::new(self.available, self.max, self.allocation)
    }
}

impl Default for InitialState {
    /// The textbook scenario: P=5 processes, R=3 resource types.
    fn default() -> Self {
        Self {
            available: vec![3, 3, 2],
            max: vec![
                vec![7, 5, 3],
                vec![3, 2, 2],
                vec![9, 0, 2],
                vec![2, 2, 2],
                vec![4, 3, 3],
            ],
            allocation: vec![
                vec![0, 1, 0],
                vec![2, 0, 0],
                vec![3, 0, 2],
                vec![2, 1, 1],
                vec![0, 0, 2],
            ],
        }
    }
}
