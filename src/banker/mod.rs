//! Banker - deadlock-avoidant resource allocation.
//!
//! The arbiter owns all mutable state and processes one request to
//! completion at a time. Subsystems (state, safety scan) are plain structs
//! and functions used by the arbiter, not separate actors.

pub mod arbiter;
pub mod safety;
pub mod state;

pub use arbiter::{Decision, RequestArbiter};
pub use safety::Safety;
pub use state::{ResourceState, Snapshot};
