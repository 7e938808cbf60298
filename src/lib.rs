//! # Banker Core - Deadlock-Avoidant Resource Allocation
//!
//! Rust implementation of the Banker's Algorithm providing:
//! - Validated system state (available vector, allocation and max matrices)
//! - Safety scan producing a deterministic safe finishing order
//! - Request arbitration with tentative apply, safety check, and exact
//!   rollback on denial
//!
//! ## Architecture
//!
//! The arbiter follows a single-owner model where `RequestArbiter` owns all
//! mutable state:
//! ```text
//!                   ┌───────────────────────────────┐
//!   request(p, r) → │        RequestArbiter         │
//!                   │  ┌───────────┐ ┌───────────┐  │
//!                   │  │ Resource  │ │  Safety   │  │
//!                   │  │  State    │ │   Scan    │  │
//!                   │  └───────────┘ └───────────┘  │
//!                   └───────────────────────────────┘
//! ```
//!
//! Display layers only ever call `request`, `check_current_safety`, and
//! `snapshot`; every denial leaves the state identical to before the call.

// Enforce strict safety at compile time
#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]

// Re-export public API
pub mod banker;
pub mod types;
pub mod validation;

// Internal utilities
pub mod observability;

pub use banker::{Decision, RequestArbiter, ResourceState, Safety, Snapshot};
pub use types::{Config, Error, InitialState, Result};
