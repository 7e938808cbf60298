//! Request arbitration: validate, tentatively apply, safety-check, commit or
//! roll back.
//!
//! The arbiter is the sole writer of [`ResourceState`]. Each request runs the
//! full protocol to completion before the next is considered, so every call
//! is one atomic logical unit: any outcome other than `Granted` leaves the
//! state exactly as it was before the call.

use serde::Serialize;

use super::safety::{self, Safety};
use super::state::{ResourceState, Snapshot};
use crate::types::Result;
use crate::validation::{validate_index, validate_request_shape};

/// Outcome of a resource request.
///
/// All three denial variants are expected, recoverable outcomes — the caller
/// may retry later. They are not errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Decision {
    /// Request committed; the system remains safe and can finish in the
    /// given process order.
    Granted(Vec<usize>),
    /// The request would push the process past its declared maximum claim.
    /// `resource` is the first offending resource type.
    DeniedExceedsMaxClaim { resource: usize },
    /// Not enough free units right now; the process must wait.
    /// `resource` is the first resource type in shortfall.
    DeniedInsufficientResources { resource: usize },
    /// Granting would leave the system with no safe finishing order; the
    /// tentative allocation was rolled back.
    DeniedUnsafe,
}

impl Decision {
    pub fn is_granted(&self) -> bool {
        matches!(self, Decision::Granted(_))
    }
}

/// Request arbiter - owns the resource state and enforces the grant protocol.
///
/// NOT a separate actor - callers invoke it directly; one request completes
/// before the next begins. Under concurrent callers the whole arbiter would
/// sit behind a single mutex, never its fields individually.
#[derive(Debug)]
pub struct RequestArbiter {
    state: ResourceState,
}

impl RequestArbiter {
    pub fn new(state: ResourceState) -> Self {
        Self { state }
    }

    /// Read access to the underlying state.
    pub fn state(&self) -> &ResourceState {
        &self.state
    }

    /// Immutable copy of the full state for display.
    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Safety of the current state, without mutating anything. Display
    /// layers call this once at startup to report initial system safety.
    pub fn check_current_safety(&self) -> Safety {
        safety::check(&self.state)
    }

    /// Process a request from process `p` for `amounts` additional units of
    /// each resource type.
    ///
    /// Errors signal caller misuse (bad index, wrong vector length) and
    /// occur before any state change. Denials are normal outcomes carried in
    /// the returned [`Decision`].
    pub fn request(&mut self, p: usize, amounts: &[u32]) -> Result<Decision> {
        validate_index(p, self.state.process_count())?;
        validate_request_shape(amounts.len(), self.state.resource_count())?;

        // Claim check: a process may never ask past its declared maximum.
        let need = self.state.need_row(p);
        if let Some(r) = (0..amounts.len()).find(|&r| amounts[r] > need[r]) {
            tracing::error!(
                "request denied: process={} exceeds max claim on resource={} (asked {}, need {})",
                p,
                r,
                amounts[r],
                need[r]
            );
            return Ok(Decision::DeniedExceedsMaxClaim { resource: r });
        }

        // Availability check: the process must wait for free units.
        let available = self.state.available();
        if let Some(r) = (0..amounts.len()).find(|&r| amounts[r] > available[r]) {
            tracing::warn!(
                "request deferred: process={} short on resource={} (asked {}, available {})",
                p,
                r,
                amounts[r],
                available[r]
            );
            return Ok(Decision::DeniedInsufficientResources { resource: r });
        }

        // Tentative grant, then verify the resulting state is safe.
        self.state.apply_delta(p, amounts);
        match safety::check(&self.state) {
            Safety::Safe(sequence) => {
                tracing::info!("request granted: process={} sequence={:?}", p, sequence);
                Ok(Decision::Granted(sequence))
            }
            Safety::Unsafe => {
                self.state.undo_delta(p, amounts);
                tracing::error!("request denied: process={} would make state unsafe", p);
                Ok(Decision::DeniedUnsafe)
            }
        }
    }
}
