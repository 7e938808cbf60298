//! System resource state: available vector plus allocation and max matrices.
//!
//! `Need` is never stored — it is derived from `Max − Allocation` on every
//! query, so allocation and need cannot drift out of sync.

use serde::Serialize;

use crate::types::{Error, Result};
use crate::validation::validate_index;

/// Owned system state for a fixed set of processes and resource types.
///
/// Invariants, checked at construction and preserved by every committed
/// mutation:
/// 1. `allocation[p][r] <= max[p][r]` for all p, r
/// 2. `available[r] + Σ_p allocation[p][r]` is constant per resource type
/// 3. `available[r] >= 0` (by representation: units are unsigned)
///
/// NOT shared state - owned by the arbiter and mutated only through it.
#[derive(Debug, Clone)]
pub struct ResourceState {
    available: Vec<u32>,
    allocation: Vec<Vec<u32>>,
    max: Vec<Vec<u32>>,
}

/// Immutable copy of the full state for display layers.
///
/// `need` is materialized at snapshot time from `max − allocation`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub available: Vec<u32>,
    pub allocation: Vec<Vec<u32>>,
    pub max: Vec<Vec<u32>>,
    pub need: Vec<Vec<u32>>,
}

impl ResourceState {
    /// Build a validated state from initial values.
    ///
    /// Fails with [`Error::InvalidState`] on empty dimensions, row-length
    /// mismatches, or any allocation exceeding its declared maximum.
    pub fn new(
        available: Vec<u32>,
        max: Vec<Vec<u32>>,
        allocation: Vec<Vec<u32>>,
    ) -> Result<Self> {
        let resources = available.len();
        let processes = max.len();

        if resources == 0 {
            return Err(Error::invalid_state("at least one resource type required"));
        }
        if processes == 0 {
            return Err(Error::invalid_state("at least one process required"));
        }
        if allocation.len() != processes {
            return Err(Error::invalid_state(format!(
                "allocation has {} rows, max has {}",
                allocation.len(),
                processes
            )));
        }
        for (p, row) in max.iter().enumerate() {
            if row.len() != resources {
                return Err(Error::invalid_state(format!(
                    "max row {} has {} columns, expected {}",
                    p,
                    row.len(),
                    resources
                )));
            }
        }
        for (p, row) in allocation.iter().enumerate() {
            if row.len() != resources {
                return Err(Error::invalid_state(format!(
                    "allocation row {} has {} columns, expected {}",
                    p,
                    row.len(),
                    resources
                )));
            }
            for (r, &held) in row.iter().enumerate() {
                if held > max[p][r] {
                    return Err(Error::invalid_state(format!(
                        "process {} holds {} units of resource {}, max claim is {}",
                        p, held, r, max[p][r]
                    )));
                }
            }
        }
        // The conserved total per resource type must be representable: the
        // safety scan's work vector can reach it when every allocation is
        // released.
        for r in 0..resources {
            let mut total = available[r];
            for row in &allocation {
                total = total.checked_add(row[r]).ok_or_else(|| {
                    Error::invalid_state(format!(
                        "total units of resource {} exceed {}",
                        r,
                        u32::MAX
                    ))
                })?;
            }
        }

        Ok(Self {
            available,
            allocation,
            max,
        })
    }

    /// Number of processes (P).
    pub fn process_count(&self) -> usize {
        self.max.len()
    }

    /// Number of resource types (R).
    pub fn resource_count(&self) -> usize {
        self.available.len()
    }

    /// Currently unallocated units per resource type.
    pub fn available(&self) -> &[u32] {
        &self.available
    }

    /// Remaining need of process `p`: `max[p] − allocation[p]`, derived on
    /// demand.
    pub fn need(&self, p: usize) -> Result<Vec<u32>> {
        validate_index(p, self.process_count())?;
        Ok(self.need_row(p))
    }

    /// Immutable copy of the full state for display.
    pub fn snapshot(&self) -> Snapshot {
        let need = (0..self.process_count()).map(|p| self.need_row(p)).collect();
        Snapshot {
            available: self.available.clone(),
            allocation: self.allocation.clone(),
            max: self.max.clone(),
            need,
        }
    }

    // Internal accessors for the safety scan and arbiter. Callers have
    // already validated indices.

    pub(crate) fn allocation_row(&self, p: usize) -> &[u32] {
        &self.allocation[p]
    }

    pub(crate) fn need_row(&self, p: usize) -> Vec<u32> {
        self.max[p]
            .iter()
            .zip(&self.allocation[p])
            .map(|(&m, &a)| m - a)
            .collect()
    }

    /// Move `delta` units from available to process `p`'s allocation.
    ///
    /// Caller guarantees `delta[r] <= available[r]` and
    /// `allocation[p][r] + delta[r] <= max[p][r]` for all r; the arbiter's
    /// claim and availability checks establish both.
    pub(crate) fn apply_delta(&mut self, p: usize, delta: &[u32]) {
        for (r, &units) in delta.iter().enumerate() {
            self.available[r] -= units;
            self.allocation[p][r] += units;
        }
    }

    /// Exact inverse of [`ResourceState::apply_delta`].
    pub(crate) fn undo_delta(&mut self, p: usize, delta: &[u32]) {
        for (r, &units) in delta.iter().enumerate() {
            self.available[r] += units;
            self.allocation[p][r] -= units;
        }
    }
}
