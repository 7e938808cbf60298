//! Safety scan: can every process still run to completion?
//!
//! Implements the Banker's Algorithm safety check as a sequential fixed-point
//! scan. Each pass walks unfinished processes in ascending index order; a
//! process whose remaining need fits in `work` is marked finished and its
//! allocation is released into `work` immediately, so later processes in the
//! same pass see the updated `work`. The scan stops when a full pass finishes
//! nobody. Ascending index order makes the returned sequence deterministic.

use super::state::ResourceState;

/// Outcome of a safety scan.
///
/// `Unsafe` is a valid algorithmic result, not an error: it means no order
/// exists in which all processes can finish from the given state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Safety {
    /// All processes can finish, in the given order.
    Safe(Vec<usize>),
    /// No safe finishing order exists.
    Unsafe,
}

impl Safety {
    pub fn is_safe(&self) -> bool {
        matches!(self, Safety::Safe(_))
    }

    /// The safe finishing order, if one exists.
    pub fn sequence(&self) -> Option<&[usize]> {
        match self {
            Safety::Safe(seq) => Some(seq),
            Safety::Unsafe => None,
        }
    }
}

/// Run the safety scan against a state. O(P² × R) worst case.
pub fn check(state: &ResourceState) -> Safety {
    let processes = state.process_count();
    let mut work = state.available().to_vec();
    let mut finished = vec![false; processes];
    let mut sequence = Vec::with_capacity(processes);

    while sequence.len() < processes {
        let mut progressed = false;

        for p in 0..processes {
            if finished[p] {
                continue;
            }
            let need = state.need_row(p);
            if need.iter().zip(&work).all(|(&n, &w)| n <= w) {
                // p can run to completion; release its allocation into work
                // before scanning the rest of this pass.
                for (w, &held) in work.iter_mut().zip(state.allocation_row(p)) {
                    *w += held;
                }
                finished[p] = true;
                sequence.push(p);
                progressed = true;
            }
        }

        if !progressed {
            return Safety::Unsafe;
        }
    }

    Safety::Safe(sequence)
}
