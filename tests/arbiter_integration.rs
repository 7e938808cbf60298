//! Arbiter integration tests — textbook scenarios plus property tests over
//! random request sequences.

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use banker_core::banker::safety;
use banker_core::{Decision, RequestArbiter, ResourceState, Safety, Snapshot};

/// The classic five-process, three-resource scenario.
fn textbook_arbiter() -> RequestArbiter {
    let state = ResourceState::new(
        vec![3, 3, 2],
        vec![
            vec![7, 5, 3],
            vec![3, 2, 2],
            vec![9, 0, 2],
            vec![2, 2, 2],
            vec![4, 3, 3],
        ],
        vec![
            vec![0, 1, 0],
            vec![2, 0, 0],
            vec![3, 0, 2],
            vec![2, 1, 1],
            vec![0, 0, 2],
        ],
    )
    .unwrap();
    RequestArbiter::new(state)
}

/// Replay a claimed safe sequence against a snapshot and verify every step
/// was actually finishable with the work vector at that point.
fn assert_sequence_finishes(snap: &Snapshot, sequence: &[usize]) {
    let mut work = snap.available.clone();
    let mut seen = vec![false; snap.allocation.len()];
    for &p in sequence {
        assert!(!seen[p], "process {p} appears twice in {sequence:?}");
        for r in 0..work.len() {
            let need = snap.max[p][r] - snap.allocation[p][r];
            assert!(
                need <= work[r],
                "process {p} not finishable at its turn (resource {r})"
            );
        }
        for r in 0..work.len() {
            work[r] += snap.allocation[p][r];
        }
        seen[p] = true;
    }
    assert!(seen.iter().all(|&done| done), "sequence misses a process");
}

#[test]
fn initial_textbook_state_is_safe() {
    let arb = textbook_arbiter();
    let safety = arb.check_current_safety();
    let seq = safety.sequence().expect("textbook state must be safe");
    assert_eq!(seq, &[1, 3, 4, 0, 2]);
    assert_sequence_finishes(&arb.snapshot(), seq);
}

#[test]
fn p1_request_within_claim_and_availability_is_granted() {
    let mut arb = textbook_arbiter();
    assert_eq!(arb.state().need(1).unwrap(), vec![1, 2, 2]);

    let decision = arb.request(1, &[1, 0, 2]).unwrap();
    let sequence = match decision {
        Decision::Granted(seq) => seq,
        other => panic!("expected grant, got {other:?}"),
    };

    let snap = arb.snapshot();
    assert_eq!(snap.available, vec![2, 3, 0]);
    assert_eq!(snap.allocation[1], vec![3, 0, 2]);
    assert_eq!(snap.need[1], vec![0, 2, 0]);
    assert_sequence_finishes(&snap, &sequence);
}

#[test]
fn request_past_availability_is_denied_without_state_change() {
    let mut arb = textbook_arbiter();
    let before = arb.snapshot();

    // Within P0's claim (need [7,4,3]) but past available [3,3,2].
    let decision = arb.request(0, &[0, 0, 3]).unwrap();
    assert_eq!(
        decision,
        Decision::DeniedInsufficientResources { resource: 2 }
    );
    assert_eq!(arb.snapshot(), before);
}

#[test]
fn request_past_claim_is_denied_without_state_change() {
    let mut arb = textbook_arbiter();
    let before = arb.snapshot();

    // P3 need is [0,1,1]; asking two units of resource C exceeds the claim.
    let decision = arb.request(3, &[0, 0, 2]).unwrap();
    assert_eq!(decision, Decision::DeniedExceedsMaxClaim { resource: 2 });
    assert_eq!(arb.snapshot(), before);
}

#[test]
fn unsafe_request_is_rolled_back_exactly() {
    let mut arb = textbook_arbiter();
    arb.request(1, &[1, 0, 2]).unwrap();
    let before = arb.snapshot();

    // Within P4's claim and availability, but drains the pool dry.
    let decision = arb.request(4, &[2, 3, 0]).unwrap();
    assert_eq!(decision, Decision::DeniedUnsafe);
    assert_eq!(arb.snapshot(), before);
}

#[test]
fn granted_requests_chain_until_resources_run_out() {
    let mut arb = textbook_arbiter();
    assert!(arb.request(1, &[1, 0, 2]).unwrap().is_granted());

    // Available is now [2,3,0]; any request touching resource C must wait.
    let decision = arb.request(4, &[0, 0, 1]).unwrap();
    assert_eq!(
        decision,
        Decision::DeniedInsufficientResources { resource: 2 }
    );
}

#[test]
fn safety_scan_is_deterministic_across_calls() {
    let arb = textbook_arbiter();
    let first = arb.check_current_safety();
    for _ in 0..5 {
        assert_eq!(arb.check_current_safety(), first);
    }
}

// ---------------------------------------------------------------------------
// Property tests

/// A random consistent system plus a burst of requests against it.
#[derive(Debug, Clone)]
struct Scenario {
    available: Vec<u32>,
    max: Vec<Vec<u32>>,
    allocation: Vec<Vec<u32>>,
    requests: Vec<(usize, Vec<u32>)>,
}

fn scenario() -> impl Strategy<Value = Scenario> {
    (1usize..5, 1usize..4)
        .prop_flat_map(|(processes, resources)| {
            let max = proptest::collection::vec(
                proptest::collection::vec(0u32..6, resources),
                processes,
            );
            let available = proptest::collection::vec(0u32..6, resources);
            (Just(processes), Just(resources), max, available)
        })
        .prop_flat_map(|(processes, resources, max, available)| {
            // allocation[p][r] drawn from 0..=max[p][r] keeps invariant 1.
            let allocation: Vec<Vec<std::ops::RangeInclusive<u32>>> = max
                .iter()
                .map(|row| row.iter().map(|&m| 0..=m).collect())
                .collect();
            let requests = proptest::collection::vec(
                (0..processes, proptest::collection::vec(0u32..5, resources)),
                0..12,
            );
            (Just(available), Just(max), allocation, requests)
        })
        .prop_map(|(available, max, allocation, requests)| Scenario {
            available,
            max,
            allocation,
            requests,
        })
}

proptest! {
    /// Invariants 1–4 hold after every call, granted or denied, and every
    /// denial leaves the snapshot untouched.
    #[test]
    fn invariants_hold_after_any_request_sequence(s in scenario()) {
        let state = ResourceState::new(
            s.available.clone(),
            s.max.clone(),
            s.allocation.clone(),
        ).unwrap();
        let resources = state.resource_count();
        let totals: Vec<u32> = (0..resources)
            .map(|r| s.available[r] + s.allocation.iter().map(|row| row[r]).sum::<u32>())
            .collect();

        let mut arb = RequestArbiter::new(state);
        for (p, amounts) in &s.requests {
            let before = arb.snapshot();
            let decision = arb.request(*p, amounts).unwrap();
            let after = arb.snapshot();

            if let Decision::Granted(sequence) = &decision {
                assert_sequence_finishes(&after, sequence);
            } else {
                prop_assert_eq!(&before, &after);
            }

            for (pi, row) in after.allocation.iter().enumerate() {
                for (ri, &held) in row.iter().enumerate() {
                    prop_assert!(held <= after.max[pi][ri]);
                }
            }
            for r in 0..resources {
                let allocated: u32 = after.allocation.iter().map(|row| row[r]).sum();
                prop_assert_eq!(after.available[r] + allocated, totals[r]);
            }
        }
    }

    /// The scan returns the same verdict and sequence however often it runs.
    #[test]
    fn safety_scan_is_pure(s in scenario()) {
        let state = ResourceState::new(s.available, s.max, s.allocation).unwrap();
        let first = safety::check(&state);
        prop_assert_eq!(safety::check(&state), first);
    }

    /// A grant is only ever issued from a provably safe resulting state.
    #[test]
    fn grants_imply_safety(s in scenario()) {
        let state = ResourceState::new(s.available, s.max, s.allocation).unwrap();
        let mut arb = RequestArbiter::new(state);
        for (p, amounts) in &s.requests {
            if arb.request(*p, amounts).unwrap().is_granted() {
                prop_assert!(matches!(arb.check_current_safety(), Safety::Safe(_)));
            }
        }
    }
}
