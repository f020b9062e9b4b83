use rand::Rng;
use splay_sequence::SplaySequence;

mod common;
use common::{init_logger, Oracle};

#[test]
fn scenario_insert_and_min() {
    let mut seq = SplaySequence::new();
    seq.insert(5, 0);
    seq.insert(3, 0);
    seq.insert(7, 2);
    assert_eq!(seq.to_vec(), vec![3, 5, 7]);
    assert_eq!(seq.sum(1, 3), 15);
    assert_eq!(seq.min(), 3);
}

#[test]
fn scenario_add() {
    let mut seq = from(&[1, 2, 3, 4, 5]);
    seq.add(2, 4, 10);
    assert_eq!(seq.to_vec(), vec![1, 12, 13, 14, 5]);
    assert_eq!(seq.sum(1, 5), 45);
}

#[test]
fn scenario_assign() {
    let mut seq = from(&[1, 2, 3, 4, 5]);
    seq.assign(2, 4, 9);
    assert_eq!(seq.to_vec(), vec![1, 9, 9, 9, 5]);
    assert_eq!(seq.sum(2, 4), 27);
}

#[test]
fn scenario_reverse() {
    let mut seq = from(&[1, 2, 3, 4, 5]);
    seq.reverse(1, 5);
    assert_eq!(seq.to_vec(), vec![5, 4, 3, 2, 1]);
    seq.reverse(2, 4);
    assert_eq!(seq.to_vec(), vec![5, 2, 3, 4, 1]);
}

#[test]
fn scenario_reverse_twice_is_identity() {
    let mut seq = from(&[1, 2, 3, 4, 5, 6]);
    let before = seq.to_vec();
    seq.reverse(2, 5);
    seq.reverse(2, 5);
    assert_eq!(seq.to_vec(), before);
}

#[test]
fn scenario_next_permutation_cycle() {
    let mut seq = from(&[1, 2, 3]);
    let expected = [
        [1, 3, 2],
        [2, 1, 3],
        [2, 3, 1],
        [3, 1, 2],
        [3, 2, 1],
        [1, 2, 3],
    ];
    for want in expected {
        seq.next_permutation(1, 3);
        assert_eq!(seq.to_vec(), want);
    }
}

#[test]
fn scenario_prev_permutation() {
    let mut seq = from(&[3, 2, 1]);
    seq.prev_permutation(1, 3);
    assert_eq!(seq.to_vec(), vec![3, 1, 2]);
}

#[test]
fn next_then_prev_round_trips_unless_already_max() {
    // [1, 3, 4, 2] is not the maximum permutation of {1,2,3,4}: the
    // round trip must restore it exactly.
    let mut seq = from(&[1, 3, 4, 2]);
    let before = seq.to_vec();
    seq.next_permutation(1, 4);
    seq.prev_permutation(1, 4);
    assert_eq!(seq.to_vec(), before);

    // [4, 3, 2, 1] is the maximum permutation: next_permutation wraps
    // it to ascending-sorted, and prev_permutation of that does not
    // recover the original.
    let mut seq = from(&[4, 3, 2, 1]);
    seq.next_permutation(1, 4);
    assert_eq!(seq.to_vec(), vec![1, 2, 3, 4]);
    seq.prev_permutation(1, 4);
    assert_eq!(seq.to_vec(), vec![4, 3, 2, 1]);
}

#[test]
fn next_permutation_handles_repeated_values() {
    // Forces the pivot to equal its right neighbour, stressing the
    // non-strict monotone-run definitions.
    let mut seq = from(&[1, 1, 2, 2]);
    let mut oracle = Oracle(vec![1, 1, 2, 2]);
    for _ in 0..12 {
        seq.next_permutation(1, 4);
        oracle.next_permutation(1, 4);
        assert_eq!(seq.to_vec(), oracle.0);
    }
}

#[test]
fn next_permutation_exhausts_all_orderings_of_sorted_range() {
    let mut seq = from(&[1, 2, 3, 4]);
    let mut seen = std::collections::HashSet::new();
    for _ in 0..24 {
        seq.next_permutation(1, 4);
        seen.insert(seq.to_vec());
    }
    assert_eq!(seen.len(), 24);
    assert_eq!(seq.to_vec(), vec![1, 2, 3, 4]);
}

#[test]
fn erase_removes_the_right_rank() {
    let mut seq = from(&[10, 20, 30, 40]);
    seq.erase(2);
    assert_eq!(seq.to_vec(), vec![10, 30, 40]);
    assert_eq!(seq.len(), 3);
}

#[test]
fn empty_sequence_reports_empty() {
    let seq = SplaySequence::new();
    assert!(seq.is_empty());
    assert_eq!(seq.len(), 0);
}

#[test]
#[should_panic(expected = "empty")]
fn min_on_empty_sequence_panics() {
    let mut seq = SplaySequence::new();
    seq.min();
}

#[test]
fn check_invariants_after_a_mixed_sequence_of_ops() {
    let mut seq = from(&[5, 1, 4, 2, 3]);
    seq.add(1, 3, 2);
    seq.assign(2, 4, 9);
    seq.reverse(1, 5);
    seq.next_permutation(1, 5);
    seq.check_invariants();
}

#[test]
#[ignore = "long-running randomized stress test; run with -- --ignored"]
fn stress_against_oracle() {
    init_logger();
    let mut rng = rand::thread_rng();
    let mut seq = SplaySequence::new();
    let mut oracle = Oracle::default();

    for _ in 0..20_000 {
        let len = oracle.0.len();
        if len == 0 || rng.gen_bool(0.3) {
            let value = rng.gen_range(-100..100);
            let pos = rng.gen_range(0..=len);
            seq.insert(value, pos);
            oracle.insert(value, pos);
            continue;
        }

        let l = rng.gen_range(1..=len);
        let r = rng.gen_range(l..=len);
        match rng.gen_range(0..7) {
            0 => {
                let k = rng.gen_range(1..=len);
                seq.erase(k);
                oracle.erase(k);
            }
            1 => assert_eq!(seq.sum(l, r), oracle.sum(l, r)),
            2 => {
                let v = rng.gen_range(-100..100);
                seq.assign(l, r, v);
                oracle.assign(l, r, v);
            }
            3 => {
                let d = rng.gen_range(-100..100);
                seq.add(l, r, d);
                oracle.add(l, r, d);
            }
            4 => {
                if l < r {
                    seq.reverse(l, r);
                    oracle.reverse(l, r);
                }
            }
            5 => {
                seq.next_permutation(l, r);
                oracle.next_permutation(l, r);
            }
            _ => {
                seq.prev_permutation(l, r);
                oracle.prev_permutation(l, r);
            }
        }
        assert_eq!(seq.to_vec(), oracle.0);
        assert_eq!(seq.min(), oracle.min());
    }
    seq.check_invariants();
}

fn from(values: &[i64]) -> SplaySequence {
    let mut seq = SplaySequence::with_capacity(values.len());
    for (i, &v) in values.iter().enumerate() {
        seq.insert(v, i);
    }
    seq
}
