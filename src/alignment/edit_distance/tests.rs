use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::hirschberg::split_align;
use super::{align, align_with_cell_limit, edit_distance, full_table, FULL_TABLE_CELL_LIMIT};
use crate::error::{AlignmentError, InputSide};
use crate::types::{EditOp, Run, Trace};

fn random_sequence(rng: &mut StdRng, max_len: usize, alphabet: u8) -> Vec<u8> {
    let len = rng.gen_range(1..=max_len);
    (0..len).map(|_| rng.gen_range(0..alphabet)).collect()
}

/// Mutate `base` with a handful of random edits so the pair stays similar.
fn mutated(rng: &mut StdRng, base: &[u8], edits: usize, alphabet: u8) -> Vec<u8> {
    let mut out = base.to_vec();
    for _ in 0..edits {
        let pos = rng.gen_range(0..=out.len());
        match rng.gen_range(0..3) {
            0 if pos < out.len() => out[pos] = rng.gen_range(0..alphabet),
            1 if pos < out.len() && out.len() > 1 => {
                out.remove(pos);
            }
            _ => out.insert(pos, rng.gen_range(0..alphabet)),
        }
    }
    out
}

fn naive_distance(a: &[u8], b: &[u8]) -> usize {
    let mut table = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for (i, row) in table.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=b.len() {
        table[0][j] = j;
    }
    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let sub = table[i - 1][j - 1] + usize::from(a[i - 1] != b[j - 1]);
            table[i][j] = sub.min(table[i - 1][j] + 1).min(table[i][j - 1] + 1);
        }
    }
    table[a.len()][b.len()]
}

/// Walk the trace with both cursors and check every column against the inputs.
fn assert_trace_consistent(trace: &Trace, a: &[u8], b: &[u8]) {
    let (mut o1, mut o2) = (0usize, 0usize);
    for pair in trace.runs().windows(2) {
        assert_ne!(pair[0].op, pair[1].op, "adjacent runs share an op: {trace}");
    }
    for run in trace.runs() {
        assert!(run.length > 0);
        match run.op {
            EditOp::Match => {
                assert_eq!(&a[o1..o1 + run.length], &b[o2..o2 + run.length]);
                o1 += run.length;
                o2 += run.length;
            }
            EditOp::Substitute => {
                for k in 0..run.length {
                    assert_ne!(a[o1 + k], b[o2 + k]);
                }
                o1 += run.length;
                o2 += run.length;
            }
            EditOp::Insert => o1 += run.length,
            EditOp::Delete => o2 += run.length,
        }
    }
    assert_eq!((o1, o2), (a.len(), b.len()));
}

#[test]
fn color_colour_is_a_single_gap() {
    let result = align(b"color", b"colour").unwrap();
    assert_eq!(result.edit_distance, 1);
    assert_eq!(result.length1, 5);
    assert_eq!(result.length2, 6);
    assert_eq!(result.trace.to_cigar(), "4=1D1=");
}

#[test]
fn identical_sequences_yield_one_match_run() {
    let result = align(b"the same text", b"the same text").unwrap();
    assert_eq!(result.edit_distance, 0);
    assert_eq!(
        result.trace.runs(),
        &[Run {
            length: 13,
            op: EditOp::Match
        }]
    );
}

#[test]
fn textbook_distances() {
    assert_eq!(align(b"kitten", b"sitting").unwrap().edit_distance, 3);
    assert_eq!(align(b"sunday", b"saturday").unwrap().edit_distance, 3);
    assert_eq!(align(b"flaw", b"lawn").unwrap().edit_distance, 2);
    assert_eq!(align(b"abc", b"xyz").unwrap().edit_distance, 3);
}

#[test]
fn completely_different_sequences_substitute_then_gap() {
    let result = align(b"abc", b"wxyz").unwrap();
    assert_eq!(result.edit_distance, 4);
    assert_eq!(result.trace.cost(), 4);
    assert_trace_consistent(&result.trace, b"abc", b"wxyz");
}

#[test]
fn extra_text_at_either_end_is_a_gap_run() {
    let result = align(b"abcdef", b"abc").unwrap();
    assert_eq!(result.trace.to_cigar(), "3=3I");
    let result = align(b"abc", b"xxabc").unwrap();
    assert_eq!(result.trace.to_cigar(), "2D3=");
}

#[test]
fn substitution_run_in_the_middle() {
    let result = align(b"the cat sat", b"the dog sat").unwrap();
    assert_eq!(result.edit_distance, 3);
    assert_eq!(result.trace.to_cigar(), "4=3X4=");
}

#[test]
fn empty_inputs_are_rejected() {
    assert!(matches!(
        align(b"", b"abc"),
        Err(AlignmentError::EmptyInput {
            side: InputSide::First
        })
    ));
    assert!(matches!(
        align(b"abc", b""),
        Err(AlignmentError::EmptyInput {
            side: InputSide::Second
        })
    ));
}

#[test]
fn full_table_handles_one_sided_cores() {
    assert_eq!(full_table::align_core(b"", b"ab").to_cigar(), "2D");
    assert_eq!(full_table::align_core(b"ab", b"").to_cigar(), "2I");
    assert!(full_table::align_core(b"", b"").is_empty());
}

#[test]
fn random_pairs_respect_distance_bounds_and_symmetry() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..300 {
        let a = random_sequence(&mut rng, 40, 4);
        let b = random_sequence(&mut rng, 40, 4);
        let forward = align(&a, &b).unwrap();
        let backward = align(&b, &a).unwrap();

        assert!(forward.edit_distance <= a.len().max(b.len()));
        assert_eq!(forward.edit_distance, backward.edit_distance);
        assert_eq!(forward.edit_distance, naive_distance(&a, &b));
        assert_eq!(forward.edit_distance, edit_distance(&a, &b));
        assert_eq!(forward.trace.first_len(), a.len());
        assert_eq!(forward.trace.second_len(), b.len());
        assert_trace_consistent(&forward.trace, &a, &b);
    }
}

#[test]
fn random_similar_pairs_are_optimal() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..200 {
        let a = random_sequence(&mut rng, 120, 26);
        let edits = rng.gen_range(0..10);
        let b = mutated(&mut rng, &a, edits, 26);
        let result = align(&a, &b).unwrap();
        assert_eq!(result.edit_distance, naive_distance(&a, &b));
        assert!(result.edit_distance <= edits);
        assert_trace_consistent(&result.trace, &a, &b);
    }
}

#[test]
fn linear_space_split_matches_full_table_distance() {
    let mut rng = StdRng::seed_from_u64(23);
    for _ in 0..200 {
        let a = random_sequence(&mut rng, 60, 5);
        let b = random_sequence(&mut rng, 60, 5);
        let full = full_table::align_core(&a, &b);
        let mut split = Trace::new();
        split_align(&a, &b, 0, &mut split);

        assert_eq!(split.cost(), full.cost());
        assert_eq!(split.cost(), naive_distance(&a, &b));
        assert_trace_consistent(&split, &a, &b);
    }
}

#[test]
fn linear_space_split_handles_skewed_lengths() {
    let a = b"a".repeat(50);
    let mut b = b"b".repeat(3);
    b.extend_from_slice(&a[..10]);
    let mut split = Trace::new();
    split_align(&a, &b, 0, &mut split);
    assert_eq!(split.cost(), naive_distance(&a, &b));
    assert_trace_consistent(&split, &a, &b);
}

#[test]
fn align_routes_oversized_cores_through_linear_space() {
    let mut rng = StdRng::seed_from_u64(31);
    for _ in 0..4 {
        let core: Vec<u8> = (0..300).map(|_| rng.gen_range(0..6)).collect();
        let edits = rng.gen_range(20..60);
        let mutated_core = mutated(&mut rng, &core, edits, 6);
        let mut a = b"prefix:".to_vec();
        a.extend_from_slice(&core);
        a.extend_from_slice(b":suffix");
        let mut b = b"prefix:".to_vec();
        b.extend_from_slice(&mutated_core);
        b.extend_from_slice(b":suffix");

        let linear = align_with_cell_limit(&a, &b, 16).unwrap();
        let full = align(&a, &b).unwrap();
        assert_eq!(linear.edit_distance, naive_distance(&a, &b));
        assert_eq!(linear.edit_distance, full.edit_distance);
        assert_eq!((linear.length1, linear.length2), (a.len(), b.len()));
        assert_eq!(linear.trace.runs().first().map(|run| run.op), Some(EditOp::Match));
        assert_trace_consistent(&linear.trace, &a, &b);
    }
}

#[test]
fn align_uses_the_default_cell_limit() {
    let a = b"the quick brown fox";
    let b = b"the quack brown fax";
    assert_eq!(
        align(a, b).unwrap(),
        align_with_cell_limit(a, b, FULL_TABLE_CELL_LIMIT).unwrap()
    );
}

#[test]
fn linear_space_path_still_rejects_empty_input() {
    let err = align_with_cell_limit(b"", b"abc", 0).unwrap_err();
    assert!(matches!(
        err,
        AlignmentError::EmptyInput {
            side: InputSide::First
        }
    ));
}
