use super::{full_table, gap_only_trace, last_cost_row};
use crate::types::Trace;

/// Sub-problems at or below this many cells go to the full table.
const BASE_CASE_CELLS: usize = 1 << 16;

/// Linear-space optimal alignment (Hirschberg).
pub(super) fn align_core(a: &[u8], b: &[u8]) -> Trace {
    let mut trace = Trace::new();
    split_align(a, b, BASE_CASE_CELLS, &mut trace);
    trace
}

/// Split `a` in half, find the column of `b` where an optimal path crosses
/// the middle row, and recurse on the two quadrants.
pub(super) fn split_align(a: &[u8], b: &[u8], base_case_cells: usize, trace: &mut Trace) {
    if let Some(gaps) = gap_only_trace(a, b) {
        trace.append(&gaps);
        return;
    }
    if a.len() == 1 || b.len() == 1 || a.len() * b.len() <= base_case_cells {
        trace.append(&full_table::align_core(a, b));
        return;
    }

    let mid = a.len() / 2;
    let (upper, lower) = a.split_at(mid);
    let forward = last_cost_row(upper.iter(), b);
    let reversed_b: Vec<u8> = b.iter().rev().copied().collect();
    let backward = last_cost_row(lower.iter().rev(), &reversed_b);

    let m = b.len();
    let split = (0..=m)
        .min_by_key(|&j| forward[j] + backward[m - j])
        .unwrap_or(0);

    split_align(upper, &b[..split], base_case_cells, trace);
    split_align(lower, &b[split..], base_case_cells, trace);
}
