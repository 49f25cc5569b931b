use super::gap_only_trace;
use crate::types::{EditOp, Trace};

const FROM_DIAGONAL: u8 = 0;
const FROM_ABOVE: u8 = 1;
const FROM_LEFT: u8 = 2;

/// Full DP with a one-byte backpointer per cell.
///
/// Costs are kept in two rolling rows; only the backpointers are stored for
/// the whole table. On ties the backtrace prefers the diagonal, then a gap in
/// the second sequence (`Insert`), then a gap in the first (`Delete`).
pub(super) fn align_core(a: &[u8], b: &[u8]) -> Trace {
    if let Some(trace) = gap_only_trace(a, b) {
        return trace;
    }

    let n = a.len();
    let m = b.len();
    let width = m + 1;

    let mut prev: Vec<usize> = (0..=m).collect();
    let mut curr = vec![0usize; width];
    let mut bp = vec![FROM_LEFT; (n + 1) * width];
    bp[0] = FROM_DIAGONAL;

    for i in 1..=n {
        let x = a[i - 1];
        let row_offset = i * width;
        curr[0] = i;
        bp[row_offset] = FROM_ABOVE;
        for j in 1..=m {
            let (cost, step) = best_step(
                prev[j - 1] + usize::from(x != b[j - 1]),
                prev[j] + 1,
                curr[j - 1] + 1,
            );
            curr[j] = cost;
            bp[row_offset + j] = step;
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    let mut ops = Vec::with_capacity(n + m);
    let (mut i, mut j) = (n, m);
    while i > 0 || j > 0 {
        match bp[i * width + j] {
            FROM_DIAGONAL => {
                debug_assert!(i >= 1 && j >= 1);
                ops.push(if a[i - 1] == b[j - 1] {
                    EditOp::Match
                } else {
                    EditOp::Substitute
                });
                i -= 1;
                j -= 1;
            }
            FROM_ABOVE => {
                debug_assert!(i >= 1);
                ops.push(EditOp::Insert);
                i -= 1;
            }
            _ => {
                debug_assert!(j >= 1);
                ops.push(EditOp::Delete);
                j -= 1;
            }
        }
    }

    let mut trace = Trace::new();
    for op in ops.into_iter().rev() {
        trace.push(1, op);
    }
    trace
}

#[inline(always)]
fn best_step(diagonal: usize, above: usize, left: usize) -> (usize, u8) {
    let mut best = diagonal;
    let mut step = FROM_DIAGONAL;
    if above < best {
        best = above;
        step = FROM_ABOVE;
    }
    if left < best {
        best = left;
        step = FROM_LEFT;
    }
    (best, step)
}
