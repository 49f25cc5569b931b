use crate::error::{AlignmentError, InputSide};
use crate::types::{AlignmentResult, EditOp, Trace};

mod full_table;
mod hirschberg;
#[cfg(test)]
mod tests;

/// Largest DP core (in cells) solved with a full backpointer table.
/// One byte per cell, so this caps the table at 16 MiB.
pub const FULL_TABLE_CELL_LIMIT: usize = 1 << 24;

/// Global unit-cost alignment of two code sequences.
///
/// Strategy:
/// 1. Common prefix and suffix are emitted as match runs directly.
/// 2. The remaining core goes through a full DP table when it fits
///    [`FULL_TABLE_CELL_LIMIT`].
/// 3. Larger cores fall back to linear-space divide and conquer.
pub fn align(seq1: &[u8], seq2: &[u8]) -> Result<AlignmentResult, AlignmentError> {
    align_with_cell_limit(seq1, seq2, FULL_TABLE_CELL_LIMIT)
}

/// [`align`] with an explicit full-table cell limit.
pub(crate) fn align_with_cell_limit(
    seq1: &[u8],
    seq2: &[u8],
    cell_limit: usize,
) -> Result<AlignmentResult, AlignmentError> {
    if seq1.is_empty() {
        return Err(AlignmentError::empty(InputSide::First));
    }
    if seq2.is_empty() {
        return Err(AlignmentError::empty(InputSide::Second));
    }

    let trace = global_trace(seq1, seq2, cell_limit);
    debug_assert_eq!(trace.first_len(), seq1.len());
    debug_assert_eq!(trace.second_len(), seq2.len());

    Ok(AlignmentResult {
        edit_distance: trace.cost(),
        length1: seq1.len(),
        length2: seq2.len(),
        trace,
    })
}

fn global_trace(seq1: &[u8], seq2: &[u8], cell_limit: usize) -> Trace {
    let prefix = common_prefix_len(seq1, seq2);
    let suffix = common_suffix_len(&seq1[prefix..], &seq2[prefix..]);
    let core1 = &seq1[prefix..seq1.len() - suffix];
    let core2 = &seq2[prefix..seq2.len() - suffix];

    let mut trace = Trace::new();
    trace.push(prefix, EditOp::Match);

    let cells = core1.len().saturating_mul(core2.len());
    if cells <= cell_limit {
        trace.append(&full_table::align_core(core1, core2));
    } else {
        tracing::debug!(
            core1_len = core1.len(),
            core2_len = core2.len(),
            cells,
            "DP core exceeds full-table limit, using linear-space alignment"
        );
        trace.append(&hirschberg::align_core(core1, core2));
    }

    trace.push(suffix, EditOp::Match);
    trace
}

fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

fn common_suffix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count()
}

/// Trace for a core where at most one side is non-empty.
fn gap_only_trace(a: &[u8], b: &[u8]) -> Option<Trace> {
    if !a.is_empty() && !b.is_empty() {
        return None;
    }
    let mut trace = Trace::new();
    trace.push(a.len(), EditOp::Insert);
    trace.push(b.len(), EditOp::Delete);
    Some(trace)
}

/// Last row of the Levenshtein table of `a` against every prefix of `b`.
fn last_cost_row<'a>(a: impl Iterator<Item = &'a u8>, b: &[u8]) -> Vec<usize> {
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];
    for &x in a {
        curr[0] = prev[0] + 1;
        for (j, &y) in b.iter().enumerate() {
            let diag = prev[j] + usize::from(x != y);
            curr[j + 1] = diag.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev
}

/// Edit distance without a trace, two rows of memory.
pub fn edit_distance(seq1: &[u8], seq2: &[u8]) -> usize {
    let row = last_cost_row(seq1.iter(), seq2);
    row[seq2.len()]
}
