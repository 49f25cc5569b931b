use crate::error::AlignmentError;
use crate::types::{EditOp, Trace};

/// The trace must walk both sequences exactly to their ends.
pub fn check_trace_bounds(
    trace: &Trace,
    seq1: &[char],
    seq2: &[char],
) -> Result<(), AlignmentError> {
    let consumed1 = trace.first_len();
    let consumed2 = trace.second_len();
    if consumed1 != seq1.len() || consumed2 != seq2.len() {
        return Err(AlignmentError::TraceOutOfBounds {
            consumed1,
            consumed2,
            len1: seq1.len(),
            len2: seq2.len(),
        });
    }
    Ok(())
}

/// Re-check every match run against the original characters.
///
/// With an overflowed alphabet several characters share the fallback code, so
/// match runs may legitimately pair different characters and the check is
/// skipped.
pub fn verify_match_runs(
    trace: &Trace,
    seq1: &[char],
    seq2: &[char],
    overflowed: bool,
) -> Result<(), AlignmentError> {
    check_trace_bounds(trace, seq1, seq2)?;

    if overflowed {
        tracing::debug!("alphabet overflowed; match runs are not verified");
        return Ok(());
    }

    let (mut offset1, mut offset2) = (0usize, 0usize);
    for run in trace.runs() {
        let n = run.length;
        if run.op == EditOp::Match && seq1[offset1..offset1 + n] != seq2[offset2..offset2 + n] {
            return Err(AlignmentError::TraceMismatch {
                offset1,
                offset2,
                length: n,
            });
        }
        if run.op.consumes_first() {
            offset1 += n;
        }
        if run.op.consumes_second() {
            offset2 += n;
        }
    }
    Ok(())
}
