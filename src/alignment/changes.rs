use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::alignment::consistency::check_trace_bounds;
use crate::error::AlignmentError;
use crate::types::{ChangeCount, EditOp, Trace};

/// What happens to a change span still open when the trace ends.
///
/// Spans are closed by the next match run. `Drop` discards a span that never
/// sees one (a difference at the very end of the documents); `Flush` records
/// it like any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrailingChangePolicy {
    #[default]
    Drop,
    Flush,
}

/// Distinct `(from, to)` pairs with their counts, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeCatalogue {
    index: HashMap<(String, String), usize>,
    entries: Vec<ChangeCount>,
}

impl ChangeCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, from: String, to: String) {
        let key = (from, to);
        if let Some(&slot) = self.index.get(&key) {
            self.entries[slot].count += 1;
            return;
        }
        self.index.insert(key.clone(), self.entries.len());
        let (from, to) = key;
        self.entries.push(ChangeCount { from, to, count: 1 });
    }

    pub fn count(&self, from: &str, to: &str) -> usize {
        self.index
            .get(&(from.to_string(), to.to_string()))
            .map(|&slot| self.entries[slot].count)
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChangeCount> {
        self.entries.iter()
    }

    pub fn into_counts(self) -> Vec<ChangeCount> {
        self.entries
    }
}

#[derive(Debug, Default)]
struct PendingChange {
    from: String,
    to: String,
    fragments: usize,
}

impl PendingChange {
    fn push(&mut self, from: &[char], to: &[char]) {
        self.from.extend(from);
        self.to.extend(to);
        self.fragments += 1;
    }

    fn flush_into(&mut self, catalogue: &mut ChangeCatalogue) {
        if self.fragments == 0 {
            return;
        }
        catalogue.record(std::mem::take(&mut self.from), std::mem::take(&mut self.to));
        self.fragments = 0;
    }
}

/// Group the non-matching runs between two match runs into one change each.
///
/// `seq1` and `seq2` are the original (not remapped) documents; run lengths
/// index them in characters. A trace that does not consume both documents
/// exactly is rejected with [`AlignmentError::TraceOutOfBounds`].
pub fn extract_changes(
    trace: &Trace,
    seq1: &[char],
    seq2: &[char],
    policy: TrailingChangePolicy,
) -> Result<ChangeCatalogue, AlignmentError> {
    check_trace_bounds(trace, seq1, seq2)?;

    let mut catalogue = ChangeCatalogue::new();
    let mut pending = PendingChange::default();
    let (mut offset1, mut offset2) = (0usize, 0usize);

    for run in trace.runs() {
        let n = run.length;
        match run.op {
            EditOp::Match => pending.flush_into(&mut catalogue),
            EditOp::Substitute => {
                pending.push(span(seq1, offset1, n), span(seq2, offset2, n));
            }
            EditOp::Insert => pending.push(span(seq1, offset1, n), &[]),
            EditOp::Delete => pending.push(&[], span(seq2, offset2, n)),
        }
        if run.op.consumes_first() {
            offset1 += n;
        }
        if run.op.consumes_second() {
            offset2 += n;
        }
    }

    match policy {
        TrailingChangePolicy::Flush => pending.flush_into(&mut catalogue),
        TrailingChangePolicy::Drop => {
            if pending.fragments > 0 {
                tracing::debug!(
                    from = %pending.from,
                    to = %pending.to,
                    "dropping change span not closed by a match run"
                );
            }
        }
    }

    Ok(catalogue)
}

fn span(seq: &[char], start: usize, len: usize) -> &[char] {
    &seq[start..start + len]
}
