use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::AlignmentError;

/// One alignment column kind.
///
/// `Insert` and `Delete` follow the extended-CIGAR convention: an `Insert`
/// run is present in the first sequence and absent from the second, a
/// `Delete` run is absent from the first sequence and present in the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EditOp {
    Match,
    Substitute,
    Insert,
    Delete,
}

impl EditOp {
    pub fn consumes_first(self) -> bool {
        matches!(self, Self::Match | Self::Substitute | Self::Insert)
    }

    pub fn consumes_second(self) -> bool {
        matches!(self, Self::Match | Self::Substitute | Self::Delete)
    }

    pub fn cigar_symbol(self) -> char {
        match self {
            Self::Match => '=',
            Self::Substitute => 'X',
            Self::Insert => 'I',
            Self::Delete => 'D',
        }
    }

    pub fn from_cigar_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '=' => Some(Self::Match),
            'X' => Some(Self::Substitute),
            'I' => Some(Self::Insert),
            'D' => Some(Self::Delete),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Run {
    pub length: usize,
    pub op: EditOp,
}

/// Maximal run-length encoding of an alignment path.
///
/// Runs are never empty and two adjacent runs never share an [`EditOp`];
/// [`Trace::push`] merges as it goes so every constructor keeps that shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace {
    runs: Vec<Run>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, length: usize, op: EditOp) {
        if length == 0 {
            return;
        }
        match self.runs.last_mut() {
            Some(last) if last.op == op => last.length += length,
            _ => self.runs.push(Run { length, op }),
        }
    }

    pub fn append(&mut self, other: &Trace) {
        for run in &other.runs {
            self.push(run.length, run.op);
        }
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Number of first-sequence symbols the trace walks over.
    pub fn first_len(&self) -> usize {
        self.runs
            .iter()
            .filter(|run| run.op.consumes_first())
            .map(|run| run.length)
            .sum()
    }

    /// Number of second-sequence symbols the trace walks over.
    pub fn second_len(&self) -> usize {
        self.runs
            .iter()
            .filter(|run| run.op.consumes_second())
            .map(|run| run.length)
            .sum()
    }

    /// Unit-cost edit count implied by the trace.
    pub fn cost(&self) -> usize {
        self.runs
            .iter()
            .filter(|run| run.op != EditOp::Match)
            .map(|run| run.length)
            .sum()
    }

    pub fn to_cigar(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for run in &self.runs {
            write!(f, "{}{}", run.length, run.op.cigar_symbol())?;
        }
        Ok(())
    }
}

impl FromStr for Trace {
    type Err = AlignmentError;

    fn from_str(cigar: &str) -> Result<Self, Self::Err> {
        let mut trace = Trace::new();
        let mut digits = String::new();
        for c in cigar.chars() {
            if c.is_ascii_digit() {
                digits.push(c);
                continue;
            }
            let op = EditOp::from_cigar_symbol(c)
                .ok_or_else(|| AlignmentError::invalid_cigar(format!("unknown operation '{c}'")))?;
            if digits.is_empty() {
                return Err(AlignmentError::invalid_cigar(format!(
                    "operation '{c}' has no run length"
                )));
            }
            let length: usize = digits
                .parse()
                .map_err(|e| AlignmentError::invalid_cigar(format!("run length '{digits}': {e}")))?;
            if length == 0 {
                return Err(AlignmentError::invalid_cigar(format!(
                    "zero-length run for operation '{c}'"
                )));
            }
            trace.push(length, op);
            digits.clear();
        }
        if !digits.is_empty() {
            return Err(AlignmentError::invalid_cigar(format!(
                "trailing run length '{digits}' without an operation"
            )));
        }
        Ok(trace)
    }
}

impl From<Vec<Run>> for Trace {
    fn from(runs: Vec<Run>) -> Self {
        let mut trace = Trace::new();
        for run in runs {
            trace.push(run.length, run.op);
        }
        trace
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentResult {
    pub edit_distance: usize,
    pub length1: usize,
    pub length2: usize,
    pub trace: Trace,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeCount {
    pub from: String,
    pub to: String,
    pub count: usize,
}

/// Two versions of one document plus the identifier reported back in records.
#[derive(Debug, Clone)]
pub struct DocumentPair {
    pub doc_id: String,
    pub first: String,
    pub second: String,
}

impl DocumentPair {
    pub fn new(
        doc_id: impl Into<String>,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> Self {
        Self {
            doc_id: doc_id.into(),
            first: first.into(),
            second: second.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentOutput {
    pub result: AlignmentResult,
    pub changes: Vec<ChangeCount>,
    /// More distinct characters than the alphabet holds; some wide characters
    /// share the fallback code and match runs were not verified.
    pub overflowed: bool,
}
