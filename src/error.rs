use std::fmt;

use thiserror::Error;

/// Which of the two compared documents an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSide {
    First,
    Second,
}

impl fmt::Display for InputSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => f.write_str("first"),
            Self::Second => f.write_str("second"),
        }
    }
}

#[derive(Debug, Error)]
pub enum AlignmentError {
    #[error("{side} input does not contain a string that can be aligned")]
    EmptyInput { side: InputSide },
    #[error(
        "match run of length {length} at offsets ({offset1}, {offset2}) compares unequal characters"
    )]
    TraceMismatch {
        offset1: usize,
        offset2: usize,
        length: usize,
    },
    #[error(
        "trace does not fit the sequences: consumed ({consumed1}, {consumed2}) of ({len1}, {len2})"
    )]
    TraceOutOfBounds {
        consumed1: usize,
        consumed2: usize,
        len1: usize,
        len2: usize,
    },
    #[error("invalid CIGAR string: {message}")]
    InvalidCigar { message: String },
    #[error("I/O error while {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON parse error while {context}: {source}")]
    Json {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
}

impl AlignmentError {
    pub(crate) fn empty(side: InputSide) -> Self {
        Self::EmptyInput { side }
    }

    pub(crate) fn io(context: &'static str, source: std::io::Error) -> Self {
        Self::Io { context, source }
    }

    pub(crate) fn json(context: &'static str, source: serde_json::Error) -> Self {
        Self::Json { context, source }
    }

    pub(crate) fn invalid_cigar(message: impl Into<String>) -> Self {
        Self::InvalidCigar {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}
