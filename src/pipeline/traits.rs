use crate::alignment::alphabet::MappingOutcome;
use crate::alignment::changes::ChangeCatalogue;
use crate::error::AlignmentError;
use crate::types::{AlignmentResult, Trace};

pub trait Remapper: Send + Sync {
    fn build(&self, first: &str, second: &str) -> Result<MappingOutcome, AlignmentError>;
}

pub trait SequenceAligner: Send + Sync {
    fn align_codes(&self, seq1: &[u8], seq2: &[u8]) -> Result<AlignmentResult, AlignmentError>;
}

pub trait ChangeExtractor: Send + Sync {
    fn extract(
        &self,
        trace: &Trace,
        seq1: &[char],
        seq2: &[char],
    ) -> Result<ChangeCatalogue, AlignmentError>;
}
