use crate::alignment::alphabet::{build_mapping_with_sentinel, MappingOutcome, DEFAULT_FALLBACK};
use crate::alignment::changes::{extract_changes, ChangeCatalogue, TrailingChangePolicy};
use crate::alignment::edit_distance::align;
use crate::error::AlignmentError;
use crate::pipeline::traits::{ChangeExtractor, Remapper, SequenceAligner};
use crate::types::{AlignmentResult, Trace};

/// Frequency-ranked alphabet of at most 128 codes.
pub struct FrequencyRemapper {
    pub sentinel: char,
}

impl Default for FrequencyRemapper {
    fn default() -> Self {
        Self {
            sentinel: DEFAULT_FALLBACK,
        }
    }
}

impl Remapper for FrequencyRemapper {
    fn build(&self, first: &str, second: &str) -> Result<MappingOutcome, AlignmentError> {
        build_mapping_with_sentinel([first, second], self.sentinel)
    }
}

pub struct EditDistanceAligner;

impl SequenceAligner for EditDistanceAligner {
    fn align_codes(&self, seq1: &[u8], seq2: &[u8]) -> Result<AlignmentResult, AlignmentError> {
        align(seq1, seq2)
    }
}

#[derive(Default)]
pub struct CoalescingChangeExtractor {
    pub policy: TrailingChangePolicy,
}

impl ChangeExtractor for CoalescingChangeExtractor {
    fn extract(
        &self,
        trace: &Trace,
        seq1: &[char],
        seq2: &[char],
    ) -> Result<ChangeCatalogue, AlignmentError> {
        extract_changes(trace, seq1, seq2, self.policy)
    }
}
