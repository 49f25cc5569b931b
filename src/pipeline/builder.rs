use crate::config::AlignerConfig;
use crate::error::AlignmentError;
use crate::pipeline::defaults::{CoalescingChangeExtractor, EditDistanceAligner, FrequencyRemapper};
use crate::pipeline::runtime::{DocumentAligner, DocumentAlignerParts};
use crate::pipeline::traits::{ChangeExtractor, Remapper, SequenceAligner};

pub struct DocumentAlignerBuilder {
    config: AlignerConfig,
    remapper: Option<Box<dyn Remapper>>,
    sequence_aligner: Option<Box<dyn SequenceAligner>>,
    change_extractor: Option<Box<dyn ChangeExtractor>>,
}

impl DocumentAlignerBuilder {
    pub fn new(config: AlignerConfig) -> Self {
        Self {
            config,
            remapper: None,
            sequence_aligner: None,
            change_extractor: None,
        }
    }

    pub fn with_remapper(mut self, remapper: Box<dyn Remapper>) -> Self {
        self.remapper = Some(remapper);
        self
    }

    pub fn with_sequence_aligner(mut self, sequence_aligner: Box<dyn SequenceAligner>) -> Self {
        self.sequence_aligner = Some(sequence_aligner);
        self
    }

    pub fn with_change_extractor(mut self, change_extractor: Box<dyn ChangeExtractor>) -> Self {
        self.change_extractor = Some(change_extractor);
        self
    }

    pub fn build(self) -> Result<DocumentAligner, AlignmentError> {
        let sentinel = self.config.fallback_sentinel;
        if !sentinel.is_ascii() {
            return Err(AlignmentError::invalid_input(format!(
                "fallback sentinel {sentinel:?} is not a single-byte character"
            )));
        }
        let policy = self.config.trailing_change_policy;

        Ok(DocumentAligner::from_parts(DocumentAlignerParts {
            verify_matches: self.config.verify_matches,
            remapper: self
                .remapper
                .unwrap_or_else(|| Box::new(FrequencyRemapper { sentinel })),
            sequence_aligner: self
                .sequence_aligner
                .unwrap_or_else(|| Box::new(EditDistanceAligner)),
            change_extractor: self
                .change_extractor
                .unwrap_or_else(|| Box::new(CoalescingChangeExtractor { policy })),
        }))
    }
}
