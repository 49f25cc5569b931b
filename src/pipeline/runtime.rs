use crate::alignment::consistency::{check_trace_bounds, verify_match_runs};
use crate::alignment::report::{change_records, AlignmentMetadata, DocumentReport};
use crate::error::{AlignmentError, InputSide};
use crate::pipeline::traits::{ChangeExtractor, Remapper, SequenceAligner};
use crate::types::{AlignmentOutput, DocumentPair};

/// Remap, align, verify and extract changes for one document pair at a time.
///
/// Holds no per-pair state; a single instance can be shared across threads.
pub struct DocumentAligner {
    verify_matches: bool,
    remapper: Box<dyn Remapper>,
    sequence_aligner: Box<dyn SequenceAligner>,
    change_extractor: Box<dyn ChangeExtractor>,
}

pub(crate) struct DocumentAlignerParts {
    pub verify_matches: bool,
    pub remapper: Box<dyn Remapper>,
    pub sequence_aligner: Box<dyn SequenceAligner>,
    pub change_extractor: Box<dyn ChangeExtractor>,
}

impl DocumentAligner {
    pub(crate) fn from_parts(parts: DocumentAlignerParts) -> Self {
        Self {
            verify_matches: parts.verify_matches,
            remapper: parts.remapper,
            sequence_aligner: parts.sequence_aligner,
            change_extractor: parts.change_extractor,
        }
    }

    pub fn align(&self, pair: &DocumentPair) -> Result<AlignmentOutput, AlignmentError> {
        if pair.first.is_empty() {
            return Err(AlignmentError::empty(InputSide::First));
        }
        if pair.second.is_empty() {
            return Err(AlignmentError::empty(InputSide::Second));
        }

        let outcome = self.remapper.build(&pair.first, &pair.second)?;
        if outcome.overflowed {
            tracing::warn!(
                doc_id = %pair.doc_id,
                mapped = outcome.mapping.len(),
                fallback = %outcome.fallback,
                "alphabet overflow; rare characters share the fallback code"
            );
        }

        let codes1 = outcome.mapping.translate(&pair.first, outcome.fallback);
        let codes2 = outcome.mapping.translate(&pair.second, outcome.fallback);
        let result = self.sequence_aligner.align_codes(&codes1, &codes2)?;

        let chars1: Vec<char> = pair.first.chars().collect();
        let chars2: Vec<char> = pair.second.chars().collect();
        if self.verify_matches {
            verify_match_runs(&result.trace, &chars1, &chars2, outcome.overflowed)?;
        } else {
            check_trace_bounds(&result.trace, &chars1, &chars2)?;
        }

        let changes = self
            .change_extractor
            .extract(&result.trace, &chars1, &chars2)?
            .into_counts();

        tracing::debug!(
            doc_id = %pair.doc_id,
            edit_distance = result.edit_distance,
            length1 = result.length1,
            length2 = result.length2,
            runs = result.trace.runs().len(),
            changes = changes.len(),
            "aligned document pair"
        );

        Ok(AlignmentOutput {
            result,
            changes,
            overflowed: outcome.overflowed,
        })
    }

    /// Align `pair` and shape the output into its two report records.
    pub fn report(&self, pair: &DocumentPair) -> Result<DocumentReport, AlignmentError> {
        let output = self.align(pair)?;
        Ok(DocumentReport {
            metadata: AlignmentMetadata::new(&pair.doc_id, &output.result),
            changes: change_records(&pair.doc_id, &output.changes),
        })
    }
}
