pub mod alignment;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod types;

pub use alignment::alphabet::{build_mapping, remap, AlphabetMapping, MappingOutcome};
pub use alignment::changes::{extract_changes, ChangeCatalogue, TrailingChangePolicy};
pub use alignment::consistency::verify_match_runs;
pub use alignment::edit_distance::align;
pub use alignment::report::{
    aggregate_change_records, change_records, changes_file_name, doc_id_from_path,
    metadata_file_name, normalize_line_endings, AlignmentMetadata, ChangeRecord,
    CorpusChangeRecord, DocumentReport,
};
pub use config::AlignerConfig;
pub use error::{AlignmentError, InputSide};
pub use pipeline::builder::DocumentAlignerBuilder;
pub use pipeline::runtime::DocumentAligner;
pub use pipeline::traits::{ChangeExtractor, Remapper, SequenceAligner};
pub use types::{
    AlignmentOutput, AlignmentResult, ChangeCount, DocumentPair, EditOp, Run, Trace,
};
