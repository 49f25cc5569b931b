use std::collections::HashMap;
use std::path::Path;

use serde::Serialize;

use crate::types::{AlignmentResult, ChangeCount};

/// Document frequency of a change within a single document pair.
pub const SINGLE_DOCUMENT_FREQUENCY: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlignmentMetadata {
    pub doc_id: String,
    pub edit_distance: usize,
    pub seq1_length: usize,
    pub seq2_length: usize,
    pub cigar: String,
}

impl AlignmentMetadata {
    pub fn new(doc_id: &str, result: &AlignmentResult) -> Self {
        Self {
            doc_id: doc_id.to_string(),
            edit_distance: result.edit_distance,
            seq1_length: result.length1,
            seq2_length: result.length2,
            cigar: result.trace.to_cigar(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeRecord {
    pub doc_id: String,
    pub from: String,
    pub to: String,
    /// Occurrences within the document pair.
    pub num: usize,
    /// Number of document pairs containing the change.
    pub df: u32,
}

/// Both records produced for one document pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentReport {
    pub metadata: AlignmentMetadata,
    pub changes: Vec<ChangeRecord>,
}

pub fn change_records(doc_id: &str, changes: &[ChangeCount]) -> Vec<ChangeRecord> {
    changes
        .iter()
        .map(|change| ChangeRecord {
            doc_id: doc_id.to_string(),
            from: change.from.clone(),
            to: change.to.clone(),
            num: change.count,
            df: SINGLE_DOCUMENT_FREQUENCY,
        })
        .collect()
}

/// A change summed over every document pair of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorpusChangeRecord {
    pub from: String,
    pub to: String,
    pub num: usize,
    pub df: u32,
}

/// Sum per-document change records into corpus totals: `num` adds up the
/// occurrences and `df` adds up the documents. Output follows first appearance.
pub fn aggregate_change_records<'a>(
    records: impl IntoIterator<Item = &'a ChangeRecord>,
) -> Vec<CorpusChangeRecord> {
    let mut index: HashMap<(&str, &str), usize> = HashMap::new();
    let mut totals: Vec<CorpusChangeRecord> = Vec::new();
    for record in records {
        let key = (record.from.as_str(), record.to.as_str());
        match index.get(&key) {
            Some(&slot) => {
                totals[slot].num += record.num;
                totals[slot].df += record.df;
            }
            None => {
                index.insert(key, totals.len());
                totals.push(CorpusChangeRecord {
                    from: record.from.clone(),
                    to: record.to.clone(),
                    num: record.num,
                    df: record.df,
                });
            }
        }
    }
    totals
}

/// Document id encoded in a file name: everything before the first `-`.
///
/// `1234-ocr.txt` and `1234-gold.txt` both yield `1234`; a name without a
/// dash is used whole.
pub fn doc_id_from_path(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    match file_name.split_once('-') {
        Some((id, _)) => id.to_string(),
        None => file_name,
    }
}

/// Fold `\r\n` and lone `\r` into `\n`, the way documents are read in text
/// mode. Lengths and offsets in the reports count the folded text.
pub fn normalize_line_endings(text: String) -> String {
    if !text.contains('\r') {
        return text;
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}

pub fn metadata_file_name(doc_id: &str) -> String {
    format!("{doc_id}-metadata.json")
}

pub fn changes_file_name(doc_id: &str) -> String {
    format!("{doc_id}-changes.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Trace;

    fn record(doc_id: &str, from: &str, to: &str, num: usize) -> ChangeRecord {
        ChangeRecord {
            doc_id: doc_id.to_string(),
            from: from.to_string(),
            to: to.to_string(),
            num,
            df: SINGLE_DOCUMENT_FREQUENCY,
        }
    }

    #[test]
    fn metadata_serializes_with_cigar_string() {
        let result = AlignmentResult {
            edit_distance: 1,
            length1: 5,
            length2: 6,
            trace: "4=1D1=".parse::<Trace>().unwrap(),
        };
        let metadata = AlignmentMetadata::new("1234", &result);
        let json = serde_json::to_value(&metadata).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "doc_id": "1234",
                "edit_distance": 1,
                "seq1_length": 5,
                "seq2_length": 6,
                "cigar": "4=1D1="
            })
        );
    }

    #[test]
    fn change_records_carry_doc_id_and_unit_df() {
        let records = change_records(
            "7",
            &[ChangeCount {
                from: String::new(),
                to: "u".to_string(),
                count: 3,
            }],
        );
        assert_eq!(records, vec![record("7", "", "u", 3)]);
        let json = serde_json::to_value(&records).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{"doc_id": "7", "from": "", "to": "u", "num": 3, "df": 1}])
        );
    }

    #[test]
    fn corpus_aggregation_sums_counts_and_documents() {
        let records = vec![
            record("1", "a", "o", 2),
            record("1", "", "u", 1),
            record("2", "a", "o", 5),
        ];
        let totals = aggregate_change_records(&records);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].from, "a");
        assert_eq!(totals[0].num, 7);
        assert_eq!(totals[0].df, 2);
        assert_eq!(totals[1].to, "u");
        assert_eq!(totals[1].df, 1);
    }

    #[test]
    fn doc_id_is_file_name_prefix() {
        assert_eq!(doc_id_from_path(Path::new("/data/1234-ocr.txt")), "1234");
        assert_eq!(doc_id_from_path(Path::new("a-b-c.txt")), "a");
        assert_eq!(doc_id_from_path(Path::new("plain.txt")), "plain.txt");
    }

    #[test]
    fn output_file_names() {
        assert_eq!(metadata_file_name("12"), "12-metadata.json");
        assert_eq!(changes_file_name("12"), "12-changes.json");
    }

    #[test]
    fn line_endings_fold_to_newline() {
        assert_eq!(normalize_line_endings("a\r\nb\rc\n".to_string()), "a\nb\nc\n");
        assert_eq!(normalize_line_endings("\r\n\r\n".to_string()), "\n\n");
        assert_eq!(normalize_line_endings("plain\ntext".to_string()), "plain\ntext");
    }
}
