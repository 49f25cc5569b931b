use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use docalign::{
    aggregate_change_records, changes_file_name, doc_id_from_path, metadata_file_name,
    normalize_line_endings, AlignerConfig, AlignmentError, DocumentAligner,
    DocumentAlignerBuilder, DocumentPair, DocumentReport, InputSide, TrailingChangePolicy,
};
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Deserialize;

#[path = "align_docs/json_report_formatter.rs"]
mod json_report_formatter;

const CORPUS_CHANGES_FILE: &str = "corpus-changes.json";
const STAGING_SUFFIX: &str = ".partial";

#[derive(Debug, Parser)]
#[command(name = "align_docs")]
#[command(about = "Align two versions of a document and catalogue the character-level changes")]
struct Args {
    /// First version; its file name up to the first '-' is the document id.
    #[arg(required_unless_present = "pairs")]
    file1: Option<PathBuf>,
    /// Second version of the same document.
    #[arg(required_unless_present = "pairs")]
    file2: Option<PathBuf>,
    /// JSON manifest `[{"file1": ..., "file2": ...}]` of pairs to align in parallel.
    #[arg(long, env = "DOCALIGN_PAIRS", conflicts_with_all = ["file1", "file2"])]
    pairs: Option<PathBuf>,
    #[arg(short = 'o', long, env = "DOCALIGN_OUT_DIR", default_value = ".")]
    out_dir: PathBuf,
    /// JSON aligner configuration.
    #[arg(long, env = "DOCALIGN_CONFIG")]
    config: Option<PathBuf>,
    /// Record a change still open at the end of the documents instead of dropping it.
    #[arg(long, default_value_t = false)]
    flush_trailing: bool,
    /// With --pairs, also write corpus-changes.json summed over every pair.
    #[arg(long, default_value_t = false)]
    corpus_summary: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct PairEntry {
    file1: PathBuf,
    file2: PathBuf,
}

#[derive(Debug, Clone)]
struct Case {
    doc_id: String,
    file1: PathBuf,
    file2: PathBuf,
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();
}

fn run() -> Result<(), String> {
    let args = Args::parse();
    let aligner = build_aligner(args.config.as_deref(), args.flush_trailing)?;

    if let Some(pairs_path) = args.pairs.as_ref() {
        return run_batch(&aligner, pairs_path, &args.out_dir, args.corpus_summary);
    }

    let (Some(file1), Some(file2)) = (args.file1, args.file2) else {
        return Err("Both FILE1 and FILE2 are required without --pairs.".to_string());
    };
    let case = Case {
        doc_id: doc_id_from_path(&file1),
        file1,
        file2,
    };
    require_path_exists(&case.file1, "Missing first input file.")?;
    require_path_exists(&case.file2, "Missing second input file.")?;

    let report = align_case(&aligner, &case)?;
    create_out_dir(&args.out_dir)?;
    write_document_report(&args.out_dir, &report)?;
    tracing::info!(
        doc_id = %case.doc_id,
        edit_distance = report.metadata.edit_distance,
        changes = report.changes.len(),
        "wrote alignment reports"
    );
    Ok(())
}

fn build_aligner(
    config_path: Option<&Path>,
    flush_trailing: bool,
) -> Result<DocumentAligner, String> {
    let mut config = match config_path {
        Some(path) => {
            require_path_exists(path, "Missing --config path.")?;
            AlignerConfig::load(path).map_err(|err| err.to_string())?
        }
        None => AlignerConfig::default(),
    };
    if flush_trailing {
        config = config.with_trailing_change_policy(TrailingChangePolicy::Flush);
    }
    DocumentAlignerBuilder::new(config)
        .build()
        .map_err(|err| format!("Failed to build document aligner: {err}"))
}

fn run_batch(
    aligner: &DocumentAligner,
    pairs_path: &Path,
    out_dir: &Path,
    corpus_summary: bool,
) -> Result<(), String> {
    let cases = load_cases(pairs_path)?;
    if cases.is_empty() {
        return Err(format!("No document pairs listed in '{}'.", pairs_path.display()));
    }
    create_out_dir(out_dir)?;

    let progress = ProgressBar::new(cases.len() as u64);
    progress.set_style(
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta}) {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-"),
    );
    progress.set_message("aligning...");

    let outcomes: Vec<Result<DocumentReport, String>> = cases
        .par_iter()
        .progress_with(progress.clone())
        .map(|case| {
            let report = align_case(aligner, case)?;
            write_document_report(out_dir, &report)?;
            Ok(report)
        })
        .collect();
    progress.finish_with_message("done");

    let mut reports = Vec::with_capacity(outcomes.len());
    let mut failures = 0usize;
    for (case, outcome) in cases.iter().zip(outcomes) {
        match outcome {
            Ok(report) => reports.push(report),
            Err(err) => {
                failures += 1;
                tracing::error!(doc_id = %case.doc_id, "{err}");
            }
        }
    }

    if corpus_summary {
        let totals = aggregate_change_records(reports.iter().flat_map(|report| &report.changes));
        json_report_formatter::write_json(&out_dir.join(CORPUS_CHANGES_FILE), &totals)?;
    }

    tracing::info!(
        aligned = reports.len(),
        failed = failures,
        out_dir = %out_dir.display(),
        "batch finished"
    );
    if failures > 0 {
        return Err(format!("{failures} of {} document pairs failed.", cases.len()));
    }
    Ok(())
}

fn load_cases(pairs_path: &Path) -> Result<Vec<Case>, String> {
    require_path_exists(pairs_path, "Missing --pairs manifest.")?;
    let data = fs::read_to_string(pairs_path)
        .map_err(|err| format!("Failed to read pairs manifest '{}': {err}", pairs_path.display()))?;
    let entries: Vec<PairEntry> = serde_json::from_str(&data).map_err(|err| {
        format!(
            "Failed to parse pairs manifest '{}': {err}",
            pairs_path.display()
        )
    })?;

    let base_dir = pairs_path.parent().unwrap_or_else(|| Path::new("."));
    let mut seen = HashSet::new();
    let mut cases = Vec::with_capacity(entries.len());
    for entry in entries {
        let file1 = resolve_path(base_dir, &entry.file1);
        let file2 = resolve_path(base_dir, &entry.file2);
        require_path_exists(&file1, "Missing first input file listed in pairs manifest.")?;
        require_path_exists(&file2, "Missing second input file listed in pairs manifest.")?;
        let doc_id = doc_id_from_path(&file1);
        if !seen.insert(doc_id.clone()) {
            return Err(format!(
                "Document id '{doc_id}' appears twice in '{}'; output files would collide.",
                pairs_path.display()
            ));
        }
        cases.push(Case {
            doc_id,
            file1,
            file2,
        });
    }
    Ok(cases)
}

fn align_case(aligner: &DocumentAligner, case: &Case) -> Result<DocumentReport, String> {
    let first = read_document(&case.file1)?;
    let second = read_document(&case.file2)?;
    let pair = DocumentPair::new(case.doc_id.clone(), first, second);
    aligner.report(&pair).map_err(|err| match err {
        AlignmentError::EmptyInput { side } => {
            let path = match side {
                InputSide::First => &case.file1,
                InputSide::Second => &case.file2,
            };
            format!(
                "File \"{}\" does not contain a string that can be aligned.",
                path.display()
            )
        }
        other => format!("{}: {other}", case.doc_id),
    })
}

fn read_document(path: &Path) -> Result<String, String> {
    fs::read_to_string(path)
        .map(normalize_line_endings)
        .map_err(|err| format!("Failed to read '{}': {err}", path.display()))
}

fn create_out_dir(out_dir: &Path) -> Result<(), String> {
    fs::create_dir_all(out_dir).map_err(|err| {
        format!(
            "Failed to create output directory '{}': {err}",
            out_dir.display()
        )
    })
}

/// Write both reports of one document, or neither.
///
/// Both files are first written under staging names and then renamed into
/// place; on any failure the staged files and an already published metadata
/// file are removed.
fn write_document_report(out_dir: &Path, report: &DocumentReport) -> Result<(), String> {
    let doc_id = &report.metadata.doc_id;
    let metadata_path = out_dir.join(metadata_file_name(doc_id));
    let changes_path = out_dir.join(changes_file_name(doc_id));
    let staged_metadata = staging_path(&metadata_path);
    let staged_changes = staging_path(&changes_path);

    let staged = json_report_formatter::write_json(&staged_metadata, &report.metadata)
        .and_then(|()| json_report_formatter::write_json(&staged_changes, &report.changes));
    if let Err(err) = staged {
        discard(&[staged_metadata.as_path(), staged_changes.as_path()]);
        return Err(err);
    }

    if let Err(err) = publish(&staged_metadata, &metadata_path) {
        discard(&[staged_metadata.as_path(), staged_changes.as_path()]);
        return Err(err);
    }
    if let Err(err) = publish(&staged_changes, &changes_path) {
        discard(&[metadata_path.as_path(), staged_changes.as_path()]);
        return Err(err);
    }
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(STAGING_SUFFIX);
    path.with_file_name(name)
}

fn publish(staged: &Path, target: &Path) -> Result<(), String> {
    fs::rename(staged, target).map_err(|err| {
        format!(
            "Failed to move '{}' to '{}': {err}",
            staged.display(),
            target.display()
        )
    })
}

fn discard(paths: &[&Path]) {
    for path in paths {
        if let Err(err) = fs::remove_file(path) {
            if err.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %path.display(), "failed to remove partial output: {err}");
            }
        }
    }
}

fn resolve_path(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

fn require_path_exists(path: &Path, message: &str) -> Result<(), String> {
    if path.exists() {
        return Ok(());
    }
    Err(format!("{message} Missing path: {}", path.display()))
}
