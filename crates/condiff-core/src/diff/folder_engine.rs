//! Tree-level comparison.
//!
//! The entry point is [`compare_folders`]: it checks its preconditions,
//! retrieves the records of both trees, aligns them by relative path, diffs
//! every matched pair and accrues folder statistics. Reports are either
//! buffered in the returned [`FolderCompareReport`] or streamed to an export
//! directory as soon as they are produced.

use crate::diff::file_engine::compare_files;
use crate::diff::model::{FileCompareReport, FolderCompareReport, FolderCompareStatistics};
use crate::errors::{io_error, CompareError, Result};
use crate::export::{
    check_export_dir, export_file_report, log_export_failure, write_json_document, ExportSummary,
    DEFAULT_GLOBAL_STATISTICS_FILE,
};
use crate::extract::ContractExtractor;
use crate::model::FileRecord;
use crate::schema::{OUTCOME_ADDED, OUTCOME_FILTERED, OUTCOME_MATCHED, OUTCOME_REMOVED};
use condiff_core_types::RunId;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Where and how to stream reports during a comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub output_dir: PathBuf,
    pub pretty_print: bool,
    /// File name of the folder-level document
    pub global_statistics_file: String,
}

impl ExportOptions {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            pretty_print: true,
            global_statistics_file: DEFAULT_GLOBAL_STATISTICS_FILE.to_string(),
        }
    }

    pub fn with_pretty_print(mut self, pretty_print: bool) -> Self {
        self.pretty_print = pretty_print;
        self
    }

    pub fn with_global_statistics_file(mut self, name: impl Into<String>) -> Self {
        self.global_statistics_file = name.into();
        self
    }
}

/// Reporting policy of a folder comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompareOptions {
    /// Report matched files even when they are identical
    pub report_equal: bool,
    /// Report structural changes that do not touch contracts, and keep
    /// contract-free files in the comparison
    pub report_non_contract_changes: bool,
    /// Stream reports to disk instead of buffering them
    pub export: Option<ExportOptions>,
}

/// Path of `full_path` relative to `root`, `/`-separated.
///
/// Falls back to the full path when it does not lie strictly under `root`.
pub fn relative_path(full_path: &Path, root: &Path) -> String {
    match full_path.strip_prefix(root) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/"),
        _ => full_path.to_string_lossy().into_owned(),
    }
}

/// Check that a comparison root exists and is a directory.
fn check_root(root: &Path) -> Result<()> {
    if !root.exists() {
        return Err(CompareError::RootNotFound {
            path: root.to_path_buf(),
        }
        .into());
    }
    if !root.is_dir() {
        return Err(CompareError::RootNotADirectory {
            path: root.to_path_buf(),
        }
        .into());
    }
    Ok(())
}

fn canonical_root(root: &Path) -> Result<PathBuf> {
    std::fs::canonicalize(root).map_err(|e| io_error("canonicalize_root", root, e))
}

/// Records of the "other" tree awaiting a partner, indexed by relative path.
///
/// Each record can be taken once; same-path records are handed out in
/// extraction order.
struct PendingIndex {
    slots: Vec<Option<(String, FileRecord)>>,
    by_path: HashMap<String, VecDeque<usize>>,
}

impl PendingIndex {
    fn new(entries: Vec<(String, FileRecord)>) -> Self {
        let mut by_path: HashMap<String, VecDeque<usize>> = HashMap::new();
        for (i, (rel, _)) in entries.iter().enumerate() {
            by_path.entry(rel.clone()).or_default().push_back(i);
        }
        Self {
            slots: entries.into_iter().map(Some).collect(),
            by_path,
        }
    }

    fn take(&mut self, rel: &str) -> Option<FileRecord> {
        let queue = self.by_path.get_mut(rel)?;
        let index = queue.pop_front()?;
        if queue.is_empty() {
            self.by_path.remove(rel);
        }
        self.slots[index].take().map(|(_, record)| record)
    }

    /// Untaken records in extraction order
    fn into_remaining(self) -> impl Iterator<Item = (String, FileRecord)> {
        self.slots.into_iter().flatten()
    }
}

/// Where qualifying file reports go.
enum ReportSink<'a> {
    Buffer,
    Stream {
        options: &'a ExportOptions,
        summary: ExportSummary,
    },
}

impl ReportSink<'_> {
    fn accept(&mut self, folder: &mut FolderCompareReport, rel: &str, report: FileCompareReport) {
        match self {
            ReportSink::Buffer => folder.file_compare_reports.push(report),
            ReportSink::Stream { options, summary } => export_file_report(
                &report,
                rel,
                &options.output_dir,
                options.pretty_print,
                &options.global_statistics_file,
                summary,
            ),
        }
    }

    fn finish(self, folder: &mut FolderCompareReport) {
        if let ReportSink::Stream {
            options,
            mut summary,
        } = self
        {
            match write_json_document(
                &*folder,
                &options.global_statistics_file,
                &options.output_dir,
                options.pretty_print,
            ) {
                Ok(_) => summary.global_statistics_written = true,
                Err(err) => log_export_failure(&options.global_statistics_file, &err),
            }
            folder.export = Some(summary);
        }
    }
}

fn log_alignment(run_id: &RunId, rel: &str, outcome: &str) {
    tracing::info!(
        component = module_path!(),
        run_id = %run_id,
        file = rel,
        outcome = outcome,
    );
}

/// Compare two source trees.
///
/// `this_root` is the earlier version: files only under `other_root` are
/// reported as added, files only under `this_root` as removed.
///
/// # Errors
///
/// - `FolderNotFound` / `NotADirectory`: a root is missing or not a directory
/// - `InvalidExportTarget`: export requested and the output directory is unusable
/// - whatever the extractor reports for either tree
///
/// Precondition errors are raised before any record is read. A failure to
/// write one exported document is not an error; it is counted in
/// `report.export`.
pub fn compare_folders(
    this_root: &Path,
    other_root: &Path,
    options: &CompareOptions,
    extractor: &dyn ContractExtractor,
) -> Result<FolderCompareReport> {
    let op = "compare_folders";
    let run_id = RunId::new();
    let start = Instant::now();
    crate::log_op_start!(
        op,
        run_id = %run_id,
        this_root = %this_root.display(),
        other_root = %other_root.display()
    );

    match run_comparison(this_root, other_root, options, extractor, &run_id) {
        Ok(report) => {
            crate::log_op_end!(
                op,
                duration_ms = start.elapsed().as_millis() as u64,
                run_id = %run_id,
                files_added = report.statistics.files_added,
                files_removed = report.statistics.files_removed,
                files_changed = report.statistics.files_changed,
                reports = report.file_compare_reports.len()
            );
            Ok(report)
        }
        Err(err) => {
            let err = err.with_op(op).with_run_id(run_id);
            crate::log_op_error!(
                op,
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                run_id = %run_id
            );
            Err(err)
        }
    }
}

fn run_comparison(
    this_root: &Path,
    other_root: &Path,
    options: &CompareOptions,
    extractor: &dyn ContractExtractor,
    run_id: &RunId,
) -> Result<FolderCompareReport> {
    check_root(this_root)?;
    check_root(other_root)?;
    if let Some(export) = &options.export {
        check_export_dir(&export.output_dir)?;
    }

    let this_root = canonical_root(this_root)?;
    let other_root = canonical_root(other_root)?;

    let this_records = extractor.extract_from_folder(&this_root)?;
    let other_records = extractor.extract_from_folder(&other_root)?;

    let qualifies = |record: &FileRecord| {
        options.report_non_contract_changes || record.statistics().total_contracts() > 0
    };
    let with_relative_paths = |records: Vec<FileRecord>, root: &Path| -> Vec<(String, FileRecord)> {
        records
            .into_iter()
            .filter_map(|record| {
                let rel = relative_path(record.full_path(), root);
                if qualifies(&record) {
                    Some((rel, record))
                } else {
                    log_alignment(run_id, &rel, OUTCOME_FILTERED);
                    None
                }
            })
            .collect()
    };

    let this_entries = with_relative_paths(this_records, &this_root);
    let mut pending = PendingIndex::new(with_relative_paths(other_records, &other_root));

    let mut folder = FolderCompareReport::new(
        this_root.to_string_lossy().into_owned(),
        other_root.to_string_lossy().into_owned(),
    );
    let mut sink = match &options.export {
        Some(export) => ReportSink::Stream {
            options: export,
            summary: ExportSummary::default(),
        },
        None => ReportSink::Buffer,
    };
    let mut contracts_added = 0u64;
    let mut contracts_removed = 0u64;
    let mut files_changed = 0u64;

    for (rel, this_record) in this_entries {
        match pending.take(&rel) {
            Some(other_record) => {
                let report = compare_files(
                    &this_record,
                    &other_record,
                    options.report_equal,
                    options.report_non_contract_changes,
                );
                if let Some(report) = report {
                    if !report.contract_equal {
                        files_changed += 1;
                    }
                    if options.report_non_contract_changes || !report.contract_equal {
                        sink.accept(&mut folder, &rel, report);
                    }
                }
                log_alignment(run_id, &rel, OUTCOME_MATCHED);
            }
            None => {
                contracts_removed += this_record.statistics().total_contracts();
                log_alignment(run_id, &rel, OUTCOME_REMOVED);
                folder.files_removed.push(rel);
            }
        }
    }

    for (rel, other_record) in pending.into_remaining() {
        contracts_added += other_record.statistics().total_contracts();
        log_alignment(run_id, &rel, OUTCOME_ADDED);
        folder.files_added.push(rel);
    }

    folder.statistics = FolderCompareStatistics {
        files_added: folder.files_added.len() as u64,
        files_removed: folder.files_removed.len() as u64,
        files_changed,
        contracts_added,
        contracts_removed,
    };

    sink.finish(&mut folder);
    Ok(folder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FileRecordBuilder;

    fn record(path: &str) -> FileRecord {
        FileRecordBuilder::new(path).build().unwrap()
    }

    #[test]
    fn test_relative_path_strips_root() {
        assert_eq!(
            relative_path(Path::new("/tree/src/A.java"), Path::new("/tree")),
            "src/A.java"
        );
    }

    #[test]
    fn test_relative_path_falls_back_to_full_path() {
        assert_eq!(
            relative_path(Path::new("/elsewhere/A.java"), Path::new("/tree")),
            "/elsewhere/A.java"
        );
        assert_eq!(relative_path(Path::new("/tree"), Path::new("/tree")), "/tree");
    }

    #[test]
    fn test_pending_index_hands_out_each_record_once() {
        let mut index = PendingIndex::new(vec![
            ("a".to_string(), record("/o/a")),
            ("b".to_string(), record("/o/b")),
            ("a".to_string(), record("/o/a2")),
        ]);

        assert_eq!(index.take("a").map(|r| r.full_path().to_path_buf()), Some("/o/a".into()));
        assert_eq!(index.take("a").map(|r| r.full_path().to_path_buf()), Some("/o/a2".into()));
        assert!(index.take("a").is_none());

        let remaining: Vec<String> = index.into_remaining().map(|(rel, _)| rel).collect();
        assert_eq!(remaining, vec!["b".to_string()]);
    }
}
