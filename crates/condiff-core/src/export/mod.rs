//! JSON export of comparison results.
//!
//! Layout of an export directory:
//!
//! - `<escaped relative path>.json`: one document per qualifying file report
//! - `<global statistics file>`: the folder report
//!
//! A file report whose document name equals the global statistics file name
//! is not written; it is counted as failed so the folder document stays
//! intact.
//!
//! Documents carry no timestamps or run ids, so exporting the same comparison
//! twice produces byte-identical files.

pub mod atomic;

use crate::diff::model::{FileCompareReport, FolderCompareReport};
use crate::errors::{serialization_error, CompareError, ExError, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub use atomic::atomic_write;

/// Default name of the folder-level document
pub const DEFAULT_GLOBAL_STATISTICS_FILE: &str = "compare_statistics.json";

/// Outcome of exporting a set of file reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExportSummary {
    pub files_written: usize,
    pub files_failed: usize,
    pub global_statistics_written: bool,
}

impl ExportSummary {
    /// True iff at least one per-file document was written
    pub fn succeeded(&self) -> bool {
        self.files_written > 0
    }
}

/// Escape a relative path into a single file name.
///
/// Injective: `%` is escaped first, so distinct paths never collide.
pub fn escape_file_path(relative_path: &str) -> String {
    let mut out = String::with_capacity(relative_path.len() + 8);
    for ch in relative_path.chars() {
        match ch {
            '%' => out.push_str("%25"),
            '/' => out.push_str("%2F"),
            '\\' => out.push_str("%5C"),
            ':' => out.push_str("%3A"),
            _ => out.push(ch),
        }
    }
    out
}

/// Name of the document holding the report for `relative_path`
pub fn report_file_name(relative_path: &str) -> String {
    format!("{}.json", escape_file_path(relative_path))
}

/// Serialize `value` and write it atomically as `output_dir/file_name`.
///
/// # Errors
///
/// `Serialization` if encoding fails, `Io` if the write fails.
pub fn write_json_document<T: Serialize>(
    value: &T,
    file_name: &str,
    output_dir: &Path,
    pretty_print: bool,
) -> Result<PathBuf> {
    let bytes = if pretty_print {
        serde_json::to_vec_pretty(value)
    } else {
        serde_json::to_vec(value)
    }
    .map_err(|e| serialization_error("write_json_document", e))?;

    let target = output_dir.join(file_name);
    atomic_write(&target, &bytes)?;
    Ok(target)
}

/// Write the document of one file report and count the outcome in `summary`.
///
/// Failures are logged, never propagated.
pub(crate) fn export_file_report(
    report: &FileCompareReport,
    relative_path: &str,
    output_dir: &Path,
    pretty_print: bool,
    global_statistics_file: &str,
    summary: &mut ExportSummary,
) {
    let file_name = report_file_name(relative_path);
    let written = if file_name == global_statistics_file {
        Err(ExError::from(CompareError::ReservedDocumentName {
            name: file_name.clone(),
        })
        .with_op("export_file_report"))
    } else {
        write_json_document(report, &file_name, output_dir, pretty_print)
    };
    match written {
        Ok(_) => summary.files_written += 1,
        Err(err) => {
            summary.files_failed += 1;
            log_export_failure(&file_name, &err);
        }
    }
}

/// Check that `output_dir` exists and is a directory.
///
/// # Errors
///
/// `InvalidExportTarget` otherwise.
pub fn check_export_dir(output_dir: &Path) -> Result<()> {
    if !output_dir.exists() {
        return Err(CompareError::ExportDirNotFound {
            path: output_dir.to_path_buf(),
        }
        .into());
    }
    if !output_dir.is_dir() {
        return Err(CompareError::ExportDirNotADirectory {
            path: output_dir.to_path_buf(),
        }
        .into());
    }
    Ok(())
}

/// Export a buffered folder report.
///
/// Every file report gets its own document; a failed write is logged and
/// counted, the remaining reports are still written. The folder document is
/// written only when at least one file document was.
///
/// # Errors
///
/// `InvalidExportTarget` when `output_dir` is missing or not a directory.
pub fn export_folder_report(
    report: &FolderCompareReport,
    output_dir: &Path,
    pretty_print: bool,
    global_statistics_file: &str,
) -> Result<ExportSummary> {
    let op = "export_folder_report";
    let start = Instant::now();
    crate::log_op_start!(op, reports = report.file_compare_reports.len());

    if let Err(err) = check_export_dir(output_dir) {
        crate::log_op_error!(op, err.clone(), duration_ms = start.elapsed().as_millis() as u64);
        return Err(err);
    }

    let mut summary = ExportSummary::default();
    for file_report in &report.file_compare_reports {
        export_file_report(
            file_report,
            &relative_report_path(report, &file_report.this_file_path),
            output_dir,
            pretty_print,
            global_statistics_file,
            &mut summary,
        );
    }

    if summary.succeeded() {
        match write_json_document(report, global_statistics_file, output_dir, pretty_print) {
            Ok(_) => summary.global_statistics_written = true,
            Err(err) => log_export_failure(global_statistics_file, &err),
        }
    }

    crate::log_op_end!(
        op,
        duration_ms = start.elapsed().as_millis() as u64,
        files_written = summary.files_written,
        files_failed = summary.files_failed
    );
    Ok(summary)
}

/// Relative path of a file report inside its "this" tree, for naming its document
fn relative_report_path(report: &FolderCompareReport, this_file_path: &str) -> String {
    crate::diff::folder_engine::relative_path(
        Path::new(this_file_path),
        Path::new(&report.this_folder_path),
    )
}

pub(crate) fn log_export_failure(file_name: &str, err: &ExError) {
    tracing::warn!(
        component = module_path!(),
        file = file_name,
        err_kind = ?err.kind(),
        err_code = err.code(),
        "failed to export document: {}",
        err
    );
}
