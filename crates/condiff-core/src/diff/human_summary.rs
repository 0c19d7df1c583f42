//! Human-readable summary renderer for folder comparisons.

use crate::diff::model::{ChangeKind, FileCompareReport, FolderCompareReport};

/// Render a Markdown summary of a [`FolderCompareReport`].
///
/// Informational only; the structured report is authoritative.
pub fn render_human_summary(report: &FolderCompareReport) -> String {
    let mut out = String::new();

    out.push_str("## Contract Diff\n\n");
    out.push_str(&format!(
        "`{}` → `{}`\n\n",
        report.this_folder_path, report.other_folder_path
    ));

    let stats = &report.statistics;
    out.push_str(
        "| Files added | Files removed | Files changed | Contracts added | Contracts removed |\n\
         |---|---|---|---|---|\n",
    );
    out.push_str(&format!(
        "| {} | {} | {} | {} | {} |\n\n",
        stats.files_added,
        stats.files_removed,
        stats.files_changed,
        stats.contracts_added,
        stats.contracts_removed
    ));

    if let Some(export) = &report.export {
        out.push_str(&format!(
            "_Exported {} file report(s), {} failed._\n\n",
            export.files_written, export.files_failed
        ));
    }

    if report.is_contract_equal() && report.file_compare_reports.is_empty() {
        out.push_str("_No contract changes detected._\n");
        return out;
    }

    push_path_list(&mut out, "Added files", &report.files_added);
    push_path_list(&mut out, "Removed files", &report.files_removed);

    if !report.file_compare_reports.is_empty() {
        out.push_str("### Changed files\n\n");
        for file in &report.file_compare_reports {
            push_file(&mut out, file);
        }
    }

    out
}

fn push_path_list(out: &mut String, title: &str, paths: &[String]) {
    if paths.is_empty() {
        return;
    }
    out.push_str(&format!("### {} ({})\n\n", title, paths.len()));
    for path in paths {
        out.push_str(&format!("- `{}`\n", path));
    }
    out.push('\n');
}

fn push_file(out: &mut String, file: &FileCompareReport) {
    let s = &file.statistics;
    out.push_str(&format!(
        "#### `{}`{}\n\n",
        file.this_file_path,
        if file.contract_equal {
            " (contracts unchanged)"
        } else {
            ""
        }
    ));
    out.push_str(&format!(
        "contracts: +{} -{} ~{} | methods: +{} -{} ~{}\n\n",
        s.contracts_added,
        s.contracts_removed,
        s.contracts_modified,
        s.methods_added,
        s.methods_removed,
        s.methods_modified
    ));
    for class in &file.classes_added {
        out.push_str(&format!("- class added: `{}`\n", class));
    }
    for class in &file.classes_removed {
        out.push_str(&format!("- class removed: `{}`\n", class));
    }
    for method in &file.method_changes {
        if method.change == ChangeKind::Unchanged {
            continue;
        }
        out.push_str(&format!(
            "- {} `{}`{}\n",
            label(method.change),
            method.signature,
            if method.declaration_changed {
                " (declaration changed)"
            } else {
                ""
            }
        ));
        for contract in &method.contract_changes {
            let text = match (&contract.this, &contract.other) {
                (Some(a), Some(b)) if a.text != b.text => format!("`{}` → `{}`", a.text, b.text),
                (_, Some(side)) | (Some(side), None) => format!("`{}`", side.text),
                (None, None) => String::new(),
            };
            out.push_str(&format!(
                "  - {} {}: {}\n",
                label(contract.change),
                contract.category,
                text
            ));
        }
    }
    out.push('\n');
}

fn label(change: ChangeKind) -> &'static str {
    match change {
        ChangeKind::Unchanged => "unchanged",
        ChangeKind::Added => "added",
        ChangeKind::Removed => "removed",
        ChangeKind::Modified => "modified",
    }
}
