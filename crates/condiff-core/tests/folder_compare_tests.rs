//! Folder-level comparison: alignment, filtering, statistics and preconditions.

mod common;

use common::{record, sidecar_with_contracts, write_sidecar, FixedExtractor};
use condiff_core::diff::{compare_folders, ChangeKind, CompareOptions};
use condiff_core::errors::ExErrorKind;
use condiff_core::extract::{RecordSidecar, SidecarExtractor};
use condiff_core::model::{ClassRecord, ContractCategory, ContractOccurrence, MethodRecord};
use std::fs;
use tempfile::TempDir;

fn options(report_equal: bool, report_non_contract_changes: bool) -> CompareOptions {
    CompareOptions {
        report_equal,
        report_non_contract_changes,
        export: None,
    }
}

/// A class and a method but no contracts.
fn contract_free(class: &str) -> RecordSidecar {
    RecordSidecar {
        classes: vec![ClassRecord::new(class, 1)],
        methods: vec![MethodRecord::new("run()", "public void run()", 2)],
        contracts: Vec::new(),
    }
}

fn populate(root: &std::path::Path) {
    write_sidecar(root, "src/Account.java", &sidecar_with_contracts("Account", 3));
    write_sidecar(root, "src/Ledger.java", &sidecar_with_contracts("Ledger", 1));
    write_sidecar(root, "src/util/Plain.java", &contract_free("Plain"));
}

#[test]
fn test_identical_copy_has_empty_delta() {
    let this = TempDir::new().unwrap();
    let other = TempDir::new().unwrap();
    populate(this.path());
    populate(other.path());

    let report = compare_folders(
        this.path(),
        other.path(),
        &options(true, true),
        &SidecarExtractor::default(),
    )
    .unwrap();

    assert_eq!(report.statistics.files_added, 0);
    assert_eq!(report.statistics.files_removed, 0);
    assert_eq!(report.statistics.contracts_added, 0);
    assert_eq!(report.statistics.contracts_removed, 0);
    assert_eq!(report.file_compare_reports.len(), 3);
    assert!(report.file_compare_reports.iter().all(|r| r.contract_equal));
    assert!(report.is_contract_equal());
}

#[test]
fn test_identical_copy_without_report_equal_reports_nothing() {
    let this = TempDir::new().unwrap();
    let other = TempDir::new().unwrap();
    populate(this.path());
    populate(other.path());

    let report = compare_folders(
        this.path(),
        other.path(),
        &options(false, true),
        &SidecarExtractor::default(),
    )
    .unwrap();

    assert!(report.file_compare_reports.is_empty());
    assert!(report.files_added.is_empty());
    assert!(report.files_removed.is_empty());
}

#[test]
fn test_zero_contract_file_only_in_this_is_filtered() {
    let this = TempDir::new().unwrap();
    let other = TempDir::new().unwrap();
    write_sidecar(this.path(), "Plain.java", &contract_free("Plain"));

    let report = compare_folders(
        this.path(),
        other.path(),
        &options(false, false),
        &SidecarExtractor::default(),
    )
    .unwrap();

    assert!(report.files_removed.is_empty());
    assert_eq!(report.statistics.files_removed, 0);
    assert_eq!(report.statistics.contracts_removed, 0);
}

#[test]
fn test_zero_contract_file_only_in_this_is_removed_with_non_contract_changes() {
    let this = TempDir::new().unwrap();
    let other = TempDir::new().unwrap();
    write_sidecar(this.path(), "Plain.java", &contract_free("Plain"));

    let report = compare_folders(
        this.path(),
        other.path(),
        &options(false, true),
        &SidecarExtractor::default(),
    )
    .unwrap();

    assert_eq!(report.files_removed, vec!["Plain.java".to_string()]);
    assert_eq!(report.statistics.files_removed, 1);
    assert_eq!(report.statistics.contracts_removed, 0);
}

#[test]
fn test_asymmetric_trees() {
    let this = TempDir::new().unwrap();
    let other = TempDir::new().unwrap();
    write_sidecar(this.path(), "A.java", &sidecar_with_contracts("A", 3));
    write_sidecar(this.path(), "B.java", &contract_free("B"));
    write_sidecar(other.path(), "A.java", &sidecar_with_contracts("A", 2));
    write_sidecar(other.path(), "C.java", &sidecar_with_contracts("C", 2));

    let report = compare_folders(
        this.path(),
        other.path(),
        &options(false, false),
        &SidecarExtractor::default(),
    )
    .unwrap();

    assert_eq!(report.files_added, vec!["C.java".to_string()]);
    assert!(report.files_removed.is_empty());
    assert_eq!(report.statistics.files_added, 1);
    assert_eq!(report.statistics.files_removed, 0);
    assert_eq!(report.statistics.contracts_added, 2);
    assert_eq!(report.statistics.contracts_removed, 0);

    assert_eq!(report.file_compare_reports.len(), 1);
    let a = &report.file_compare_reports[0];
    assert!(a.this_file_path.ends_with("A.java"));
    assert!(!a.contract_equal);
    assert_eq!(a.statistics.contracts_removed, 1);
    assert_eq!(a.statistics.contracts_added, 0);

    let removed: Vec<&str> = a
        .method_changes
        .iter()
        .flat_map(|m| &m.contract_changes)
        .filter(|c| c.change == ChangeKind::Removed)
        .filter_map(|c| c.this.as_ref().map(|s| s.text.as_str()))
        .collect();
    assert_eq!(removed, vec!["c2"]);
}

#[test]
fn test_contract_free_change_is_dropped_without_non_contract_changes() {
    let this = TempDir::new().unwrap();
    let other = TempDir::new().unwrap();
    let mut renamed = sidecar_with_contracts("A", 1);
    write_sidecar(this.path(), "A.java", &renamed);
    renamed.classes.push(ClassRecord::new("Helper", 20));
    write_sidecar(other.path(), "A.java", &renamed);

    let strict = compare_folders(
        this.path(),
        other.path(),
        &options(false, false),
        &SidecarExtractor::default(),
    )
    .unwrap();
    assert!(strict.file_compare_reports.is_empty());

    let loose = compare_folders(
        this.path(),
        other.path(),
        &options(false, true),
        &SidecarExtractor::default(),
    )
    .unwrap();
    assert_eq!(loose.file_compare_reports.len(), 1);
    assert_eq!(loose.file_compare_reports[0].classes_added, vec!["Helper".to_string()]);
    assert!(loose.file_compare_reports[0].contract_equal);
}

#[test]
fn test_removed_file_counts_its_contracts() {
    let this = TempDir::new().unwrap();
    let other = TempDir::new().unwrap();
    write_sidecar(this.path(), "pkg/Gone.java", &sidecar_with_contracts("Gone", 4));

    let report = compare_folders(
        this.path(),
        other.path(),
        &options(false, false),
        &SidecarExtractor::default(),
    )
    .unwrap();

    assert_eq!(report.files_removed, vec!["pkg/Gone.java".to_string()]);
    assert_eq!(report.statistics.contracts_removed, 4);
    assert_eq!(report.statistics.contracts_added, 0);
}

#[test]
fn test_other_record_is_matched_at_most_once() {
    let this = TempDir::new().unwrap();
    let other = TempDir::new().unwrap();
    // Full paths outside the roots fall back to themselves as relative paths,
    // so both "this" records claim the same key.
    let extractor = FixedExtractor::default()
        .with_tree(
            this.path(),
            vec![
                record("/virtual/X.java", sidecar_with_contracts("X", 2)),
                record("/virtual/X.java", sidecar_with_contracts("X", 1)),
            ],
        )
        .with_tree(
            other.path(),
            vec![record("/virtual/X.java", sidecar_with_contracts("X", 2))],
        );

    let report = compare_folders(this.path(), other.path(), &options(true, false), &extractor).unwrap();

    assert_eq!(report.file_compare_reports.len(), 1);
    assert!(report.file_compare_reports[0].contract_equal);
    assert_eq!(report.files_removed, vec!["/virtual/X.java".to_string()]);
    assert_eq!(report.statistics.contracts_removed, 1);
    assert!(report.files_added.is_empty());
}

/// Outer and nested class both declaring `toString()`; the nested one carries
/// a postcondition with the given text.
fn outer_and_inner(inner_postcondition: &str) -> RecordSidecar {
    RecordSidecar {
        classes: vec![ClassRecord::new("Outer", 1), ClassRecord::new("Inner", 10)],
        methods: vec![
            MethodRecord::new("toString()", "public String toString()", 4),
            MethodRecord::new("toString()", "public String toString()", 13),
        ],
        contracts: vec![
            ContractOccurrence::new(
                ContractCategory::AssertionPrecondition,
                "toString()",
                5,
                "name != null",
            ),
            ContractOccurrence::new(
                ContractCategory::AssertionPostcondition,
                "toString()",
                14,
                inner_postcondition,
            )
            .on_instance(1),
        ],
    }
}

#[test]
fn test_shared_signature_in_nested_class_compares_cleanly() {
    let this = TempDir::new().unwrap();
    let other = TempDir::new().unwrap();
    write_sidecar(this.path(), "src/Outer.java", &outer_and_inner("result != null"));
    write_sidecar(other.path(), "src/Outer.java", &outer_and_inner("result != null"));

    let report = compare_folders(
        this.path(),
        other.path(),
        &options(true, true),
        &SidecarExtractor::default(),
    )
    .unwrap();

    assert_eq!(report.file_compare_reports.len(), 1);
    let file = &report.file_compare_reports[0];
    assert!(file.contract_equal);
    assert_eq!(file.method_changes.len(), 2);
    assert!(file.method_changes.iter().all(|m| m.change == ChangeKind::Unchanged));
    assert_eq!(file.statistics.contracts_unchanged, 2);
    assert!(report.is_contract_equal());
}

#[test]
fn test_shared_signature_pairs_in_declaration_order() {
    let this = TempDir::new().unwrap();
    let other = TempDir::new().unwrap();
    write_sidecar(this.path(), "src/Outer.java", &outer_and_inner("result != null"));
    write_sidecar(other.path(), "src/Outer.java", &outer_and_inner("!result.isEmpty()"));

    let report = compare_folders(
        this.path(),
        other.path(),
        &options(false, true),
        &SidecarExtractor::default(),
    )
    .unwrap();

    assert_eq!(report.file_compare_reports.len(), 1);
    let file = &report.file_compare_reports[0];
    assert!(!file.contract_equal);
    let kinds: Vec<ChangeKind> = file.method_changes.iter().map(|m| m.change).collect();
    assert_eq!(kinds, vec![ChangeKind::Unchanged, ChangeKind::Modified]);
    let inner = &file.method_changes[1].contract_changes;
    assert_eq!(inner.len(), 1);
    assert_eq!(inner[0].change, ChangeKind::Modified);
    assert_eq!(inner[0].this.as_ref().map(|s| s.line), Some(14));
    assert_eq!(file.statistics.contracts_modified, 1);
    assert_eq!(file.statistics.contracts_unchanged, 1);
    assert_eq!(file.statistics.methods_added, 0);
    assert_eq!(file.statistics.methods_removed, 0);
}

#[test]
fn test_encounter_order_is_kept() {
    let this = TempDir::new().unwrap();
    let other = TempDir::new().unwrap();
    for name in ["b/Two.java", "a/One.java", "c/Three.java"] {
        write_sidecar(other.path(), name, &sidecar_with_contracts("K", 1));
    }

    let report = compare_folders(
        this.path(),
        other.path(),
        &options(false, false),
        &SidecarExtractor::default(),
    )
    .unwrap();

    assert_eq!(
        report.files_added,
        vec![
            "a/One.java".to_string(),
            "b/Two.java".to_string(),
            "c/Three.java".to_string()
        ]
    );
}

#[test]
fn test_missing_root_fails_before_extraction() {
    let other = TempDir::new().unwrap();
    let missing = other.path().join("does-not-exist");
    let extractor = FixedExtractor::default();

    let err = compare_folders(&missing, other.path(), &CompareOptions::default(), &extractor)
        .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::FolderNotFound);
    assert_eq!(err.op(), Some("compare_folders"));
    assert!(err.run_id().is_some());
    assert_eq!(extractor.calls(), 0);
}

#[test]
fn test_file_root_is_not_a_directory() {
    let this = TempDir::new().unwrap();
    let file = this.path().join("plain.txt");
    fs::write(&file, "x").unwrap();
    let extractor = FixedExtractor::default();

    let err = compare_folders(this.path(), &file, &CompareOptions::default(), &extractor).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::NotADirectory);
    assert!(err.kind().is_precondition());
    assert_eq!(extractor.calls(), 0);
}

#[test]
fn test_bad_export_dir_fails_before_extraction() {
    let this = TempDir::new().unwrap();
    let other = TempDir::new().unwrap();
    let extractor = FixedExtractor::default();
    let options = CompareOptions {
        export: Some(condiff_core::diff::ExportOptions::new(this.path().join("nowhere"))),
        ..CompareOptions::default()
    };

    let err = compare_folders(this.path(), other.path(), &options, &extractor).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::InvalidExportTarget);
    assert_eq!(extractor.calls(), 0);
}

#[test]
fn test_two_empty_trees_are_a_valid_empty_result() {
    let this = TempDir::new().unwrap();
    let other = TempDir::new().unwrap();

    let report = compare_folders(
        this.path(),
        other.path(),
        &CompareOptions::default(),
        &SidecarExtractor::default(),
    )
    .unwrap();

    assert!(report.is_contract_equal());
    assert!(report.file_compare_reports.is_empty());
    assert!(report.export.is_none());
}

#[test]
fn test_extraction_failure_propagates() {
    let this = TempDir::new().unwrap();
    let other = TempDir::new().unwrap();
    fs::write(this.path().join("Bad.java.contracts.json"), r#"{"classes": 5}"#).unwrap();

    let err = compare_folders(
        this.path(),
        other.path(),
        &CompareOptions::default(),
        &SidecarExtractor::default(),
    )
    .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::Extraction);
    assert_eq!(err.op(), Some("compare_folders"));
}
