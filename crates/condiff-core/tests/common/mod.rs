//! Shared fixtures for condiff-core integration tests.

#![allow(dead_code)]

use condiff_core::errors::Result;
use condiff_core::extract::{ContractExtractor, RecordSidecar};
use condiff_core::model::{
    ClassRecord, ContractCategory, ContractOccurrence, FileRecord, FileRecordBuilder, MethodRecord,
};
use std::cell::Cell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Sidecar with one class and one method `check()` holding `n` assertion
/// preconditions `c0 .. c{n-1}`.
pub fn sidecar_with_contracts(class: &str, n: usize) -> RecordSidecar {
    let texts: Vec<String> = (0..n).map(|i| format!("c{}", i)).collect();
    sidecar_with_texts(class, &texts.iter().map(String::as_str).collect::<Vec<_>>())
}

/// Sidecar with one class and one method `check()` holding the given preconditions.
pub fn sidecar_with_texts(class: &str, texts: &[&str]) -> RecordSidecar {
    RecordSidecar {
        classes: vec![ClassRecord::new(class, 1)],
        methods: vec![MethodRecord::new("check()", "public void check()", 3)],
        contracts: texts
            .iter()
            .enumerate()
            .map(|(i, text)| {
                ContractOccurrence::new(
                    ContractCategory::AssertionPrecondition,
                    "check()",
                    4 + i as u32,
                    *text,
                )
            })
            .collect(),
    }
}

/// Write `sidecar` for the source file `rel` under `root`, creating parents.
pub fn write_sidecar(root: &Path, rel: &str, sidecar: &RecordSidecar) {
    let path = root.join(format!("{}.contracts.json", rel));
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, serde_json::to_vec_pretty(sidecar).unwrap()).unwrap();
}

/// Build a record directly from a sidecar.
pub fn record(path: impl Into<PathBuf>, sidecar: RecordSidecar) -> FileRecord {
    sidecar.into_record(path).unwrap()
}

/// Record with the given methods, each as `(signature, declaration, contracts)`.
pub fn record_with_methods(
    path: &str,
    methods: &[(&str, &str, &[(ContractCategory, &str)])],
) -> FileRecord {
    let mut builder = FileRecordBuilder::new(path).with_class(ClassRecord::new("Subject", 1));
    for (i, (signature, declaration, _)) in methods.iter().enumerate() {
        builder = builder.with_method(MethodRecord::new(*signature, *declaration, 10 * (i as u32 + 1)));
    }
    for (i, (signature, _, contracts)) in methods.iter().enumerate() {
        for (k, (category, text)) in contracts.iter().enumerate() {
            builder = builder.with_contract(ContractOccurrence::new(
                *category,
                *signature,
                10 * (i as u32 + 1) + 1 + k as u32,
                *text,
            ));
        }
    }
    builder.build().unwrap()
}

/// Extractor serving fixed records per root and counting its calls.
#[derive(Default)]
pub struct FixedExtractor {
    records: HashMap<PathBuf, Vec<FileRecord>>,
    calls: Cell<usize>,
}

impl FixedExtractor {
    pub fn with_tree(mut self, root: &Path, records: Vec<FileRecord>) -> Self {
        self.records.insert(fs::canonicalize(root).unwrap(), records);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl ContractExtractor for FixedExtractor {
    fn extract_from_folder(&self, root: &Path) -> Result<Vec<FileRecord>> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.records.get(root).cloned().unwrap_or_default())
    }
}

/// Sorted `(file name, bytes)` of every file in `dir`.
pub fn read_dir_sorted(dir: &Path) -> Vec<(String, Vec<u8>)> {
    let mut files: Vec<(String, Vec<u8>)> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap())
        .filter(|e| e.file_type().unwrap().is_file())
        .map(|e| {
            (
                e.file_name().to_string_lossy().into_owned(),
                fs::read(e.path()).unwrap(),
            )
        })
        .collect();
    files.sort();
    files
}
