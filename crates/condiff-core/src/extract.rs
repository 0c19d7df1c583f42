//! Seam to the contract extraction engine.
//!
//! The comparator never parses source text. It asks a [`ContractExtractor`]
//! for the records of a tree. [`SidecarExtractor`] reads records that an
//! external engine has already written next to each source file.

use crate::errors::{io_error, CompareError, ExError, ExErrorKind, Result};
use crate::model::{ClassRecord, ContractOccurrence, FileRecord, FileRecordBuilder, MethodRecord};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Instant;
use walkdir::WalkDir;

/// Default suffix of record sidecar files
pub const DEFAULT_SIDECAR_SUFFIX: &str = ".contracts.json";

/// Produces the file records of a source tree.
///
/// Implementations must be total: either every file of the tree is returned
/// with fully populated statistics, or the call fails.
pub trait ContractExtractor {
    /// Extract every file record under `root`, in a deterministic order.
    ///
    /// # Errors
    ///
    /// Any failure to read or interpret the tree.
    fn extract_from_folder(&self, root: &Path) -> Result<Vec<FileRecord>>;
}

/// On-disk form of one extracted file, stored beside the source file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordSidecar {
    #[serde(default)]
    pub classes: Vec<ClassRecord>,
    #[serde(default)]
    pub methods: Vec<MethodRecord>,
    #[serde(default)]
    pub contracts: Vec<ContractOccurrence>,
}

impl RecordSidecar {
    /// Replay the sidecar through the record builder.
    ///
    /// # Errors
    ///
    /// `InvalidRecord` when the sidecar breaks the builder rules.
    pub fn into_record(self, full_path: impl Into<PathBuf>) -> Result<FileRecord> {
        let mut builder = FileRecordBuilder::new(full_path);
        for class in self.classes {
            builder = builder.with_class(class);
        }
        for method in self.methods {
            builder = builder.with_method(method);
        }
        for contract in self.contracts {
            builder = builder.with_contract(contract);
        }
        builder.build()
    }
}

/// Reads `<source file><suffix>` sidecars from a tree.
///
/// The record's full path is the sidecar path without the suffix, so
/// `src/Stack.java.contracts.json` yields a record for `src/Stack.java`.
#[derive(Debug, Clone)]
pub struct SidecarExtractor {
    suffix: String,
}

impl SidecarExtractor {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    fn source_path_for(&self, sidecar: &Path) -> Option<PathBuf> {
        let name = sidecar.file_name()?.to_str()?;
        let source_name = name.strip_suffix(self.suffix.as_str())?;
        if source_name.is_empty() {
            return None;
        }
        Some(sidecar.with_file_name(source_name))
    }

    fn load(&self, sidecar: &Path, source: PathBuf) -> Result<FileRecord> {
        let bytes = std::fs::read(sidecar).map_err(|e| io_error("read_sidecar", sidecar, e))?;
        let parsed: RecordSidecar = serde_json::from_slice(&bytes).map_err(|e| {
            ExError::from(CompareError::InvalidRecord {
                path: sidecar.to_path_buf(),
                reason: e.to_string(),
            })
        })?;
        parsed.into_record(source)
    }
}

impl Default for SidecarExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_SIDECAR_SUFFIX)
    }
}

impl ContractExtractor for SidecarExtractor {
    fn extract_from_folder(&self, root: &Path) -> Result<Vec<FileRecord>> {
        let op = "extract_from_folder";
        let start = Instant::now();
        crate::log_op_start!(op, root = %root.display());

        let mut records = Vec::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let err = ExError::new(ExErrorKind::Extraction)
                        .with_op(op)
                        .with_path(e.path().unwrap_or(root))
                        .with_message(e.to_string());
                    crate::log_op_error!(op, err.clone(), duration_ms = start.elapsed().as_millis() as u64);
                    return Err(err);
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(source) = self.source_path_for(entry.path()) else {
                continue;
            };
            match self.load(entry.path(), source) {
                Ok(record) => records.push(record),
                Err(err) => {
                    let err = ExError::new(ExErrorKind::Extraction)
                        .with_op(op)
                        .with_path(entry.path())
                        .with_message("sidecar could not be loaded")
                        .with_source(err);
                    crate::log_op_error!(op, err.clone(), duration_ms = start.elapsed().as_millis() as u64);
                    return Err(err);
                }
            }
        }

        crate::log_op_end!(
            op,
            duration_ms = start.elapsed().as_millis() as u64,
            records = records.len()
        );
        Ok(records)
    }
}
