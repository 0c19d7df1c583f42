//! Comparison report types.
//!
//! All collections are `Vec`s in a deterministic order (source order for
//! methods and contracts, encounter order for files) so that serializing the
//! same comparison twice yields identical bytes.

use crate::export::ExportSummary;
use crate::model::ContractCategory;
use serde::{Deserialize, Serialize};

/// Classification of a method or contract between the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Unchanged,
    /// Present only on the "other" side
    Added,
    /// Present only on the "this" side
    Removed,
    Modified,
}

/// One side of a contract change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractSide {
    pub text: String,
    pub line: u32,
}

/// Classification of a single contract occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractChange {
    pub category: ContractCategory,
    pub change: ChangeKind,
    /// The occurrence in the "this" file (absent when added)
    pub this: Option<ContractSide>,
    /// The occurrence in the "other" file (absent when removed)
    pub other: Option<ContractSide>,
}

/// Classification of a method and its contracts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodChange {
    pub signature: String,
    pub change: ChangeKind,
    /// True when both sides declare the method with different declaration text
    pub declaration_changed: bool,
    pub contract_changes: Vec<ContractChange>,
}

impl MethodChange {
    /// True if at least one contract of this method was added, removed or modified
    pub fn has_contract_changes(&self) -> bool {
        self.contract_changes
            .iter()
            .any(|c| c.change != ChangeKind::Unchanged)
    }
}

/// Counters over the full, unfiltered diff of one file pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FileCompareStatistics {
    pub contracts_unchanged: u64,
    pub contracts_added: u64,
    pub contracts_removed: u64,
    pub contracts_modified: u64,
    pub methods_added: u64,
    pub methods_removed: u64,
    pub methods_modified: u64,
}

/// Diff of two versions of the same logical file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileCompareReport {
    pub this_file_path: String,
    pub other_file_path: String,
    /// True iff no contract was added, removed or modified
    pub contract_equal: bool,
    pub classes_added: Vec<String>,
    pub classes_removed: Vec<String>,
    pub method_changes: Vec<MethodChange>,
    pub statistics: FileCompareStatistics,
}

/// Tree-level totals, derived once per comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FolderCompareStatistics {
    pub files_added: u64,
    pub files_removed: u64,
    /// Matched files whose contracts differ, whether buffered or exported
    #[serde(default)]
    pub files_changed: u64,
    pub contracts_added: u64,
    pub contracts_removed: u64,
}

/// Result of comparing two source trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderCompareReport {
    pub this_folder_path: String,
    pub other_folder_path: String,
    /// Relative paths present only in the "other" tree
    pub files_added: Vec<String>,
    /// Relative paths present only in the "this" tree
    pub files_removed: Vec<String>,
    /// Qualifying per-file reports; always empty in streaming-export mode
    pub file_compare_reports: Vec<FileCompareReport>,
    pub statistics: FolderCompareStatistics,
    /// Outcome of streaming export, when it was requested
    #[serde(skip)]
    pub export: Option<ExportSummary>,
}

impl FolderCompareReport {
    pub(crate) fn new(this_folder_path: String, other_folder_path: String) -> Self {
        Self {
            this_folder_path,
            other_folder_path,
            files_added: Vec::new(),
            files_removed: Vec::new(),
            file_compare_reports: Vec::new(),
            statistics: FolderCompareStatistics::default(),
            export: None,
        }
    }

    /// True when no file was added or removed and no matched file changed
    /// its contracts. Holds in streaming mode too, where the file reports
    /// live on disk instead of in `file_compare_reports`.
    pub fn is_contract_equal(&self) -> bool {
        self.files_added.is_empty()
            && self.files_removed.is_empty()
            && self.statistics.files_changed == 0
    }
}
