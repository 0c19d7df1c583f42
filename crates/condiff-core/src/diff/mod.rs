//! Contract diff engine.
//!
//! Compares two versions of a source tree and reports which contracts were
//! added, removed or changed.
//!
//! ## Entry points
//!
//! ```ignore
//! use condiff_core::diff::{compare_folders, CompareOptions};
//! use condiff_core::extract::SidecarExtractor;
//!
//! let report = compare_folders(old_root, new_root, &CompareOptions::default(), &SidecarExtractor::default())?;
//! println!("{}", condiff_core::diff::render_human_summary(&report));
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: identical inputs produce identical reports and
//!   byte-identical exported documents.
//! - **Single pairing**: a file of the other tree is matched at most once.
//! - **Consistent totals**: folder statistics are accrued during alignment
//!   and agree with the added/removed path lists.

pub mod file_engine;
pub mod folder_engine;
pub mod human_summary;
pub mod model;

pub use file_engine::compare_files;
pub use folder_engine::{compare_folders, relative_path, CompareOptions, ExportOptions};
pub use human_summary::render_human_summary;
pub use model::{
    ChangeKind, ContractChange, ContractSide, FileCompareReport, FileCompareStatistics,
    FolderCompareReport, FolderCompareStatistics, MethodChange,
};
