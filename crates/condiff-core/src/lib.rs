//! condiff core - contract extraction model and diff engine
//!
//! This crate provides:
//! - The closed contract taxonomy and per-file statistics with merge algebra
//! - File records built incrementally by an extraction engine
//! - File- and folder-level comparison producing structured delta reports
//! - Streaming or buffered JSON export of comparison results
//! - The extraction seam (`ContractExtractor`) and a sidecar-reading extractor
//! - Error, logging and settings facilities shared by the CLI

pub mod diff;
pub mod errors;
pub mod export;
pub mod extract;
pub mod logging_facility;
pub mod model;
pub mod settings;

pub use condiff_core_types::schema;

// Re-export commonly used types
pub use diff::{compare_files, compare_folders, CompareOptions, ExportOptions};
pub use errors::{CompareError, ExError, ExErrorKind, Result};
pub use extract::{ContractExtractor, SidecarExtractor};
pub use model::{aggregate_statistics, ContractCategory, FileRecord, FileStatistics};
pub use settings::Settings;
