//! Contract data model
//!
//! - [`contract`]: the closed contract taxonomy and extracted occurrences
//! - [`statistics`]: the additive per-file statistics accumulator
//! - [`file`]: analyzed file records and their builder

pub mod contract;
pub mod file;
pub mod statistics;

pub use contract::{
    ContractCategory, ContractKind, ContractOccurrence, DetectionMechanism, SourceLocation,
};
pub use file::{ClassRecord, FileRecord, FileRecordBuilder, MethodRecord};
pub use statistics::FileStatistics;

/// Merge the statistics of every record into one tree-level accumulator.
pub fn aggregate_statistics<'a, I>(records: I) -> FileStatistics
where
    I: IntoIterator<Item = &'a FileRecord>,
{
    records.into_iter().map(FileRecord::statistics).sum()
}
