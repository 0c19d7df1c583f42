//! Per-file statistics accumulator.
//!
//! Counters are unsigned, so a negative increase cannot be expressed. Public
//! mutation goes through [`FileStatistics::increase`] and
//! [`FileStatistics::merge`] only; class and method counters are advanced by
//! the record builder while a file is being analyzed.

use crate::model::contract::ContractCategory;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Additive counters for one file or a whole tree.
///
/// Invariants:
/// - `total_contracts() == per_category().map(|(_, n)| n).sum()`
/// - `methods_with_contracts() <= methods()`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "StatisticsDocument", try_from = "StatisticsDocument")]
pub struct FileStatistics {
    classes: u64,
    methods: u64,
    methods_with_contracts: u64,
    total_contracts: u64,
    per_category: [u64; ContractCategory::COUNT],
}

impl FileStatistics {
    /// All-zero accumulator; the identity of [`FileStatistics::merge`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `n` contracts of `category`, keeping the total in step.
    pub fn increase(&mut self, category: ContractCategory, n: u64) {
        self.per_category[category.index()] += n;
        self.total_contracts += n;
    }

    /// Pointwise addition of every counter of `other` into `self`.
    pub fn merge(&mut self, other: &FileStatistics) {
        self.classes += other.classes;
        self.methods += other.methods;
        self.methods_with_contracts += other.methods_with_contracts;
        self.total_contracts += other.total_contracts;
        for (mine, theirs) in self.per_category.iter_mut().zip(other.per_category.iter()) {
            *mine += theirs;
        }
    }

    /// By-value form of [`FileStatistics::merge`]
    #[must_use]
    pub fn merged(mut self, other: &FileStatistics) -> Self {
        self.merge(other);
        self
    }

    pub(crate) fn record_class(&mut self) {
        self.classes += 1;
    }

    pub(crate) fn record_method(&mut self) {
        self.methods += 1;
    }

    /// Marks one already recorded method as carrying contracts.
    pub(crate) fn record_method_with_contracts(&mut self) {
        debug_assert!(self.methods_with_contracts < self.methods);
        self.methods_with_contracts += 1;
    }

    pub fn classes(&self) -> u64 {
        self.classes
    }

    pub fn methods(&self) -> u64 {
        self.methods
    }

    pub fn methods_with_contracts(&self) -> u64 {
        self.methods_with_contracts
    }

    pub fn total_contracts(&self) -> u64 {
        self.total_contracts
    }

    /// Count for a single category
    pub fn contracts(&self, category: ContractCategory) -> u64 {
        self.per_category[category.index()]
    }

    /// Every category with its count, in category order (zeros included)
    pub fn per_category(&self) -> impl Iterator<Item = (ContractCategory, u64)> + '_ {
        ContractCategory::ALL
            .iter()
            .map(move |category| (*category, self.per_category[category.index()]))
    }
}

impl std::iter::Sum for FileStatistics {
    fn sum<I: Iterator<Item = FileStatistics>>(iter: I) -> Self {
        iter.fold(FileStatistics::new(), |acc, s| acc.merged(&s))
    }
}

impl<'a> std::iter::Sum<&'a FileStatistics> for FileStatistics {
    fn sum<I: Iterator<Item = &'a FileStatistics>>(iter: I) -> Self {
        iter.fold(FileStatistics::new(), |acc, s| acc.merged(s))
    }
}

/// Serialized form: named counters plus a category → count map.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StatisticsDocument {
    classes: u64,
    methods: u64,
    methods_with_contracts: u64,
    total_contracts: u64,
    contracts: BTreeMap<ContractCategory, u64>,
}

impl From<FileStatistics> for StatisticsDocument {
    fn from(stats: FileStatistics) -> Self {
        Self {
            classes: stats.classes,
            methods: stats.methods,
            methods_with_contracts: stats.methods_with_contracts,
            total_contracts: stats.total_contracts,
            contracts: stats.per_category().collect(),
        }
    }
}

impl TryFrom<StatisticsDocument> for FileStatistics {
    type Error = String;

    fn try_from(doc: StatisticsDocument) -> Result<Self, Self::Error> {
        let mut per_category = [0u64; ContractCategory::COUNT];
        for (category, count) in &doc.contracts {
            per_category[category.index()] = *count;
        }
        let sum: u64 = per_category.iter().sum();
        if sum != doc.total_contracts {
            return Err(format!(
                "total_contracts is {} but category counts sum to {}",
                doc.total_contracts, sum
            ));
        }
        if doc.methods_with_contracts > doc.methods {
            return Err(format!(
                "methods_with_contracts ({}) exceeds methods ({})",
                doc.methods_with_contracts, doc.methods
            ));
        }
        Ok(Self {
            classes: doc.classes,
            methods: doc.methods,
            methods_with_contracts: doc.methods_with_contracts,
            total_contracts: doc.total_contracts,
            per_category,
        })
    }
}
