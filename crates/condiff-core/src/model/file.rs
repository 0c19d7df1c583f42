//! Analyzed source file and its builder.

use crate::errors::{CompareError, Result};
use crate::model::contract::ContractOccurrence;
use crate::model::statistics::FileStatistics;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A class (or other type declaration) found in a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRecord {
    pub name: String,
    pub line: u32,
}

impl ClassRecord {
    pub fn new(name: impl Into<String>, line: u32) -> Self {
        Self {
            name: name.into(),
            line,
        }
    }
}

/// A method found in a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodRecord {
    /// Stable identity across versions: name plus parameter types
    pub signature: String,
    /// Full declaration text (modifiers, return type, throws clause)
    pub declaration: String,
    pub line: u32,
}

impl MethodRecord {
    pub fn new(signature: impl Into<String>, declaration: impl Into<String>, line: u32) -> Self {
        Self {
            signature: signature.into(),
            declaration: declaration.into(),
            line,
        }
    }
}

/// One analyzed source file.
///
/// Only [`FileRecordBuilder`] creates records; once built a record is
/// read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct FileRecord {
    full_path: PathBuf,
    classes: Vec<ClassRecord>,
    methods: Vec<MethodRecord>,
    contracts: Vec<ContractOccurrence>,
    statistics: FileStatistics,
}

impl FileRecord {
    pub fn full_path(&self) -> &Path {
        &self.full_path
    }

    pub fn classes(&self) -> &[ClassRecord] {
        &self.classes
    }

    pub fn methods(&self) -> &[MethodRecord] {
        &self.methods
    }

    pub fn contracts(&self) -> &[ContractOccurrence] {
        &self.contracts
    }

    pub fn statistics(&self) -> &FileStatistics {
        &self.statistics
    }

    /// Methods in declaration order, each paired with its instance number
    /// among the declarations sharing its signature
    pub fn method_instances(&self) -> Vec<(u32, &MethodRecord)> {
        let mut seen: HashMap<&str, u32> = HashMap::new();
        self.methods
            .iter()
            .map(|m| {
                let count = seen.entry(m.signature.as_str()).or_insert(0);
                let instance = *count;
                *count += 1;
                (instance, m)
            })
            .collect()
    }

    /// Contracts owned by one declaration of `signature`, in source order
    pub fn contracts_of<'a>(
        &'a self,
        signature: &'a str,
        instance: u32,
    ) -> impl Iterator<Item = &'a ContractOccurrence> + 'a {
        self.contracts
            .iter()
            .filter(move |c| c.method == signature && c.instance == instance)
    }
}

/// Incremental builder used while a file is being analyzed.
///
/// Every pushed element updates the statistics immediately. Problems are
/// remembered and reported by [`FileRecordBuilder::build`], so extraction
/// code can chain pushes without checking each one.
#[derive(Debug)]
pub struct FileRecordBuilder {
    full_path: PathBuf,
    classes: Vec<ClassRecord>,
    methods: Vec<MethodRecord>,
    contracts: Vec<ContractOccurrence>,
    statistics: FileStatistics,
    // signature -> per declaration, already counted as carrying contracts
    method_index: HashMap<String, Vec<bool>>,
    problem: Option<String>,
}

impl FileRecordBuilder {
    pub fn new(full_path: impl Into<PathBuf>) -> Self {
        Self {
            full_path: full_path.into(),
            classes: Vec::new(),
            methods: Vec::new(),
            contracts: Vec::new(),
            statistics: FileStatistics::new(),
            method_index: HashMap::new(),
            problem: None,
        }
    }

    pub fn with_class(mut self, class: ClassRecord) -> Self {
        self.statistics.record_class();
        self.classes.push(class);
        self
    }

    /// Push a method. A repeated signature is a further declaration of it,
    /// addressed by contracts through [`ContractOccurrence::instance`].
    pub fn with_method(mut self, method: MethodRecord) -> Self {
        self.statistics.record_method();
        self.method_index
            .entry(method.signature.clone())
            .or_default()
            .push(false);
        self.methods.push(method);
        self
    }

    /// Push a contract; its owning declaration must already have been pushed.
    pub fn with_contract(mut self, contract: ContractOccurrence) -> Self {
        let slot = self
            .method_index
            .get_mut(&contract.method)
            .and_then(|declarations| declarations.get_mut(contract.instance as usize));
        match slot {
            Some(has_contracts) => {
                if !*has_contracts {
                    *has_contracts = true;
                    self.statistics.record_method_with_contracts();
                }
                self.statistics.increase(contract.category, 1);
                self.contracts.push(contract);
            }
            None => {
                let message = format!(
                    "contract at line {} belongs to undeclared method `{}` (declaration #{})",
                    contract.location.line, contract.method, contract.instance
                );
                self.note_problem(message);
            }
        }
        self
    }

    fn note_problem(&mut self, message: String) {
        if self.problem.is_none() {
            self.problem = Some(message);
        }
    }

    /// Finish analysis of the file.
    ///
    /// # Errors
    ///
    /// `InvalidRecord` when a contract referenced a method declaration that
    /// was never pushed.
    pub fn build(self) -> Result<FileRecord> {
        if let Some(reason) = self.problem {
            return Err(CompareError::InvalidRecord {
                path: self.full_path,
                reason,
            }
            .into());
        }
        Ok(FileRecord {
            full_path: self.full_path,
            classes: self.classes,
            methods: self.methods,
            contracts: self.contracts,
            statistics: self.statistics,
        })
    }
}
