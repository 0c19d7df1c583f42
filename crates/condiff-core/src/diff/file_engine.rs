//! Diff of two versions of one logical file.
//!
//! The entry point is [`compare_files`]. Methods are matched by signature,
//! repeated signatures pairing up in declaration order; contracts of a
//! matched method are matched by category and text.

use crate::diff::model::{
    ChangeKind, ContractChange, ContractSide, FileCompareReport, FileCompareStatistics,
    MethodChange,
};
use crate::model::{ContractOccurrence, FileRecord, MethodRecord};
use std::collections::{BTreeSet, HashMap, HashSet};

/// Compare two records believed to describe the same file at two points in time.
///
/// `this` is the earlier side: contracts only in `other` are `Added`, contracts
/// only in `this` are `Removed`.
///
/// Returns `None` when the files are identical (no class, method, declaration
/// or contract difference) and `report_equal` is false. With
/// `report_non_contract_changes` false, the report body keeps only methods
/// whose contracts changed, and only their changed contracts; the statistics
/// and `contract_equal` always describe the full diff.
pub fn compare_files(
    this: &FileRecord,
    other: &FileRecord,
    report_equal: bool,
    report_non_contract_changes: bool,
) -> Option<FileCompareReport> {
    let (classes_added, classes_removed) = class_delta(this, other);

    // (signature, instance) pairs the k-th declaration of a signature on one
    // side with the k-th declaration on the other.
    let other_methods: HashMap<(&str, u32), &MethodRecord> = other
        .method_instances()
        .into_iter()
        .map(|(instance, m)| ((m.signature.as_str(), instance), m))
        .collect();
    let this_methods = this.method_instances();
    let this_keys: HashSet<(&str, u32)> = this_methods
        .iter()
        .map(|(instance, m)| (m.signature.as_str(), *instance))
        .collect();

    let mut stats = FileCompareStatistics::default();
    let mut method_changes = Vec::with_capacity(this_methods.len());

    for &(instance, method) in &this_methods {
        let this_contracts: Vec<&ContractOccurrence> =
            this.contracts_of(&method.signature, instance).collect();
        let change = match other_methods.get(&(method.signature.as_str(), instance)) {
            Some(other_method) => {
                let other_contracts: Vec<&ContractOccurrence> =
                    other.contracts_of(&other_method.signature, instance).collect();
                let contract_changes = diff_contracts(&this_contracts, &other_contracts);
                let declaration_changed = method.declaration != other_method.declaration;
                let mut change = MethodChange {
                    signature: method.signature.clone(),
                    change: ChangeKind::Unchanged,
                    declaration_changed,
                    contract_changes,
                };
                if declaration_changed || change.has_contract_changes() {
                    change.change = ChangeKind::Modified;
                    stats.methods_modified += 1;
                }
                change
            }
            None => {
                stats.methods_removed += 1;
                one_sided(&method.signature, &this_contracts, ChangeKind::Removed)
            }
        };
        tally(&mut stats, &change);
        method_changes.push(change);
    }

    for (instance, method) in other.method_instances() {
        if this_keys.contains(&(method.signature.as_str(), instance)) {
            continue;
        }
        let other_contracts: Vec<&ContractOccurrence> =
            other.contracts_of(&method.signature, instance).collect();
        stats.methods_added += 1;
        let change = one_sided(&method.signature, &other_contracts, ChangeKind::Added);
        tally(&mut stats, &change);
        method_changes.push(change);
    }

    let identical = classes_added.is_empty()
        && classes_removed.is_empty()
        && method_changes
            .iter()
            .all(|m| m.change == ChangeKind::Unchanged);
    if identical && !report_equal {
        return None;
    }

    let contract_equal =
        stats.contracts_added == 0 && stats.contracts_removed == 0 && stats.contracts_modified == 0;

    let mut report = FileCompareReport {
        this_file_path: this.full_path().to_string_lossy().into_owned(),
        other_file_path: other.full_path().to_string_lossy().into_owned(),
        contract_equal,
        classes_added,
        classes_removed,
        method_changes,
        statistics: stats,
    };

    if !report_non_contract_changes {
        strip_non_contract_changes(&mut report);
    }

    Some(report)
}

/// Class names only in `other` (added) and only in `this` (removed).
fn class_delta(this: &FileRecord, other: &FileRecord) -> (Vec<String>, Vec<String>) {
    let this_names: BTreeSet<&str> = this.classes().iter().map(|c| c.name.as_str()).collect();
    let other_names: BTreeSet<&str> = other.classes().iter().map(|c| c.name.as_str()).collect();
    let added = other
        .classes()
        .iter()
        .filter(|c| !this_names.contains(c.name.as_str()))
        .map(|c| c.name.clone())
        .collect();
    let removed = this
        .classes()
        .iter()
        .filter(|c| !other_names.contains(c.name.as_str()))
        .map(|c| c.name.clone())
        .collect();
    (added, removed)
}

fn side(occurrence: &ContractOccurrence) -> ContractSide {
    ContractSide {
        text: occurrence.text.clone(),
        line: occurrence.location.line,
    }
}

/// Diff the contracts of one matched method.
///
/// Identical occurrences pair first, then leftovers of the same category pair
/// as modified; anything still unpaired is removed (this side) or added
/// (other side). Pairing is greedy in source order.
fn diff_contracts(
    this: &[&ContractOccurrence],
    other: &[&ContractOccurrence],
) -> Vec<ContractChange> {
    let mut other_used = vec![false; other.len()];
    let mut pairing: Vec<Option<(usize, ChangeKind)>> = vec![None; this.len()];

    for (i, t) in this.iter().enumerate() {
        let found = (0..other.len()).find(|&j| !other_used[j] && t.same_contract(other[j]));
        if let Some(j) = found {
            other_used[j] = true;
            pairing[i] = Some((j, ChangeKind::Unchanged));
        }
    }

    for (i, t) in this.iter().enumerate() {
        if pairing[i].is_some() {
            continue;
        }
        let found = (0..other.len()).find(|&j| !other_used[j] && t.category == other[j].category);
        if let Some(j) = found {
            other_used[j] = true;
            pairing[i] = Some((j, ChangeKind::Modified));
        }
    }

    let mut changes = Vec::with_capacity(this.len().max(other.len()));
    for (t, paired) in this.iter().zip(pairing) {
        changes.push(match paired {
            Some((j, change)) => ContractChange {
                category: t.category,
                change,
                this: Some(side(t)),
                other: Some(side(other[j])),
            },
            None => ContractChange {
                category: t.category,
                change: ChangeKind::Removed,
                this: Some(side(t)),
                other: None,
            },
        });
    }
    for (o, used) in other.iter().zip(other_used) {
        if !used {
            changes.push(ContractChange {
                category: o.category,
                change: ChangeKind::Added,
                this: None,
                other: Some(side(o)),
            });
        }
    }
    changes
}

/// Method present on one side only; every contract takes the method's classification.
fn one_sided(signature: &str, contracts: &[&ContractOccurrence], change: ChangeKind) -> MethodChange {
    let contract_changes = contracts
        .iter()
        .map(|c| {
            let (this, other) = match change {
                ChangeKind::Added => (None, Some(side(c))),
                _ => (Some(side(c)), None),
            };
            ContractChange {
                category: c.category,
                change,
                this,
                other,
            }
        })
        .collect();
    MethodChange {
        signature: signature.to_string(),
        change,
        declaration_changed: false,
        contract_changes,
    }
}

fn tally(stats: &mut FileCompareStatistics, method: &MethodChange) {
    for contract in &method.contract_changes {
        match contract.change {
            ChangeKind::Unchanged => stats.contracts_unchanged += 1,
            ChangeKind::Added => stats.contracts_added += 1,
            ChangeKind::Removed => stats.contracts_removed += 1,
            ChangeKind::Modified => stats.contracts_modified += 1,
        }
    }
}

fn strip_non_contract_changes(report: &mut FileCompareReport) {
    report.classes_added.clear();
    report.classes_removed.clear();
    report.method_changes.retain(MethodChange::has_contract_changes);
    for method in &mut report.method_changes {
        method
            .contract_changes
            .retain(|c| c.change != ChangeKind::Unchanged);
    }
}
