//! Contract taxonomy and extracted contract occurrences.

use serde::{Deserialize, Serialize};

/// What a contract constrains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractKind {
    Precondition,
    Postcondition,
    Invariant,
}

/// How a contract was expressed in source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMechanism {
    /// Annotation on a declaration (`@NotNull`, `@Requires`, ...)
    Annotation,
    /// Documentation tag (`@pre`, `@post`, `@inv`)
    DocTag,
    /// Runtime assertion in a method body
    Assertion,
}

/// Closed classification of a contract occurrence: kind × detection mechanism.
///
/// The declaration order is significant: [`ContractCategory::index`] follows it
/// and statistics store per-category counts in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractCategory {
    AnnotationPrecondition,
    AnnotationPostcondition,
    AnnotationInvariant,
    DocTagPrecondition,
    DocTagPostcondition,
    DocTagInvariant,
    AssertionPrecondition,
    AssertionPostcondition,
    AssertionInvariant,
}

impl ContractCategory {
    /// Number of categories
    pub const COUNT: usize = 9;

    /// Every category, in index order
    pub const ALL: [ContractCategory; Self::COUNT] = [
        ContractCategory::AnnotationPrecondition,
        ContractCategory::AnnotationPostcondition,
        ContractCategory::AnnotationInvariant,
        ContractCategory::DocTagPrecondition,
        ContractCategory::DocTagPostcondition,
        ContractCategory::DocTagInvariant,
        ContractCategory::AssertionPrecondition,
        ContractCategory::AssertionPostcondition,
        ContractCategory::AssertionInvariant,
    ];

    /// Position of this category in [`ContractCategory::ALL`]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Build a category from its two components
    pub const fn from_parts(kind: ContractKind, mechanism: DetectionMechanism) -> Self {
        match (mechanism, kind) {
            (DetectionMechanism::Annotation, ContractKind::Precondition) => {
                ContractCategory::AnnotationPrecondition
            }
            (DetectionMechanism::Annotation, ContractKind::Postcondition) => {
                ContractCategory::AnnotationPostcondition
            }
            (DetectionMechanism::Annotation, ContractKind::Invariant) => {
                ContractCategory::AnnotationInvariant
            }
            (DetectionMechanism::DocTag, ContractKind::Precondition) => {
                ContractCategory::DocTagPrecondition
            }
            (DetectionMechanism::DocTag, ContractKind::Postcondition) => {
                ContractCategory::DocTagPostcondition
            }
            (DetectionMechanism::DocTag, ContractKind::Invariant) => {
                ContractCategory::DocTagInvariant
            }
            (DetectionMechanism::Assertion, ContractKind::Precondition) => {
                ContractCategory::AssertionPrecondition
            }
            (DetectionMechanism::Assertion, ContractKind::Postcondition) => {
                ContractCategory::AssertionPostcondition
            }
            (DetectionMechanism::Assertion, ContractKind::Invariant) => {
                ContractCategory::AssertionInvariant
            }
        }
    }

    pub const fn kind(self) -> ContractKind {
        match self {
            ContractCategory::AnnotationPrecondition
            | ContractCategory::DocTagPrecondition
            | ContractCategory::AssertionPrecondition => ContractKind::Precondition,
            ContractCategory::AnnotationPostcondition
            | ContractCategory::DocTagPostcondition
            | ContractCategory::AssertionPostcondition => ContractKind::Postcondition,
            ContractCategory::AnnotationInvariant
            | ContractCategory::DocTagInvariant
            | ContractCategory::AssertionInvariant => ContractKind::Invariant,
        }
    }

    pub const fn mechanism(self) -> DetectionMechanism {
        match self {
            ContractCategory::AnnotationPrecondition
            | ContractCategory::AnnotationPostcondition
            | ContractCategory::AnnotationInvariant => DetectionMechanism::Annotation,
            ContractCategory::DocTagPrecondition
            | ContractCategory::DocTagPostcondition
            | ContractCategory::DocTagInvariant => DetectionMechanism::DocTag,
            ContractCategory::AssertionPrecondition
            | ContractCategory::AssertionPostcondition
            | ContractCategory::AssertionInvariant => DetectionMechanism::Assertion,
        }
    }

    /// Stable name used as the key in serialized documents
    pub const fn as_str(self) -> &'static str {
        match self {
            ContractCategory::AnnotationPrecondition => "annotation_precondition",
            ContractCategory::AnnotationPostcondition => "annotation_postcondition",
            ContractCategory::AnnotationInvariant => "annotation_invariant",
            ContractCategory::DocTagPrecondition => "doc_tag_precondition",
            ContractCategory::DocTagPostcondition => "doc_tag_postcondition",
            ContractCategory::DocTagInvariant => "doc_tag_invariant",
            ContractCategory::AssertionPrecondition => "assertion_precondition",
            ContractCategory::AssertionPostcondition => "assertion_postcondition",
            ContractCategory::AssertionInvariant => "assertion_invariant",
        }
    }
}

impl std::fmt::Display for ContractCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 1-based position of an occurrence in its source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub line: u32,
}

/// One contract found in a source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractOccurrence {
    pub category: ContractCategory,
    /// Signature of the owning method
    pub method: String,
    /// Which declaration of `method` owns the contract, counted from zero in
    /// declaration order. Only non-zero when a file declares the signature
    /// more than once (an outer and a nested class, for instance).
    #[serde(default)]
    pub instance: u32,
    pub location: SourceLocation,
    /// Contract text as written in source
    pub text: String,
}

impl ContractOccurrence {
    pub fn new(
        category: ContractCategory,
        method: impl Into<String>,
        line: u32,
        text: impl Into<String>,
    ) -> Self {
        Self {
            category,
            method: method.into(),
            instance: 0,
            location: SourceLocation { line },
            text: text.into(),
        }
    }

    /// Attach the contract to the `instance`-th declaration of its method
    pub fn on_instance(mut self, instance: u32) -> Self {
        self.instance = instance;
        self
    }

    /// Same category and same text, regardless of location
    pub fn same_contract(&self, other: &ContractOccurrence) -> bool {
        self.category == other.category && self.text == other.text
    }
}
