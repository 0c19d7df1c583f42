use condiff_core_types::RunId;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias using the canonical structured error
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code usable for programmatic handling,
/// testing and CLI output. Precondition failures of a folder comparison have
/// their own kinds so callers never confuse them with an empty diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Preconditions
    /// A comparison root does not exist
    FolderNotFound,
    /// A comparison root exists but is not a directory
    NotADirectory,
    /// Export was requested but the output directory is missing or not a directory
    InvalidExportTarget,

    // Input
    /// A file record violates the builder rules (contract owned by an undeclared method)
    InvalidRecord,
    /// A settings file could not be parsed
    InvalidConfig,
    /// The extraction collaborator failed to produce records
    Extraction,

    // Integration/IO
    Io,
    Serialization,
    /// A file document would take the name reserved for the folder document
    ReservedDocumentName,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::FolderNotFound => "ERR_FOLDER_NOT_FOUND",
            ExErrorKind::NotADirectory => "ERR_NOT_A_DIRECTORY",
            ExErrorKind::InvalidExportTarget => "ERR_INVALID_EXPORT_TARGET",
            ExErrorKind::InvalidRecord => "ERR_INVALID_RECORD",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Extraction => "ERR_EXTRACTION",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::ReservedDocumentName => "ERR_RESERVED_DOCUMENT_NAME",
        }
    }

    /// True for kinds raised by the upfront checks of a folder comparison
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            ExErrorKind::FolderNotFound
                | ExErrorKind::NotADirectory
                | ExErrorKind::InvalidExportTarget
        )
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus optional
/// context (operation, path, run id) for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    path: Option<PathBuf>,
    run_id: Option<RunId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            path: None,
            run_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add path context
    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Add run correlation context
    pub fn with_run_id(mut self, run_id: RunId) -> Self {
        self.run_id = Some(run_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the path context, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Get the run id, if any
    pub fn run_id(&self) -> Option<&RunId> {
        self.run_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {:?}", self.code(), self.kind)?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }
        if let Some(source) = &self.source {
            write!(f, "; caused by {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Create an IO error for the given operation and path
pub fn io_error(op: &str, path: &Path, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(op)
        .with_path(path)
        .with_message(err.to_string())
}

/// Create a serialization error for the given operation
pub fn serialization_error(op: &str, err: serde_json::Error) -> ExError {
    ExError::from(CompareError::from(err)).with_op(op)
}

// ========== End Error Facility ==========

/// Domain error taxonomy for comparison operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompareError {
    /// A comparison root does not exist
    #[error("Folder not found: {}", path.display())]
    RootNotFound { path: PathBuf },

    /// A comparison root is a file or some other non-directory entry
    #[error("Not a directory: {}", path.display())]
    RootNotADirectory { path: PathBuf },

    /// The export directory does not exist
    #[error("Export directory not found: {}", path.display())]
    ExportDirNotFound { path: PathBuf },

    /// The export directory exists but is not a directory
    #[error("Export target is not a directory: {}", path.display())]
    ExportDirNotADirectory { path: PathBuf },

    /// A file record could not be built
    #[error("Invalid record for {}: {reason}", path.display())]
    InvalidRecord { path: PathBuf, reason: String },

    /// A file report's document name equals the folder document's name
    #[error("Document name {name} is reserved for the folder statistics")]
    ReservedDocumentName { name: String },

    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

/// Conversion from CompareError to ExError
impl From<CompareError> for ExError {
    fn from(err: CompareError) -> Self {
        let message = err.to_string();
        match err {
            CompareError::RootNotFound { path } => ExError::new(ExErrorKind::FolderNotFound)
                .with_path(path)
                .with_message(message),

            CompareError::RootNotADirectory { path } => ExError::new(ExErrorKind::NotADirectory)
                .with_path(path)
                .with_message(message),

            CompareError::ExportDirNotFound { path }
            | CompareError::ExportDirNotADirectory { path } => {
                ExError::new(ExErrorKind::InvalidExportTarget)
                    .with_path(path)
                    .with_message(message)
            }

            CompareError::InvalidRecord { path, .. } => ExError::new(ExErrorKind::InvalidRecord)
                .with_path(path)
                .with_message(message),

            CompareError::ReservedDocumentName { .. } => {
                ExError::new(ExErrorKind::ReservedDocumentName).with_message(message)
            }

            CompareError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to CompareError
impl From<serde_json::Error> for CompareError {
    fn from(err: serde_json::Error) -> Self {
        CompareError::Serialization {
            message: err.to_string(),
        }
    }
}
