//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_RUN_ID: &str = "run_id";

// Comparison identifiers
pub const FIELD_FILE: &str = "file";
pub const FIELD_OUTCOME: &str = "outcome";
pub const FIELD_THIS_ROOT: &str = "this_root";
pub const FIELD_OTHER_ROOT: &str = "other_root";

// Collection sizes
pub const FIELD_FILES_ADDED: &str = "files_added";
pub const FIELD_FILES_REMOVED: &str = "files_removed";
pub const FIELD_REPORTS: &str = "reports";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

// Alignment outcomes for a single file
pub const OUTCOME_MATCHED: &str = "matched";
pub const OUTCOME_REMOVED: &str = "removed";
pub const OUTCOME_ADDED: &str = "added";
pub const OUTCOME_FILTERED: &str = "filtered";
