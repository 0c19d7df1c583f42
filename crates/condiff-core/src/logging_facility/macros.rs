//! Operation boundary macros
//!
//! Every boundary event carries `component`, `op` and `event`; end events add
//! `duration_ms`, error events add `err_kind` and `err_code`. Extra fields
//! use the usual `tracing` syntax (`key = value`, `key = %display`,
//! `key = ?debug`).

#[doc(hidden)]
#[macro_export]
macro_rules! __log_boundary {
    ($level:ident, $op:expr, $event:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = module_path!(),
            op = $op,
            event = $event,
            $($($field)*)?
        )
    };
}

/// Log the start of an operation
///
/// ```
/// # use condiff_core::log_op_start;
/// log_op_start!("compare_folders");
/// log_op_start!("compare_folders", this_root = "/a");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        $crate::__log_boundary!(info, $op, $crate::schema::EVENT_START $(, $($field)*)?)
    };
}

/// Log the successful end of an operation
///
/// ```
/// # use condiff_core::log_op_end;
/// log_op_end!("compare_folders", duration_ms = 42);
/// log_op_end!("compare_folders", duration_ms = 42, reports = 3);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        $crate::__log_boundary!(
            info,
            $op,
            $crate::schema::EVENT_END,
            duration_ms = $duration
            $(, $($field)*)?
        )
    };
}

/// Log the failed end of an operation
///
/// `$err` is anything convertible into [`ExError`](crate::errors::ExError);
/// its kind and stable code become fields of the event.
///
/// ```
/// # use condiff_core::log_op_error;
/// # use condiff_core::errors::CompareError;
/// let err = CompareError::RootNotFound { path: "/missing".into() };
/// log_op_error!("compare_folders", err, duration_ms = 3);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let failure: $crate::errors::ExError = $err.into();
        $crate::__log_boundary!(
            error,
            $op,
            $crate::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?failure.kind(),
            err_code = failure.code()
            $(, $($field)*)?
        )
    }};
}
