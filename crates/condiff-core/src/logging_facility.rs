//! Structured logging for condiff
//!
//! Binaries call [`init`] once with a [`Profile`]. Library code logs its
//! operation boundaries with `log_op_start!`, `log_op_end!` and
//! `log_op_error!`; folder comparisons additionally log one alignment event
//! per file tagged with the run's `run_id`. Tests install
//! [`init_test_capture`] instead and assert on the captured events.
//!
//! ```rust
//! use condiff_core::logging_facility::{init, Profile};
//!
//! init(Profile::Production);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
