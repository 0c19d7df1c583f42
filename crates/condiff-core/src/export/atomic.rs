//! Atomic write primitives
//!
//! Uses temp→rename so a reader never sees a half-written document

use crate::errors::{io_error, Result};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Temp file next to `target`: same directory, `.tmp` appended to the name
fn temp_path_for(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(".tmp");
    target.with_file_name(name)
}

/// Atomically write bytes to a file
///
/// # Errors
///
/// `Io` when the temp file cannot be written or renamed onto the target.
pub fn atomic_write(target_path: &Path, content: &[u8]) -> Result<()> {
    let temp_path = temp_path_for(target_path);

    fs::write(&temp_path, content).map_err(|e| io_error("write_export_temp", &temp_path, e))?;

    if let Err(e) = fs::rename(&temp_path, target_path) {
        // leave no stray temp file behind on a failed rename
        let _ = fs::remove_file(&temp_path);
        return Err(io_error("rename_export_temp", target_path, e));
    }

    Ok(())
}
