//! Settings file parsing
//!
//! Reads a TOML settings file and validates it. Every key is optional.
//!
//! ```toml
//! global_statistics_file = "compare_statistics.json"
//! sidecar_suffix = ".contracts.json"
//! report_equal = false
//! report_non_contract_changes = false
//! pretty_print = true
//! ```

use crate::diff::{CompareOptions, ExportOptions};
use crate::errors::{io_error, ExError, ExErrorKind, Result};
use crate::export::DEFAULT_GLOBAL_STATISTICS_FILE;
use crate::extract::{SidecarExtractor, DEFAULT_SIDECAR_SUFFIX};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// File name of the folder-level export document
    pub global_statistics_file: String,
    /// Suffix identifying record sidecars
    pub sidecar_suffix: String,
    pub report_equal: bool,
    pub report_non_contract_changes: bool,
    pub pretty_print: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            global_statistics_file: DEFAULT_GLOBAL_STATISTICS_FILE.to_string(),
            sidecar_suffix: DEFAULT_SIDECAR_SUFFIX.to_string(),
            report_equal: false,
            report_non_contract_changes: false,
            pretty_print: true,
        }
    }
}

fn config_error(message: String) -> ExError {
    ExError::new(ExErrorKind::InvalidConfig)
        .with_op("load_settings")
        .with_message(message)
}

impl Settings {
    /// Load settings from a TOML file
    ///
    /// # Errors
    ///
    /// `Io` if the file cannot be read, `InvalidConfig` if it does not parse
    /// or fails validation.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| io_error("load_settings", path, e))?;
        Self::parse(&content).map_err(|e| e.with_path(path))
    }

    /// Parse settings from TOML text
    ///
    /// # Errors
    ///
    /// `InvalidConfig` on syntax errors, unknown keys or invalid values.
    pub fn parse(content: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(content)
            .map_err(|e| config_error(format!("TOML parse error: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        let name = self.global_statistics_file.as_str();
        if name.is_empty() || name.contains('/') || name.contains('\\') {
            return Err(config_error(format!(
                "global_statistics_file must be a plain file name, got `{}`",
                name
            )));
        }
        if self.sidecar_suffix.is_empty() {
            return Err(config_error("sidecar_suffix must not be empty".to_string()));
        }
        Ok(())
    }

    /// Comparison policy, streaming to `export_dir` when given
    pub fn compare_options(&self, export_dir: Option<PathBuf>) -> CompareOptions {
        CompareOptions {
            report_equal: self.report_equal,
            report_non_contract_changes: self.report_non_contract_changes,
            export: export_dir.map(|dir| {
                ExportOptions::new(dir)
                    .with_pretty_print(self.pretty_print)
                    .with_global_statistics_file(self.global_statistics_file.clone())
            }),
        }
    }

    /// Extractor reading sidecars with the configured suffix
    pub fn extractor(&self) -> SidecarExtractor {
        SidecarExtractor::new(self.sidecar_suffix.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        assert_eq!(Settings::parse("").unwrap(), Settings::default());
    }

    #[test]
    fn test_partial_override() {
        let settings = Settings::parse(
            "report_equal = true\nglobal_statistics_file = \"summary.json\"\n",
        )
        .unwrap();
        assert!(settings.report_equal);
        assert!(!settings.report_non_contract_changes);
        assert_eq!(settings.global_statistics_file, "summary.json");
        assert_eq!(settings.sidecar_suffix, DEFAULT_SIDECAR_SUFFIX);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = Settings::parse("report_everything = true").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidConfig);
    }

    #[test]
    fn test_global_file_must_be_plain_name() {
        let err = Settings::parse("global_statistics_file = \"../out.json\"").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidConfig);
    }

    #[test]
    fn test_compare_options_carry_export_settings() {
        let settings = Settings {
            pretty_print: false,
            ..Settings::default()
        };
        let options = settings.compare_options(Some(PathBuf::from("/out")));
        let export = options.export.unwrap();
        assert_eq!(export.output_dir, PathBuf::from("/out"));
        assert!(!export.pretty_print);
        assert_eq!(export.global_statistics_file, DEFAULT_GLOBAL_STATISTICS_FILE);

        assert!(settings.compare_options(None).export.is_none());
    }
}
