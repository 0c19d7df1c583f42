pub mod compare;
pub mod stats;

use condiff_core::settings::Settings;
use std::path::Path;

/// Settings from `--config`, or the defaults
fn load_settings(config: Option<&Path>) -> condiff_core::Result<Settings> {
    match config {
        Some(path) => Settings::load(path),
        None => Ok(Settings::default()),
    }
}
