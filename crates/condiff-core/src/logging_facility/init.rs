//! Subscriber installation

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Output style of the process-wide subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable lines, debug level for condiff crates
    Development,
    /// JSON lines, info level
    Production,
    /// Bare registry; tests install their own capture layer
    Test,
}

impl Profile {
    /// Filter used when `RUST_LOG` is unset
    fn default_directives(self) -> &'static str {
        match self {
            Profile::Development => "condiff=debug,condiff_core=debug",
            Profile::Production | Profile::Test => "condiff=info,condiff_core=info",
        }
    }
}

static INIT_ONCE: Once = Once::new();

fn env_filter(profile: Profile) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(profile.default_directives()))
}

/// Install the global subscriber for `profile`
///
/// Only the first call in a process has an effect. Events go to stderr so
/// that stdout stays free for command output.
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| match profile {
        Profile::Development => tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(env_filter(profile))
            .init(),
        Profile::Production => tracing_subscriber::fmt()
            .json()
            .with_writer(std::io::stderr)
            .with_env_filter(env_filter(profile))
            .init(),
        Profile::Test => tracing_subscriber::registry().init(),
    });
}
