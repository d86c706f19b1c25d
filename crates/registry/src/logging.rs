//! Tracing subscriber setup for hosts that embed the workspace.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingConfig;

/// Environment variable that overrides [`LoggingConfig::filter`].
pub const LOG_ENV: &str = "PACTUM_LOG";

/// Install a stderr subscriber filtered by `PACTUM_LOG`, falling back to
/// the configured filter, then to `warn`.
///
/// Returns `false` when a global subscriber was already installed.
pub fn init(config: &LoggingConfig) -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()
        .is_ok()
}
