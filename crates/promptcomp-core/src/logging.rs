//! Tracing setup.
//!
//! Events go to stderr so rendered HTML on stdout stays clean. The filter is
//! read from `PROMPTCOMP_LOG`, falling back to the configured level.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::LogConfig;

pub const LOG_ENV: &str = "PROMPTCOMP_LOG";

/// Builds the filter from the environment or the configured level.
pub fn env_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Installs the global subscriber. Later calls are no-ops.
pub fn init(config: &LogConfig) {
    let fmt = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = tracing_subscriber::registry()
        .with(env_filter(config))
        .with(fmt)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(level = %config.level, "logging initialized");
    }
}
