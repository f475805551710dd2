//! Diagnostic logging via `tracing`.
//!
//! Logs go to stderr so they never mix with prompts or step output on stdout.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Environment entry overriding the log filter, e.g. `VERSION_MANAGER_LOG=debug`
pub const LOG_ENV_VAR: &str = "VERSION_MANAGER_LOG";

/// Choose the filter directive.
///
/// Priority order (highest to lowest):
/// 1. `VERSION_MANAGER_LOG` environment variable
/// 2. `--verbose` flag (debug)
/// 3. Configured level
pub fn filter_directive(env_value: Option<&str>, verbose: bool, configured_level: &str) -> String {
    if let Some(value) = env_value.map(str::trim).filter(|v| !v.is_empty()) {
        return value.to_string();
    }
    if verbose {
        return "debug".to_string();
    }
    configured_level.to_string()
}

/// Initialize the logging system.
///
/// Safe to call more than once; later calls keep the first subscriber.
pub fn init_logging(verbose: bool, configured_level: &str) {
    let env_value = std::env::var(LOG_ENV_VAR).ok();
    let directive = filter_directive(env_value.as_deref(), verbose, configured_level);

    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("warn"));

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(console::colors_enabled_stderr());

    let _ = Registry::default().with(filter).with(layer).try_init();
}
