//!
//! The Logging module installs the `tracing` subscriber used by the `record-desk` binary.  Log
//! lines go to stderr so they never mix with the menus on stdout.
//!

use tracing_subscriber::EnvFilter;

/// The filter used when neither `--log-level` nor `RUST_LOG` is given
pub const DEFAULT_FILTER : &str = "warn";

/// Picks the log filter.  An explicit `level` wins over `RUST_LOG`, which wins over [DEFAULT_FILTER]
pub fn log_filter(level : Option<&str>) -> anyhow::Result<EnvFilter> {
    match level {
        Some(level) => EnvFilter::try_new(level)
            .map_err(|err| anyhow::anyhow!("invalid log level '{}': {}", level, err)),
        None => Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
    }
}

/// Installs a plain-text subscriber writing to stderr
pub fn init_logging(level : Option<&str>) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(level)?)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!("could not install the logger: {}", err))
}
