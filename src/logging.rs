// src/logging.rs

//! Logging setup for `dagit-layout` using `tracing` + `tracing-subscriber`.
//!
//! The filter is chosen as:
//! 1. `--log-level`: that level for this crate, `warn` for everything else
//! 2. `DAGIT_LOG`: any `EnvFilter` directive string, e.g.
//!    `dagit_layout::gaant=debug,dagit_layout::query=trace`
//! 3. `warn,dagit_layout=info`
//!
//! Logs go to STDERR; the layout itself is printed on STDOUT.

use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogLevel;

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "DAGIT_LOG";

const DEFAULT_DIRECTIVES: &str = "warn,dagit_layout=info";

/// Initialise global logging subscriber. Fails if one is already installed.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let env = std::env::var(LOG_ENV).ok();
    let directives = log_directives(cli_level, env.as_deref());
    let filter = EnvFilter::try_new(&directives)?;

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    tracing::debug!(%directives, "logging initialised");
    Ok(())
}

/// Filter directives for the given flag and `DAGIT_LOG` value.
///
/// An empty or unparsable `DAGIT_LOG` falls back to the default.
pub fn log_directives(cli_level: Option<LogLevel>, env: Option<&str>) -> String {
    if let Some(level) = cli_level {
        return format!("warn,dagit_layout={}", level_name(level));
    }

    match env.map(str::trim) {
        Some(value) if !value.is_empty() && EnvFilter::try_new(value).is_ok() => {
            value.to_string()
        }
        _ => DEFAULT_DIRECTIVES.to_string(),
    }
}

fn level_name(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    }
}
