//! File-based tracing setup.
//!
//! The spinner owns the terminal line, so logs never go to stdout/stderr.
//! Logging is off unless `BUSYLINE_LOG` is set to a filter directive
//! (e.g. `BUSYLINE_LOG=debug`), in which case events are appended to
//! `$XDG_STATE_HOME/busyline/busyline.log`.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::UtcTime;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "BUSYLINE_LOG";

const LOG_FILE: &str = "busyline.log";

/// Install the global subscriber if `BUSYLINE_LOG` is set.
///
/// Returns the appender guard, which must be kept alive until exit so
/// buffered events are flushed.
pub fn init() -> Result<Option<WorkerGuard>> {
    let Some(directive) = std::env::var(LOG_ENV).ok().filter(|v| !v.trim().is_empty()) else {
        return Ok(None);
    };

    let filter = EnvFilter::try_new(&directive)
        .with_context(|| format!("Invalid {} filter: {}", LOG_ENV, directive))?;

    let dir = log_dir().context("Could not determine log directory")?;
    fs::create_dir_all(&dir).context("Failed to create log directory")?;

    let appender = tracing_appender::rolling::never(&dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(UtcTime::rfc_3339())
        .with_writer(writer)
        .with_ansi(false)
        .with_thread_names(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))?;

    Ok(Some(guard))
}

/// `$XDG_STATE_HOME/busyline`, falling back to `~/.local/state/busyline`.
fn log_dir() -> Option<PathBuf> {
    let state_home = std::env::var_os("XDG_STATE_HOME")
        .map(PathBuf::from)
        .filter(|p| p.is_absolute())
        .or_else(|| home::home_dir().map(|h| h.join(".local/state")))?;
    Some(state_home.join("busyline"))
}
