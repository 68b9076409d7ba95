//! Tracing setup.
//!
//! The game owns the terminal, so nothing is logged to stdout or stderr.
//! When a log path is configured, events go to that file through a
//! non-blocking writer; otherwise no subscriber is installed.
//!
//! `RUST_LOG` overrides the default filter.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const DEFAULT_FILTER: &str = "halfrow_tetris=info";

/// Install the file logger. Keep the returned guard alive until exit so
/// buffered lines are flushed.
pub fn init(log_path: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let Some(path) = log_path else {
        return Ok(None);
    };

    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .with_context(|| format!("log path {} has no file name", path.display()))?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating log directory {}", dir.display()))?;

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .try_init()
        .context("installing tracing subscriber")?;

    Ok(Some(guard))
}
