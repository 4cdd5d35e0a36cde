//! Tracing setup: stderr plus a log file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub const LOG_FILE: &str = "autoplay.log";

/// Where `autoplay.log` goes: the snapshot directory when set, otherwise the
/// platform cache directory.
pub fn log_dir(snapshot_dir: Option<&Path>) -> PathBuf {
    if let Some(dir) = snapshot_dir {
        return dir.to_path_buf();
    }
    directories::ProjectDirs::from("", "", "autoplay")
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("/tmp/autoplay/logs"))
}

/// Installs the global subscriber. Keep the guard alive for the whole run so
/// buffered file output is flushed on exit.
pub fn setup_logging(log_dir: &Path, debug: bool) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let env_filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    tracing::info!(file = %log_dir.join(LOG_FILE).display(), "logging initialized");
    Ok(guard)
}
