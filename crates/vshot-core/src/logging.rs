//! Logging init: file under XDG state dir, or graceful fallback to stderr.

use anyhow::Result;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,vshot_core=debug,vshot_cli=debug";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize structured logging to `~/.local/state/vshot/vshot.log` and
/// return the log file path. On failure (e.g. log dir unwritable), returns
/// Err so the caller can fall back to stderr.
pub fn init_logging() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("vshot")?;
    let log_dir = xdg_dirs.get_state_home();
    fs::create_dir_all(&log_dir)?;
    let log_file_path = log_dir.join("vshot.log");

    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path)?;

    // Each log line gets a fresh clone of the file handle; if cloning ever
    // fails the line goes to stderr instead of being dropped.
    let make_writer = move || -> Box<dyn io::Write> {
        match file.try_clone() {
            Ok(clone) => Box::new(clone),
            Err(_) => Box::new(io::stderr().lock()),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(make_writer)
        .with_ansi(false)
        .init();

    tracing::info!("vshot logging initialized at {}", log_file_path.display());

    Ok(log_file_path)
}

/// Initialize logging to stderr only (no file). Use when init_logging()
/// fails so the CLI doesn't crash.
pub fn init_logging_stderr() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}
