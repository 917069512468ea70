//! Process-wide `tracing` subscriber, installed once at startup.
//!
//! Lines go to `~/.local/state/fiberfinder/fiberfinder.log` by default, or to
//! stderr when asked for or when the state file cannot be opened.

use anyhow::Result;
use std::fs::{File, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,fiberfinder_core=debug,fiberfinder=debug";

/// Where log lines are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink {
    /// Append to the XDG state log file.
    StateFile,
    Stderr,
}

/// `--verbose` wins over `RUST_LOG`; otherwise `RUST_LOG`, then the built-in default.
fn env_filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

fn open_state_log() -> Result<(PathBuf, File)> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("fiberfinder")?;
    let path = xdg_dirs.place_state_file("fiberfinder.log")?;
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    Ok((path, file))
}

fn install<W>(writer: W, verbose: bool)
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(writer)
        .with_ansi(false)
        .init();
}

/// Install the global subscriber. Returns the sink actually in use, which is
/// `Stderr` if the state log was requested but could not be opened.
pub fn init(sink: LogSink, verbose: bool) -> LogSink {
    if sink == LogSink::Stderr {
        install(std::io::stderr, verbose);
        return LogSink::Stderr;
    }

    match open_state_log() {
        Ok((path, file)) => {
            install(Mutex::new(file), verbose);
            tracing::info!("fiberfinder logging initialized at {}", path.display());
            LogSink::StateFile
        }
        Err(err) => {
            install(std::io::stderr, verbose);
            tracing::warn!("log file unavailable, logging to stderr: {:#}", err);
            LogSink::Stderr
        }
    }
}
