//! Failures the run reports deliberately. Transport, JSON and I/O faults
//! travel as plain `anyhow::Error` with context instead.

use std::path::PathBuf;
use thiserror::Error;

/// A handled reason for aborting a run. Every variant maps to exit status 1.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RunError {
    /// Metadata had no `mediaLink` key.
    #[error("no current data available: metadata has no mediaLink")]
    MissingMediaLink,
    /// `mediaLink` was present but is not an absolute http(s) URL.
    #[error("no current data available: invalid mediaLink {0:?}")]
    InvalidMediaLink(String),
    /// Dataset body was empty, `null`, or an empty array.
    #[error("no current data available: dataset is empty")]
    EmptyDataset,
    /// Destination exists and overwriting was not requested.
    #[error(
        "output already exists: {}: either specify a new output filename, or use '--overwrite'",
        .0.display()
    )]
    OutputExists(PathBuf),
    /// A ready record carries a coordinate that is present but not a number.
    #[error("record {index}: {field} is not a number: {value}")]
    InvalidCoordinate {
        index: usize,
        field: &'static str,
        value: serde_json::Value,
    },
}
