//! One run, start to finish: resolve metadata → fetch dataset → keep ready
//! records → write the map. Strictly linear; the first failure ends the run.

use anyhow::Result;
use std::path::PathBuf;

use crate::checksum;
use crate::dataset;
use crate::features;
use crate::http::HttpGet;
use crate::metadata;
use crate::writer;

/// Inputs for a run, already merged from CLI flags and config.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub metadata_url: String,
    pub output: PathBuf,
    pub overwrite: bool,
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub updated: String,
    pub total_records: usize,
    pub ready_records: usize,
    pub skipped_records: usize,
    pub output: PathBuf,
    pub sha256: String,
}

/// Execute a run against `client`.
///
/// The output path is checked before any request is made, and the writer
/// checks it again right before writing.
pub fn run(client: &dyn HttpGet, opts: &RunOptions) -> Result<RunSummary> {
    if let Err(e) = writer::ensure_writable(&opts.output, opts.overwrite) {
        tracing::error!("{}", e);
        return Err(e.into());
    }

    let meta = metadata::resolve(client, &opts.metadata_url)?;
    let records = dataset::fetch_dataset(client, meta.media_link.as_str())?;
    let ready = features::ready_features(records)?;

    writer::write_collection(&opts.output, &ready.collection, opts.overwrite)?;
    let sha256 = checksum::sha256_path(&opts.output)?;

    let summary = RunSummary {
        updated: meta.updated,
        total_records: ready.total,
        ready_records: ready.ready(),
        skipped_records: ready.skipped,
        output: opts.output.clone(),
        sha256,
    };
    tracing::info!(
        updated = %summary.updated,
        total = summary.total_records,
        ready = summary.ready_records,
        skipped = summary.skipped_records,
        sha256 = %summary.sha256,
        "run complete"
    );
    Ok(summary)
}
