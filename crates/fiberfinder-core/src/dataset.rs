//! Dataset fetcher: the media link serves a JSON array of apartment records.
//! Records are kept as raw JSON values; nothing about their shape is enforced here.

use anyhow::{Context, Result};
use serde_json::Value;

use crate::error::RunError;
use crate::http::HttpGet;

/// Parse a dataset body into its records.
///
/// A blank body, `null`, or `[]` is [`RunError::EmptyDataset`]. Any other
/// non-array JSON is a parse fault.
pub fn parse_dataset(body: &[u8]) -> Result<Vec<Value>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(RunError::EmptyDataset.into());
    }
    let records: Option<Vec<Value>> =
        serde_json::from_slice(body).context("dataset is not a JSON array")?;
    match records {
        Some(r) if !r.is_empty() => Ok(r),
        _ => Err(RunError::EmptyDataset.into()),
    }
}

/// Fetch and parse the dataset behind `media_link`.
pub fn fetch_dataset(client: &dyn HttpGet, media_link: &str) -> Result<Vec<Value>> {
    let body = client.get(media_link).context("fetch dataset")?;
    let records = parse_dataset(&body).inspect_err(|e| {
        if e.downcast_ref::<RunError>().is_some() {
            tracing::error!("No current data available: {}", e);
        }
    })?;
    tracing::debug!("dataset has {} records", records.len());
    Ok(records)
}
