//! Metadata resolver: the vendor publishes a small JSON object whose
//! `mediaLink` points at the current dataset and whose `updated` says when it
//! last changed.

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use url::Url;

use crate::error::RunError;
use crate::http::HttpGet;

/// Logged in place of `updated` when the metadata omits it.
pub const UNKNOWN_UPDATED: &str = "Unknown date";

pub const UPDATED_KEY: &str = "updated";
pub const MEDIA_LINK_KEY: &str = "mediaLink";

/// Metadata after validation: a usable dataset URL plus the update stamp.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedMetadata {
    pub media_link: Url,
    pub updated: String,
}

/// `updated` only feeds a log line, so any JSON value is accepted.
/// Missing or `null` → [`UNKNOWN_UPDATED`].
fn updated_stamp(meta: &Map<String, Value>) -> String {
    match meta.get(UPDATED_KEY) {
        None | Some(Value::Null) => UNKNOWN_UPDATED.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Parse a metadata body. The body must be a JSON object. A `mediaLink` that
/// is missing or not a string is [`RunError::MissingMediaLink`]; a string that
/// is not an absolute http(s) URL is [`RunError::InvalidMediaLink`].
pub fn parse_metadata(body: &[u8]) -> Result<ResolvedMetadata> {
    let meta: Map<String, Value> =
        serde_json::from_slice(body).context("metadata is not a JSON object")?;

    let updated = updated_stamp(&meta);

    let link = match meta.get(MEDIA_LINK_KEY) {
        Some(Value::String(s)) => s.clone(),
        _ => return Err(RunError::MissingMediaLink.into()),
    };
    let media_link = match Url::parse(&link) {
        Ok(u) if matches!(u.scheme(), "http" | "https") => u,
        _ => return Err(RunError::InvalidMediaLink(link).into()),
    };

    Ok(ResolvedMetadata {
        media_link,
        updated,
    })
}

/// Fetch and parse the metadata object at `url`.
pub fn resolve(client: &dyn HttpGet, url: &str) -> Result<ResolvedMetadata> {
    tracing::info!("Fetching latest location data from {}", url);
    let body = client.get(url).context("fetch metadata")?;

    let meta = match parse_metadata(&body) {
        Ok(m) => m,
        Err(e) => {
            if e.downcast_ref::<RunError>().is_some() {
                tracing::error!("No current data available: {}", e);
            }
            return Err(e);
        }
    };

    tracing::info!("Location data last updated on {}", meta.updated);
    tracing::debug!("media link: {}", meta.media_link);
    Ok(meta)
}
