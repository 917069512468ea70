//! Output writer.
//!
//! Serializes the feature collection into `<output>.part`, syncs it, then
//! moves it onto the destination so a failed run never leaves a truncated
//! map behind. An existing destination is only replaced when asked to; without
//! `overwrite` the move is a hard link, so a file that appears after the
//! up-front check is still never clobbered.

use anyhow::{Context, Result};
use geojson::FeatureCollection;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::RunError;

/// Suffix of the scratch file the map is written to before it is moved into place.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `map.json` → `map.json.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Fails with [`RunError::OutputExists`] if `path` exists and `overwrite` is false.
pub fn ensure_writable(path: &Path, overwrite: bool) -> Result<(), RunError> {
    if path.exists() && !overwrite {
        return Err(RunError::OutputExists(path.to_path_buf()));
    }
    Ok(())
}

fn write_temp(tmp: &Path, collection: &FeatureCollection) -> Result<()> {
    let file = File::create(tmp).with_context(|| format!("create {}", tmp.display()))?;
    let mut w = BufWriter::new(file);
    serde_json::to_writer(&mut w, collection)
        .with_context(|| format!("serialize map to {}", tmp.display()))?;
    w.flush().with_context(|| format!("write {}", tmp.display()))?;
    w.get_ref()
        .sync_all()
        .with_context(|| format!("sync {}", tmp.display()))?;
    Ok(())
}

/// Move the finished temp file onto `path`.
fn finalize(tmp: &Path, path: &Path, overwrite: bool) -> Result<()> {
    if overwrite {
        return fs::rename(tmp, path)
            .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()));
    }

    match fs::hard_link(tmp, path) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return Err(RunError::OutputExists(path.to_path_buf()).into());
        }
        Err(e) => {
            return Err(e)
                .with_context(|| format!("link {} -> {}", tmp.display(), path.display()));
        }
    }
    if let Err(e) = fs::remove_file(tmp) {
        tracing::warn!("could not remove {}: {}", tmp.display(), e);
    }
    Ok(())
}

/// Write `collection` as GeoJSON to `path`.
pub fn write_collection(path: &Path, collection: &FeatureCollection, overwrite: bool) -> Result<()> {
    if let Err(e) = ensure_writable(path, overwrite) {
        tracing::error!("{}", e);
        return Err(e.into());
    }

    let tmp = temp_path(path);
    let written = write_temp(&tmp, collection).and_then(|()| finalize(&tmp, path, overwrite));
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp);
        if e.downcast_ref::<RunError>().is_some() {
            tracing::error!("{}", e);
        }
        return Err(e);
    }

    tracing::info!("Map created at {}", path.display());
    Ok(())
}
