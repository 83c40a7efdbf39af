//! JSON snapshots of in-memory collections.
//!
//! A snapshot is written in one whole-file write (no temp-file swap). A failed
//! write can leave a truncated file behind; callers treat it as fatal.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Permissions for snapshot files on Unix.
#[cfg(unix)]
const SNAPSHOT_MODE: u32 = 0o644;

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("serialize: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("parse: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("{0}")]
    Io(#[from] io::Error),
}

/// Serialize `items` as a JSON array and write it to `path`, replacing any existing file.
pub fn write_snapshot<T: Serialize>(items: &[T], path: &Path) -> Result<(), SnapshotError> {
    let bytes = serde_json::to_vec(items).map_err(SnapshotError::Serialize)?;

    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(SNAPSHOT_MODE);
    }
    let mut file = options.open(path)?;
    file.write_all(&bytes)?;
    tracing::debug!(path = %path.display(), records = items.len(), bytes = bytes.len(), "snapshot written");
    Ok(())
}

/// Read a snapshot written by [`write_snapshot`].
pub fn read_snapshot<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, SnapshotError> {
    let bytes = fs::read(path)?;
    serde_json::from_slice(&bytes).map_err(SnapshotError::Parse)
}
