//! `cdl status` – summarize what the last run left on disk.

use anyhow::Result;
use cdl_core::config::CdlConfig;
use cdl_core::model::{DetailRecord, SummaryRecord};
use cdl_core::snapshot::read_snapshot;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

pub fn run_status(cfg: &CdlConfig) -> Result<()> {
    println!("{:<10} {:<10} {}", "OUTPUT", "COUNT", "PATH");
    print_row(
        "list",
        snapshot_len::<SummaryRecord>(&cfg.list_snapshot_path),
        &cfg.list_snapshot_path,
    );
    print_row(
        "articles",
        snapshot_len::<DetailRecord>(&cfg.article_snapshot_path),
        &cfg.article_snapshot_path,
    );
    print_row("images", file_count(&cfg.image_dir), &cfg.image_dir);
    print_row("archives", file_count(&cfg.archive_dir), &cfg.archive_dir);
    Ok(())
}

fn print_row(label: &str, count: Option<usize>, path: &Path) {
    let count = count
        .map(|c| c.to_string())
        .unwrap_or_else(|| "-".to_string());
    println!("{:<10} {:<10} {}", label, count, path.display());
}

/// Records in a snapshot, or None if it is missing or unreadable.
pub(crate) fn snapshot_len<T: DeserializeOwned>(path: &Path) -> Option<usize> {
    match read_snapshot::<T>(path) {
        Ok(items) => Some(items.len()),
        Err(e) => {
            tracing::debug!(path = %path.display(), "snapshot not readable: {}", e);
            None
        }
    }
}

/// Regular files directly inside `dir`, or None if it does not exist.
pub(crate) fn file_count(dir: &Path) -> Option<usize> {
    let entries = fs::read_dir(dir).ok()?;
    Some(
        entries
            .flatten()
            .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
            .count(),
    )
}
