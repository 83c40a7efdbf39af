//! Asset downloader shared by the image and archive passes.
//!
//! Each source record yields zero or more [`AssetJob`]s. Every job is one GET
//! whose whole body is written to `target_dir/<filename>`, where the filename
//! comes from the final URL path segment. With [`FileNaming::Basename`] two
//! URLs ending in the same segment write the same file and the later one wins.

use crate::config::FileNaming;
use crate::error::PipelineError;
use crate::fetch::{Fetch, RequestKind};
use crate::model::{DetailRecord, SummaryRecord};
use crate::report::{AssetKind, AssetStats, FailureSink, ItemFailure};
use crate::url_model;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Progress is logged every this many source records.
pub const PROGRESS_EVERY: usize = 100;

/// One URL to download, with the record it belongs to (for naming and reports).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetJob {
    pub url: String,
    pub owner_id: i64,
    pub owner_title: String,
}

/// The cover image of a summary record.
pub fn image_jobs(summary: &SummaryRecord) -> Vec<AssetJob> {
    vec![AssetJob {
        url: summary.image.clone(),
        owner_id: summary.id,
        owner_title: summary.title.clone(),
    }]
}

/// Every archive referenced by a detail record, resolved against `base_url`.
pub fn archive_jobs(base_url: &str, detail: &DetailRecord) -> Vec<AssetJob> {
    detail
        .assets
        .iter()
        .map(|asset| AssetJob {
            url: url_model::asset_url(base_url, &asset.asset_path),
            owner_id: detail.id,
            owner_title: detail.title.clone(),
        })
        .collect()
}

/// Where and how one downloader pass writes its files.
#[derive(Debug, Clone, Copy)]
pub struct AssetTarget<'a> {
    pub kind: AssetKind,
    pub dir: &'a Path,
    pub naming: FileNaming,
}

/// Download every job produced by `jobs_for` over `items`.
///
/// Fails only if the target directory cannot be created. Per-URL failures are
/// reported to `sink` and counted in the returned stats.
pub fn download_all<T, F>(
    fetcher: &dyn Fetch,
    items: &[T],
    jobs_for: F,
    target: AssetTarget<'_>,
    sink: &mut dyn FailureSink,
) -> Result<AssetStats, PipelineError>
where
    F: Fn(&T) -> Vec<AssetJob>,
{
    if !target.dir.is_dir() {
        tracing::info!("mkdir: {}", target.dir.display());
    }
    fs::create_dir_all(target.dir).map_err(|source| PipelineError::CreateDir {
        path: target.dir.to_path_buf(),
        source,
    })?;

    let mut stats = AssetStats::default();
    let mut written_names: HashSet<String> = HashSet::new();

    for (i, item) in items.iter().enumerate() {
        if i % PROGRESS_EVERY == 0 {
            tracing::info!(kind = %target.kind, done = i, total = items.len(), "download assets");
        }

        for job in jobs_for(item) {
            stats.attempted += 1;
            match download_one(fetcher, &job, target) {
                Ok(name) => {
                    stats.written += 1;
                    if !written_names.insert(name.clone()) {
                        stats.overwritten += 1;
                        tracing::warn!(
                            kind = %target.kind,
                            file = %name,
                            url = %job.url,
                            "filename collides with an earlier download; overwritten"
                        );
                    }
                }
                Err(reason) => {
                    stats.failed += 1;
                    tracing::warn!(
                        kind = %target.kind,
                        url = %job.url,
                        title = %job.owner_title,
                        "download {} failed: {}",
                        target.kind,
                        reason
                    );
                    sink.item_skipped(ItemFailure::Asset {
                        kind: target.kind,
                        owner_id: job.owner_id,
                        owner_title: job.owner_title,
                        url: job.url,
                        reason,
                    });
                }
            }
        }
    }

    tracing::info!(
        kind = %target.kind,
        attempted = stats.attempted,
        written = stats.written,
        failed = stats.failed,
        "asset pass complete"
    );
    Ok(stats)
}

/// Fetch one URL and write it; returns the local filename.
fn download_one(fetcher: &dyn Fetch, job: &AssetJob, target: AssetTarget<'_>) -> Result<String, String> {
    let name = url_model::local_filename(&job.url, target.naming, job.owner_id)
        .ok_or_else(|| "URL has no file name".to_string())?;
    let bytes = fetcher
        .get(&job.url, RequestKind::Asset)
        .map_err(|e| e.to_string())?;
    let path = target.dir.join(&name);
    fs::write(&path, &bytes).map_err(|e| format!("write {}: {}", path.display(), e))?;
    tracing::debug!(url = %job.url, path = %path.display(), bytes = bytes.len(), "asset written");
    Ok(name)
}
