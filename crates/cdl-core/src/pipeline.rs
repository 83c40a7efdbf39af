//! The whole run: catalog walk, images, details, archives.
//!
//! Order: walk (+ list snapshot) → images → details (+ article snapshot) →
//! archives. Each stage finishes before the next starts. Fatal errors are
//! returned as [`PipelineError`]; per-item failures go to the sink.

use crate::assets::{self, AssetTarget};
use crate::catalog;
use crate::config::CdlConfig;
use crate::detail;
use crate::error::PipelineError;
use crate::fetch::Fetch;
use crate::report::{AssetKind, FailureSink, RunSummary};

/// Run every stage once with `cfg`.
pub fn run(
    cfg: &CdlConfig,
    fetcher: &dyn Fetch,
    sink: &mut dyn FailureSink,
) -> Result<RunSummary, PipelineError> {
    tracing::info!("download list");
    let summaries = catalog::fetch_all_summaries(fetcher, cfg)?;

    tracing::info!("download images");
    let images = assets::download_all(
        fetcher,
        &summaries,
        assets::image_jobs,
        AssetTarget {
            kind: AssetKind::Image,
            dir: &cfg.image_dir,
            naming: cfg.file_naming,
        },
        sink,
    )?;

    tracing::info!("download articles");
    let details = detail::resolve_all(
        fetcher,
        &cfg.detail_endpoint,
        &summaries,
        &cfg.article_snapshot_path,
        sink,
    )?;

    tracing::info!("download torrents");
    let archives = assets::download_all(
        fetcher,
        &details,
        |d| assets::archive_jobs(&cfg.asset_base_url, d),
        AssetTarget {
            kind: AssetKind::Archive,
            dir: &cfg.archive_dir,
            naming: cfg.file_naming,
        },
        sink,
    )?;

    let summary = RunSummary {
        summaries: summaries.len(),
        details: details.len(),
        images,
        archives,
    };
    tracing::info!(skipped = summary.items_skipped(), "done: {}", summary);
    Ok(summary)
}
