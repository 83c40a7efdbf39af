//! Detail resolver: one detail record per summary, failures skipped.

use crate::error::PipelineError;
use crate::fetch::{fetch_json, Fetch};
use crate::model::{DetailRecord, SummaryRecord};
use crate::report::{FailureSink, ItemFailure};
use crate::snapshot;
use crate::url_model;
use std::path::Path;

/// Progress is logged every this many records.
pub const PROGRESS_EVERY: usize = 100;

/// Fetch the detail record of every summary, in input order.
///
/// A failed fetch or decode is reported to `sink` and skipped, so the result
/// can be shorter than `summaries`. Never fails.
pub fn resolve_details(
    fetcher: &dyn Fetch,
    detail_endpoint: &str,
    summaries: &[SummaryRecord],
    sink: &mut dyn FailureSink,
) -> Vec<DetailRecord> {
    let mut details = Vec::with_capacity(summaries.len());

    for (i, summary) in summaries.iter().enumerate() {
        if i % PROGRESS_EVERY == 0 {
            tracing::info!(done = i, total = summaries.len(), "download articles");
        }

        let url = url_model::detail_url(detail_endpoint, summary.id);
        match fetch_json::<DetailRecord>(fetcher, &url) {
            Ok(detail) => details.push(detail),
            Err(e) => {
                tracing::warn!(
                    id = summary.id,
                    image = %summary.image,
                    title = %summary.title,
                    "download article failed: {}",
                    e
                );
                sink.item_skipped(ItemFailure::Detail {
                    id: summary.id,
                    title: summary.title.clone(),
                    image: summary.image.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    details
}

/// Resolve all details, then write the article snapshot (fatal on failure).
pub fn resolve_all(
    fetcher: &dyn Fetch,
    detail_endpoint: &str,
    summaries: &[SummaryRecord],
    snapshot_path: &Path,
    sink: &mut dyn FailureSink,
) -> Result<Vec<DetailRecord>, PipelineError> {
    let details = resolve_details(fetcher, detail_endpoint, summaries, sink);

    tracing::info!(
        resolved = details.len(),
        skipped = summaries.len() - details.len(),
        "write articles: {}",
        snapshot_path.display()
    );
    snapshot::write_snapshot(&details, snapshot_path).map_err(|source| PipelineError::Snapshot {
        path: snapshot_path.to_path_buf(),
        source,
    })?;
    Ok(details)
}
