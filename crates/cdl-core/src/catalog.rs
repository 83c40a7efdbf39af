//! Catalog walker: pages through the list endpoint and accumulates summaries.
//!
//! In [`Pagination::Fixed`] mode exactly `page_count` pages are requested, no
//! matter what the `next` cursor says. [`Pagination::FollowNext`] follows the
//! cursor instead, with `page_count` as an upper bound. Any page failure ends
//! the walk with no partial result. `page_count = 0` makes no request at all.

use crate::config::{CdlConfig, Pagination};
use crate::error::PipelineError;
use crate::fetch::{fetch_json, Fetch};
use crate::model::{CatalogPage, SummaryRecord};
use crate::snapshot;
use crate::url_model;

/// Walk the catalog and return every summary in page order.
pub fn walk_pages(fetcher: &dyn Fetch, cfg: &CdlConfig) -> Result<Vec<SummaryRecord>, PipelineError> {
    let page_url = |page: u32| {
        url_model::page_url(&cfg.list_endpoint, cfg.page_size, page).map_err(|source| {
            PipelineError::InvalidEndpoint {
                url: cfg.list_endpoint.clone(),
                source,
            }
        })
    };

    let mut summaries = Vec::new();
    let mut page = 1u32;
    let mut next = if cfg.page_count == 0 {
        None
    } else {
        Some(page_url(page)?)
    };

    while let Some(url) = next.take() {
        let body: CatalogPage = match fetch_json(fetcher, &url) {
            Ok(body) => body,
            Err(source) => {
                tracing::error!(page, url = %url, "catalog page failed: {}", source);
                return Err(PipelineError::CatalogPage { page, url, source });
            }
        };
        tracing::debug!(page, records = body.results.len(), "catalog page fetched");

        if page < cfg.page_count {
            next = match cfg.pagination {
                Pagination::Fixed => Some(page_url(page + 1)?),
                Pagination::FollowNext => body.next_url().map(str::to_string),
            };
        }
        summaries.extend(body.results);
        page += 1;
    }

    tracing::info!(count = summaries.len(), "catalog walk complete");
    Ok(summaries)
}

/// Walk the catalog, then write the list snapshot. Both steps are fatal on failure.
pub fn fetch_all_summaries(
    fetcher: &dyn Fetch,
    cfg: &CdlConfig,
) -> Result<Vec<SummaryRecord>, PipelineError> {
    let summaries = walk_pages(fetcher, cfg)?;

    let path = &cfg.list_snapshot_path;
    tracing::info!("write list: {}", path.display());
    snapshot::write_snapshot(&summaries, path).map_err(|source| PipelineError::Snapshot {
        path: path.clone(),
        source,
    })?;
    Ok(summaries)
}
