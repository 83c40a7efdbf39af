//! Fatal (stage-aborting) errors.

use crate::fetch::FetchError;
use crate::snapshot::SnapshotError;
use std::io;
use std::path::PathBuf;

/// Error that ends a run. Per-item problems are reported through
/// [`crate::report::FailureSink`] instead.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A configured endpoint does not parse as a URL.
    #[error("invalid endpoint {url}: {source}")]
    InvalidEndpoint {
        url: String,
        #[source]
        source: url::ParseError,
    },
    /// One catalog page could not be fetched or decoded; the walk is abandoned.
    #[error("catalog page {page} ({url}): {source}")]
    CatalogPage {
        page: u32,
        url: String,
        #[source]
        source: FetchError,
    },
    #[error("write snapshot {}: {source}", .path.display())]
    Snapshot {
        path: PathBuf,
        #[source]
        source: SnapshotError,
    },
    #[error("create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
