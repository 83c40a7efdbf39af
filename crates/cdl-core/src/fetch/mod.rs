//! HTTP GET plumbing.
//!
//! Every stage talks to the network through the [`Fetch`] trait. The real
//! implementation is [`CurlFetcher`] (libcurl easy handle, blocking, one
//! handle per request). URLs are normalised by the `url` crate before they
//! reach curl, so spaces and non-ASCII characters go out percent-encoded.
//! Any status other than 200 is an error.

mod easy;
#[cfg(test)]
pub(crate) mod stub;

pub use easy::CurlFetcher;

use serde::de::DeserializeOwned;
use std::fmt;

/// Which timeout profile a request uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// List and detail calls: bounded total timeout.
    Api,
    /// Binary downloads: stall detection plus optional total cap.
    Asset,
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestKind::Api => write!(f, "api"),
            RequestKind::Asset => write!(f, "asset"),
        }
    }
}

/// Error from a single GET (transport, status, or body decoding).
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// URL did not parse, so no request was sent.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// Curl reported an error (timeout, connection, etc.).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// Response had a status other than 200.
    #[error("HTTP {0}")]
    Http(u32),
    /// Body was not the expected JSON shape.
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Blocking GET returning the full response body.
pub trait Fetch {
    fn get(&self, url: &str, kind: RequestKind) -> Result<Vec<u8>, FetchError>;
}

/// GET an API URL and decode the body as JSON.
pub fn fetch_json<T: DeserializeOwned>(fetcher: &dyn Fetch, url: &str) -> Result<T, FetchError> {
    let body = fetcher.get(url, RequestKind::Api)?;
    Ok(serde_json::from_slice(&body)?)
}
