//! libcurl-backed [`Fetch`] implementation.

use super::{Fetch, FetchError, RequestKind};
use crate::config::HttpConfig;
use std::time::Duration;

/// Minimum throughput (bytes/s) below which an asset transfer counts as stalled.
const STALL_SPEED_BYTES: u32 = 1024;

/// Blocking fetcher using one curl easy handle per request.
#[derive(Debug, Clone, Default)]
pub struct CurlFetcher {
    http: HttpConfig,
}

impl CurlFetcher {
    pub fn new(http: HttpConfig) -> Self {
        Self { http }
    }

    fn configure(&self, easy: &mut curl::easy::Easy, kind: RequestKind) -> Result<(), curl::Error> {
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(Duration::from_secs(self.http.connect_timeout_secs))?;
        if let Some(agent) = &self.http.user_agent {
            easy.useragent(agent)?;
        }
        match kind {
            RequestKind::Api => {
                easy.timeout(Duration::from_secs(self.http.api_timeout_secs))?;
            }
            RequestKind::Asset => {
                easy.low_speed_limit(STALL_SPEED_BYTES)?;
                easy.low_speed_time(Duration::from_secs(self.http.asset_stall_secs))?;
                if let Some(secs) = self.http.asset_timeout_secs {
                    easy.timeout(Duration::from_secs(secs))?;
                }
            }
        }
        Ok(())
    }
}

impl Fetch for CurlFetcher {
    fn get(&self, url: &str, kind: RequestKind) -> Result<Vec<u8>, FetchError> {
        let url = url::Url::parse(url)?;
        let mut body = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url.as_str())?;
        self.configure(&mut easy, kind)?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        if code != 200 {
            return Err(FetchError::Http(code));
        }
        tracing::trace!(url = %url, %kind, bytes = body.len(), "GET ok");
        Ok(body)
    }
}
