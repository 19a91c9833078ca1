//! HTTP transport used by the lag client
//!
//! The [`Transport`] trait is the seam between the fetchers and the network.
//! [`HttpTransport`] is the production implementation backed by `reqwest`.

use crate::lag::error::{PollError, PollResult};
use std::time::Duration;

/// Default timeout for a single request to the lag API
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;

/// Fetches the full body of a GET request
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> PollResult<Vec<u8>>;
}

/// `reqwest`-backed transport
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with a custom request timeout
    pub fn with_timeout(timeout: Duration) -> PollResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("lagpoller/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PollError::Client {
                message: e.to_string(),
            })?;

        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> PollResult<Vec<u8>> {
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| PollError::Transport {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PollError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| PollError::Transport {
            url: url.to_string(),
            source: e,
        })?;

        log::trace!("GET {} returned {} bytes", url, body.len());
        Ok(body.to_vec())
    }
}
