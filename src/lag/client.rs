//! Lag API client
//!
//! Builds endpoint addresses from the configured base URL, fetches them
//! through a [`Transport`] and decodes the response envelopes.

use crate::core::retry::{retry_async, RetryPolicy};
use crate::lag::error::{PollError, PollResult};
use crate::lag::transport::Transport;
use crate::lag::types::{ClusterList, ConsumerLag, ConsumerList, ConsumerStatus, Envelope};
use serde::de::DeserializeOwned;

/// Client for the `/v2/kafka` family of endpoints
pub struct LagClient<T: Transport> {
    base_url: String,
    transport: T,
    retry: RetryPolicy,
}

impl<T: Transport> LagClient<T> {
    pub fn new(base_url: impl Into<String>, transport: T) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            transport,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn clusters_url(&self) -> String {
        format!("{}/v2/kafka", self.base_url)
    }

    pub fn consumers_url(&self, cluster: &str) -> String {
        format!("{}/v2/kafka/{}/consumer", self.base_url, cluster)
    }

    pub fn lag_url(&self, cluster: &str, consumer: &str) -> String {
        format!(
            "{}/v2/kafka/{}/consumer/{}/lag",
            self.base_url, cluster, consumer
        )
    }

    /// Names of all clusters known to the API, in API order
    pub async fn clusters(&self) -> PollResult<Vec<String>> {
        let list: ClusterList = self.fetch(&self.clusters_url()).await?;
        Ok(list.into_names())
    }

    /// Names of all consumer groups in `cluster`, in API order
    pub async fn consumers(&self, cluster: &str) -> PollResult<Vec<String>> {
        let list: ConsumerList = self.fetch(&self.consumers_url(cluster)).await?;
        Ok(list.into_names())
    }

    /// Lag status of one consumer group
    pub async fn consumer_status(&self, cluster: &str, consumer: &str) -> PollResult<ConsumerStatus> {
        let lag: ConsumerLag = self.fetch(&self.lag_url(cluster, consumer)).await?;
        Ok(lag.into_status())
    }

    async fn fetch<R>(&self, url: &str) -> PollResult<R>
    where
        R: DeserializeOwned + Envelope,
    {
        let body = retry_async(url, &self.retry, PollError::is_transient, || {
            self.transport.get(url)
        })
        .await?;

        decode_envelope(url, &body)
    }
}

/// Decode a response body and reject envelopes flagged as errors
pub fn decode_envelope<R>(url: &str, body: &[u8]) -> PollResult<R>
where
    R: DeserializeOwned + Envelope,
{
    let envelope: R = serde_json::from_slice(body).map_err(|e| PollError::Decode {
        url: url.to_string(),
        source: e,
    })?;

    if envelope.is_error() {
        return Err(PollError::Api {
            url: url.to_string(),
            message: envelope.message().to_string(),
        });
    }

    Ok(envelope)
}
