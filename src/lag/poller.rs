//! Cluster → consumer → lag traversal
//!
//! The poller walks every cluster and every consumer group within it, strictly
//! in API order and one request at a time, and hands each status to the
//! [`RecordWriter`].

use crate::lag::client::LagClient;
use crate::lag::error::{PollError, PollResult};
use crate::lag::output::RecordWriter;
use crate::lag::transport::Transport;
use std::io::Write;

/// What to do when fetching a cluster's consumers or a consumer's status fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop the run at the first failure
    #[default]
    Abort,
    /// Log the failure, skip the cluster or consumer and carry on
    Skip,
}

/// A failure that was skipped under [`FailurePolicy::Skip`]
#[derive(Debug)]
pub struct PollFailure {
    pub cluster: String,
    pub consumer: Option<String>,
    pub error: PollError,
}

/// Counters for one complete run
#[derive(Debug, Default)]
pub struct PollSummary {
    pub clusters: usize,
    pub consumers: usize,
    pub partitions: usize,
    pub failures: Vec<PollFailure>,
}

impl PollSummary {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct Poller<T: Transport> {
    client: LagClient<T>,
    policy: FailurePolicy,
}

impl<T: Transport> Poller<T> {
    pub fn new(client: LagClient<T>) -> Self {
        Self {
            client,
            policy: FailurePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn client(&self) -> &LagClient<T> {
        &self.client
    }

    /// Run one full traversal, writing records as each status arrives
    pub async fn run<W: Write>(&self, writer: &mut RecordWriter<W>) -> PollResult<PollSummary> {
        let mut summary = PollSummary::default();

        let clusters = self.client.clusters().await?;
        log::debug!("Found {} cluster(s)", clusters.len());

        for cluster in &clusters {
            summary.clusters += 1;

            let consumers = match self.client.consumers(cluster).await {
                Ok(consumers) => consumers,
                Err(e) => {
                    self.skip_or_abort(&mut summary, cluster, None, e)?;
                    continue;
                }
            };
            log::debug!("Cluster '{}' has {} consumer(s)", cluster, consumers.len());

            for consumer in &consumers {
                let status = match self.client.consumer_status(cluster, consumer).await {
                    Ok(status) => status,
                    Err(e) => {
                        self.skip_or_abort(&mut summary, cluster, Some(consumer), e)?;
                        continue;
                    }
                };

                match writer.write_status(&status) {
                    Ok(partitions) => {
                        summary.consumers += 1;
                        summary.partitions += partitions;
                        log::info!(
                            "{}/{}: total lag {} across {} partition(s)",
                            cluster,
                            consumer,
                            status.totallag,
                            partitions
                        );
                    }
                    Err(e @ PollError::Output { .. }) => return Err(e),
                    Err(e) => self.skip_or_abort(&mut summary, cluster, Some(consumer), e)?,
                }
            }
        }

        writer.flush()?;
        Ok(summary)
    }

    fn skip_or_abort(
        &self,
        summary: &mut PollSummary,
        cluster: &str,
        consumer: Option<&str>,
        error: PollError,
    ) -> PollResult<()> {
        match self.policy {
            FailurePolicy::Abort => Err(error),
            FailurePolicy::Skip => {
                match consumer {
                    Some(consumer) => {
                        log::warn!("Skipping consumer {}/{}: {}", cluster, consumer, error)
                    }
                    None => log::warn!("Skipping cluster {}: {}", cluster, error),
                }
                summary.failures.push(PollFailure {
                    cluster: cluster.to_string(),
                    consumer: consumer.map(str::to_string),
                    error,
                });
                Ok(())
            }
        }
    }
}
