//! Public API exports for the lag polling module

pub use crate::lag::client::LagClient;
pub use crate::lag::error::{PollError, PollResult};
pub use crate::lag::output::{LazyFile, OutputFormat, RecordWriter};
pub use crate::lag::poller::{FailurePolicy, PollFailure, PollSummary, Poller};
pub use crate::lag::transform::{flatten, LagRecords};
pub use crate::lag::transport::{HttpTransport, Transport, DEFAULT_HTTP_TIMEOUT_SECS};
pub use crate::lag::types::{
    ClusterList, ConsumerLag, ConsumerList, ConsumerPartition, ConsumerStatus, GroupLagOutput,
    LagWindow, PartitionLagOutput,
};
