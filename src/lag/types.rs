//! Lag API Response Types
//!
//! Typed views of the JSON envelopes returned by the lag monitoring API, plus
//! the flattened records emitted downstream.
//!
//! Decoding is lenient: missing fields fall back to their zero value, a
//! `null` anywhere reads as the zero value of its field (or `""` for a name in
//! a list), and unknown fields are ignored.

use serde::{Deserialize, Deserializer, Serialize};

/// Response envelope shared by every endpoint
pub trait Envelope {
    /// API-reported failure flag
    fn is_error(&self) -> bool;

    /// API-reported message (usually empty on success)
    fn message(&self) -> &str;
}

/// `GET /v2/kafka`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterList {
    #[serde(deserialize_with = "null_as_default")]
    pub error: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(deserialize_with = "null_names")]
    pub clusters: Vec<String>,
}

/// `GET /v2/kafka/{cluster}/consumer`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsumerList {
    #[serde(deserialize_with = "null_as_default")]
    pub error: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(deserialize_with = "null_names")]
    pub consumers: Vec<String>,
}

/// `GET /v2/kafka/{cluster}/consumer/{consumer}/lag`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsumerLag {
    #[serde(deserialize_with = "null_as_default")]
    pub error: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: ConsumerStatus,
}

/// Lag status of one consumer group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsumerStatus {
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub totallag: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub cluster: String,
    #[serde(deserialize_with = "null_as_default")]
    pub complete: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub group: String,
    #[serde(deserialize_with = "null_as_default")]
    pub maxlag: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub partition_count: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub partitions: Vec<ConsumerPartition>,
}

/// Lag status of one partition within a group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsumerPartition {
    #[serde(deserialize_with = "null_as_default")]
    pub topic: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub partition: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub start: LagWindow,
    #[serde(deserialize_with = "null_as_default")]
    pub end: LagWindow,
}

/// A lag measurement at one end of the evaluation window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LagWindow {
    #[serde(deserialize_with = "null_as_default")]
    pub lag: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub max_offset: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub offset: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub timestamp: i64,
}

/// Flattened group summary, one per consumer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupLagOutput {
    pub group: String,
    pub totallag: i64,
    pub maxlag: i64,
    pub partition_count: i64,
}

/// Flattened partition record, one per partition of a consumer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartitionLagOutput {
    pub timestamp: i64,
    pub group: String,
    pub topic: String,
    pub partition: i32,
    pub lag: i64,
}

macro_rules! impl_envelope {
    ($($ty:ty),*) => {
        $(
            impl Envelope for $ty {
                fn is_error(&self) -> bool {
                    self.error
                }

                fn message(&self) -> &str {
                    &self.message
                }
            }
        )*
    };
}

impl_envelope!(ClusterList, ConsumerList, ConsumerLag);

impl ClusterList {
    pub fn into_names(self) -> Vec<String> {
        self.clusters
    }
}

impl ConsumerList {
    pub fn into_names(self) -> Vec<String> {
        self.consumers
    }
}

impl ConsumerLag {
    pub fn into_status(self) -> ConsumerStatus {
        self.status
    }
}

// `null` is treated like an absent field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// A `null` list is empty and a `null` name within it is ""
fn null_names<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let names = Option::<Vec<Option<String>>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(names.into_iter().map(Option::unwrap_or_default).collect())
}
