//! Flattening of a consumer status into output records

use crate::lag::types::{ConsumerStatus, GroupLagOutput, PartitionLagOutput};

/// Flattened records for one consumer group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LagRecords {
    pub group: GroupLagOutput,
    pub partitions: Vec<PartitionLagOutput>,
}

/// Group summary copied verbatim from the status
pub fn group_record(status: &ConsumerStatus) -> GroupLagOutput {
    GroupLagOutput {
        group: status.group.clone(),
        totallag: status.totallag,
        maxlag: status.maxlag,
        partition_count: status.partition_count,
    }
}

/// One record per partition, in input order, taken from the end window
pub fn partition_records(status: &ConsumerStatus) -> Vec<PartitionLagOutput> {
    status
        .partitions
        .iter()
        .map(|p| PartitionLagOutput {
            timestamp: p.end.timestamp,
            group: status.group.clone(),
            topic: p.topic.clone(),
            partition: p.partition,
            lag: p.end.lag,
        })
        .collect()
}

pub fn flatten(status: &ConsumerStatus) -> LagRecords {
    LagRecords {
        group: group_record(status),
        partitions: partition_records(status),
    }
}
