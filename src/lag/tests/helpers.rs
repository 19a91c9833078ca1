//! Shared fixtures for lag polling tests

use crate::lag::client::LagClient;
use crate::lag::error::{PollError, PollResult};
use crate::lag::transport::Transport;
use crate::lag::types::{ConsumerPartition, ConsumerStatus, LagWindow};
use serde_json::json;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

pub const BASE: &str = "http://burrow.test:8000";

#[derive(Debug, Clone)]
pub enum FakeResponse {
    Body(String),
    Status(u16),
}

/// In-memory transport keyed by URL
///
/// Each URL holds a queue of responses; the last one repeats forever.
/// Unregistered URLs answer with HTTP 404.
#[derive(Default)]
pub struct FakeTransport {
    responses: Mutex<HashMap<String, VecDeque<FakeResponse>>>,
    requests: Mutex<Vec<String>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, path: &str, body: serde_json::Value) -> Self {
        self.push(path, FakeResponse::Body(body.to_string()))
    }

    pub fn respond_raw(self, path: &str, body: &str) -> Self {
        self.push(path, FakeResponse::Body(body.to_string()))
    }

    pub fn respond_status(self, path: &str, status: u16) -> Self {
        self.push(path, FakeResponse::Status(status))
    }

    pub fn push(self, path: &str, response: FakeResponse) -> Self {
        self.responses
            .lock()
            .unwrap()
            .entry(format!("{}{}", BASE, path))
            .or_default()
            .push_back(response);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Transport for FakeTransport {
    async fn get(&self, url: &str) -> PollResult<Vec<u8>> {
        self.requests.lock().unwrap().push(url.to_string());

        let response = {
            let mut responses = self.responses.lock().unwrap();
            match responses.get_mut(url) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            }
        };

        match response {
            Some(FakeResponse::Body(body)) => Ok(body.into_bytes()),
            Some(FakeResponse::Status(status)) => Err(PollError::HttpStatus {
                url: url.to_string(),
                status,
            }),
            None => Err(PollError::HttpStatus {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

pub fn client(transport: FakeTransport) -> LagClient<FakeTransport> {
    LagClient::new(BASE, transport)
}

pub fn cluster_list(names: &[&str]) -> serde_json::Value {
    json!({ "error": false, "message": "cluster list returned", "clusters": names })
}

pub fn consumer_list(names: &[&str]) -> serde_json::Value {
    json!({ "error": false, "message": "consumer list returned", "consumers": names })
}

pub fn lag_response(status: &ConsumerStatus) -> serde_json::Value {
    json!({ "error": false, "message": "consumer status returned", "status": status })
}

pub fn api_error(message: &str) -> serde_json::Value {
    json!({ "error": true, "message": message })
}

pub fn window(lag: i64, timestamp: i64) -> LagWindow {
    LagWindow {
        lag,
        max_offset: 1_000 + lag,
        offset: 1_000,
        timestamp,
    }
}

pub fn partition(topic: &str, index: i32, start: LagWindow, end: LagWindow) -> ConsumerPartition {
    ConsumerPartition {
        topic: topic.to_string(),
        status: "OK".to_string(),
        partition: index,
        start,
        end,
    }
}

pub fn status(cluster: &str, group: &str, partitions: Vec<ConsumerPartition>) -> ConsumerStatus {
    let totallag = partitions.iter().map(|p| p.end.lag).sum();
    let maxlag = partitions.iter().map(|p| p.end.lag).max().unwrap_or(0);
    ConsumerStatus {
        status: "OK".to_string(),
        totallag,
        cluster: cluster.to_string(),
        complete: true,
        group: group.to_string(),
        maxlag,
        partition_count: partitions.len() as i64,
        partitions,
    }
}
