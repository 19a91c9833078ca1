//! Consumer lag polling
//!
//! Fetches clusters, consumer groups and lag status from the lag monitoring
//! API and emits them as JSON lines.
//!
//! Data flow: Transport → LagClient (decode) → Poller (traverse) → RecordWriter

pub mod api;
pub mod client;
pub mod error;
pub mod output;
pub mod poller;
pub mod transform;
pub mod transport;
pub mod types;

#[cfg(test)]
mod tests;
