//! Lag Polling Error Types

/// Errors raised while fetching, decoding or emitting lag records
#[derive(Debug, thiserror::Error)]
pub enum PollError {
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("API reported an error for {url}: {message}")]
    Api { url: String, message: String },

    #[error("Could not encode record for group '{group}': {source}")]
    Encode {
        group: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not write output: {source}")]
    Output {
        #[source]
        source: std::io::Error,
    },

    #[error("Could not build HTTP client: {message}")]
    Client { message: String },
}

impl PollError {
    /// URL of the request that failed, if the error came from a request
    pub fn url(&self) -> Option<&str> {
        match self {
            PollError::Transport { url, .. }
            | PollError::HttpStatus { url, .. }
            | PollError::Decode { url, .. }
            | PollError::Api { url, .. } => Some(url),
            _ => None,
        }
    }

    /// Whether another attempt at the same request could succeed
    pub fn is_transient(&self) -> bool {
        match self {
            PollError::Transport { .. } => true,
            PollError::HttpStatus { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

impl crate::core::error_handling::ContextualError for PollError {
    // Poll failures are always reported with the failing operation
    fn is_user_actionable(&self) -> bool {
        false
    }

    fn user_message(&self) -> Option<&str> {
        None
    }
}

/// Result type for lag polling operations
pub type PollResult<T> = Result<T, PollError>;
