//! Error types for NSX Manager API calls

use thiserror::Error;

/// Errors that can occur while talking to an NSX Manager
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP transport error (connection refused, TLS failure, ...)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request exceeded the per-request timeout
    #[error("Request timeout for {path}")]
    Timeout { path: String },

    /// Manager answered with a non-200 status
    #[error("Unexpected status {status} for {path}")]
    Status { status: u16, path: String },

    /// Response body did not match the expected shape
    #[error("Decoding response for {path} failed: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Base URL or path could not be turned into a request URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Whether the next collection cycle can reasonably expect a different outcome
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Http(_) | Self::Timeout { .. } => true,
            Self::Status { status, .. } => matches!(status, 429 | 500 | 502 | 503 | 504),
            Self::Decode { .. } | Self::InvalidUrl(_) => false,
        }
    }

    /// Short machine-friendly label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Http(_) => "transport",
            Self::Timeout { .. } => "timeout",
            Self::Status { .. } => "status",
            Self::Decode { .. } => "decode",
            Self::InvalidUrl(_) => "invalid_url",
        }
    }
}
