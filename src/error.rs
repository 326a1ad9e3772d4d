//! Unified error handling for nsx-collector
//!
//! Module errors stay specific ([`ApiError`] for manager calls,
//! [`WriteError`] for InfluxDB writes). [`Error`] wraps them where a single
//! type has to cross module boundaries.
//!
//! - [`CollectorErrorTrait`] - common interface for all error types
//! - [`ErrorCategory`] - coarse classification used in logs and summaries
//! - [`Error`] - the unified enum

use std::io;
use thiserror::Error;

pub use crate::influx::writer::WriteError;
pub use crate::nsx::error::ApiError;

/// Common trait for all collector error types
pub trait CollectorErrorTrait: std::error::Error {
    /// Whether a later attempt may succeed without operator action
    fn is_recoverable(&self) -> bool;

    /// Classification for handling strategies
    fn category(&self) -> ErrorCategory;
}

/// Classification of errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// HTTP, TLS and timeout failures
    Network,
    /// Unexpected response shapes
    Parsing,
    /// Time-series store failures
    Storage,
    /// Configuration and credential errors
    Config,
    Other,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Parsing => "parsing",
            Self::Storage => "storage",
            Self::Config => "config",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl CollectorErrorTrait for ApiError {
    fn is_recoverable(&self) -> bool {
        ApiError::is_recoverable(self)
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Decode { .. } => ErrorCategory::Parsing,
            Self::InvalidUrl(_) => ErrorCategory::Config,
            Self::Status { status, .. } if matches!(status, 401 | 403) => ErrorCategory::Config,
            _ => ErrorCategory::Network,
        }
    }
}

impl CollectorErrorTrait for WriteError {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Encode(_) => false,
            Self::Request { .. } => true,
            Self::Rejected { status, .. } => *status == 429 || *status >= 500,
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Encode(_) => ErrorCategory::Config,
            Self::Request { .. } => ErrorCategory::Network,
            Self::Rejected { .. } => ErrorCategory::Storage,
        }
    }
}

/// Unified error type for the collector
#[derive(Error, Debug)]
pub enum Error {
    /// NSX Manager API errors
    #[error("NSX API error: {0}")]
    Api(#[from] ApiError),

    /// InfluxDB write errors
    #[error("Write error: {0}")]
    Write(#[from] WriteError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{context}")]
    Other {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl CollectorErrorTrait for Error {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Api(e) => CollectorErrorTrait::is_recoverable(e),
            Self::Write(e) => e.is_recoverable(),
            Self::Io(_) | Self::Http(_) => true,
            Self::Json(_) | Self::Config(_) | Self::Other { .. } => false,
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Api(e) => e.category(),
            Self::Write(e) => e.category(),
            Self::Http(_) => ErrorCategory::Network,
            Self::Io(_) => ErrorCategory::Storage,
            Self::Json(_) => ErrorCategory::Parsing,
            Self::Config(_) => ErrorCategory::Config,
            Self::Other { .. } => ErrorCategory::Other,
        }
    }
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
