//! InfluxDB v2 batch writer
//!
//! One call per cycle, one HTTP POST per call. The batch either lands or
//! the whole call fails with a [`WriteError`] naming the point count.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::config::InfluxDbConfig;

use super::line_protocol::encode_batch;
use super::point::MetricPoint;

/// Longest response body kept in a rejection error
const MAX_ERROR_BODY: usize = 512;

/// Write failures
#[derive(Error, Debug)]
pub enum WriteError {
    /// The write request could not be built
    #[error("failed to build write request: {0}")]
    Encode(String),

    /// Transport failure, including timeouts
    #[error("write of {count} points failed: {source}")]
    Request {
        count: usize,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status
    #[error("write of {count} points rejected with status {status}: {body}")]
    Rejected {
        count: usize,
        status: u16,
        body: String,
    },
}

impl WriteError {
    /// Number of points the failed call tried to write
    pub fn point_count(&self) -> usize {
        match self {
            Self::Encode(_) => 0,
            Self::Request { count, .. } | Self::Rejected { count, .. } => *count,
        }
    }
}

/// Sink for one cycle's batch of points
#[async_trait]
pub trait PointWriter: Send + Sync {
    /// Write the batch; an empty batch succeeds without I/O
    async fn write_points(&self, points: &[MetricPoint]) -> Result<(), WriteError>;
}

/// Line-protocol writer for the InfluxDB v2 HTTP API
pub struct InfluxWriter {
    http: Client,
    write_url: Url,
}

impl InfluxWriter {
    /// Create a writer for the configured bucket
    ///
    /// # Errors
    ///
    /// Returns `WriteError::Encode` if the URL or token is unusable
    pub fn new(config: &InfluxDbConfig, token: &str) -> Result<Self, WriteError> {
        let mut write_url = Url::parse(&format!(
            "{}/api/v2/write",
            config.url.trim_end_matches('/')
        ))
        .map_err(|e| WriteError::Encode(format!("{}: {e}", config.url)))?;
        write_url
            .query_pairs_mut()
            .append_pair("org", &config.org)
            .append_pair("bucket", &config.bucket)
            .append_pair("precision", "ns");

        let mut auth = HeaderValue::from_str(&format!("Token {token}"))
            .map_err(|e| WriteError::Encode(format!("token: {e}")))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| WriteError::Encode(e.to_string()))?;

        Ok(Self { http, write_url })
    }

    /// Full write endpoint including query
    pub fn write_url(&self) -> &str {
        self.write_url.as_str()
    }
}

#[async_trait]
impl PointWriter for InfluxWriter {
    async fn write_points(&self, points: &[MetricPoint]) -> Result<(), WriteError> {
        if points.is_empty() {
            return Ok(());
        }
        let count = points.len();
        let body = encode_batch(points);
        if body.is_empty() {
            tracing::debug!(count, "No writable fields in batch");
            return Ok(());
        }

        let response = self
            .http
            .post(self.write_url.clone())
            .body(body)
            .send()
            .await
            .map_err(|source| WriteError::Request { count, source })?;

        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            if body.len() > MAX_ERROR_BODY {
                let cut = (0..=MAX_ERROR_BODY)
                    .rev()
                    .find(|i| body.is_char_boundary(*i))
                    .unwrap_or(0);
                body.truncate(cut);
            }
            return Err(WriteError::Rejected {
                count,
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(count, "Batch written");
        Ok(())
    }
}
