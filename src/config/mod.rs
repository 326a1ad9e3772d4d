//! Configuration management for nsx-collector
//!
//! Collector settings come from a TOML file in which every section and key
//! is optional. The manager inventory lives in its own file, see
//! [`managers`].

pub mod managers;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

pub use managers::{load_managers, Manager, ManagerEntry, ManagersFile};

/// Environment variable consulted when no token file is usable
pub const INFLUX_TOKEN_ENV: &str = "INFLUX_TOKEN";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// InfluxDB destination
    pub influxdb: InfluxDbConfig,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Self-monitoring endpoint
    pub telemetry: TelemetryConfig,

    /// Collection cadence
    pub intervals: IntervalConfig,

    /// NSX Manager client settings
    pub nsx: NsxConfig,
}

/// InfluxDB v2 connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InfluxDbConfig {
    /// Server URL
    pub url: String,

    pub org: String,
    pub bucket: String,

    /// File holding the API token; `INFLUX_TOKEN` is the fallback
    pub token_file: Option<PathBuf>,

    /// Write request timeout in seconds
    pub timeout_secs: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (json, text)
    pub format: String,
}

/// Telemetry server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub enabled: bool,

    /// Listen address, e.g. `0.0.0.0:9101`
    pub address: String,
}

/// Collection intervals
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IntervalConfig {
    /// Fast-tier period: cluster, nodes, routers, BGP
    pub default_secs: u64,

    /// Slow-tier period: alarms, capacity, load balancers
    pub slow_secs: u64,
}

/// NSX Manager client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NsxConfig {
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// Results requested per listing page
    pub page_size: u32,
}

impl Default for InfluxDbConfig {
    fn default() -> Self {
        Self {
            url: String::from("http://localhost:8086"),
            org: String::from("nsx"),
            bucket: String::from("nsx"),
            token_file: None,
            timeout_secs: 10,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("json"),
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            address: String::from("0.0.0.0:9101"),
        }
    }
}

impl Default for IntervalConfig {
    fn default() -> Self {
        Self {
            default_secs: 40,
            slow_secs: 300,
        }
    }
}

impl Default for NsxConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 15,
            page_size: 100,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.intervals.default_secs == 0 {
            anyhow::bail!("intervals.default_secs must be greater than 0");
        }

        if self.intervals.slow_secs < self.intervals.default_secs {
            anyhow::bail!(
                "intervals.slow_secs ({}) must not be shorter than intervals.default_secs ({})",
                self.intervals.slow_secs,
                self.intervals.default_secs
            );
        }

        if self.nsx.request_timeout_secs == 0 {
            anyhow::bail!("nsx.request_timeout_secs must be greater than 0");
        }

        if self.nsx.page_size == 0 {
            anyhow::bail!("nsx.page_size must be greater than 0");
        }

        if self.influxdb.timeout_secs == 0 {
            anyhow::bail!("influxdb.timeout_secs must be greater than 0");
        }

        Url::parse(&self.influxdb.url)
            .with_context(|| format!("Invalid influxdb.url: {}", self.influxdb.url))?;

        if self.telemetry.enabled {
            self.telemetry_address()?;
        }

        match self.logging.format.as_str() {
            "json" | "text" => {}
            other => anyhow::bail!("logging.format must be json or text, got {other}"),
        }

        Ok(())
    }

    /// Resolve the InfluxDB API token
    ///
    /// The token file wins when it exists and is non-empty; otherwise
    /// `INFLUX_TOKEN` is used.
    pub fn influx_token(&self) -> Result<String> {
        if let Some(path) = &self.influxdb.token_file {
            match std::fs::read_to_string(path) {
                Ok(content) if !content.trim().is_empty() => {
                    return Ok(content.trim().to_string());
                }
                Ok(_) => {
                    tracing::warn!(path = %path.display(), "Token file is empty");
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Cannot read token file");
                }
            }
        }

        match std::env::var(INFLUX_TOKEN_ENV) {
            Ok(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
            _ => anyhow::bail!(
                "No InfluxDB token found: set {INFLUX_TOKEN_ENV} or configure influxdb.token_file"
            ),
        }
    }

    /// Parsed telemetry listen address
    pub fn telemetry_address(&self) -> Result<SocketAddr> {
        self.telemetry
            .address
            .parse()
            .with_context(|| format!("Invalid telemetry.address: {}", self.telemetry.address))
    }

    /// Fast-tier period
    #[must_use]
    pub fn default_interval(&self) -> Duration {
        Duration::from_secs(self.intervals.default_secs)
    }

    /// Slow-tier period
    #[must_use]
    pub fn slow_interval(&self) -> Duration {
        Duration::from_secs(self.intervals.slow_secs)
    }

    /// NSX per-request timeout
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.nsx.request_timeout_secs)
    }
}
