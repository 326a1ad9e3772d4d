//! nsx-collector - NSX Manager metrics into InfluxDB
//!
//! Polls a fleet of VMware NSX Managers over HTTPS, maps cluster, transport
//! node, routing, alarm, capacity and load-balancer state into metric
//! points, and writes one batch per manager per cycle to InfluxDB v2.
//!
//! # Architecture
//!
//! - [`nsx`] - NSX Manager API client and response models
//! - [`topology`] - tier-1 to tier-0 parent resolution
//! - [`influx`] - point model, mapping, line protocol and writer
//! - [`collector`] - per-manager worker and the tick scheduler
//! - [`metrics`] - self-monitoring counters and the telemetry endpoint
//! - [`config`] - collector settings and manager inventory
//! - [`error`] - unified error type
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use nsx_collector::collector::{Scheduler, Worker};
//! use nsx_collector::config::{load_managers, Config};
//! use nsx_collector::influx::InfluxWriter;
//! use nsx_collector::metrics::NoopMetrics;
//! use nsx_collector::nsx::NsxClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let writer = Arc::new(InfluxWriter::new(&config.influxdb, "token")?);
//!     let mut workers = Vec::new();
//!     for m in load_managers("managers.toml".as_ref())? {
//!         let api = Arc::new(NsxClient::new(&m, config.request_timeout())?);
//!         workers.push(Worker::new(
//!             m.site.clone(),
//!             api,
//!             writer.clone(),
//!             Arc::new(NoopMetrics),
//!             config.slow_interval(),
//!         ));
//!     }
//!
//!     let reports = Scheduler::new(workers, config.default_interval()).run_once().await;
//!     println!("{} sites collected", reports.len());
//!     Ok(())
//! }
//! ```

pub mod collector;
pub mod config;
pub mod error;
pub mod influx;
pub mod metrics;
pub mod nsx;
pub mod topology;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::collector::{CycleReport, Domain, Scheduler, Worker};
    pub use crate::config::{Config, Manager};
    pub use crate::error::{CollectorErrorTrait, Error, ErrorCategory, Result};
    pub use crate::influx::{MetricPoint, PointWriter};
    pub use crate::metrics::{CollectorMetrics, MetricsSink};
    pub use crate::nsx::{NsxApi, NsxClient};
}
