//! Prometheus self-monitoring for the collector
//!
//! Workers report through the [`MetricsSink`] trait so the core never
//! touches a global registry. [`CollectorMetrics`] is the production sink;
//! it owns a private [`Registry`] that the telemetry server encodes.
//!
//! Exposed series:
//! - `nsx_collector_collect_cycles_total{site}`
//! - `nsx_collector_collect_duration_seconds{site}`
//! - `nsx_collector_collect_errors_total{site,component}`
//! - `nsx_collector_points_written_total{site}`

pub mod server;

use prometheus::{
    register_histogram_vec_with_registry, register_int_counter_vec_with_registry, Encoder,
    HistogramVec, IntCounterVec, Registry, TextEncoder,
};
use std::time::Duration;

pub use server::{router, serve};

// ============================================================================
// Sink Abstraction
// ============================================================================

/// Destination for per-cycle collector counters
///
/// Implementations must be safe to share across concurrently running
/// workers.
pub trait MetricsSink: Send + Sync {
    /// One completed cycle and how long it took
    fn record_cycle(&self, site: &str, elapsed: Duration);

    /// One failed fetch or write, labelled by component
    fn record_error(&self, site: &str, component: &str);

    /// Points accepted by the time-series store
    fn record_points_written(&self, site: &str, count: usize);
}

/// Sink that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMetrics;

impl MetricsSink for NoopMetrics {
    fn record_cycle(&self, _site: &str, _elapsed: Duration) {}
    fn record_error(&self, _site: &str, _component: &str) {}
    fn record_points_written(&self, _site: &str, _count: usize) {}
}

// ============================================================================
// Prometheus Sink
// ============================================================================

/// Prometheus-backed metrics with an owned registry
#[derive(Clone)]
pub struct CollectorMetrics {
    registry: Registry,
    cycles: IntCounterVec,
    duration: HistogramVec,
    errors: IntCounterVec,
    points_written: IntCounterVec,
}

impl CollectorMetrics {
    /// Register all collector metrics in a fresh registry
    ///
    /// # Errors
    ///
    /// Returns an error if a metric definition is rejected by the registry
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let cycles = register_int_counter_vec_with_registry!(
            "nsx_collector_collect_cycles_total",
            "Completed collection cycles",
            &["site"],
            registry
        )?;
        let duration = register_histogram_vec_with_registry!(
            "nsx_collector_collect_duration_seconds",
            "Wall time of one collection cycle in seconds",
            &["site"],
            vec![0.5, 1.0, 2.5, 5.0, 10.0, 20.0, 40.0, 60.0, 120.0, 300.0],
            registry
        )?;
        let errors = register_int_counter_vec_with_registry!(
            "nsx_collector_collect_errors_total",
            "Failed fetches and writes by component",
            &["site", "component"],
            registry
        )?;
        let points_written = register_int_counter_vec_with_registry!(
            "nsx_collector_points_written_total",
            "Points written to InfluxDB",
            &["site"],
            registry
        )?;

        Ok(Self {
            registry,
            cycles,
            duration,
            errors,
            points_written,
        })
    }

    /// Registry backing these metrics
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Encode all metrics to Prometheus text format
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails or produces invalid UTF-8
    pub fn encode(&self) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    pub fn cycles(&self, site: &str) -> u64 {
        self.cycles.with_label_values(&[site]).get()
    }

    pub fn errors(&self, site: &str, component: &str) -> u64 {
        self.errors.with_label_values(&[site, component]).get()
    }

    pub fn points_written(&self, site: &str) -> u64 {
        self.points_written.with_label_values(&[site]).get()
    }
}

impl MetricsSink for CollectorMetrics {
    fn record_cycle(&self, site: &str, elapsed: Duration) {
        self.cycles.with_label_values(&[site]).inc();
        self.duration
            .with_label_values(&[site])
            .observe(elapsed.as_secs_f64());
    }

    fn record_error(&self, site: &str, component: &str) {
        self.errors.with_label_values(&[site, component]).inc();
    }

    fn record_points_written(&self, site: &str, count: usize) {
        self.points_written
            .with_label_values(&[site])
            .inc_by(count as u64);
    }
}
