//! Metric point data model

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fmt;

/// Fixed vocabulary of measurements written by the collector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Measurement {
    Cluster,
    TransportNode,
    EdgeResource,
    EdgeUplink,
    LogicalRouter,
    BgpNeighbor,
    Alarm,
    Capacity,
    LbService,
    LbVirtualServer,
    LbPool,
}

impl Measurement {
    /// Measurement name as stored in InfluxDB
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cluster => "nsx_cluster",
            Self::TransportNode => "nsx_transport_node",
            Self::EdgeResource => "nsx_edge_resource",
            Self::EdgeUplink => "nsx_edge_uplink",
            Self::LogicalRouter => "nsx_logical_router",
            Self::BgpNeighbor => "nsx_bgp_neighbor",
            Self::Alarm => "nsx_alarm",
            Self::Capacity => "nsx_capacity",
            Self::LbService => "nsx_lb_service",
            Self::LbVirtualServer => "nsx_lb_virtual_server",
            Self::LbPool => "nsx_lb_pool",
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric field value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Int(i64),
    Float(f64),
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

/// One time-series sample: measurement, tags, fields and timestamp
#[derive(Debug, Clone, PartialEq)]
pub struct MetricPoint {
    pub measurement: Measurement,
    pub tags: BTreeMap<String, String>,
    pub fields: BTreeMap<String, FieldValue>,
    pub timestamp: DateTime<Utc>,
}

impl MetricPoint {
    /// Start a point for `measurement` at `timestamp`
    pub fn new(measurement: Measurement, timestamp: DateTime<Utc>) -> Self {
        Self {
            measurement,
            tags: BTreeMap::new(),
            fields: BTreeMap::new(),
            timestamp,
        }
    }

    /// Add or replace a tag
    #[must_use]
    pub fn tag(mut self, key: &str, value: impl Into<String>) -> Self {
        self.tags.insert(key.to_string(), value.into());
        self
    }

    /// Add or replace a field
    #[must_use]
    pub fn field(mut self, key: &str, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn tag_value(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    pub fn field_value(&self, key: &str) -> Option<FieldValue> {
        self.fields.get(key).copied()
    }
}
