//! Outcome of one collection cycle

use chrono::{DateTime, Utc};
use std::fmt;

use crate::influx::{MetricPoint, WriteError};
use crate::nsx::ApiError;

/// Metric domain a fetch belongs to; doubles as the error metric label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Cluster,
    TransportNodes,
    TransportNodeStatus,
    EdgeInterfaces,
    EdgeInterfaceStats,
    LogicalRouters,
    LogicalRouterPorts,
    BgpNeighbors,
    Alarms,
    Capacity,
    NsServices,
    LbServices,
    LbVirtualServers,
    LbPools,
    LbServiceStatus,
    Write,
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cluster => "cluster",
            Self::TransportNodes => "transport_nodes",
            Self::TransportNodeStatus => "transport_node_status",
            Self::EdgeInterfaces => "edge_interfaces",
            Self::EdgeInterfaceStats => "edge_interface_stats",
            Self::LogicalRouters => "logical_routers",
            Self::LogicalRouterPorts => "logical_router_ports",
            Self::BgpNeighbors => "bgp_neighbors",
            Self::Alarms => "alarms",
            Self::Capacity => "capacity",
            Self::NsServices => "ns_services",
            Self::LbServices => "lb_services",
            Self::LbVirtualServers => "lb_virtual_servers",
            Self::LbPools => "lb_pools",
            Self::LbServiceStatus => "lb_service_status",
            Self::Write => "write",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fetch that failed and whose points were left out
#[derive(Debug)]
pub struct DomainFailure {
    pub domain: Domain,

    /// Node, router or service id for per-item fetches
    pub item: Option<String>,

    pub error: ApiError,
}

/// What happened to the cycle's batch
#[derive(Debug)]
pub enum WriteOutcome {
    /// The cycle did not run
    Skipped,

    /// The batch was accepted; holds the point count
    Written(usize),

    Failed(WriteError),
}

/// Everything one cycle of one worker produced
#[derive(Debug)]
pub struct CycleReport {
    pub site: String,

    /// Timestamp shared by every point of the cycle
    pub timestamp: DateTime<Utc>,

    /// Another cycle of the same worker was still running
    pub skipped: bool,

    /// Whether alarms, capacity and load balancers were collected
    pub slow_tier: bool,

    pub points: Vec<MetricPoint>,
    pub failures: Vec<DomainFailure>,
    pub write: WriteOutcome,
}

impl CycleReport {
    /// Report for a cycle that was not started
    pub fn skipped(site: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            site: site.into(),
            timestamp,
            skipped: true,
            slow_tier: false,
            points: Vec::new(),
            failures: Vec::new(),
            write: WriteOutcome::Skipped,
        }
    }

    /// True when the batch reached the store
    pub fn is_written(&self) -> bool {
        matches!(self.write, WriteOutcome::Written(_))
    }

    pub fn write_error(&self) -> Option<&WriteError> {
        match &self.write {
            WriteOutcome::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Failures recorded for `domain`
    pub fn failures_in(&self, domain: Domain) -> impl Iterator<Item = &DomainFailure> {
        self.failures.iter().filter(move |f| f.domain == domain)
    }

    /// Fetch failures plus a failed write
    pub fn error_count(&self) -> usize {
        self.failures.len() + usize::from(self.write_error().is_some())
    }
}
