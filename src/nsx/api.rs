//! The NSX Manager calls the collector depends on
//!
//! [`NsxApi`] is the seam between the collection worker and the transport.
//! [`NsxClient`](super::NsxClient) implements it over HTTPS; tests implement
//! it with canned responses.

use async_trait::async_trait;

use super::error::ApiError;
use super::models::{
    Alarm, BgpNeighborStatusList, CapacityUsage, ClusterStatus, InterfaceStats, LbPool, LbService,
    LbServiceStatus, LbVirtualServer, LogicalRouter, LogicalRouterPort, NetworkInterface,
    TransportNode, TransportNodeStatus,
};

/// Result type for NSX API calls
pub type ApiResult<T> = Result<T, ApiError>;

/// Read-only view of one NSX Manager
///
/// Listing methods return the full, already paginated result set.
#[async_trait]
pub trait NsxApi: Send + Sync {
    /// Overall management/control cluster status
    async fn cluster_status(&self) -> ApiResult<ClusterStatus>;

    /// All transport nodes (hosts and edges)
    async fn transport_nodes(&self) -> ApiResult<Vec<TransportNode>>;

    /// Detailed status of one transport node
    async fn transport_node_status(&self, node_id: &str) -> ApiResult<TransportNodeStatus>;

    /// Network interfaces of one transport node
    async fn node_interfaces(&self, node_id: &str) -> ApiResult<Vec<NetworkInterface>>;

    /// Cumulative counters of one node interface
    async fn interface_stats(&self, node_id: &str, interface_id: &str)
        -> ApiResult<InterfaceStats>;

    /// All logical routers (tier-0, tier-1, VRF)
    async fn logical_routers(&self) -> ApiResult<Vec<LogicalRouter>>;

    /// All logical router ports
    async fn logical_router_ports(&self) -> ApiResult<Vec<LogicalRouterPort>>;

    /// Realtime BGP neighbor status of one router
    async fn bgp_neighbors(&self, router_id: &str) -> ApiResult<BgpNeighborStatusList>;

    /// Open alarms
    async fn open_alarms(&self) -> ApiResult<Vec<Alarm>>;

    /// Platform capacity usage entries
    async fn capacity_usage(&self) -> ApiResult<Vec<CapacityUsage>>;

    /// Number of configured NS services
    async fn ns_services_count(&self) -> ApiResult<i64>;

    /// All load balancer services
    async fn lb_services(&self) -> ApiResult<Vec<LbService>>;

    /// All load balancer virtual servers
    async fn lb_virtual_servers(&self) -> ApiResult<Vec<LbVirtualServer>>;

    /// All load balancer pools
    async fn lb_pools(&self) -> ApiResult<Vec<LbPool>>;

    /// Nested status of one load balancer service
    async fn lb_service_status(&self, service_id: &str) -> ApiResult<LbServiceStatus>;
}
