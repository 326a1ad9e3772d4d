//! Typed NSX Manager API responses
//!
//! Only the fields the collector maps are modelled. Every struct defaults
//! missing fields so a partially populated response still decodes.

use serde::{Deserialize, Deserializer};

// ============================================================================
// Pagination
// ============================================================================

/// One page of a cursor-paginated listing
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    #[serde(default)]
    pub result_count: i64,

    /// Opaque cursor for the next page; empty or absent on the last page
    #[serde(default)]
    pub cursor: Option<String>,

    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Cursor for the following page, if pagination should continue
    pub fn next_cursor(&self) -> Option<&str> {
        if self.results.is_empty() {
            return None;
        }
        self.cursor.as_deref().filter(|c| !c.is_empty())
    }
}

// ============================================================================
// Cluster
// ============================================================================

/// GET /api/v1/cluster/status
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClusterStatus {
    pub cluster_id: String,
    pub mgmt_cluster_status: MgmtClusterStatus,
    pub control_cluster_status: ControlClusterStatus,
    pub detailed_cluster_status: DetailedClusterStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MgmtClusterStatus {
    pub status: String,
    pub online_nodes: Vec<ClusterNode>,
    pub offline_nodes: Vec<ClusterNode>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ControlClusterStatus {
    pub status: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DetailedClusterStatus {
    pub overall_status: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClusterNode {
    pub uuid: String,
    pub mgmt_cluster_listen_ip_address: String,
}

// ============================================================================
// Transport nodes
// ============================================================================

/// Entry of GET /api/v1/transport-nodes
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TransportNode {
    pub id: String,
    pub display_name: String,
    pub node_id: String,
    pub node_deployment_info: NodeDeploymentInfo,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NodeDeploymentInfo {
    /// `EdgeNode` or `HostNode`
    pub resource_type: String,
    pub display_name: String,
    pub id: String,
}

/// GET /api/v1/transport-nodes/{id}/status
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TransportNodeStatus {
    pub node_uuid: String,
    pub node_display_name: String,
    /// UP | DOWN | DEGRADED
    pub status: String,
    pub pnic_status: CountedStatus,
    pub mgmt_connection_status: String,
    pub control_connection_status: CountedStatus,
    pub tunnel_status: TunnelStatus,
    pub node_status: NodeStatus,
}

/// Status block carrying up/down counters
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CountedStatus {
    pub status: String,
    pub up_count: i64,
    pub down_count: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TunnelStatus {
    pub status: String,
    pub up_count: i64,
    pub down_count: i64,
    pub bfd_status: BfdStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BfdStatus {
    pub bfd_admin_down_count: i64,
    pub bfd_down_count: i64,
    pub bfd_init_count: i64,
    pub bfd_up_count: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NodeStatus {
    pub host_node_deployment_status: String,
    pub software_version: String,
    pub maintenance_mode: String,
    pub system_status: SystemStatus,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SystemStatus {
    pub cpu_cores: i64,
    pub load_average: Vec<f64>,
    pub mem_total: i64,
    pub mem_used: i64,
    pub disk_space_total: i64,
    pub disk_space_used: i64,
    /// Milliseconds
    pub uptime: i64,
    pub cpu_usage: CpuUsage,
    pub edge_mem_usage: EdgeMemUsage,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CpuUsage {
    pub highest_cpu_core_usage_dpdk: f64,
    pub avg_cpu_core_usage_dpdk: f64,
    pub highest_cpu_core_usage_non_dpdk: f64,
    pub avg_cpu_core_usage_non_dpdk: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EdgeMemUsage {
    pub system_mem_usage: f64,
    pub swap_usage: f64,
    pub cache_usage: f64,
    pub datapath_total_usage: f64,
    pub datapath_mem_usage_details: DatapathMemUsage,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DatapathMemUsage {
    pub highest_datapath_mem_pool_usage: f64,
}

/// Entry of GET /api/v1/transport-nodes/{id}/network/interfaces
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NetworkInterface {
    /// e.g. `fp-eth0`, `eth0`
    pub interface_id: String,
    /// PHYSICAL | MANAGEMENT | VIRTUAL | ...
    pub interface_type: String,
    pub admin_status: String,
    pub link_status: String,
    /// Mbps, 0 when unknown or not connected
    pub link_speed: i64,
}

/// Listing wrapper for node interfaces (not paginated)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NetworkInterfaceList {
    pub result_count: i64,
    pub results: Vec<NetworkInterface>,
}

/// GET .../network/interfaces/{if}/stats, cumulative since last reboot
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InterfaceStats {
    pub rx_bytes: i64,
    pub tx_bytes: i64,
    pub rx_packets: i64,
    pub tx_packets: i64,
    pub rx_dropped: i64,
    pub tx_dropped: i64,
    pub rx_errors: i64,
    pub tx_errors: i64,
}

// ============================================================================
// Logical routing
// ============================================================================

/// Entry of GET /api/v1/logical-routers
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LogicalRouter {
    pub id: String,
    pub display_name: String,
    /// TIER0 | TIER1 | VRF
    pub router_type: String,
}

impl LogicalRouter {
    /// Tier-0 and VRF routers are the only ones peering over BGP
    pub fn runs_bgp(&self) -> bool {
        matches!(self.router_type.as_str(), "TIER0" | "VRF")
    }
}

/// Entry of GET /api/v1/logical-router-ports
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LogicalRouterPort {
    pub id: String,
    pub logical_router_id: String,
    pub resource_type: String,

    /// Peer port id. Older managers send a bare string, newer ones a
    /// `{"target_id": ...}` reference; both land here as a plain id.
    #[serde(
        rename = "linked_logical_router_port_id",
        deserialize_with = "deserialize_port_ref"
    )]
    pub linked_port_id: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PortRef {
    Id(String),
    Reference { target_id: String },
    Unknown(serde_json::Value),
}

fn deserialize_port_ref<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<PortRef>::deserialize(deserializer)?;
    Ok(match raw {
        Some(PortRef::Id(id)) => id,
        Some(PortRef::Reference { target_id }) => target_id,
        Some(PortRef::Unknown(_)) | None => String::new(),
    })
}

/// GET /api/v1/logical-routers/{id}/routing/bgp/neighbors/status
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BgpNeighborStatusList {
    pub logical_router_id: String,
    pub logical_router_name: String,
    pub results: Vec<BgpNeighborStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BgpNeighborStatus {
    pub neighbor_address: String,
    pub source_address: String,
    pub remote_as_number: String,
    /// ESTABLISHED | IDLE | CONNECT | ACTIVE | OPEN_SENT | OPEN_CONFIRM
    pub connection_state: String,
    pub total_in_prefix_count: i64,
    pub total_out_prefix_count: i64,
    pub messages_received: i64,
    pub messages_sent: i64,
    /// Milliseconds
    pub time_since_established: i64,
}

// ============================================================================
// Alarms and capacity
// ============================================================================

/// Entry of GET /api/v1/alarms
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Alarm {
    pub id: String,
    pub feature_name: String,
    pub feature_display_name: String,
    pub event_type_display_name: String,
    /// CRITICAL | HIGH | MEDIUM | LOW
    pub severity: String,
    pub node_display_name: String,
    pub entity_id: String,
    /// Epoch milliseconds
    pub last_reported_time: i64,
    /// OPEN | ACKNOWLEDGED | SUPPRESSED | RESOLVED
    pub status: String,
    pub summary: String,
}

/// GET /api/v1/capacity/usage
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CapacityUsageResponse {
    pub capacity_usage: Vec<CapacityUsage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CapacityUsage {
    /// e.g. NUMBER_OF_GROUPS
    pub usage_type: String,
    pub display_name: String,
    pub current_usage_count: i64,
    pub max_supported_count: i64,
    pub current_usage_percentage: f64,
}

/// Just the count of a listing, used for GET /api/v1/ns-services
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResultCount {
    pub result_count: i64,
}

// ============================================================================
// Load balancer
// ============================================================================

/// Entry of GET /api/v1/loadbalancer/services
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LbService {
    pub id: String,
    pub display_name: String,
    /// SMALL | MEDIUM | LARGE | XLARGE | DLB
    pub size: String,
}

/// Entry of GET /api/v1/loadbalancer/virtual-servers
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LbVirtualServer {
    pub id: String,
    pub display_name: String,
    pub ip_address: String,
    pub ports: Vec<String>,
    /// TCP | UDP
    pub ip_protocol: String,
}

/// Entry of GET /api/v1/loadbalancer/pools
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LbPool {
    pub id: String,
    pub display_name: String,
}

/// GET /api/v1/loadbalancer/services/{id}/status
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LbServiceStatus {
    pub service_id: String,
    /// UP | DOWN | ERROR | NO_ALARM | DETACHED
    pub service_status: String,
    pub virtual_servers: Vec<LbVirtualServerStatus>,
    pub pools: Vec<LbPoolStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LbVirtualServerStatus {
    pub virtual_server_id: String,
    /// UP | DOWN | ERROR | NO_ALARM
    #[serde(rename = "virtual_server_status", alias = "status")]
    pub status: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LbPoolStatus {
    pub pool_id: String,
    /// UP | DOWN | PARTIALLY_UP | UNKNOWN
    #[serde(rename = "pool_status", alias = "status")]
    pub status: String,
    pub members: Vec<LbMemberStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LbMemberStatus {
    pub ip_address: String,
    pub port: String,
    /// UP | DOWN | DISABLED | GRACEFUL_DISABLED
    pub status: String,
}
