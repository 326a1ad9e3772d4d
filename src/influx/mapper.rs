//! Pure mapping from NSX API objects to metric points
//!
//! Every function here is infallible and side-effect free. Missing data
//! maps to zero for numbers and to [`MISSING`] for names, so a sparse
//! response still yields a complete, indexable point.

use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::nsx::models::{
    Alarm, BgpNeighborStatusList, CapacityUsage, ClusterStatus, InterfaceStats, LbPool,
    LbPoolStatus, LbService, LbServiceStatus, LbVirtualServer, LbVirtualServerStatus,
    LogicalRouter, NetworkInterface, TransportNode, TransportNodeStatus,
};

use super::point::{Measurement, MetricPoint};

/// Tag value used when the source omits a name
pub const MISSING: &str = "-";

/// Node type assumed when the manager leaves it blank
pub const DEFAULT_NODE_TYPE: &str = "HostNode";

/// Usage type of the synthetic NS-services capacity entry
pub const NS_SERVICES_USAGE_TYPE: &str = "NUMBER_OF_NS_SERVICES";

const UPLINK_TYPES: &[&str] = &["PHYSICAL", "UPLINK", "DATA", "DATAPATH", "FABRIC"];
const NON_UPLINK_TYPES: &[&str] = &["MANAGEMENT", "MGMT", "LOOPBACK", "VIRTUAL", "TUNNEL"];
const UPLINK_ID_PREFIXES: &[&str] = &["fp-", "eth", "vmnic", "pnic"];
const UPLINK_ID_MARKERS: &[&str] = &["uplink", "dpdk"];

// ============================================================================
// Normalization helpers
// ============================================================================

/// 1 if `value` is exactly `expected`, else 0
pub fn status_flag(value: &str, expected: &str) -> i64 {
    i64::from(value == expected)
}

/// Alarm severity as a sortable number, higher is worse
pub fn severity_num(severity: &str) -> i64 {
    match severity {
        "CRITICAL" => 4,
        "HIGH" => 3,
        "MEDIUM" => 2,
        "LOW" => 1,
        _ => 0,
    }
}

/// `used / total` as a percentage, 0.0 when `total` is not positive
pub fn ratio_percent(used: i64, total: i64) -> f64 {
    if total > 0 {
        used as f64 / total as f64 * 100.0
    } else {
        0.0
    }
}

/// `value`, or [`MISSING`] when blank
///
/// Used for names and identity tags alike; an empty identity tag would be
/// dropped on encoding and merge distinct series.
pub fn name_or_missing(value: &str) -> String {
    if value.is_empty() {
        MISSING.to_string()
    } else {
        value.to_string()
    }
}

/// Deployment type of a transport node, defaulting to [`DEFAULT_NODE_TYPE`]
pub fn node_type(node: &TransportNode) -> &str {
    let kind = node.node_deployment_info.resource_type.as_str();
    if kind.is_empty() {
        DEFAULT_NODE_TYPE
    } else {
        kind
    }
}

/// Whether a node type denotes an edge appliance
pub fn is_edge_node_type(node_type: &str) -> bool {
    let kind = node_type.trim().to_lowercase();
    kind == "edgenode" || kind.contains("edge")
}

/// Whether an edge interface likely carries dataplane uplink traffic
///
/// The declared type wins when it is one of the known values. Managers
/// report it inconsistently, so otherwise the interface id decides.
pub fn is_edge_uplink_interface(iface: &NetworkInterface) -> bool {
    let kind = iface.interface_type.trim().to_uppercase();
    if UPLINK_TYPES.contains(&kind.as_str()) {
        return true;
    }
    if NON_UPLINK_TYPES.contains(&kind.as_str()) {
        return false;
    }

    let id = iface.interface_id.trim().to_lowercase();
    UPLINK_ID_PREFIXES.iter().any(|p| id.starts_with(p))
        || UPLINK_ID_MARKERS.iter().any(|m| id.contains(m))
}

// ============================================================================
// Fast tier
// ============================================================================

/// `nsx_cluster` point
pub fn cluster_point(site: &str, cs: &ClusterStatus, now: DateTime<Utc>) -> MetricPoint {
    MetricPoint::new(Measurement::Cluster, now)
        .tag("site", site)
        .tag("cluster_id", name_or_missing(&cs.cluster_id))
        .field("mgmt_status", status_flag(&cs.mgmt_cluster_status.status, "STABLE"))
        .field("control_status", status_flag(&cs.control_cluster_status.status, "STABLE"))
        .field(
            "overall_status",
            status_flag(&cs.detailed_cluster_status.overall_status, "STABLE"),
        )
        .field("online_nodes", cs.mgmt_cluster_status.online_nodes.len() as i64)
        .field("offline_nodes", cs.mgmt_cluster_status.offline_nodes.len() as i64)
}

fn node_point(
    measurement: Measurement,
    site: &str,
    node: &TransportNode,
    now: DateTime<Utc>,
) -> MetricPoint {
    MetricPoint::new(measurement, now)
        .tag("site", site)
        .tag("node_id", name_or_missing(&node.id))
        .tag("node_name", name_or_missing(&node.display_name))
        .tag("node_type", node_type(node))
}

/// `nsx_transport_node` point, plus `nsx_edge_resource` for edge nodes
pub fn transport_node_points(
    site: &str,
    node: &TransportNode,
    ts: &TransportNodeStatus,
    now: DateTime<Utc>,
) -> Vec<MetricPoint> {
    let bfd = &ts.tunnel_status.bfd_status;
    let status = node_point(Measurement::TransportNode, site, node, now)
        .field("status", status_flag(&ts.status, "UP"))
        .field("pnic_up", ts.pnic_status.up_count)
        .field("pnic_down", ts.pnic_status.down_count)
        .field("tunnel_up", ts.tunnel_status.up_count)
        .field("tunnel_down", ts.tunnel_status.down_count)
        .field("bfd_up", bfd.bfd_up_count)
        .field("bfd_down", bfd.bfd_down_count)
        .field("bfd_admin_down", bfd.bfd_admin_down_count)
        .field("mgmt_conn", status_flag(&ts.mgmt_connection_status, "UP"))
        .field("control_conn", status_flag(&ts.control_connection_status.status, "UP"));

    if !is_edge_node_type(node_type(node)) {
        return vec![status];
    }

    let sys = &ts.node_status.system_status;
    let (load_1m, load_5m, load_15m) = match sys.load_average.as_slice() {
        [a, b, c, ..] => (*a, *b, *c),
        _ => (0.0, 0.0, 0.0),
    };

    let resource = node_point(Measurement::EdgeResource, site, node, now)
        .field("cpu_dpdk_avg", sys.cpu_usage.avg_cpu_core_usage_dpdk)
        .field("cpu_dpdk_peak", sys.cpu_usage.highest_cpu_core_usage_dpdk)
        .field("cpu_non_dpdk_avg", sys.cpu_usage.avg_cpu_core_usage_non_dpdk)
        .field("cpu_non_dpdk_peak", sys.cpu_usage.highest_cpu_core_usage_non_dpdk)
        .field("mem_system_pct", sys.edge_mem_usage.system_mem_usage)
        .field("mem_datapath_pct", sys.edge_mem_usage.datapath_total_usage)
        .field(
            "mem_datapath_pool_peak",
            sys.edge_mem_usage
                .datapath_mem_usage_details
                .highest_datapath_mem_pool_usage,
        )
        .field("mem_total_kb", sys.mem_total)
        .field("mem_used_kb", sys.mem_used)
        .field("disk_total_kb", sys.disk_space_total)
        .field("disk_used_kb", sys.disk_space_used)
        .field("disk_used_pct", ratio_percent(sys.disk_space_used, sys.disk_space_total))
        .field("load_avg_1m", load_1m)
        .field("load_avg_5m", load_5m)
        .field("load_avg_15m", load_15m)
        .field("uptime_ms", sys.uptime)
        .field("cpu_cores", sys.cpu_cores);

    vec![status, resource]
}

/// `nsx_edge_uplink` point; all counters are cumulative
pub fn edge_uplink_point(
    site: &str,
    node: &TransportNode,
    iface: &NetworkInterface,
    stats: &InterfaceStats,
    now: DateTime<Utc>,
) -> MetricPoint {
    MetricPoint::new(Measurement::EdgeUplink, now)
        .tag("site", site)
        .tag("node_id", name_or_missing(&node.id))
        .tag("node_name", name_or_missing(&node.display_name))
        .tag("interface_id", name_or_missing(&iface.interface_id))
        .field("rx_bytes", stats.rx_bytes)
        .field("tx_bytes", stats.tx_bytes)
        .field("rx_packets", stats.rx_packets)
        .field("tx_packets", stats.tx_packets)
        .field("rx_dropped", stats.rx_dropped)
        .field("tx_dropped", stats.tx_dropped)
        .field("rx_errors", stats.rx_errors)
        .field("tx_errors", stats.tx_errors)
        .field("link_speed_mbps", iface.link_speed)
}

/// `nsx_logical_router` inventory point
pub fn logical_router_point(
    site: &str,
    parent_t0: &str,
    router: &LogicalRouter,
    now: DateTime<Utc>,
) -> MetricPoint {
    MetricPoint::new(Measurement::LogicalRouter, now)
        .tag("site", site)
        .tag("router_id", name_or_missing(&router.id))
        .tag("router_name", name_or_missing(&router.display_name))
        .tag("router_type", router.router_type.as_str())
        .tag("parent_t0", parent_t0)
        .field("up", 1_i64)
}

/// One `nsx_bgp_neighbor` point per neighbor of `router`
pub fn bgp_neighbor_points(
    site: &str,
    router: &LogicalRouter,
    neighbors: &BgpNeighborStatusList,
    now: DateTime<Utc>,
) -> Vec<MetricPoint> {
    neighbors
        .results
        .iter()
        .map(|n| {
            MetricPoint::new(Measurement::BgpNeighbor, now)
                .tag("site", site)
                .tag("router_id", name_or_missing(&router.id))
                .tag("router_name", name_or_missing(&router.display_name))
                .tag("neighbor_address", name_or_missing(&n.neighbor_address))
                .tag("source_address", name_or_missing(&n.source_address))
                .tag("remote_as", name_or_missing(&n.remote_as_number))
                .field("established", status_flag(&n.connection_state, "ESTABLISHED"))
                .field("prefixes_in", n.total_in_prefix_count)
                .field("prefixes_out", n.total_out_prefix_count)
                .field("messages_in", n.messages_received)
                .field("messages_out", n.messages_sent)
                .field("uptime_ms", n.time_since_established)
        })
        .collect()
}

// ============================================================================
// Slow tier
// ============================================================================

/// `nsx_alarm` point
///
/// Event type and summary are tags so dashboards can list open alarms
/// from the single `severity_num` field without pivoting.
pub fn alarm_point(site: &str, alarm: &Alarm, now: DateTime<Utc>) -> MetricPoint {
    MetricPoint::new(Measurement::Alarm, now)
        .tag("site", site)
        .tag("alarm_id", name_or_missing(&alarm.id))
        .tag("severity", alarm.severity.as_str())
        .tag("feature_name", alarm.feature_name.as_str())
        .tag("node_name", name_or_missing(&alarm.node_display_name))
        .tag("event_type", alarm.event_type_display_name.as_str())
        .tag("summary", alarm.summary.as_str())
        .field("severity_num", severity_num(&alarm.severity))
}

/// `nsx_capacity` point
pub fn capacity_point(site: &str, item: &CapacityUsage, now: DateTime<Utc>) -> MetricPoint {
    MetricPoint::new(Measurement::Capacity, now)
        .tag("site", site)
        .tag("usage_type", name_or_missing(&item.usage_type))
        .tag("display_name", name_or_missing(&item.display_name))
        .field("current_usage", item.current_usage_count)
        .field("max_supported", item.max_supported_count)
        .field("usage_pct", item.current_usage_percentage)
}

/// NS-services count reported as a capacity entry without a ceiling
pub fn ns_services_point(site: &str, count: i64, now: DateTime<Utc>) -> MetricPoint {
    let item = CapacityUsage {
        usage_type: NS_SERVICES_USAGE_TYPE.to_string(),
        display_name: "NS Services".to_string(),
        current_usage_count: count,
        ..Default::default()
    };
    capacity_point(site, &item, now)
}

/// `nsx_lb_service` point
pub fn lb_service_point(
    site: &str,
    svc: &LbService,
    status: &LbServiceStatus,
    now: DateTime<Utc>,
) -> MetricPoint {
    MetricPoint::new(Measurement::LbService, now)
        .tag("site", site)
        .tag("service_id", name_or_missing(&svc.id))
        .tag("service_name", name_or_missing(&svc.display_name))
        .tag("size", svc.size.as_str())
        .field("status", status_flag(&status.service_status, "UP"))
        .field("virtual_servers", status.virtual_servers.len() as i64)
        .field("pools", status.pools.len() as i64)
}

/// `nsx_lb_virtual_server` point, named from the virtual-server lookup table
pub fn lb_virtual_server_point(
    site: &str,
    service_id: &str,
    servers: &HashMap<String, LbVirtualServer>,
    vs: &LbVirtualServerStatus,
    now: DateTime<Utc>,
) -> MetricPoint {
    let meta = servers.get(&vs.virtual_server_id);
    let name = meta.map(|m| m.display_name.as_str()).unwrap_or_default();
    let ip = meta.map(|m| m.ip_address.as_str()).unwrap_or_default();
    let ports = meta.map(|m| m.ports.join(",")).unwrap_or_default();
    let protocol = meta.map(|m| m.ip_protocol.as_str()).unwrap_or_default();

    MetricPoint::new(Measurement::LbVirtualServer, now)
        .tag("site", site)
        .tag("service_id", name_or_missing(service_id))
        .tag("vs_id", name_or_missing(&vs.virtual_server_id))
        .tag("vs_name", name_or_missing(name))
        .tag("ip_address", name_or_missing(ip))
        .tag("port", name_or_missing(&ports))
        .tag("protocol", protocol)
        .field("status", status_flag(&vs.status, "UP"))
}

/// `nsx_lb_pool` point with member health counts
pub fn lb_pool_point(
    site: &str,
    service_id: &str,
    pools: &HashMap<String, LbPool>,
    pool: &LbPoolStatus,
    now: DateTime<Utc>,
) -> MetricPoint {
    let name = pools
        .get(&pool.pool_id)
        .map(|p| p.display_name.as_str())
        .unwrap_or_default();
    let members_up = pool.members.iter().filter(|m| m.status == "UP").count() as i64;
    let members_down = pool.members.iter().filter(|m| m.status == "DOWN").count() as i64;

    MetricPoint::new(Measurement::LbPool, now)
        .tag("site", site)
        .tag("service_id", name_or_missing(service_id))
        .tag("pool_id", name_or_missing(&pool.pool_id))
        .tag("pool_name", name_or_missing(name))
        .field("status", status_flag(&pool.status, "UP"))
        .field("members_total", pool.members.len() as i64)
        .field("members_up", members_up)
        .field("members_down", members_down)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::influx::point::FieldValue;
    use crate::nsx::models::{
        BgpNeighborStatus, LbMemberStatus, NodeDeploymentInfo, SystemStatus,
    };
    use proptest::prelude::*;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn iface(kind: &str, id: &str) -> NetworkInterface {
        NetworkInterface {
            interface_id: id.to_string(),
            interface_type: kind.to_string(),
            ..Default::default()
        }
    }

    fn node(id: &str, kind: &str) -> TransportNode {
        TransportNode {
            id: id.to_string(),
            display_name: format!("{id}-name"),
            node_deployment_info: NodeDeploymentInfo {
                resource_type: kind.to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    proptest! {
        #[test]
        fn prop_status_flag_is_exact_match(value in ".{0,12}", expected in "[A-Z]{1,8}") {
            let flag = status_flag(&value, &expected);
            prop_assert_eq!(flag == 1, value == expected);
            prop_assert!(flag == 0 || flag == 1);
        }

        #[test]
        fn prop_unknown_severity_is_zero(s in "[A-Za-z]{0,10}") {
            prop_assume!(!["CRITICAL", "HIGH", "MEDIUM", "LOW"].contains(&s.as_str()));
            prop_assert_eq!(severity_num(&s), 0);
        }

        #[test]
        fn prop_zero_total_ratio_is_zero(used in any::<i64>()) {
            prop_assert_eq!(ratio_percent(used, 0), 0.0);
        }
    }

    #[test]
    fn test_status_flag_case_and_empty() {
        assert_eq!(status_flag("UP", "UP"), 1);
        assert_eq!(status_flag("up", "UP"), 0);
        assert_eq!(status_flag("", "UP"), 0);
        assert_eq!(status_flag("STABLE ", "STABLE"), 0);
    }

    #[test]
    fn test_severity_ordinals() {
        assert_eq!(severity_num("CRITICAL"), 4);
        assert_eq!(severity_num("HIGH"), 3);
        assert_eq!(severity_num("MEDIUM"), 2);
        assert_eq!(severity_num("LOW"), 1);
        assert_eq!(severity_num("critical"), 0);
    }

    #[test]
    fn test_ratio_percent() {
        assert_eq!(ratio_percent(25, 100), 25.0);
        assert_eq!(ratio_percent(5, -1), 0.0);
    }

    #[test]
    fn test_uplink_classification() {
        assert!(is_edge_uplink_interface(&iface("PHYSICAL", "mgmt0")));
        assert!(!is_edge_uplink_interface(&iface("MANAGEMENT", "fp-eth0")));
        assert!(is_edge_uplink_interface(&iface("", "fp-eth0")));
        assert!(!is_edge_uplink_interface(&iface("", "mgmt0")));

        // type is normalized before lookup
        assert!(is_edge_uplink_interface(&iface(" datapath ", "x")));
        assert!(!is_edge_uplink_interface(&iface("tunnel", "eth1")));

        // id heuristics when the type is unrecognized
        assert!(is_edge_uplink_interface(&iface("ETHERNET", "vmnic2")));
        assert!(is_edge_uplink_interface(&iface("", "PNIC1")));
        assert!(is_edge_uplink_interface(&iface("", "bond-uplink-1")));
        assert!(is_edge_uplink_interface(&iface("", "kni-dpdk0")));
        assert!(!is_edge_uplink_interface(&iface("", "lo")));
    }

    #[test]
    fn test_node_type_defaults() {
        assert_eq!(node_type(&node("n1", "")), DEFAULT_NODE_TYPE);
        assert_eq!(node_type(&node("n1", "EdgeNode")), "EdgeNode");
        assert!(is_edge_node_type("EdgeNode"));
        assert!(is_edge_node_type("PublicCloudGatewayEdge"));
        assert!(!is_edge_node_type("HostNode"));
    }

    #[test]
    fn test_host_node_yields_single_point() {
        let status = TransportNodeStatus {
            status: "UP".to_string(),
            ..Default::default()
        };
        let points = transport_node_points("dc1", &node("n1", ""), &status, now());

        assert_eq!(points.len(), 1);
        let p = &points[0];
        assert_eq!(p.measurement, Measurement::TransportNode);
        assert_eq!(p.tag_value("node_type"), Some("HostNode"));
        assert_eq!(p.field_value("status"), Some(FieldValue::Int(1)));
        assert_eq!(p.field_value("mgmt_conn"), Some(FieldValue::Int(0)));
        assert_eq!(p.timestamp, now());
    }

    #[test]
    fn test_edge_node_resource_point() {
        let mut status = TransportNodeStatus::default();
        status.node_status.system_status = SystemStatus {
            disk_space_total: 200,
            disk_space_used: 50,
            load_average: vec![0.5, 0.25],
            cpu_cores: 8,
            ..Default::default()
        };

        let points = transport_node_points("dc1", &node("e1", "EdgeNode"), &status, now());
        assert_eq!(points.len(), 2);

        let edge = &points[1];
        assert_eq!(edge.measurement, Measurement::EdgeResource);
        assert_eq!(edge.field_value("disk_used_pct"), Some(FieldValue::Float(25.0)));
        // fewer than three load values reported
        assert_eq!(edge.field_value("load_avg_1m"), Some(FieldValue::Float(0.0)));
        assert_eq!(edge.field_value("cpu_cores"), Some(FieldValue::Int(8)));
    }

    #[test]
    fn test_alarm_sentinel_node_name() {
        let alarm = Alarm {
            id: "a1".to_string(),
            severity: "HIGH".to_string(),
            ..Default::default()
        };
        let p = alarm_point("dc1", &alarm, now());
        assert_eq!(p.tag_value("node_name"), Some(MISSING));
        assert_eq!(p.field_value("severity_num"), Some(FieldValue::Int(3)));
    }

    #[test]
    fn test_ns_services_as_capacity() {
        let p = ns_services_point("dc1", 412, now());
        assert_eq!(p.measurement, Measurement::Capacity);
        assert_eq!(p.tag_value("usage_type"), Some(NS_SERVICES_USAGE_TYPE));
        assert_eq!(p.field_value("current_usage"), Some(FieldValue::Int(412)));
        assert_eq!(p.field_value("max_supported"), Some(FieldValue::Int(0)));
    }

    #[test]
    fn test_bgp_points_per_neighbor() {
        let router = LogicalRouter {
            id: "t0a".to_string(),
            display_name: "T0-A".to_string(),
            router_type: "TIER0".to_string(),
        };
        let list = BgpNeighborStatusList {
            results: vec![
                BgpNeighborStatus {
                    neighbor_address: "10.0.0.1".to_string(),
                    connection_state: "ESTABLISHED".to_string(),
                    total_in_prefix_count: 12,
                    ..Default::default()
                },
                BgpNeighborStatus {
                    neighbor_address: "10.0.0.2".to_string(),
                    connection_state: "IDLE".to_string(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        let points = bgp_neighbor_points("dc1", &router, &list, now());
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].field_value("established"), Some(FieldValue::Int(1)));
        assert_eq!(points[0].field_value("prefixes_in"), Some(FieldValue::Int(12)));
        assert_eq!(points[1].field_value("established"), Some(FieldValue::Int(0)));
        assert_eq!(points[1].tag_value("remote_as"), Some(MISSING));
    }

    #[test]
    fn test_lb_lookups() {
        let mut servers = HashMap::new();
        servers.insert(
            "vs1".to_string(),
            LbVirtualServer {
                id: "vs1".to_string(),
                display_name: "web".to_string(),
                ip_address: "192.0.2.10".to_string(),
                ports: vec!["80".to_string(), "443".to_string()],
                ip_protocol: "TCP".to_string(),
            },
        );

        let known = LbVirtualServerStatus {
            virtual_server_id: "vs1".to_string(),
            status: "UP".to_string(),
        };
        let p = lb_virtual_server_point("dc1", "svc1", &servers, &known, now());
        assert_eq!(p.tag_value("vs_name"), Some("web"));
        assert_eq!(p.tag_value("port"), Some("80,443"));
        assert_eq!(p.field_value("status"), Some(FieldValue::Int(1)));

        let unknown = LbVirtualServerStatus {
            virtual_server_id: "vs9".to_string(),
            status: "DOWN".to_string(),
        };
        let p = lb_virtual_server_point("dc1", "svc1", &servers, &unknown, now());
        assert_eq!(p.tag_value("vs_name"), Some(MISSING));
        assert_eq!(p.tag_value("ip_address"), Some(MISSING));
        assert_eq!(p.field_value("status"), Some(FieldValue::Int(0)));
    }

    #[test]
    fn test_lb_pool_member_counts() {
        let pool = LbPoolStatus {
            pool_id: "p1".to_string(),
            status: "PARTIALLY_UP".to_string(),
            members: ["UP", "DOWN", "UP", "DISABLED"]
                .iter()
                .map(|s| LbMemberStatus {
                    status: s.to_string(),
                    ..Default::default()
                })
                .collect(),
        };

        let p = lb_pool_point("dc1", "svc1", &HashMap::new(), &pool, now());
        assert_eq!(p.field_value("status"), Some(FieldValue::Int(0)));
        assert_eq!(p.field_value("members_total"), Some(FieldValue::Int(4)));
        assert_eq!(p.field_value("members_up"), Some(FieldValue::Int(2)));
        assert_eq!(p.field_value("members_down"), Some(FieldValue::Int(1)));
        assert_eq!(p.tag_value("pool_name"), Some(MISSING));
    }

    #[test]
    fn test_empty_ids_use_sentinel() {
        let status = TransportNodeStatus::default();
        let points = transport_node_points("dc1", &node("", "EdgeNode"), &status, now());
        assert!(points.iter().all(|p| p.tag_value("node_id") == Some(MISSING)));

        let alarm = alarm_point("dc1", &Alarm::default(), now());
        assert_eq!(alarm.tag_value("alarm_id"), Some(MISSING));

        let pool = LbPoolStatus::default();
        let p = lb_pool_point("", "", &HashMap::new(), &pool, now());
        assert_eq!(p.tag_value("service_id"), Some(MISSING));
        assert_eq!(p.tag_value("pool_id"), Some(MISSING));
    }

    #[test]
    fn test_edge_like_node_gets_resource_point() {
        let status = TransportNodeStatus::default();
        let points =
            transport_node_points("dc1", &node("g1", "PublicCloudGatewayEdge"), &status, now());
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].measurement, Measurement::EdgeResource);

        let points = transport_node_points("dc1", &node("h1", "HostNode"), &status, now());
        assert_eq!(points.len(), 1);
    }
}
