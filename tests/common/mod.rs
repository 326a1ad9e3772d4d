//! Common test utilities: an in-memory NSX Manager and a recording writer

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use nsx_collector::collector::Worker;
use nsx_collector::influx::{MetricPoint, PointWriter, WriteError};
use nsx_collector::metrics::CollectorMetrics;
use nsx_collector::nsx::models::*;
use nsx_collector::nsx::{ApiError, ApiResult, NsxApi};

// ============================================================================
// Fake NSX Manager
// ============================================================================

/// Canned NSX Manager responses
///
/// Per-item lookups that miss answer 404. Call names listed in `failing`
/// answer 503.
#[derive(Default)]
pub struct FakeNsx {
    pub cluster: ClusterStatus,
    pub nodes: Vec<TransportNode>,
    pub node_status: HashMap<String, TransportNodeStatus>,
    pub interfaces: HashMap<String, Vec<NetworkInterface>>,
    pub stats: HashMap<(String, String), InterfaceStats>,
    pub routers: Vec<LogicalRouter>,
    pub ports: Vec<LogicalRouterPort>,
    pub bgp: HashMap<String, BgpNeighborStatusList>,
    pub alarms: Vec<Alarm>,
    pub capacity: Vec<CapacityUsage>,
    pub ns_services: i64,
    pub lb_services: Vec<LbService>,
    pub lb_virtual_servers: Vec<LbVirtualServer>,
    pub lb_pools: Vec<LbPool>,
    pub lb_status: HashMap<String, LbServiceStatus>,

    /// Calls that fail with 503
    pub failing: HashSet<&'static str>,

    /// Delay applied to the cluster call, the first call of every cycle
    pub delay: Duration,

    calls: Mutex<Vec<String>>,
}

impl FakeNsx {
    pub fn fail(mut self, call: &'static str) -> Self {
        self.failing.insert(call);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Times `call` was made, item calls included
    pub fn calls(&self, call: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.as_str() == call)
            .count()
    }

    fn enter(&self, call: &'static str) -> ApiResult<()> {
        self.calls.lock().unwrap().push(call.to_string());
        if self.failing.contains(call) {
            return Err(ApiError::Status {
                status: 503,
                path: call.to_string(),
            });
        }
        Ok(())
    }

    fn lookup<T: Clone>(map: &HashMap<String, T>, key: &str, call: &str) -> ApiResult<T> {
        map.get(key).cloned().ok_or_else(|| ApiError::Status {
            status: 404,
            path: format!("{call}/{key}"),
        })
    }
}

#[async_trait]
impl NsxApi for FakeNsx {
    async fn cluster_status(&self) -> ApiResult<ClusterStatus> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.enter("cluster_status")?;
        Ok(self.cluster.clone())
    }

    async fn transport_nodes(&self) -> ApiResult<Vec<TransportNode>> {
        self.enter("transport_nodes")?;
        Ok(self.nodes.clone())
    }

    async fn transport_node_status(&self, node_id: &str) -> ApiResult<TransportNodeStatus> {
        self.enter("transport_node_status")?;
        Self::lookup(&self.node_status, node_id, "transport_node_status")
    }

    async fn node_interfaces(&self, node_id: &str) -> ApiResult<Vec<NetworkInterface>> {
        self.enter("node_interfaces")?;
        Self::lookup(&self.interfaces, node_id, "node_interfaces")
    }

    async fn interface_stats(
        &self,
        node_id: &str,
        interface_id: &str,
    ) -> ApiResult<InterfaceStats> {
        self.enter("interface_stats")?;
        self.stats
            .get(&(node_id.to_string(), interface_id.to_string()))
            .cloned()
            .ok_or_else(|| ApiError::Status {
                status: 404,
                path: format!("interface_stats/{node_id}/{interface_id}"),
            })
    }

    async fn logical_routers(&self) -> ApiResult<Vec<LogicalRouter>> {
        self.enter("logical_routers")?;
        Ok(self.routers.clone())
    }

    async fn logical_router_ports(&self) -> ApiResult<Vec<LogicalRouterPort>> {
        self.enter("logical_router_ports")?;
        Ok(self.ports.clone())
    }

    async fn bgp_neighbors(&self, router_id: &str) -> ApiResult<BgpNeighborStatusList> {
        self.enter("bgp_neighbors")?;
        Self::lookup(&self.bgp, router_id, "bgp_neighbors")
    }

    async fn open_alarms(&self) -> ApiResult<Vec<Alarm>> {
        self.enter("open_alarms")?;
        Ok(self.alarms.clone())
    }

    async fn capacity_usage(&self) -> ApiResult<Vec<CapacityUsage>> {
        self.enter("capacity_usage")?;
        Ok(self.capacity.clone())
    }

    async fn ns_services_count(&self) -> ApiResult<i64> {
        self.enter("ns_services_count")?;
        Ok(self.ns_services)
    }

    async fn lb_services(&self) -> ApiResult<Vec<LbService>> {
        self.enter("lb_services")?;
        Ok(self.lb_services.clone())
    }

    async fn lb_virtual_servers(&self) -> ApiResult<Vec<LbVirtualServer>> {
        self.enter("lb_virtual_servers")?;
        Ok(self.lb_virtual_servers.clone())
    }

    async fn lb_pools(&self) -> ApiResult<Vec<LbPool>> {
        self.enter("lb_pools")?;
        Ok(self.lb_pools.clone())
    }

    async fn lb_service_status(&self, service_id: &str) -> ApiResult<LbServiceStatus> {
        self.enter("lb_service_status")?;
        Self::lookup(&self.lb_status, service_id, "lb_service_status")
    }
}

// ============================================================================
// Recording writer
// ============================================================================

/// Keeps every batch it is handed
#[derive(Default)]
pub struct RecordingWriter {
    pub batches: Mutex<Vec<Vec<MetricPoint>>>,
    pub reject: bool,
}

impl RecordingWriter {
    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Default::default()
        }
    }

    pub fn batch_count(&self) -> usize {
        self.batches.lock().unwrap().len()
    }

    pub fn last_batch(&self) -> Vec<MetricPoint> {
        self.batches.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

#[async_trait]
impl PointWriter for RecordingWriter {
    async fn write_points(&self, points: &[MetricPoint]) -> Result<(), WriteError> {
        self.batches.lock().unwrap().push(points.to_vec());
        if self.reject {
            return Err(WriteError::Rejected {
                count: points.len(),
                status: 500,
                body: "internal error".to_string(),
            });
        }
        Ok(())
    }
}

// ============================================================================
// Fixtures
// ============================================================================

fn s(v: &str) -> String {
    v.to_string()
}

pub fn transport_node(id: &str, kind: &str) -> TransportNode {
    TransportNode {
        id: s(id),
        display_name: format!("{id}-name"),
        node_deployment_info: NodeDeploymentInfo {
            resource_type: s(kind),
            ..Default::default()
        },
        ..Default::default()
    }
}

pub fn node_up() -> TransportNodeStatus {
    TransportNodeStatus {
        status: s("UP"),
        mgmt_connection_status: s("UP"),
        pnic_status: CountedStatus {
            status: s("UP"),
            up_count: 2,
            down_count: 0,
        },
        ..Default::default()
    }
}

/// A small but complete site
///
/// Hosts n1..n3, edge e1 with one uplink and one management interface,
/// tier-0 t0a with tier-1 t1a below it, one open alarm, one capacity
/// entry and one load balancer service.
pub fn sample_site() -> FakeNsx {
    let mut nsx = FakeNsx {
        cluster: ClusterStatus {
            cluster_id: s("c-1"),
            mgmt_cluster_status: MgmtClusterStatus {
                status: s("STABLE"),
                online_nodes: vec![ClusterNode::default(); 3],
                offline_nodes: Vec::new(),
            },
            control_cluster_status: ControlClusterStatus { status: s("STABLE") },
            detailed_cluster_status: DetailedClusterStatus {
                overall_status: s("STABLE"),
            },
        },
        ns_services: 412,
        ..Default::default()
    };

    for id in ["n1", "n2", "n3"] {
        nsx.nodes.push(transport_node(id, "HostNode"));
        nsx.node_status.insert(s(id), node_up());
    }

    nsx.nodes.push(transport_node("e1", "EdgeNode"));
    nsx.node_status.insert(s("e1"), node_up());
    nsx.interfaces.insert(
        s("e1"),
        vec![
            NetworkInterface {
                interface_id: s("fp-eth0"),
                interface_type: s("PHYSICAL"),
                link_speed: 10000,
                ..Default::default()
            },
            NetworkInterface {
                interface_id: s("mgmt0"),
                interface_type: s("MANAGEMENT"),
                ..Default::default()
            },
        ],
    );
    nsx.stats.insert(
        (s("e1"), s("fp-eth0")),
        InterfaceStats {
            rx_bytes: 1_000,
            tx_bytes: 2_000,
            ..Default::default()
        },
    );

    nsx.routers = vec![
        LogicalRouter {
            id: s("t0a"),
            display_name: s("T0-A"),
            router_type: s("TIER0"),
        },
        LogicalRouter {
            id: s("t1a"),
            display_name: s("T1-A"),
            router_type: s("TIER1"),
        },
    ];
    nsx.ports = vec![
        LogicalRouterPort {
            id: s("pA"),
            logical_router_id: s("t0a"),
            resource_type: s("LogicalRouterLinkPortOnTIER0"),
            linked_port_id: String::new(),
        },
        LogicalRouterPort {
            id: s("pB"),
            logical_router_id: s("t1a"),
            resource_type: s("LogicalRouterLinkPortOnTIER1"),
            linked_port_id: s("pA"),
        },
    ];
    nsx.bgp.insert(
        s("t0a"),
        BgpNeighborStatusList {
            logical_router_id: s("t0a"),
            results: vec![BgpNeighborStatus {
                neighbor_address: s("192.0.2.1"),
                source_address: s("192.0.2.2"),
                remote_as_number: s("65001"),
                connection_state: s("ESTABLISHED"),
                total_in_prefix_count: 24,
                ..Default::default()
            }],
            ..Default::default()
        },
    );

    nsx.alarms = vec![Alarm {
        id: s("a1"),
        feature_name: s("edge_health"),
        event_type_display_name: s("Edge CPU Usage High"),
        severity: s("HIGH"),
        node_display_name: s("e1-name"),
        summary: s("CPU high"),
        ..Default::default()
    }];
    nsx.capacity = vec![CapacityUsage {
        usage_type: s("NUMBER_OF_LOGICAL_SWITCHES"),
        display_name: s("Logical Switches"),
        current_usage_count: 50,
        max_supported_count: 10_000,
        current_usage_percentage: 0.5,
    }];

    nsx.lb_services = vec![LbService {
        id: s("svc1"),
        display_name: s("lb-web"),
        size: s("SMALL"),
    }];
    nsx.lb_virtual_servers = vec![LbVirtualServer {
        id: s("vs1"),
        display_name: s("web-vip"),
        ip_address: s("198.51.100.10"),
        ports: vec![s("443")],
        ip_protocol: s("TCP"),
    }];
    nsx.lb_pools = vec![LbPool {
        id: s("pool1"),
        display_name: s("web-pool"),
    }];
    nsx.lb_status.insert(
        s("svc1"),
        LbServiceStatus {
            service_id: s("svc1"),
            service_status: s("UP"),
            virtual_servers: vec![LbVirtualServerStatus {
                virtual_server_id: s("vs1"),
                status: s("UP"),
            }],
            pools: vec![LbPoolStatus {
                pool_id: s("pool1"),
                status: s("UP"),
                members: vec![
                    LbMemberStatus {
                        ip_address: s("10.0.0.11"),
                        port: s("8443"),
                        status: s("UP"),
                    },
                    LbMemberStatus {
                        ip_address: s("10.0.0.12"),
                        port: s("8443"),
                        status: s("DOWN"),
                    },
                ],
            }],
        },
    );

    nsx
}

/// Worker wired to shared fakes and a fresh metrics registry
pub struct Harness {
    pub nsx: Arc<FakeNsx>,
    pub writer: Arc<RecordingWriter>,
    pub metrics: Arc<CollectorMetrics>,
    pub worker: Arc<Worker>,
}

impl Harness {
    pub fn new(site: &str, nsx: FakeNsx, writer: RecordingWriter, slow: Duration) -> Self {
        let nsx = Arc::new(nsx);
        let writer = Arc::new(writer);
        let metrics = Arc::new(CollectorMetrics::new().unwrap());
        let worker = Arc::new(Worker::new(
            site,
            nsx.clone(),
            writer.clone(),
            metrics.clone(),
            slow,
        ));
        Self {
            nsx,
            writer,
            metrics,
            worker,
        }
    }
}

/// Points of one measurement
pub fn of<'a>(points: &'a [MetricPoint], measurement: &str) -> Vec<&'a MetricPoint> {
    points
        .iter()
        .filter(|p| p.measurement.as_str() == measurement)
        .collect()
}
