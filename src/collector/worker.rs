//! Per-manager collection pipeline
//!
//! A [`Worker`] owns one NSX Manager for the life of the process. Each call
//! to [`Worker::collect`] runs one cycle:
//!
//! 1. fix the cycle timestamp and decide whether the slow tier is due
//! 2. fast tier: cluster, transport nodes (+ edge uplinks), routers, BGP
//! 3. slow tier when due: alarms, capacity, NS services, load balancers
//! 4. hand the whole batch to the writer in one call
//!
//! Every fetch is isolated. A failed call is logged, counted and reported,
//! its points are left out, and the cycle moves on. Only the write decides
//! whether the batch lands.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::influx::mapper;
use crate::influx::{MetricPoint, PointWriter};
use crate::metrics::MetricsSink;
use crate::nsx::models::{LbPool, LbVirtualServer, LogicalRouter, TransportNode};
use crate::nsx::{ApiError, NsxApi};
use crate::topology::TopologyIndex;

use super::report::{CycleReport, Domain, DomainFailure, WriteOutcome};

/// Collection pipeline bound to one manager
pub struct Worker {
    site: String,
    api: Arc<dyn NsxApi>,
    writer: Arc<dyn PointWriter>,
    metrics: Arc<dyn MetricsSink>,
    slow_interval: Duration,

    /// Last slow-tier run. Held for the whole cycle, so a failed
    /// `try_lock` means a cycle is in flight.
    last_slow_run: Mutex<Option<Instant>>,
}

/// Accumulator for one cycle
struct Cycle<'a> {
    site: &'a str,
    metrics: &'a dyn MetricsSink,
    now: DateTime<Utc>,
    points: Vec<MetricPoint>,
    failures: Vec<DomainFailure>,
}

impl Cycle<'_> {
    fn fail(&mut self, domain: Domain, item: Option<&str>, error: ApiError) {
        tracing::warn!(
            site = self.site,
            domain = domain.as_str(),
            item = item.unwrap_or("-"),
            error = %error,
            "Fetch failed"
        );
        self.metrics.record_error(self.site, domain.as_str());
        self.failures.push(DomainFailure {
            domain,
            item: item.map(str::to_string),
            error,
        });
    }
}

impl Worker {
    /// Create a worker; the first cycle always includes the slow tier
    pub fn new(
        site: impl Into<String>,
        api: Arc<dyn NsxApi>,
        writer: Arc<dyn PointWriter>,
        metrics: Arc<dyn MetricsSink>,
        slow_interval: Duration,
    ) -> Self {
        Self {
            site: site.into(),
            api,
            writer,
            metrics,
            slow_interval,
            last_slow_run: Mutex::new(None),
        }
    }

    pub fn site(&self) -> &str {
        &self.site
    }

    /// Run one collection cycle
    ///
    /// Returns a skipped report without doing anything if a cycle of this
    /// worker is already running. Never fails; problems are in the report.
    pub async fn collect(&self) -> CycleReport {
        let now = Utc::now();
        let Ok(mut last_slow_run) = self.last_slow_run.try_lock() else {
            tracing::warn!(site = %self.site, "Previous cycle still running, skipping");
            return CycleReport::skipped(self.site.clone(), now);
        };

        let started = Instant::now();
        let slow_tier = match *last_slow_run {
            None => true,
            Some(last) => started.duration_since(last) >= self.slow_interval,
        };
        if slow_tier {
            *last_slow_run = Some(started);
        }

        let mut cycle = Cycle {
            site: &self.site,
            metrics: self.metrics.as_ref(),
            now,
            points: Vec::new(),
            failures: Vec::new(),
        };

        self.collect_cluster(&mut cycle).await;
        self.collect_transport_nodes(&mut cycle).await;
        self.collect_routing(&mut cycle).await;

        if slow_tier {
            self.collect_alarms(&mut cycle).await;
            self.collect_capacity(&mut cycle).await;
            self.collect_load_balancers(&mut cycle).await;
        }

        let Cycle {
            points, failures, ..
        } = cycle;
        let write = self.write(&points).await;

        let elapsed = started.elapsed();
        self.metrics.record_cycle(&self.site, elapsed);
        tracing::debug!(
            site = %self.site,
            elapsed_ms = elapsed.as_millis() as u64,
            slow_tier,
            failures = failures.len(),
            "Collection cycle complete"
        );

        CycleReport {
            site: self.site.clone(),
            timestamp: now,
            skipped: false,
            slow_tier,
            points,
            failures,
            write,
        }
    }

    async fn write(&self, points: &[MetricPoint]) -> WriteOutcome {
        match self.writer.write_points(points).await {
            Ok(()) => {
                self.metrics.record_points_written(&self.site, points.len());
                tracing::info!(site = %self.site, count = points.len(), "Points written");
                WriteOutcome::Written(points.len())
            }
            Err(e) => {
                tracing::error!(site = %self.site, error = %e, "Write failed");
                self.metrics
                    .record_error(&self.site, Domain::Write.as_str());
                WriteOutcome::Failed(e)
            }
        }
    }

    // ========================================================================
    // Fast tier
    // ========================================================================

    async fn collect_cluster(&self, cycle: &mut Cycle<'_>) {
        match self.api.cluster_status().await {
            Ok(cs) => cycle
                .points
                .push(mapper::cluster_point(cycle.site, &cs, cycle.now)),
            Err(e) => cycle.fail(Domain::Cluster, None, e),
        }
    }

    async fn collect_transport_nodes(&self, cycle: &mut Cycle<'_>) {
        let nodes = match self.api.transport_nodes().await {
            Ok(nodes) => nodes,
            Err(e) => return cycle.fail(Domain::TransportNodes, None, e),
        };

        for node in &nodes {
            let status = match self.api.transport_node_status(&node.id).await {
                Ok(status) => status,
                Err(e) => {
                    cycle.fail(Domain::TransportNodeStatus, Some(&node.id), e);
                    continue;
                }
            };
            cycle.points.extend(mapper::transport_node_points(
                cycle.site, node, &status, cycle.now,
            ));

            if mapper::is_edge_node_type(mapper::node_type(node)) {
                self.collect_edge_uplinks(cycle, node).await;
            }
        }

        tracing::debug!(site = cycle.site, count = nodes.len(), "Transport nodes collected");
    }

    async fn collect_edge_uplinks(&self, cycle: &mut Cycle<'_>, node: &TransportNode) {
        let interfaces = match self.api.node_interfaces(&node.id).await {
            Ok(interfaces) => interfaces,
            Err(e) => return cycle.fail(Domain::EdgeInterfaces, Some(&node.id), e),
        };

        let mut uplinks = 0;
        for iface in interfaces.iter().filter(|i| mapper::is_edge_uplink_interface(i)) {
            uplinks += 1;
            match self.api.interface_stats(&node.id, &iface.interface_id).await {
                Ok(stats) => cycle.points.push(mapper::edge_uplink_point(
                    cycle.site, node, iface, &stats, cycle.now,
                )),
                Err(e) => {
                    let item = format!("{}/{}", node.id, iface.interface_id);
                    cycle.fail(Domain::EdgeInterfaceStats, Some(&item), e);
                }
            }
        }

        tracing::debug!(
            site = cycle.site,
            node = %node.id,
            interfaces = interfaces.len(),
            uplinks,
            "Edge interfaces evaluated"
        );
    }

    async fn collect_routing(&self, cycle: &mut Cycle<'_>) {
        let routers = match self.api.logical_routers().await {
            Ok(routers) => routers,
            Err(e) => return cycle.fail(Domain::LogicalRouters, None, e),
        };

        let topology = match self.api.logical_router_ports().await {
            Ok(ports) => TopologyIndex::resolve(&routers, &ports),
            Err(e) => {
                cycle.fail(Domain::LogicalRouterPorts, None, e);
                TopologyIndex::empty()
            }
        };

        for router in &routers {
            cycle.points.push(mapper::logical_router_point(
                cycle.site,
                &topology.parent_tag(router),
                router,
                cycle.now,
            ));
        }
        tracing::debug!(
            site = cycle.site,
            count = routers.len(),
            resolved_parents = topology.len(),
            "Logical routers collected"
        );

        self.collect_bgp(cycle, &routers).await;
    }

    async fn collect_bgp(&self, cycle: &mut Cycle<'_>, routers: &[LogicalRouter]) {
        for router in routers.iter().filter(|r| r.runs_bgp()) {
            match self.api.bgp_neighbors(&router.id).await {
                Ok(list) => cycle.points.extend(mapper::bgp_neighbor_points(
                    cycle.site, router, &list, cycle.now,
                )),
                Err(e) => cycle.fail(Domain::BgpNeighbors, Some(&router.id), e),
            }
        }
    }

    // ========================================================================
    // Slow tier
    // ========================================================================

    async fn collect_alarms(&self, cycle: &mut Cycle<'_>) {
        let (site, now) = (cycle.site, cycle.now);
        match self.api.open_alarms().await {
            Ok(alarms) => {
                cycle
                    .points
                    .extend(alarms.iter().map(|a| mapper::alarm_point(site, a, now)));
                tracing::debug!(site, count = alarms.len(), "Alarms collected");
            }
            Err(e) => cycle.fail(Domain::Alarms, None, e),
        }
    }

    async fn collect_capacity(&self, cycle: &mut Cycle<'_>) {
        let (site, now) = (cycle.site, cycle.now);
        match self.api.capacity_usage().await {
            Ok(items) => cycle
                .points
                .extend(items.iter().map(|c| mapper::capacity_point(site, c, now))),
            Err(e) => cycle.fail(Domain::Capacity, None, e),
        }

        match self.api.ns_services_count().await {
            Ok(count) => cycle.points.push(mapper::ns_services_point(site, count, now)),
            Err(e) => cycle.fail(Domain::NsServices, None, e),
        }
    }

    async fn collect_load_balancers(&self, cycle: &mut Cycle<'_>) {
        let services = match self.api.lb_services().await {
            Ok(services) => services,
            Err(e) => return cycle.fail(Domain::LbServices, None, e),
        };
        if services.is_empty() {
            return;
        }

        let servers: HashMap<String, LbVirtualServer> = match self.api.lb_virtual_servers().await
        {
            Ok(list) => list.into_iter().map(|vs| (vs.id.clone(), vs)).collect(),
            Err(e) => {
                cycle.fail(Domain::LbVirtualServers, None, e);
                HashMap::new()
            }
        };
        let pools: HashMap<String, LbPool> = match self.api.lb_pools().await {
            Ok(list) => list.into_iter().map(|p| (p.id.clone(), p)).collect(),
            Err(e) => {
                cycle.fail(Domain::LbPools, None, e);
                HashMap::new()
            }
        };

        for svc in &services {
            let status = match self.api.lb_service_status(&svc.id).await {
                Ok(status) => status,
                Err(e) => {
                    cycle.fail(Domain::LbServiceStatus, Some(&svc.id), e);
                    continue;
                }
            };

            cycle
                .points
                .push(mapper::lb_service_point(cycle.site, svc, &status, cycle.now));
            for vs in &status.virtual_servers {
                cycle.points.push(mapper::lb_virtual_server_point(
                    cycle.site, &svc.id, &servers, vs, cycle.now,
                ));
            }
            for pool in &status.pools {
                cycle.points.push(mapper::lb_pool_point(
                    cycle.site, &svc.id, &pools, pool, cycle.now,
                ));
            }
        }

        tracing::debug!(site = cycle.site, services = services.len(), "Load balancers collected");
    }
}
