//! Authenticated HTTPS client for one NSX Manager
//!
//! Every call is a GET with basic auth and `Accept: application/json`,
//! bounded by the client-wide request timeout. Listings follow the
//! `cursor` field until the manager returns an empty cursor or an empty
//! page. Nothing is retried here; the next collection cycle is the retry.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

use crate::config::Manager;

use super::api::{ApiResult, NsxApi};
use super::error::ApiError;
use super::models::{
    Alarm, BgpNeighborStatusList, CapacityUsage, CapacityUsageResponse, ClusterStatus,
    InterfaceStats, LbPool, LbService, LbServiceStatus, LbVirtualServer, LogicalRouter,
    LogicalRouterPort, NetworkInterface, NetworkInterfaceList, Page, ResultCount, TransportNode,
    TransportNodeStatus,
};

/// Default number of results requested per page
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// HTTPS client bound to a single NSX Manager
pub struct NsxClient {
    /// HTTP client with configured timeout and TLS policy
    http: Client,

    /// Manager base URL, e.g. `https://nsx-dc1.example.com`
    base_url: Url,

    username: String,
    password: String,

    /// Results requested per listing page
    page_size: u32,
}

impl NsxClient {
    /// Create a client for the given manager
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidUrl` if the manager URL does not parse and
    /// `ApiError::Http` if the HTTP client cannot be built
    pub fn new(manager: &Manager, timeout: Duration) -> Result<Self, ApiError> {
        Self::with_page_size(manager, timeout, DEFAULT_PAGE_SIZE)
    }

    /// Create a client with an explicit page size
    ///
    /// # Errors
    ///
    /// Same as [`NsxClient::new`]
    pub fn with_page_size(
        manager: &Manager,
        timeout: Duration,
        page_size: u32,
    ) -> Result<Self, ApiError> {
        let base_url = Url::parse(manager.url.trim_end_matches('/'))
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {e}", manager.url)))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .danger_accept_invalid_certs(manager.tls_skip_verify)
            .user_agent(concat!("nsx-collector/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            username: manager.username.clone(),
            password: manager.password.clone(),
            page_size: page_size.max(1),
        })
    }

    /// Base URL this client talks to
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Absolute URL for an API `path`, keeping any prefix of the base URL
    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}{path}"))
            .map_err(|e| ApiError::InvalidUrl(format!("{path}: {e}")))
    }

    /// GET `path` with optional query pairs and decode the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> ApiResult<T> {
        let mut url = self.endpoint(path)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        let response = self
            .http
            .get(url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
            .map_err(|e| classify_transport(e, path))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ApiError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| classify_transport(e, path))?;

        serde_json::from_slice(&bytes).map_err(|source| ApiError::Decode {
            path: path.to_string(),
            source,
        })
    }

    /// Walk every page of a cursor-paginated listing
    async fn get_all<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> ApiResult<Vec<T>> {
        let page_size = self.page_size.to_string();
        let mut all = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut params: Vec<(&str, &str)> = query.to_vec();
            params.push(("page_size", page_size.as_str()));
            if let Some(c) = cursor.as_deref() {
                params.push(("cursor", c));
            }

            let page: Page<T> = self.get_json(path, &params).await?;
            let next = page.next_cursor().map(str::to_string);
            all.extend(page.results);

            match next {
                Some(c) => cursor = Some(c),
                None => break,
            }
        }

        Ok(all)
    }
}

fn classify_transport(err: reqwest::Error, path: &str) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout {
            path: path.to_string(),
        }
    } else {
        ApiError::Http(err)
    }
}

#[async_trait]
impl NsxApi for NsxClient {
    async fn cluster_status(&self) -> ApiResult<ClusterStatus> {
        self.get_json("/api/v1/cluster/status", &[]).await
    }

    async fn transport_nodes(&self) -> ApiResult<Vec<TransportNode>> {
        self.get_all("/api/v1/transport-nodes", &[]).await
    }

    async fn transport_node_status(&self, node_id: &str) -> ApiResult<TransportNodeStatus> {
        let path = format!("/api/v1/transport-nodes/{node_id}/status");
        self.get_json(&path, &[]).await
    }

    async fn node_interfaces(&self, node_id: &str) -> ApiResult<Vec<NetworkInterface>> {
        let path = format!("/api/v1/transport-nodes/{node_id}/network/interfaces");
        let list: NetworkInterfaceList = self.get_json(&path, &[]).await?;
        Ok(list.results)
    }

    async fn interface_stats(
        &self,
        node_id: &str,
        interface_id: &str,
    ) -> ApiResult<InterfaceStats> {
        let path =
            format!("/api/v1/transport-nodes/{node_id}/network/interfaces/{interface_id}/stats");
        self.get_json(&path, &[]).await
    }

    async fn logical_routers(&self) -> ApiResult<Vec<LogicalRouter>> {
        self.get_all("/api/v1/logical-routers", &[]).await
    }

    async fn logical_router_ports(&self) -> ApiResult<Vec<LogicalRouterPort>> {
        self.get_all("/api/v1/logical-router-ports", &[]).await
    }

    async fn bgp_neighbors(&self, router_id: &str) -> ApiResult<BgpNeighborStatusList> {
        let path = format!("/api/v1/logical-routers/{router_id}/routing/bgp/neighbors/status");
        self.get_json(&path, &[("source", "realtime")]).await
    }

    async fn open_alarms(&self) -> ApiResult<Vec<Alarm>> {
        self.get_all("/api/v1/alarms", &[("status", "OPEN")]).await
    }

    async fn capacity_usage(&self) -> ApiResult<Vec<CapacityUsage>> {
        let response: CapacityUsageResponse =
            self.get_json("/api/v1/capacity/usage", &[]).await?;
        Ok(response.capacity_usage)
    }

    async fn ns_services_count(&self) -> ApiResult<i64> {
        let count: ResultCount = self
            .get_json("/api/v1/ns-services", &[("page_size", "1")])
            .await?;
        Ok(count.result_count)
    }

    async fn lb_services(&self) -> ApiResult<Vec<LbService>> {
        self.get_all("/api/v1/loadbalancer/services", &[]).await
    }

    async fn lb_virtual_servers(&self) -> ApiResult<Vec<LbVirtualServer>> {
        self.get_all("/api/v1/loadbalancer/virtual-servers", &[])
            .await
    }

    async fn lb_pools(&self) -> ApiResult<Vec<LbPool>> {
        self.get_all("/api/v1/loadbalancer/pools", &[]).await
    }

    async fn lb_service_status(&self, service_id: &str) -> ApiResult<LbServiceStatus> {
        let path = format!("/api/v1/loadbalancer/services/{service_id}/status");
        self.get_json(&path, &[]).await
    }
}
