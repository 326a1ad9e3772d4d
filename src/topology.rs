//! Tier-1 to tier-0 topology resolution
//!
//! NSX does not list a tier-1 router's parent directly. The link is
//! recovered from router ports: the tier-1 side of a router link port
//! points at its peer port, and the peer port belongs to the tier-0.

use std::collections::HashMap;

use crate::nsx::models::{LogicalRouter, LogicalRouterPort};

/// Resource type of the child-side (tier-1) router link port
pub const CHILD_LINK_PORT_TYPE: &str = "LogicalRouterLinkPortOnTIER1";

/// Tag value for tier-1 routers whose parent could not be resolved
pub const UNRESOLVED_PARENT: &str = "N/A";

/// Child router id to parent router display name, valid for one cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopologyIndex {
    parents: HashMap<String, String>,
}

impl TopologyIndex {
    /// An index that resolves nothing
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the index from full router and port listings
    pub fn resolve(routers: &[LogicalRouter], ports: &[LogicalRouterPort]) -> Self {
        let router_names: HashMap<&str, &str> = routers
            .iter()
            .map(|r| (r.id.as_str(), r.display_name.as_str()))
            .collect();

        let port_owners: HashMap<&str, &str> = ports
            .iter()
            .map(|p| (p.id.as_str(), p.logical_router_id.as_str()))
            .collect();

        let mut parents = HashMap::new();
        for port in ports {
            if port.resource_type != CHILD_LINK_PORT_TYPE || port.linked_port_id.is_empty() {
                continue;
            }
            let Some(parent_id) = port_owners.get(port.linked_port_id.as_str()) else {
                continue;
            };
            if let Some(name) = router_names.get(parent_id) {
                parents.insert(port.logical_router_id.clone(), (*name).to_string());
            }
        }

        Self { parents }
    }

    /// Parent display name of a child router, if resolved
    pub fn parent_of(&self, router_id: &str) -> Option<&str> {
        self.parents.get(router_id).map(String::as_str)
    }

    /// Value of the `parent_t0` tag for a router
    ///
    /// Unresolved tier-1 routers get [`UNRESOLVED_PARENT`]; other kinds
    /// without a parent get an empty string.
    pub fn parent_tag(&self, router: &LogicalRouter) -> String {
        match self.parent_of(&router.id) {
            Some(name) => name.to_string(),
            None if router.router_type == "TIER1" => UNRESOLVED_PARENT.to_string(),
            None => String::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
}
