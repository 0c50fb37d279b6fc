//! Validation state for one proxy.
//!
//! # Invariants
//! - `required` is monotonic: once set it is never cleared
//! - A node has at most one parent; children name their parent by SNI
//! - `aggregate_children` is only populated on aggregate nodes

use std::collections::{BTreeMap, BTreeSet};

use crate::config::validation::{validate_extension, ConstructionError};
use crate::config::ExtensionConfig;

/// Everything the validator has learned about one SNI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceNode {
    /// Referenced by the listener, the route, or a required aggregate.
    pub required: bool,
    /// A cluster resource with this name has been observed.
    pub cluster_seen: bool,
    pub is_aggregate: bool,
    /// Child SNIs in declaration order, without duplicates.
    pub aggregate_children: Vec<String>,
    /// Set when this node is a child of an aggregate cluster.
    pub parent_sni: Option<String>,
    /// Endpoints are learned over EDS, so only a live snapshot can count them.
    pub uses_eds: bool,
    pub load_assignment_seen: bool,
    pub healthy_endpoint_count: usize,
}

impl ResourceNode {
    /// Root nodes are validated directly; children through their aggregate.
    pub fn is_root(&self) -> bool {
        self.parent_sni.is_none()
    }
}

/// Validation state for a single proxy.
#[derive(Debug, Clone)]
pub struct Validate {
    /// Route table name belonging to this proxy.
    pub(crate) envoy_id: String,
    /// Every upstream SNI declared for this proxy.
    pub(crate) snis: BTreeSet<String>,
    pub(crate) listener: bool,
    pub(crate) uses_rds: bool,
    pub(crate) route: bool,
    pub(crate) resources: BTreeMap<String, ResourceNode>,
}

impl Validate {
    /// Create a validator from its extension configuration.
    pub fn new(ext: &ExtensionConfig) -> Result<Self, ConstructionError> {
        let envoy_id = validate_extension(ext)?;

        tracing::debug!(
            envoy_id = %envoy_id,
            upstreams = ext.upstream_snis.len(),
            "Validator created"
        );

        Ok(Self {
            envoy_id,
            snis: ext.upstream_snis.clone(),
            listener: false,
            uses_rds: false,
            route: false,
            resources: BTreeMap::new(),
        })
    }

    pub fn envoy_id(&self) -> &str {
        &self.envoy_id
    }

    pub fn listener_seen(&self) -> bool {
        self.listener
    }

    pub fn uses_rds(&self) -> bool {
        self.uses_rds
    }

    pub fn route_seen(&self) -> bool {
        self.route
    }

    /// Look up the node for an SNI.
    pub fn resource(&self, sni: &str) -> Option<&ResourceNode> {
        self.resources.get(sni)
    }

    /// All nodes, sorted by SNI.
    pub fn resources(&self) -> impl Iterator<Item = (&str, &ResourceNode)> {
        self.resources.iter().map(|(sni, node)| (sni.as_str(), node))
    }

    /// Find or create the node for an SNI.
    pub(crate) fn node_mut(&mut self, sni: &str) -> &mut ResourceNode {
        self.resources.entry(sni.to_string()).or_default()
    }
}
