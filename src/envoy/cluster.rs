//! Cluster resources.
//!
//! # Responsibilities
//! - Model clusters and their discovery type
//! - Expose the discovery-type payload as a tagged union
//! - Count statically declared endpoints

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{TypedConfig, TypedMessage};

pub const AGGREGATE_CLUSTER_TYPE_URL: &str =
    "type.googleapis.com/envoy.extensions.clusters.aggregate.v3.ClusterConfig";

/// Upstream cluster.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Cluster {
    /// Cluster name. For mesh upstreams this is the SNI.
    pub name: String,

    /// Built-in discovery type. Ignored when `cluster_type` is set.
    #[serde(rename = "type")]
    pub discovery_type: Option<DiscoveryType>,

    /// Custom (extension) cluster type, e.g. an aggregate cluster.
    pub cluster_type: Option<CustomClusterType>,

    /// Present when endpoints are learned over EDS.
    pub eds_cluster_config: Option<EdsClusterConfig>,

    /// Inline endpoints for static and DNS clusters.
    pub load_assignment: Option<ClusterLoadAssignment>,

    pub connect_timeout: Option<String>,
}

impl Cluster {
    /// The cluster's discovery-type payload.
    pub fn discovery(&self) -> ClusterDiscovery<'_> {
        match &self.cluster_type {
            Some(custom) => ClusterDiscovery::Custom(custom),
            None => ClusterDiscovery::Type(self.discovery_type.unwrap_or_default()),
        }
    }

    /// Returns true if endpoints are only knowable from a live snapshot.
    pub fn uses_eds(&self) -> bool {
        self.eds_cluster_config.is_some()
            || matches!(self.discovery(), ClusterDiscovery::Type(DiscoveryType::Eds))
    }
}

/// The `cluster_discovery_type` one-of.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClusterDiscovery<'a> {
    Type(DiscoveryType),
    Custom(&'a CustomClusterType),
}

/// Built-in service discovery types.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscoveryType {
    #[default]
    Static,
    StrictDns,
    LogicalDns,
    Eds,
    OriginalDst,
}

/// Extension cluster type.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct CustomClusterType {
    /// Extension name, e.g. `envoy.clusters.aggregate`.
    pub name: String,

    pub typed_config: Option<TypedConfig>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct EdsClusterConfig {
    pub service_name: Option<String>,
    pub eds_config: Option<serde_json::Value>,
}

/// Aggregate cluster extension config.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct AggregateClusterConfig {
    /// Child cluster names, in priority order.
    pub clusters: Vec<String>,
}

impl TypedMessage for AggregateClusterConfig {
    const TYPE_URL: &'static str = AGGREGATE_CLUSTER_TYPE_URL;
}

/// Inline endpoint assignment.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ClusterLoadAssignment {
    pub cluster_name: String,

    /// Primary endpoint groups.
    pub endpoints: Vec<LocalityLbEndpoints>,

    /// Named endpoints, referenced by name from `lb_endpoints`.
    pub named_endpoints: BTreeMap<String, serde_json::Value>,
}

impl ClusterLoadAssignment {
    /// Number of declared endpoint entries: primary groups plus named
    /// endpoints.
    pub fn endpoint_count(&self) -> usize {
        self.endpoints.len() + self.named_endpoints.len()
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LocalityLbEndpoints {
    pub locality: Option<serde_json::Value>,
    pub lb_endpoints: Vec<serde_json::Value>,
    pub priority: Option<u32>,
}
