//! Aggregate cluster detection.

use crate::envoy::{AggregateClusterConfig, ClusterDiscovery};

/// Decode a cluster's discovery-type payload as an aggregate cluster.
///
/// Returns the child cluster names in declaration order. Built-in discovery
/// types, other extensions, payloads that fail to decode, and aggregates
/// with no children are all "not aggregate".
pub fn decode_as_aggregate(discovery: &ClusterDiscovery<'_>) -> Option<Vec<String>> {
    let custom = match discovery {
        ClusterDiscovery::Custom(custom) => custom,
        ClusterDiscovery::Type(_) => return None,
    };

    let config: AggregateClusterConfig = custom.typed_config.as_ref()?.decode()?;
    if config.clusters.is_empty() {
        return None;
    }
    Some(config.clusters)
}
