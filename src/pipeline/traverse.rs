//! Walk a resource set and feed every resource to a validator.

use serde::{Deserialize, Serialize};

use crate::envoy::{Cluster, Listener, RouteConfiguration};
use crate::validate::Validate;

/// The resources generated for one proxy.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ResourceSet {
    pub listeners: Vec<Listener>,
    pub routes: Vec<RouteConfiguration>,
    pub clusters: Vec<Cluster>,
}

/// Counts of hook calls made by [`observe_all`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Observed {
    pub filters: usize,
    pub routes: usize,
    pub clusters: usize,
}

/// Call the matching observer hook for every filter, route, and cluster.
pub fn observe_all(resources: &ResourceSet, validator: &mut Validate) -> Observed {
    let mut observed = Observed::default();

    for listener in &resources.listeners {
        let filters = listener.filter_chains.iter().flat_map(|chain| chain.filters.iter());
        for filter in filters {
            let proceed = validator.on_filter_observed(filter);
            tracing::debug!(
                listener = listener.name.as_deref().unwrap_or(""),
                filter = %filter.name,
                proceed,
                "Filter visited"
            );
            observed.filters += 1;
        }
    }

    for route in &resources.routes {
        let proceed = validator.on_route_observed(route);
        tracing::debug!(route = %route.name, proceed, "Route visited");
        observed.routes += 1;
    }

    for cluster in &resources.clusters {
        let proceed = validator.on_cluster_observed(cluster);
        tracing::debug!(cluster = %cluster.name, proceed, "Cluster visited");
        observed.clusters += 1;
    }

    observed
}
