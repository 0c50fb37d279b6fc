//! Route table resources.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Route configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RouteConfiguration {
    /// Route table name. On sidecar proxies this is the upstream's envoy ID.
    pub name: String,

    pub virtual_hosts: Vec<VirtualHost>,
}

/// Virtual host.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct VirtualHost {
    pub name: String,
    pub domains: Vec<String>,
    pub routes: Vec<Route>,
}

/// Route definition.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Route {
    pub name: Option<String>,

    /// Match criteria, kept opaque.
    #[serde(rename = "match")]
    pub route_match: Option<serde_json::Value>,

    /// Forwarding action. Absent for redirects and direct responses.
    pub route: Option<RouteAction>,
}

/// Route action.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RouteAction {
    pub cluster: Option<String>,
    pub weighted_clusters: Option<WeightedCluster>,
}

/// Weighted cluster split, shared by route actions and TCP proxies.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct WeightedCluster {
    pub clusters: Vec<ClusterWeight>,
}

impl WeightedCluster {
    /// Non-empty cluster names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = String> + '_ {
        self.clusters
            .iter()
            .filter(|c| !c.name.is_empty())
            .map(|c| c.name.clone())
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ClusterWeight {
    pub name: String,
    pub weight: Option<u32>,
}

/// Every cluster name referenced by any route of any virtual host.
pub fn route_cluster_names(route: &RouteConfiguration) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    let actions = route
        .virtual_hosts
        .iter()
        .flat_map(|vh| vh.routes.iter())
        .filter_map(|r| r.route.as_ref());

    for action in actions {
        if let Some(cluster) = action.cluster.as_ref().filter(|c| !c.is_empty()) {
            names.insert(cluster.clone());
        }
        if let Some(weighted) = &action.weighted_clusters {
            names.extend(weighted.names());
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_route_cluster_names_across_virtual_hosts() {
        let route: RouteConfiguration = serde_json::from_value(json!({
            "name": "web",
            "virtual_hosts": [
                {
                    "name": "a",
                    "routes": [
                        { "match": { "prefix": "/api" }, "route": { "cluster": "api" } },
                        { "match": { "prefix": "/" }, "route": { "cluster": "api" } }
                    ]
                },
                {
                    "name": "b",
                    "routes": [
                        { "route": { "weighted_clusters": { "clusters": [{ "name": "canary" }, { "name": "stable" }] } } },
                        { "redirect": { "host_redirect": "example.com" } }
                    ]
                }
            ]
        }))
        .unwrap();

        let names: Vec<_> = route_cluster_names(&route).into_iter().collect();
        assert_eq!(names, vec!["api", "canary", "stable"]);
    }

    #[test]
    fn test_empty_route_has_no_clusters() {
        assert!(route_cluster_names(&RouteConfiguration::default()).is_empty());
    }
}
