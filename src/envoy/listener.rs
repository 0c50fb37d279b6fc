//! Listener and network filter resources.
//!
//! # Responsibilities
//! - Model listeners, filter chains, and network filters
//! - Decode the HTTP connection manager and TCP proxy filter configs
//! - Extract the cluster names a filter routes to directly

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::route::{route_cluster_names, RouteConfiguration, WeightedCluster};
use super::{TypedConfig, TypedMessage};

pub const HTTP_CONNECTION_MANAGER_TYPE_URL: &str =
    "type.googleapis.com/envoy.extensions.filters.network.http_connection_manager.v3.HttpConnectionManager";

pub const TCP_PROXY_TYPE_URL: &str =
    "type.googleapis.com/envoy.extensions.filters.network.tcp_proxy.v3.TcpProxy";

/// Listener configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Listener {
    /// Listener name.
    pub name: Option<String>,

    /// Filter chains.
    pub filter_chains: Vec<FilterChain>,
}

/// Filter chain configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct FilterChain {
    pub name: Option<String>,
    pub filters: Vec<Filter>,
}

/// Network filter.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Filter {
    /// Filter name, e.g. `envoy.filters.network.tcp_proxy`.
    pub name: String,

    /// Typed config.
    pub typed_config: Option<TypedConfig>,
}

impl Filter {
    /// Decode this filter as an HTTP connection manager, if it is one.
    pub fn http_connection_manager(&self) -> Option<HttpConnectionManager> {
        self.typed_config.as_ref()?.decode()
    }

    /// Decode this filter as a TCP proxy, if it is one.
    pub fn tcp_proxy(&self) -> Option<TcpProxy> {
        self.typed_config.as_ref()?.decode()
    }
}

/// HTTP connection manager configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct HttpConnectionManager {
    pub stat_prefix: Option<String>,

    /// Dynamic route discovery. Mutually exclusive with `route_config`.
    pub rds: Option<Rds>,

    /// Inline route table.
    pub route_config: Option<RouteConfiguration>,
}

impl TypedMessage for HttpConnectionManager {
    const TYPE_URL: &'static str = HTTP_CONNECTION_MANAGER_TYPE_URL;
}

/// RDS reference.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Rds {
    /// Name of the route table to fetch.
    pub route_config_name: String,

    pub config_source: Option<serde_json::Value>,
}

/// TCP proxy configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TcpProxy {
    pub stat_prefix: Option<String>,

    /// Single upstream cluster.
    pub cluster: Option<String>,

    /// Weighted upstream clusters.
    pub weighted_clusters: Option<WeightedCluster>,
}

impl TypedMessage for TcpProxy {
    const TYPE_URL: &'static str = TCP_PROXY_TYPE_URL;
}

/// Cluster names directly referenced by a network filter.
///
/// Covers the HTTP connection manager with an inline route table and the
/// TCP proxy; any other filter references no clusters.
pub fn filter_cluster_names(filter: &Filter) -> BTreeSet<String> {
    if let Some(hcm) = filter.http_connection_manager() {
        return hcm
            .route_config
            .as_ref()
            .map(route_cluster_names)
            .unwrap_or_default();
    }

    let mut names = BTreeSet::new();
    if let Some(tcp) = filter.tcp_proxy() {
        if let Some(cluster) = tcp.cluster.filter(|c| !c.is_empty()) {
            names.insert(cluster);
        }
        if let Some(weighted) = tcp.weighted_clusters {
            names.extend(weighted.names());
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn filter(value: serde_json::Value) -> Filter {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_tcp_proxy_cluster_names() {
        let f = filter(json!({
            "name": "envoy.filters.network.tcp_proxy",
            "typed_config": {
                "@type": TCP_PROXY_TYPE_URL,
                "stat_prefix": "upstream.db",
                "cluster": "db.default.dc1"
            }
        }));
        let names: Vec<_> = filter_cluster_names(&f).into_iter().collect();
        assert_eq!(names, vec!["db.default.dc1"]);
    }

    #[test]
    fn test_tcp_proxy_weighted_cluster_names() {
        let f = filter(json!({
            "name": "envoy.filters.network.tcp_proxy",
            "typed_config": {
                "@type": TCP_PROXY_TYPE_URL,
                "weighted_clusters": {
                    "clusters": [
                        { "name": "v2", "weight": 10 },
                        { "name": "v1", "weight": 90 }
                    ]
                }
            }
        }));
        let names: Vec<_> = filter_cluster_names(&f).into_iter().collect();
        assert_eq!(names, vec!["v1", "v2"]);
    }

    #[test]
    fn test_http_inline_route_cluster_names() {
        let f = filter(json!({
            "name": "envoy.filters.network.http_connection_manager",
            "typed_config": {
                "@type": HTTP_CONNECTION_MANAGER_TYPE_URL,
                "route_config": {
                    "name": "web",
                    "virtual_hosts": [{
                        "name": "web",
                        "domains": ["*"],
                        "routes": [{ "match": { "prefix": "/" }, "route": { "cluster": "web.default" } }]
                    }]
                }
            }
        }));
        assert!(f.http_connection_manager().unwrap().rds.is_none());
        let names: Vec<_> = filter_cluster_names(&f).into_iter().collect();
        assert_eq!(names, vec!["web.default"]);
    }

    #[test]
    fn test_rds_filter_has_no_direct_clusters() {
        let f = filter(json!({
            "name": "envoy.filters.network.http_connection_manager",
            "typed_config": {
                "@type": HTTP_CONNECTION_MANAGER_TYPE_URL,
                "rds": { "route_config_name": "web" }
            }
        }));
        assert!(f.http_connection_manager().unwrap().rds.is_some());
        assert!(filter_cluster_names(&f).is_empty());
    }

    #[test]
    fn test_unknown_filter_has_no_clusters() {
        let f = filter(json!({
            "name": "envoy.filters.network.rbac",
            "typed_config": { "@type": "type.googleapis.com/envoy.extensions.filters.network.rbac.v3.RBAC" }
        }));
        assert!(filter_cluster_names(&f).is_empty());
    }
}
