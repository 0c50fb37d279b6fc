//! Shared resource builders for integration tests.

#![allow(dead_code)]

use proxy_validate::envoy::{Cluster, Clusters, Filter, RouteConfiguration};
use proxy_validate::{ExtensionConfig, ResourceNode, Validate};
use serde_json::{json, Value};

pub const TCP_PROXY: &str =
    "type.googleapis.com/envoy.extensions.filters.network.tcp_proxy.v3.TcpProxy";
pub const HTTP_CONNECTION_MANAGER: &str =
    "type.googleapis.com/envoy.extensions.filters.network.http_connection_manager.v3.HttpConnectionManager";
pub const AGGREGATE_CLUSTER: &str =
    "type.googleapis.com/envoy.extensions.clusters.aggregate.v3.ClusterConfig";

/// A validator for proxy `envoy_id` with the given upstream SNIs.
pub fn validator(envoy_id: &str, snis: &[&str]) -> Validate {
    Validate::new(&ExtensionConfig::new(envoy_id, snis.iter().copied())).unwrap()
}

pub fn tcp_filter(cluster: &str) -> Filter {
    from_json(json!({
        "name": "envoy.filters.network.tcp_proxy",
        "typed_config": { "@type": TCP_PROXY, "cluster": cluster }
    }))
}

pub fn rds_filter(route_name: &str) -> Filter {
    from_json(json!({
        "name": "envoy.filters.network.http_connection_manager",
        "typed_config": {
            "@type": HTTP_CONNECTION_MANAGER,
            "rds": { "route_config_name": route_name }
        }
    }))
}

pub fn route(name: &str, clusters: &[&str]) -> RouteConfiguration {
    let routes: Vec<Value> = clusters
        .iter()
        .map(|c| json!({ "match": { "prefix": "/" }, "route": { "cluster": c } }))
        .collect();
    from_json(json!({
        "name": name,
        "virtual_hosts": [{ "name": name, "domains": ["*"], "routes": routes }]
    }))
}

/// Static cluster with `n` primary endpoint groups.
pub fn static_cluster(name: &str, n: usize) -> Cluster {
    let endpoints: Vec<Value> = (0..n)
        .map(|i| {
            json!({ "lb_endpoints": [{ "endpoint": { "address": {
                "socket_address": { "address": format!("10.0.0.{}", i + 1), "port_value": 8080 }
            } } }] })
        })
        .collect();
    from_json(json!({
        "name": name,
        "type": "STATIC",
        "load_assignment": { "cluster_name": name, "endpoints": endpoints }
    }))
}

pub fn eds_cluster(name: &str) -> Cluster {
    from_json(json!({
        "name": name,
        "type": "EDS",
        "eds_cluster_config": { "eds_config": { "ads": {}, "resource_api_version": "V3" } }
    }))
}

pub fn aggregate_cluster(name: &str, children: &[&str]) -> Cluster {
    from_json(json!({
        "name": name,
        "cluster_type": {
            "name": "envoy.clusters.aggregate",
            "typed_config": { "@type": AGGREGATE_CLUSTER, "clusters": children }
        }
    }))
}

/// Admin snapshot: `(cluster, [(health, failed_outlier_check)])`.
pub fn snapshot(clusters: &[(&str, &[(&str, bool)])]) -> Clusters {
    let statuses: Vec<Value> = clusters
        .iter()
        .map(|(name, hosts)| {
            let hosts: Vec<Value> = hosts
                .iter()
                .map(|(health, outlier)| {
                    json!({ "health_status": {
                        "eds_health_status": health,
                        "failed_outlier_check": outlier
                    } })
                })
                .collect();
            json!({ "name": name, "host_statuses": hosts })
        })
        .collect();
    from_json(json!({ "cluster_statuses": statuses }))
}

/// Fake evaluator reporting fixed healthy counts; unknown SNIs have no
/// load assignment.
pub fn fixed_health(
    counts: Vec<(&'static str, usize)>,
) -> impl Fn(&mut ResourceNode, &str, &Clusters) {
    move |node: &mut ResourceNode, sni: &str, _clusters: &Clusters| {
        let count = counts.iter().find(|(name, _)| *name == sni).map(|(_, c)| *c);
        node.load_assignment_seen = count.is_some();
        node.healthy_endpoint_count = count.unwrap_or(0);
    }
}

fn from_json<T: serde::de::DeserializeOwned>(value: Value) -> T {
    serde_json::from_value(value).unwrap()
}
