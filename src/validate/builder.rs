//! Observer hooks that build the resource graph.
//!
//! # Responsibilities
//! - Record that the listener and route exist
//! - Mark clusters referenced by the listener or route as required
//! - Record cluster kind: aggregate (with children), EDS, or static
//!
//! Hooks may be called in any order. The boolean they return tells the
//! traversal whether to keep processing the same resource downstream.

use crate::config::ExtensionConfig;
use crate::envoy::{filter_cluster_names, route_cluster_names, Cluster, Filter, RouteConfiguration};
use crate::validate::aggregate::decode_as_aggregate;
use crate::validate::state::Validate;

impl Validate {
    /// The validator applies to every proxy.
    pub fn can_apply(&self, _ext: &ExtensionConfig) -> bool {
        true
    }

    /// Observe a listener network filter.
    pub fn on_filter_observed(&mut self, filter: &Filter) -> bool {
        // Any filter at all means the listener exists.
        self.listener = true;

        if let Some(hcm) = filter.http_connection_manager() {
            if hcm.rds.is_some() {
                tracing::debug!(filter = %filter.name, "Filter uses RDS");
                self.uses_rds = true;
                return true;
            }
        }

        for sni in filter_cluster_names(filter) {
            tracing::debug!(filter = %filter.name, sni = %sni, "Cluster required by filter");
            self.node_mut(&sni).required = true;
        }
        true
    }

    /// Observe a route table. Only the proxy's own table counts.
    pub fn on_route_observed(&mut self, route: &RouteConfiguration) -> bool {
        if route.name != self.envoy_id {
            tracing::trace!(route = %route.name, "Ignoring route for another proxy");
            return false;
        }

        self.route = true;
        for sni in route_cluster_names(route) {
            tracing::debug!(route = %route.name, sni = %sni, "Cluster required by route");
            self.node_mut(&sni).required = true;
        }
        false
    }

    /// Observe a cluster.
    pub fn on_cluster_observed(&mut self, cluster: &Cluster) -> bool {
        let parent = cluster.name.as_str();
        self.node_mut(parent).cluster_seen = true;

        if let Some(children) = decode_as_aggregate(&cluster.discovery()) {
            self.observe_aggregate(parent, children);
            return false;
        }

        let node = self.node_mut(parent);
        if cluster.uses_eds() {
            node.uses_eds = true;
        } else if let Some(la) = &cluster.load_assignment {
            node.healthy_endpoint_count = la.endpoint_count();
        }

        tracing::debug!(
            sni = %parent,
            eds = node.uses_eds,
            endpoints = node.healthy_endpoint_count,
            "Cluster observed"
        );
        false
    }

    fn observe_aggregate(&mut self, parent: &str, children: Vec<String>) {
        let parent_required = {
            let node = self.node_mut(parent);
            node.is_aggregate = true;
            node.required
        };

        tracing::debug!(sni = %parent, children = children.len(), "Aggregate cluster observed");

        for child in children {
            if child == parent {
                tracing::warn!(sni = %parent, "Aggregate cluster lists itself as a child, skipping");
                continue;
            }

            let node = self.node_mut(&child);
            let conflicting = node
                .parent_sni
                .as_deref()
                .filter(|existing| *existing != parent)
                .map(str::to_string);
            match conflicting {
                Some(existing) => {
                    tracing::warn!(
                        sni = %child,
                        parent = %existing,
                        other = %parent,
                        "Cluster is a child of more than one aggregate, keeping first parent"
                    );
                }
                None => node.parent_sni = Some(parent.to_string()),
            }
            node.required |= parent_required;

            let siblings = &mut self.node_mut(parent).aggregate_children;
            if !siblings.contains(&child) {
                siblings.push(child);
            }
        }
    }
}
