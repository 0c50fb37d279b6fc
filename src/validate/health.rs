//! Endpoint health evaluation.
//!
//! # Responsibilities
//! - Look up a cluster in a live admin snapshot
//! - Record whether a load assignment exists and how many hosts are healthy
//!
//! # Design Decisions
//! - Evaluation overwrites the node's endpoint state; running it twice is harmless
//! - Injected as a trait so tests never need a running proxy

use crate::envoy::Clusters;
use crate::validate::state::ResourceNode;

/// Strategy for filling in a node's endpoint health from a snapshot.
pub trait EndpointValidator {
    fn validate(&self, node: &mut ResourceNode, sni: &str, clusters: &Clusters);
}

impl<F> EndpointValidator for F
where
    F: Fn(&mut ResourceNode, &str, &Clusters),
{
    fn validate(&self, node: &mut ResourceNode, sni: &str, clusters: &Clusters) {
        self(node, sni, clusters)
    }
}

/// Evaluates endpoints against the admin `/clusters` snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiveEndpointValidator;

impl EndpointValidator for LiveEndpointValidator {
    fn validate(&self, node: &mut ResourceNode, sni: &str, clusters: &Clusters) {
        match clusters.status(sni) {
            Some(status) => {
                node.load_assignment_seen = true;
                node.healthy_endpoint_count = status.healthy_host_count();
            }
            None => {
                node.load_assignment_seen = false;
                node.healthy_endpoint_count = 0;
            }
        }

        tracing::debug!(
            sni = %sni,
            load_assignment = node.load_assignment_seen,
            healthy = node.healthy_endpoint_count,
            "Endpoints evaluated"
        );
    }
}
