//! Finalize a validation pass.
//!
//! # Checks
//! ```text
//! no filter observed              → MissingListener
//! RDS listener, route not seen    → MissingRoute
//! for each required SNI (sorted):
//!     not an upstream / no cluster → MissingCluster (endpoint checks skipped)
//!     root aggregate               → ZeroHealthyEndpointsAggregate unless a child is healthy
//!     root cluster                 → MissingLoadAssignment (EDS), ZeroHealthyEndpoints
//!     aggregate child              → validated through its parent
//! nothing required                → NoRequiredResources
//! ```

use std::collections::BTreeSet;

use crate::envoy::Clusters;
use crate::validate::errors::{ValidationError, ValidationErrors};
use crate::validate::health::EndpointValidator;
use crate::validate::state::Validate;

impl Validate {
    /// Validate everything observed so far.
    ///
    /// `clusters` is only read when `validate_endpoints` is set; a missing
    /// snapshot then behaves like one with no cluster statuses.
    pub fn errors<V>(
        &mut self,
        validate_endpoints: bool,
        endpoint_validator: &V,
        clusters: Option<&Clusters>,
    ) -> Result<(), ValidationErrors>
    where
        V: EndpointValidator + ?Sized,
    {
        let mut errors = ValidationErrors::new();

        if !self.listener {
            errors.push(ValidationError::MissingListener);
        }

        if self.uses_rds && !self.route {
            errors.push(ValidationError::MissingRoute);
        }

        self.propagate_required();

        let empty = Clusters::default();
        let clusters = clusters.unwrap_or(&empty);

        let required: Vec<String> = self
            .resources
            .iter()
            .filter(|(_, node)| node.required)
            .map(|(sni, _)| sni.clone())
            .collect();

        for sni in &required {
            let Some(node) = self.resources.get(sni) else {
                continue;
            };

            if !self.snis.contains(sni) || !node.cluster_seen {
                errors.push(ValidationError::MissingCluster(sni.clone()));
                continue;
            }

            if !validate_endpoints || !node.is_root() {
                continue;
            }

            if node.is_aggregate {
                let mut visiting = BTreeSet::new();
                if !self.any_child_healthy(sni, endpoint_validator, clusters, &mut visiting) {
                    errors.push(ValidationError::ZeroHealthyEndpointsAggregate(sni.clone()));
                }
            } else {
                let node = self.node_mut(sni);
                endpoint_validator.validate(node, sni, clusters);
                if node.uses_eds && !node.load_assignment_seen {
                    errors.push(ValidationError::MissingLoadAssignment(sni.clone()));
                }
                if node.healthy_endpoint_count == 0 {
                    errors.push(ValidationError::ZeroHealthyEndpoints(sni.clone()));
                }
            }
        }

        if required.is_empty() {
            errors.push(ValidationError::NoRequiredResources);
        }

        tracing::info!(
            envoy_id = %self.envoy_id,
            required = required.len(),
            problems = errors.len(),
            "Validation finished"
        );
        errors.into_result()
    }

    /// Mark every descendant of a required aggregate as required.
    ///
    /// Runs after all observations, so the result does not depend on
    /// whether a cluster arrived before or after the filter or route that
    /// requires it.
    fn propagate_required(&mut self) {
        let mut pending: Vec<String> = self
            .resources
            .iter()
            .filter(|(_, node)| node.required && node.is_aggregate)
            .map(|(sni, _)| sni.clone())
            .collect();

        while let Some(sni) = pending.pop() {
            let children = self
                .resources
                .get(&sni)
                .map(|node| node.aggregate_children.clone())
                .unwrap_or_default();

            for child in children {
                let node = self.node_mut(&child);
                if !node.required {
                    node.required = true;
                    if node.is_aggregate {
                        pending.push(child);
                    }
                }
            }
        }
    }

    /// Evaluate every child of an aggregate; true if any has a healthy
    /// endpoint. Nested aggregates are healthy if any of their own
    /// children are. `visiting` holds the aggregates on the current path.
    fn any_child_healthy<V>(
        &mut self,
        sni: &str,
        endpoint_validator: &V,
        clusters: &Clusters,
        visiting: &mut BTreeSet<String>,
    ) -> bool
    where
        V: EndpointValidator + ?Sized,
    {
        if !visiting.insert(sni.to_string()) {
            tracing::warn!(sni = %sni, "Aggregate cluster cycle detected");
            return false;
        }

        let children = self
            .resources
            .get(sni)
            .map(|node| node.aggregate_children.clone())
            .unwrap_or_default();

        let mut healthy = false;
        for child in &children {
            let nested = self.resources.get(child).is_some_and(|node| node.is_aggregate);
            let child_healthy = if nested {
                self.any_child_healthy(child, endpoint_validator, clusters, visiting)
            } else {
                let node = self.node_mut(child);
                endpoint_validator.validate(node, child, clusters);
                node.healthy_endpoint_count > 0
            };
            healthy |= child_healthy;
        }

        visiting.remove(sni);
        healthy
    }
}
