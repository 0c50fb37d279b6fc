//! Admin interface cluster status snapshot.
//!
//! Mirrors the shape returned by the admin `/clusters?format=json`
//! endpoint. The snapshot is fetched by the caller; this module only
//! models it.

use serde::{Deserialize, Serialize};

/// Live status of every cluster known to a running proxy.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Clusters {
    pub cluster_statuses: Vec<ClusterStatus>,
}

impl Clusters {
    /// Find the status entry for a cluster.
    pub fn status(&self, name: &str) -> Option<&ClusterStatus> {
        self.cluster_statuses.iter().find(|s| s.name == name)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ClusterStatus {
    pub name: String,
    pub added_via_api: bool,
    pub host_statuses: Vec<HostStatus>,
}

impl ClusterStatus {
    /// Number of hosts that are healthy and have not failed outlier detection.
    pub fn healthy_host_count(&self) -> usize {
        self.host_statuses.iter().filter(|h| h.is_healthy()).count()
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct HostStatus {
    pub address: Option<serde_json::Value>,
    pub health_status: Option<HostHealthStatus>,
}

impl HostStatus {
    /// A host counts as healthy iff EDS reports it HEALTHY and it has not
    /// failed an outlier check.
    pub fn is_healthy(&self) -> bool {
        self.health_status.as_ref().is_some_and(|h| {
            h.eds_health_status == HealthStatus::Healthy && !h.failed_outlier_check
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct HostHealthStatus {
    pub eds_health_status: HealthStatus,
    pub failed_outlier_check: bool,
    pub failed_active_health_check: bool,
}

/// Endpoint health as reported by EDS.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
    Draining,
    Timeout,
    Degraded,
    #[default]
    #[serde(other)]
    Unknown,
}
