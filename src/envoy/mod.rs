//! Envoy resource model.
//!
//! # Data Flow
//! ```text
//! xDS resources (JSON, as found in a config dump)
//!     → listener.rs (filters, HTTP connection manager, TCP proxy)
//!     → route.rs    (route tables, route actions)
//!     → cluster.rs  (clusters, discovery types, load assignments)
//!     → validate::Validate observer hooks
//!
//! Admin snapshot (/clusters?format=json)
//!     → admin.rs (cluster and host statuses)
//!     → validate::health endpoint evaluation
//! ```
//!
//! # Design Decisions
//! - A subset of each resource is modelled; unmodelled fields are ignored
//! - Typed configs keep their raw fields and are decoded on demand by type URL
//! - A typed config that does not decode is "not that type", never an error

pub mod admin;
pub mod cluster;
pub mod listener;
pub mod route;

pub use admin::{ClusterStatus, Clusters, HealthStatus, HostHealthStatus, HostStatus};
pub use cluster::{
    AggregateClusterConfig, Cluster, ClusterDiscovery, ClusterLoadAssignment, CustomClusterType,
    DiscoveryType, EdsClusterConfig,
};
pub use listener::{
    filter_cluster_names, Filter, FilterChain, HttpConnectionManager, Listener, Rds, TcpProxy,
};
pub use route::{
    route_cluster_names, ClusterWeight, Route, RouteAction, RouteConfiguration, VirtualHost,
    WeightedCluster,
};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A message that can be carried inside a [`TypedConfig`].
pub trait TypedMessage: DeserializeOwned {
    /// Fully qualified type URL, e.g. `type.googleapis.com/envoy.config...`.
    const TYPE_URL: &'static str;
}

/// An `Any`-style typed configuration: a `@type` discriminator plus the
/// message fields.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct TypedConfig {
    #[serde(rename = "@type", default)]
    pub type_url: String,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl TypedConfig {
    /// Pack a message into a typed config.
    pub fn pack<T: TypedMessage + Serialize>(message: &T) -> serde_json::Result<Self> {
        let fields = match serde_json::to_value(message)? {
            Value::Object(fields) => fields,
            _ => Map::new(),
        };
        Ok(Self {
            type_url: T::TYPE_URL.to_string(),
            fields,
        })
    }

    /// Returns true if this config carries a `T`.
    pub fn is<T: TypedMessage>(&self) -> bool {
        self.type_url == T::TYPE_URL
    }

    /// Decode the payload as `T`.
    ///
    /// Returns `None` when the type URL does not name `T` or the fields do
    /// not deserialize.
    pub fn decode<T: TypedMessage>(&self) -> Option<T> {
        if !self.is::<T>() {
            return None;
        }
        serde_json::from_value(Value::Object(self.fields.clone())).ok()
    }
}
