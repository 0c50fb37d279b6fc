//! Proxy configuration validation.
//!
//! # Data Flow
//! ```text
//! Resource traversal (any order):
//!     filter  → builder.rs on_filter_observed  (listener seen, RDS or direct clusters)
//!     route   → builder.rs on_route_observed   (route seen, clusters required)
//!     cluster → builder.rs on_cluster_observed (cluster seen, aggregate / EDS / static)
//!                 → aggregate.rs (decode aggregate children)
//!
//! Finalize:
//!     finalize.rs errors()
//!     → propagate required flags root-to-leaf
//!     → completeness checks per required SNI (sorted)
//!     → health.rs EndpointValidator against a live snapshot (optional)
//!     → errors.rs ValidationErrors (every problem, not just the first)
//! ```
//!
//! # Design Decisions
//! - Nodes are keyed by SNI in a sorted map; children refer to parents by name
//! - The endpoint evaluator is a trait so tests can supply fakes
//! - One `Validate` per proxy per pass; it is not reused

pub mod aggregate;
pub mod builder;
pub mod errors;
pub mod finalize;
pub mod health;
pub mod state;

pub use aggregate::decode_as_aggregate;
pub use errors::{ValidationError, ValidationErrors};
pub use health::{EndpointValidator, LiveEndpointValidator};
pub use state::{ResourceNode, Validate};
