//! Resource traversal.
//!
//! # Data Flow
//! ```text
//! resources.json ─→ loader.rs ─→ ResourceSet
//!                                  → traverse.rs observe_all
//!                                      listeners → filter chains → filters → on_filter_observed
//!                                      routes                              → on_route_observed
//!                                      clusters                            → on_cluster_observed
//! clusters.json  ─→ loader.rs ─→ envoy::Clusters (live snapshot)
//! ```
//!
//! # Design Decisions
//! - Resources are visited in document order; the validator does not care
//! - Snapshot fetching is the caller's job; only files are read here

pub mod loader;
pub mod traverse;

pub use loader::{load_resources, load_snapshot, PipelineError};
pub use traverse::{observe_all, Observed, ResourceSet};
