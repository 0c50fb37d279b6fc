//! Sidecar proxy configuration validator.
//!
//! Given the listener filters, route tables, and clusters generated for one
//! proxy, decides whether the configuration is complete and, optionally,
//! whether every required cluster has a healthy endpoint.

pub mod config;
pub mod envoy;
pub mod observability;
pub mod pipeline;
pub mod validate;

pub use config::{ExtensionConfig, ValidateConfig};
pub use validate::{
    EndpointValidator, LiveEndpointValidator, ResourceNode, Validate, ValidationError,
    ValidationErrors,
};
