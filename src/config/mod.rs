//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (extension name and envoy ID checks)
//!     → ValidateConfig (validated, immutable)
//!     → validate::Validate::new
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Construction checks are shared by the loader and `Validate::new`, so
//!   a config that loads always constructs

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::EndpointsConfig;
pub use schema::ExtensionConfig;
pub use schema::LogFormat;
pub use schema::ObservabilityConfig;
pub use schema::ValidateConfig;
pub use validation::{ConstructionError, BUILTIN_VALIDATE_EXTENSION, ENVOY_ID_ARGUMENT};
