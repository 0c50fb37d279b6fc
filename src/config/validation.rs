//! Construction-time validation.
//!
//! # Responsibilities
//! - Reject configs addressed to a different extension
//! - Require a non-empty `envoyID` argument
//!
//! # Design Decisions
//! - These are the only fatal errors; everything found while observing
//!   resources is collected instead

use thiserror::Error;

use crate::config::schema::ExtensionConfig;

/// Name the validator extension must be registered under.
pub const BUILTIN_VALIDATE_EXTENSION: &str = "builtin/proxy/validate";

/// Argument holding the proxy's route table name.
pub const ENVOY_ID_ARGUMENT: &str = "envoyID";

/// Errors returned while constructing a validator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConstructionError {
    #[error("expected extension name 'builtin/proxy/validate' but got {got:?}")]
    UnexpectedExtension { got: String },

    #[error("envoyID is required")]
    MissingEnvoyId,
}

/// Check an extension config and return its envoy ID.
pub fn validate_extension(ext: &ExtensionConfig) -> Result<String, ConstructionError> {
    if ext.name != BUILTIN_VALIDATE_EXTENSION {
        return Err(ConstructionError::UnexpectedExtension {
            got: ext.name.clone(),
        });
    }

    match ext.arguments.get(ENVOY_ID_ARGUMENT).and_then(|v| v.as_str()) {
        Some(id) if !id.is_empty() => Ok(id.to_string()),
        _ => Err(ConstructionError::MissingEnvoyId),
    }
}
