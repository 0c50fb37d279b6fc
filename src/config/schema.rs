//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::config::validation::{BUILTIN_VALIDATE_EXTENSION, ENVOY_ID_ARGUMENT};

/// Root configuration for a validation run.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ValidateConfig {
    /// The validator extension and the proxy it validates.
    pub extension: ExtensionConfig,

    /// Endpoint health settings.
    pub endpoints: EndpointsConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// Extension configuration handed to the validator at construction.
///
/// `name` has no default: a config that omits it is rejected.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ExtensionConfig {
    /// Extension name. Must be `builtin/proxy/validate`.
    pub name: String,

    /// Free-form extension arguments. `envoyID` names the proxy's route table.
    pub arguments: BTreeMap<String, serde_json::Value>,

    /// Every SNI declared as an upstream of the proxy.
    pub upstream_snis: BTreeSet<String>,
}

impl ExtensionConfig {
    /// Build a validator extension config for one proxy.
    pub fn new<I, S>(envoy_id: impl Into<String>, upstream_snis: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut arguments = BTreeMap::new();
        arguments.insert(
            ENVOY_ID_ARGUMENT.to_string(),
            serde_json::Value::String(envoy_id.into()),
        );
        Self {
            name: BUILTIN_VALIDATE_EXTENSION.to_string(),
            arguments,
            upstream_snis: upstream_snis.into_iter().map(Into::into).collect(),
        }
    }
}

/// Endpoint validation settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct EndpointsConfig {
    /// Check healthy endpoints against a live cluster snapshot.
    pub validate: bool,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}
