//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ValidateConfig;
use crate::config::validation::{validate_extension, ConstructionError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {0}")]
    Validation(#[from] ConstructionError),
}

/// Parse and validate configuration from a TOML string.
pub fn parse_config(content: &str) -> Result<ValidateConfig, ConfigError> {
    let config: ValidateConfig = toml::from_str(content)?;
    validate_extension(&config.extension)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ValidateConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;

    tracing::debug!(
        path = %path.display(),
        upstreams = config.extension.upstream_snis.len(),
        "Configuration loaded"
    );
    Ok(config)
}
