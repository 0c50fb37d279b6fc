//! Load resource sets and admin snapshots from JSON files.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::envoy::Clusters;
use crate::pipeline::traverse::ResourceSet;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Load the resources generated for a proxy.
pub fn load_resources(path: &Path) -> Result<ResourceSet, PipelineError> {
    let resources: ResourceSet = load_json(path)?;
    tracing::debug!(
        path = %path.display(),
        listeners = resources.listeners.len(),
        routes = resources.routes.len(),
        clusters = resources.clusters.len(),
        "Resources loaded"
    );
    Ok(resources)
}

/// Load a `/clusters?format=json` snapshot.
pub fn load_snapshot(path: &Path) -> Result<Clusters, PipelineError> {
    let clusters: Clusters = load_json(path)?;
    tracing::debug!(
        path = %path.display(),
        clusters = clusters.cluster_statuses.len(),
        "Cluster snapshot loaded"
    );
    Ok(clusters)
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, PipelineError> {
    let content = fs::read_to_string(path).map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| PipelineError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_snapshot() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"cluster_statuses":[{{"name":"db","host_statuses":[{{"health_status":{{"eds_health_status":"HEALTHY"}}}}]}}]}}"#
        )
        .unwrap();

        let clusters = load_snapshot(file.path()).unwrap();
        assert_eq!(clusters.status("db").unwrap().healthy_host_count(), 1);
    }

    #[test]
    fn test_load_resources_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();

        let err = load_resources(file.path()).unwrap_err();
        assert!(matches!(err, PipelineError::Json { .. }));
        assert!(err.to_string().starts_with("failed to parse"));
    }

    #[test]
    fn test_load_resources_missing_file() {
        let err = load_resources(Path::new("/nonexistent/resources.json")).unwrap_err();
        assert!(matches!(err, PipelineError::Io { .. }));
    }
}
