//! Proxy configuration validator.
//!
//! # Overview
//!
//! ```text
//!   validate.toml ──▶ config::loader ──▶ Validate::new
//!                                             │
//!   resources.json ──▶ pipeline::observe_all ─┤  (filters, routes, clusters)
//!                                             │
//!   clusters.json ───▶ pipeline::load_snapshot┤  (only with endpoint validation)
//!                                             ▼
//!                                      Validate::errors ──▶ verdict + exit status
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use proxy_validate::config::loader::load_config;
use proxy_validate::observability::logging;
use proxy_validate::pipeline::{load_resources, load_snapshot, observe_all};
use proxy_validate::{LiveEndpointValidator, Validate};

#[derive(Parser)]
#[command(name = "proxy-validate")]
#[command(about = "Validate the xDS resources generated for a sidecar proxy", long_about = None)]
struct Cli {
    /// Validator configuration (TOML).
    #[arg(short, long)]
    config: PathBuf,

    /// Listeners, routes, and clusters for the proxy (JSON).
    #[arg(short, long)]
    resources: PathBuf,

    /// Admin `/clusters?format=json` snapshot (JSON).
    #[arg(long)]
    clusters: Option<PathBuf>,

    /// Check for healthy endpoints (also enabled by `endpoints.validate`).
    #[arg(long)]
    validate_endpoints: bool,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;
    logging::init(&config.observability)?;

    let validate_endpoints = cli.validate_endpoints || config.endpoints.validate;
    let snapshot = match (&cli.clusters, validate_endpoints) {
        (Some(path), true) => Some(load_snapshot(path)?),
        (None, true) => {
            return Err("endpoint validation requires a --clusters snapshot".into());
        }
        (_, false) => None,
    };

    let mut validator = Validate::new(&config.extension)?;
    let resources = load_resources(&cli.resources)?;
    let observed = observe_all(&resources, &mut validator);

    tracing::info!(
        envoy_id = %validator.envoy_id(),
        filters = observed.filters,
        routes = observed.routes,
        clusters = observed.clusters,
        validate_endpoints,
        "Resources observed"
    );

    match validator.errors(validate_endpoints, &LiveEndpointValidator, snapshot.as_ref()) {
        Ok(()) => {
            println!("proxy configuration is valid");
            Ok(ExitCode::SUCCESS)
        }
        Err(errors) => {
            eprintln!("{}", errors);
            Ok(ExitCode::FAILURE)
        }
    }
}
