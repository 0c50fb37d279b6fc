//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! config / validate / pipeline
//!     → tracing events (structured fields: sni, envoy_id, ...)
//!     → logging.rs subscriber (pretty or JSON on stderr)
//! ```
//!
//! # Design Decisions
//! - `RUST_LOG` overrides the configured level
//! - Logs go to stderr so stdout stays clean for the verdict

pub mod logging;
