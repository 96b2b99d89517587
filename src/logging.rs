//! Logging Setup
//!
//! Initializes a `tracing` subscriber for embedders without one. Honors
//! `RUST_LOG` when set, falls back to the given default level otherwise.

use tracing_subscriber::EnvFilter;

pub fn init_logging(default_level: &str) -> Result<(), String> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| format!("failed to init logging: {}", e))
}
