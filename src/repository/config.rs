//! Sync Configuration
//!
//! Remote endpoint settings, persisted as a JSON sidecar file next to the
//! state document.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

pub const CONFIG_FILE: &str = "sync_config.json";

/// Remote store endpoint and credentials
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Base URL of the hosted backend
    pub url: String,
    /// Public API key sent with every request
    pub api_key: String,
}

/// Persist a remote configuration
pub fn save_config(dir: &Path, config: &RemoteConfig) -> DomainResult<()> {
    let json = serde_json::to_string(config).map_err(|e| DomainError::Storage(e.to_string()))?;
    fs::write(dir.join(CONFIG_FILE), json).map_err(|e| DomainError::Storage(e.to_string()))?;
    log::info!("sync configuration saved");
    Ok(())
}

/// Load the remote configuration, if one has been saved
pub fn load_config(dir: &Path) -> Option<RemoteConfig> {
    let raw = fs::read_to_string(dir.join(CONFIG_FILE)).ok()?;
    serde_json::from_str(&raw).ok()
}
