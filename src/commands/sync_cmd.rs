//! Sync & Session Commands
//!
//! Manual sync trigger, sync status, remote configuration and the
//! passwordless login flow.

use crate::domain::{DomainError, DomainResult};
use crate::repository::{load_config, save_config, HttpRemote, RemoteConfig};
use crate::sync::SyncStatus;
use crate::Planner;

/// Manually trigger a full pull-and-reconcile
pub async fn sync_now(planner: &Planner) -> DomainResult<()> {
    planner.sync.reconcile().await
}

/// Current sync phase and last outcome, for display
pub fn sync_status(planner: &Planner) -> SyncStatus {
    planner.sync.status()
}

/// Validate and persist a remote configuration. The connection is probed
/// before anything is saved; a planner opened later picks the saved
/// configuration up via `Planner::open_configured`.
pub async fn configure_remote(
    planner: &Planner,
    url: String,
    api_key: String,
) -> DomainResult<RemoteConfig> {
    let config = RemoteConfig { url, api_key };
    HttpRemote::new(&config).check_connection().await?;
    save_config(planner.data_dir(), &config)?;
    Ok(config)
}

/// Currently saved remote configuration, if any
pub fn remote_config(planner: &Planner) -> Option<RemoteConfig> {
    load_config(planner.data_dir())
}

/// Request a passwordless login link for `email`
pub async fn sign_in(planner: &Planner, email: &str) -> DomainResult<()> {
    if email.is_empty() {
        return Err(DomainError::InvalidInput(
            "email must not be empty".to_string(),
        ));
    }
    planner.remote.request_login_link(email).await
}

/// Record the identity once the login link lands, then reconcile. The
/// reconciliation seeds an empty remote from local data or overwrites
/// local data from a non-empty remote.
pub async fn complete_sign_in(planner: &Planner, owner: String) -> DomainResult<()> {
    planner.session.set_owner(owner);
    planner.sync.reconcile().await
}

/// Clear the identity. No remote cleanup; the local cache remains as last
/// synced.
pub fn sign_out(planner: &Planner) {
    planner.session.clear();
    planner.sync.reset();
}

/// Attach the remote change feed so pushes trigger reconciliation.
/// Returns false when signed out or the backend cannot push.
pub fn start_realtime(planner: &Planner) -> bool {
    planner.sync.start_realtime()
}
