//! Sync Engine
//!
//! State machine driving reconciliation between local state and the remote
//! row set. One policy, two branches: an empty remote is seeded from local
//! data (one-directional, local untouched); a non-empty remote wins and
//! replaces local state wholesale. No per-task merge, no timestamp
//! comparison.
//!
//! At most one reconciliation runs at a time. Triggers that arrive while
//! one is in flight coalesce into a single follow-up run instead of racing
//! for last-response-wins.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, Mutex};

use crate::domain::{DomainResult, PlannerState};
use crate::repository::{rows_to_state, state_to_rows, LocalStore, RemoteStore};
use crate::session::Session;

/// Where the engine currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncPhase {
    LoggedOut,
    Syncing,
    Synced,
}

/// Queryable sync outcome surface for the embedding UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncStatus {
    pub phase: SyncPhase,
    pub last_error: Option<String>,
    pub last_synced_at: Option<DateTime<Utc>>,
}

impl Default for SyncStatus {
    fn default() -> Self {
        Self {
            phase: SyncPhase::LoggedOut,
            last_error: None,
            last_synced_at: None,
        }
    }
}

#[derive(Clone)]
pub struct SyncEngine {
    state: Arc<Mutex<PlannerState>>,
    local: Arc<LocalStore>,
    remote: Arc<dyn RemoteStore>,
    session: Session,
    status: Arc<std::sync::Mutex<SyncStatus>>,
    inflight: Arc<Mutex<()>>,
    pending: Arc<AtomicBool>,
}

impl SyncEngine {
    pub fn new(
        state: Arc<Mutex<PlannerState>>,
        local: Arc<LocalStore>,
        remote: Arc<dyn RemoteStore>,
        session: Session,
    ) -> Self {
        Self {
            state,
            local,
            remote,
            session,
            status: Arc::new(std::sync::Mutex::new(SyncStatus::default())),
            inflight: Arc::new(Mutex::new(())),
            pending: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn status(&self) -> SyncStatus {
        self.status.lock().unwrap().clone()
    }

    fn set_phase(&self, phase: SyncPhase) {
        self.status.lock().unwrap().phase = phase;
    }

    fn record_error(&self, message: String) {
        self.status.lock().unwrap().last_error = Some(message);
    }

    fn mark_synced(&self) {
        let mut status = self.status.lock().unwrap();
        status.phase = SyncPhase::Synced;
        status.last_error = None;
        status.last_synced_at = Some(Utc::now());
    }

    /// Reset to `LoggedOut` after the identity is cleared
    pub fn reset(&self) {
        self.set_phase(SyncPhase::LoggedOut);
    }

    /// Full pull-and-reconcile against the remote store.
    ///
    /// Skips with a warning when no identity is present. When another
    /// reconciliation is already running this call returns immediately and
    /// the running one repeats once it finishes.
    pub async fn reconcile(&self) -> DomainResult<()> {
        let Some(owner) = self.session.current_owner() else {
            tracing::warn!("not signed in, skipping sync");
            self.set_phase(SyncPhase::LoggedOut);
            return Ok(());
        };

        loop {
            let Ok(_guard) = self.inflight.try_lock() else {
                self.pending.store(true, Ordering::SeqCst);
                return Ok(());
            };
            let result = self.run(&owner).await;
            drop(_guard);
            result?;
            if !self.pending.swap(false, Ordering::SeqCst) {
                return Ok(());
            }
        }
    }

    /// One reconciliation pass: pull, then either seed or overwrite
    async fn run(&self, owner: &str) -> DomainResult<()> {
        let previous = self.status().phase;
        self.set_phase(SyncPhase::Syncing);

        let rows = match self.remote.fetch_rows(owner).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::warn!(error = %e, "remote pull failed");
                self.record_error(e.to_string());
                self.set_phase(previous);
                return Err(e);
            }
        };

        if rows.is_empty() {
            // Remote uninitialized: seed it from local state, one direction only
            let snapshot = self.state.lock().await.clone();
            let seed = state_to_rows(&snapshot, owner);
            if !seed.is_empty() {
                if let Err(e) = self.remote.upsert_rows(&seed).await {
                    tracing::warn!(error = %e, "seeding remote failed");
                    self.record_error(e.to_string());
                    self.set_phase(previous);
                    return Err(e);
                }
            }
            tracing::info!(rows = seed.len(), "seeded empty remote from local state");
        } else {
            // Remote wins: replace local state wholesale and persist it
            let next = rows_to_state(&rows);
            {
                let mut state = self.state.lock().await;
                *state = next.clone();
            }
            if let Err(e) = self.local.save(&next) {
                tracing::warn!(error = %e, "persisting synced state failed");
                self.record_error(e.to_string());
                self.set_phase(previous);
                return Err(e);
            }
            tracing::info!(rows = rows.len(), "replaced local state from remote");
        }

        self.mark_synced();
        Ok(())
    }

    /// Listen for remote change notifications and re-reconcile on each.
    /// Returns false when not signed in or the backend cannot push, in
    /// which case the embedder falls back to manual refresh.
    pub fn start_realtime(&self) -> bool {
        let Some(owner) = self.session.current_owner() else {
            return false;
        };
        let Some(mut rx) = self.remote.subscribe(&owner) else {
            return false;
        };

        let engine = self.clone();
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(_) => {
                        if let Err(e) = engine.reconcile().await {
                            tracing::warn!(error = %e, "change-triggered sync failed");
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });
        true
    }
}
