//! SwipePlanner Core
//!
//! State core of a swipeable project planner: a circular project switcher
//! with three task lanes (Today/Backlog/Done) per project, write-through
//! persistence to a local JSON document, and optional last-writer-wins
//! synchronization against a remote row store.
//!
//! Layered architecture:
//! - domain: Core entities and business rules
//! - repository: Local persistence and remote data access
//! - sync: Pull-then-reconcile engine
//! - commands: Mutation command handlers
//!
//! Every mutation is optimistic: it applies to local state first (and is
//! persisted immediately), then issues a best-effort remote write that is
//! never rolled back on failure.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Mutex;

pub mod commands;
pub mod domain;
pub mod logging;
pub mod repository;
pub mod session;
pub mod sync;

pub use domain::{DomainError, DomainResult, Lane, Lanes, PlannerState, Priority, Project, Task};
pub use repository::{HttpRemote, LocalStore, MemoryRemote, RemoteConfig, RemoteStore};
pub use session::Session;
pub use sync::{SyncEngine, SyncPhase, SyncStatus};

/// Application state shared across commands: planner state plus the stores
/// and session it is reconciled against. Passed by reference to every
/// command handler; nothing lives in ambient globals.
pub struct Planner {
    pub(crate) state: Arc<Mutex<PlannerState>>,
    pub(crate) local: Arc<LocalStore>,
    pub(crate) remote: Arc<dyn RemoteStore>,
    pub(crate) session: Session,
    pub(crate) sync: SyncEngine,
    data_dir: PathBuf,
}

impl Planner {
    /// Open a planner over `data_dir`, loading persisted state (or the
    /// default set) from the local document.
    pub fn open(data_dir: impl Into<PathBuf>, remote: Arc<dyn RemoteStore>) -> Self {
        let data_dir = data_dir.into();
        let local = Arc::new(LocalStore::new(&data_dir));
        let state = Arc::new(Mutex::new(local.load()));
        let session = Session::new();
        let sync = SyncEngine::new(
            state.clone(),
            local.clone(),
            remote.clone(),
            session.clone(),
        );
        Self {
            state,
            local,
            remote,
            session,
            sync,
            data_dir,
        }
    }

    /// Open in the platform data directory with the saved remote
    /// configuration. Errors when no configuration has been saved yet.
    pub fn open_configured() -> DomainResult<Self> {
        let data_dir = default_data_dir()?;
        let config = repository::load_config(&data_dir)
            .ok_or_else(|| DomainError::InvalidInput("remote not configured".to_string()))?;
        Ok(Self::open(data_dir, Arc::new(HttpRemote::new(&config))))
    }

    /// Run the startup reconciliation when an identity is already present
    pub async fn startup(&self) -> DomainResult<()> {
        if self.session.is_signed_in() {
            self.sync.reconcile().await
        } else {
            Ok(())
        }
    }

    /// Snapshot of the current board
    pub async fn state(&self) -> PlannerState {
        self.state.lock().await.clone()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn sync_engine(&self) -> &SyncEngine {
        &self.sync
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Write-through persistence of the given state snapshot
    pub(crate) fn persist(&self, state: &PlannerState) -> DomainResult<()> {
        self.local.save(state)
    }
}

/// Platform data directory for the planner, created if missing
pub fn default_data_dir() -> DomainResult<PathBuf> {
    let base = dirs::data_dir()
        .ok_or_else(|| DomainError::Storage("no platform data directory".to_string()))?;
    let dir = base.join("swipe-planner");
    std::fs::create_dir_all(&dir).map_err(|e| DomainError::Storage(e.to_string()))?;
    Ok(dir)
}
