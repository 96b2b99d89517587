//! Local Store
//!
//! Persists the whole planner state as a single JSON document in the data
//! directory, written through after every mutation. Loading never fails:
//! a missing or unreadable document yields the default project set.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{DomainError, DomainResult, PlannerState};

/// Fixed, versioned document name (bump on breaking layout changes)
pub const STATE_FILE: &str = "swipe_planner_v1.json";

pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join(STATE_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted state, falling back to the default set on absence
    /// or parse failure. Never raises to the caller.
    pub fn load(&self) -> PlannerState {
        let mut state = match fs::read_to_string(&self.path) {
            Ok(raw) => match serde_json::from_str::<PlannerState>(&raw) {
                Ok(state) => state,
                Err(e) => {
                    tracing::warn!(error = %e, path = %self.path.display(),
                        "unreadable planner state, starting from defaults");
                    PlannerState::default_set()
                }
            },
            Err(_) => PlannerState::default_set(),
        };
        state.clamp();
        state
    }

    /// Serialize and persist unconditionally (write-through)
    pub fn save(&self, state: &PlannerState) -> DomainResult<()> {
        let json =
            serde_json::to_string(state).map_err(|e| DomainError::Storage(e.to_string()))?;
        fs::write(&self.path, json).map_err(|e| DomainError::Storage(e.to_string()))?;
        log::debug!("planner state saved to {}", self.path.display());
        Ok(())
    }
}
