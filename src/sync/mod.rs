//! Sync Layer
//!
//! Pull-then-reconcile orchestration between the local store and the
//! remote row set.

mod engine;

pub use engine::{SyncEngine, SyncPhase, SyncStatus};
