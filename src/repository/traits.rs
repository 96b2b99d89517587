//! Repository Layer - Core Traits
//!
//! Defines the abstract interface to the remote row store.
//! Implementations can use a hosted HTTP backend, in-memory, etc.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::broadcast;

use super::row::TaskRow;
use crate::domain::{DomainResult, Lane};

/// A change to the owned remote row set. The sync engine re-pulls the whole
/// set on any event, so the kind is informational.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeEvent {
    Inserted,
    Updated,
    Deleted,
}

/// Minimal contract the planner requires from a remote store
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// All rows owned by `owner`, most recently updated first
    async fn fetch_rows(&self, owner: &str) -> DomainResult<Vec<TaskRow>>;

    /// Insert or overwrite rows, conflict key = task id
    async fn upsert_rows(&self, rows: &[TaskRow]) -> DomainResult<()>;

    /// Move the row for `id` into `lane`, refreshing its update stamp
    async fn update_lane(
        &self,
        id: &str,
        owner: &str,
        lane: Lane,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<()>;

    /// Delete a single row by id and owner
    async fn delete_row(&self, id: &str, owner: &str) -> DomainResult<()>;

    /// Bulk delete of every row grouped under `project` for `owner`
    async fn delete_project_rows(&self, owner: &str, project: &str) -> DomainResult<()>;

    /// Change notifications for the owned row set. `None` when the backend
    /// cannot push; callers degrade to manual refresh.
    fn subscribe(&self, owner: &str) -> Option<broadcast::Receiver<ChangeEvent>>;

    /// Send a passwordless login link to `email`
    async fn request_login_link(&self, email: &str) -> DomainResult<()>;
}
