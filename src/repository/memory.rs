//! In-Memory Remote Store
//!
//! Backing store for tests and offline operation. Implements the full
//! `RemoteStore` contract including change notifications (tokio broadcast),
//! plus a failure toggle and an artificial latency knob so sync behavior
//! under error and contention is testable.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, Mutex};

use super::row::TaskRow;
use super::traits::{ChangeEvent, RemoteStore};
use crate::domain::{DomainError, DomainResult, Lane};

pub struct MemoryRemote {
    rows: Mutex<Vec<TaskRow>>,
    notify: broadcast::Sender<ChangeEvent>,
    fail: AtomicBool,
    delay: std::sync::Mutex<Duration>,
    fetches: AtomicUsize,
}

impl MemoryRemote {
    pub fn new() -> Self {
        let (notify, _) = broadcast::channel(64);
        Self {
            rows: Mutex::new(Vec::new()),
            notify,
            fail: AtomicBool::new(false),
            delay: std::sync::Mutex::new(Duration::ZERO),
            fetches: AtomicUsize::new(0),
        }
    }

    /// While set, every operation fails with a remote error
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Artificial latency applied to fetches
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = delay;
    }

    /// Number of row pulls served so far
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Snapshot of all stored rows, any owner
    pub async fn all_rows(&self) -> Vec<TaskRow> {
        self.rows.lock().await.clone()
    }

    fn check_available(&self) -> DomainResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            Err(DomainError::Remote("remote store unavailable".to_string()))
        } else {
            Ok(())
        }
    }

    async fn pause(&self) {
        let delay = *self.delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    fn emit(&self, event: ChangeEvent) {
        // No receivers is fine; notifications are best-effort
        let _ = self.notify.send(event);
    }
}

impl Default for MemoryRemote {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteStore for MemoryRemote {
    async fn fetch_rows(&self, owner: &str) -> DomainResult<Vec<TaskRow>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        self.check_available()?;

        let rows = self.rows.lock().await;
        let mut owned: Vec<TaskRow> = rows.iter().filter(|r| r.owner == owner).cloned().collect();
        owned.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(owned)
    }

    async fn upsert_rows(&self, rows: &[TaskRow]) -> DomainResult<()> {
        self.check_available()?;

        let mut stored = self.rows.lock().await;
        for row in rows {
            match stored.iter_mut().find(|r| r.id == row.id) {
                Some(existing) => {
                    *existing = row.clone();
                    self.emit(ChangeEvent::Updated);
                }
                None => {
                    stored.push(row.clone());
                    self.emit(ChangeEvent::Inserted);
                }
            }
        }
        Ok(())
    }

    async fn update_lane(
        &self,
        id: &str,
        owner: &str,
        lane: Lane,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<()> {
        self.check_available()?;

        let mut stored = self.rows.lock().await;
        // Matching no row is a successful zero-row update, like the hosted table
        if let Some(row) = stored.iter_mut().find(|r| r.id == id && r.owner == owner) {
            row.lane = lane.as_str().to_string();
            row.updated_at = updated_at;
            self.emit(ChangeEvent::Updated);
        }
        Ok(())
    }

    async fn delete_row(&self, id: &str, owner: &str) -> DomainResult<()> {
        self.check_available()?;

        let mut stored = self.rows.lock().await;
        let before = stored.len();
        stored.retain(|r| !(r.id == id && r.owner == owner));
        if stored.len() != before {
            self.emit(ChangeEvent::Deleted);
        }
        Ok(())
    }

    async fn delete_project_rows(&self, owner: &str, project: &str) -> DomainResult<()> {
        self.check_available()?;

        let mut stored = self.rows.lock().await;
        let before = stored.len();
        stored.retain(|r| !(r.owner == owner && r.project == project));
        if stored.len() != before {
            self.emit(ChangeEvent::Deleted);
        }
        Ok(())
    }

    fn subscribe(&self, _owner: &str) -> Option<broadcast::Receiver<ChangeEvent>> {
        Some(self.notify.subscribe())
    }

    async fn request_login_link(&self, email: &str) -> DomainResult<()> {
        self.check_available()?;
        tracing::info!(email, "login link requested");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Priority, Task};
    use crate::repository::row::task_to_row;

    fn sample_row(id: &str, owner: &str, project: &str) -> TaskRow {
        let task = Task {
            id: id.to_string(),
            text: format!("task {}", id),
            priority: Priority::Med,
            due: None,
        };
        task_to_row(project, Lane::Today, &task, owner)
    }

    #[tokio::test]
    async fn test_fetch_filters_by_owner() {
        let remote = MemoryRemote::new();
        remote
            .upsert_rows(&[sample_row("a", "alice", "P"), sample_row("b", "bob", "P")])
            .await
            .unwrap();

        let rows = remote.fetch_rows("alice").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "a");
    }

    #[tokio::test]
    async fn test_upsert_overwrites_by_id() {
        let remote = MemoryRemote::new();
        remote.upsert_rows(&[sample_row("a", "alice", "P")]).await.unwrap();

        let mut updated = sample_row("a", "alice", "P");
        updated.text = "changed".to_string();
        remote.upsert_rows(&[updated]).await.unwrap();

        let rows = remote.fetch_rows("alice").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].text, "changed");
    }

    #[tokio::test]
    async fn test_delete_project_rows_is_scoped() {
        let remote = MemoryRemote::new();
        remote
            .upsert_rows(&[
                sample_row("a", "alice", "Keep"),
                sample_row("b", "alice", "Drop"),
                sample_row("c", "bob", "Drop"),
            ])
            .await
            .unwrap();

        remote.delete_project_rows("alice", "Drop").await.unwrap();

        let all = remote.all_rows().await;
        assert_eq!(all.len(), 2);
        assert!(all.iter().any(|r| r.id == "a"));
        assert!(all.iter().any(|r| r.id == "c"));
    }

    #[tokio::test]
    async fn test_failure_toggle() {
        let remote = MemoryRemote::new();
        remote.set_fail(true);
        assert!(remote.fetch_rows("alice").await.is_err());
        remote.set_fail(false);
        assert!(remote.fetch_rows("alice").await.is_ok());
    }

    #[tokio::test]
    async fn test_subscribe_sees_changes() {
        let remote = MemoryRemote::new();
        let mut rx = remote.subscribe("alice").expect("memory remote pushes");
        remote.upsert_rows(&[sample_row("a", "alice", "P")]).await.unwrap();
        assert_eq!(rx.recv().await.unwrap(), ChangeEvent::Inserted);
    }
}
