//! HTTP Remote Store
//!
//! `RemoteStore` implementation against a hosted Postgres-over-REST backend:
//! one `tasks` table filtered by owner, idempotent upserts keyed on the task
//! id, and passwordless login links through the auth endpoint. The plain
//! REST surface cannot push changes, so `subscribe` returns `None` and the
//! caller refreshes manually.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde_json::json;
use tokio::sync::broadcast;

use super::config::RemoteConfig;
use super::row::TaskRow;
use super::traits::{ChangeEvent, RemoteStore};
use crate::domain::{DomainError, DomainResult, Lane};

const TASKS_TABLE: &str = "tasks";

pub struct HttpRemote {
    base_url: String,
    api_key: String,
    client: Client,
}

impl HttpRemote {
    pub fn new(config: &RemoteConfig) -> Self {
        Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            client: Client::new(),
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, TASKS_TABLE)
    }

    fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// Probe the endpoint before a configuration is saved
    pub async fn check_connection(&self) -> DomainResult<()> {
        self.auth(self.client.get(self.table_url()))
            .query(&[("limit", "1"), ("select", "id")])
            .send()
            .await
            .map_err(|e| DomainError::Remote(e.to_string()))?
            .error_for_status()
            .map_err(|e| DomainError::Remote(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl RemoteStore for HttpRemote {
    async fn fetch_rows(&self, owner: &str) -> DomainResult<Vec<TaskRow>> {
        let owner_filter = format!("eq.{}", owner);
        let response = self
            .auth(self.client.get(self.table_url()))
            .query(&[
                ("select", "*"),
                ("owner", owner_filter.as_str()),
                ("order", "updated_at.desc"),
            ])
            .send()
            .await
            .map_err(|e| DomainError::Remote(e.to_string()))?
            .error_for_status()
            .map_err(|e| DomainError::Remote(e.to_string()))?;

        response
            .json::<Vec<TaskRow>>()
            .await
            .map_err(|e| DomainError::Remote(e.to_string()))
    }

    async fn upsert_rows(&self, rows: &[TaskRow]) -> DomainResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        self.auth(self.client.post(self.table_url()))
            .query(&[("on_conflict", "id")])
            .header("Prefer", "resolution=merge-duplicates")
            .json(rows)
            .send()
            .await
            .map_err(|e| DomainError::Remote(e.to_string()))?
            .error_for_status()
            .map_err(|e| DomainError::Remote(e.to_string()))?;
        Ok(())
    }

    async fn update_lane(
        &self,
        id: &str,
        owner: &str,
        lane: Lane,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<()> {
        let id_filter = format!("eq.{}", id);
        let owner_filter = format!("eq.{}", owner);
        self.auth(self.client.patch(self.table_url()))
            .query(&[
                ("id", id_filter.as_str()),
                ("owner", owner_filter.as_str()),
            ])
            .json(&json!({
                "lane": lane.as_str(),
                "updated_at": updated_at,
            }))
            .send()
            .await
            .map_err(|e| DomainError::Remote(e.to_string()))?
            .error_for_status()
            .map_err(|e| DomainError::Remote(e.to_string()))?;
        Ok(())
    }

    async fn delete_row(&self, id: &str, owner: &str) -> DomainResult<()> {
        let id_filter = format!("eq.{}", id);
        let owner_filter = format!("eq.{}", owner);
        self.auth(self.client.delete(self.table_url()))
            .query(&[
                ("id", id_filter.as_str()),
                ("owner", owner_filter.as_str()),
            ])
            .send()
            .await
            .map_err(|e| DomainError::Remote(e.to_string()))?
            .error_for_status()
            .map_err(|e| DomainError::Remote(e.to_string()))?;
        Ok(())
    }

    async fn delete_project_rows(&self, owner: &str, project: &str) -> DomainResult<()> {
        let owner_filter = format!("eq.{}", owner);
        let project_filter = format!("eq.{}", project);
        self.auth(self.client.delete(self.table_url()))
            .query(&[
                ("owner", owner_filter.as_str()),
                ("project", project_filter.as_str()),
            ])
            .send()
            .await
            .map_err(|e| DomainError::Remote(e.to_string()))?
            .error_for_status()
            .map_err(|e| DomainError::Remote(e.to_string()))?;
        Ok(())
    }

    fn subscribe(&self, _owner: &str) -> Option<broadcast::Receiver<ChangeEvent>> {
        // REST only; the embedder polls or calls sync_now
        None
    }

    async fn request_login_link(&self, email: &str) -> DomainResult<()> {
        self.auth(
            self.client
                .post(format!("{}/auth/v1/otp", self.base_url)),
        )
        .json(&json!({ "email": email, "create_user": true }))
        .send()
        .await
        .map_err(|e| DomainError::Remote(e.to_string()))?
        .error_for_status()
        .map_err(|e| DomainError::Remote(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_url_trims_trailing_slash() {
        let remote = HttpRemote::new(&RemoteConfig {
            url: "https://example.supabase.co/".to_string(),
            api_key: "anon".to_string(),
        });
        assert_eq!(
            remote.table_url(),
            "https://example.supabase.co/rest/v1/tasks"
        );
    }
}
