//! Run persistence against the Supabase REST interface

use async_trait::async_trait;
use shared::{RunMode, RunResult, StoredRun};

use crate::error::{ResearchError, ResearchResult};
use crate::traits::RunStore;

const RUNS_TABLE: &str = "research_runs";

/// Run store over Supabase PostgREST. Constructed once at startup and
/// injected into the runner and the webserver.
#[derive(Clone)]
pub struct RealRunStore {
    client: reqwest::Client,
    base_url: String,
    service_key: String,
}

impl RealRunStore {
    pub fn new(base_url: String, service_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key,
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, RUNS_TABLE)
    }
}

#[async_trait]
impl RunStore for RealRunStore {
    async fn save_run(&self, mode: RunMode, result: &RunResult) -> ResearchResult<()> {
        let body = serde_json::json!({
            "mode": mode.as_str(),
            "result_json": result,
        });

        let response = self
            .client
            .post(self.table_url())
            .header("apikey", &self.service_key)
            .header("Authorization", format!("Bearer {}", self.service_key))
            .header("Prefer", "return=minimal")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ResearchError::StoreError {
                message: format!("insert failed with status {}", response.status()),
            });
        }
        Ok(())
    }

    async fn last_run(&self) -> ResearchResult<Option<StoredRun>> {
        let response = self
            .client
            .get(self.table_url())
            .query(&[
                ("select", "*"),
                ("order", "created_at.desc"),
                ("limit", "1"),
            ])
            .header("apikey", &self.service_key)
            .header("Authorization", format!("Bearer {}", self.service_key))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ResearchError::StoreError {
                message: format!("select failed with status {}", response.status()),
            });
        }

        let mut rows: Vec<StoredRun> = response.json().await?;
        Ok(if rows.is_empty() {
            None
        } else {
            Some(rows.remove(0))
        })
    }
}
