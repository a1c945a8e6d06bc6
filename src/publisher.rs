//! Index publishing against the hosted search service's REST API.
//!
//! One publish per version: batch the documents into a scratch index, then
//! move the scratch index onto the destination. The move is the service's
//! documented mechanism for atomic full-index replacement; readers never see
//! a half-written index. With `safe = true` the client polls the returned
//! task ids until the service reports them published. No retry on failure.

use std::time::Duration;

use anyhow::{bail, Result};
use reqwest::blocking::Client;

use crate::config::{Credentials, IndexConfig};
use crate::models::IndexDocument;

/// Destination index for a version: base name, separator, version name.
pub fn resolve_index_name(base: &str, version: &str) -> String {
    format!("{}-{}", base, version)
}

/// Synchronous client for the search service's index API.
pub struct SearchClient {
    http: Client,
    base_url: String,
    app_id: String,
    admin_key: String,
    safe: bool,
}

impl SearchClient {
    pub fn new(credentials: &Credentials, index: &IndexConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(index.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: format!("https://{}.algolia.net", credentials.app_id),
            app_id: credentials.app_id.clone(),
            admin_key: credentials.admin_key.clone(),
            safe: index.safe,
        })
    }

    /// Replace the entire contents of `index_name` with `docs`.
    ///
    /// An empty document set clears the index instead; the scratch-and-move
    /// path needs at least one write to create the scratch index.
    pub fn replace_all_objects(&self, index_name: &str, docs: &[IndexDocument]) -> Result<()> {
        if docs.is_empty() {
            let task_id = self.clear_index(index_name)?;
            if self.safe {
                self.wait_for_task(index_name, task_id)?;
            }
            return Ok(());
        }

        let scratch = format!("{}_tmp_{}", index_name, std::process::id());

        let batch_task = self.batch_add(&scratch, docs)?;
        if self.safe {
            self.wait_for_task(&scratch, batch_task)?;
        }

        let move_task = self.move_index(&scratch, index_name)?;
        if self.safe {
            self.wait_for_task(index_name, move_task)?;
        }

        Ok(())
    }

    /// `POST /1/indexes/{index}/batch` with one `addObject` per document.
    fn batch_add(&self, index_name: &str, docs: &[IndexDocument]) -> Result<i64> {
        let requests: Vec<serde_json::Value> = docs
            .iter()
            .map(|doc| {
                serde_json::json!({
                    "action": "addObject",
                    "body": doc,
                })
            })
            .collect();

        let body = serde_json::json!({ "requests": requests });
        let url = format!("{}/1/indexes/{}/batch", self.base_url, index_name);
        let json = self.post(&url, &body)?;
        task_id_from(&json)
    }

    /// `POST /1/indexes/{source}/operation` with a `move` onto the
    /// destination. Atomically swaps the destination's contents.
    fn move_index(&self, source: &str, destination: &str) -> Result<i64> {
        let body = serde_json::json!({
            "operation": "move",
            "destination": destination,
        });
        let url = format!("{}/1/indexes/{}/operation", self.base_url, source);
        let json = self.post(&url, &body)?;
        task_id_from(&json)
    }

    /// `POST /1/indexes/{index}/clear` — empty the index in one task.
    fn clear_index(&self, index_name: &str) -> Result<i64> {
        let url = format!("{}/1/indexes/{}/clear", self.base_url, index_name);
        let json = self.post(&url, &serde_json::json!({}))?;
        task_id_from(&json)
    }

    /// Poll `GET /1/indexes/{index}/task/{id}` until the service reports the
    /// task published.
    fn wait_for_task(&self, index_name: &str, task_id: i64) -> Result<()> {
        let url = format!(
            "{}/1/indexes/{}/task/{}",
            self.base_url, index_name, task_id
        );

        loop {
            let response = self
                .http
                .get(&url)
                .header("X-Algolia-Application-Id", &self.app_id)
                .header("X-Algolia-API-Key", &self.admin_key)
                .send()?;

            let status = response.status();
            if !status.is_success() {
                let body_text = response.text().unwrap_or_default();
                bail!("Search API error {}: {}", status, body_text);
            }

            let json: serde_json::Value = response.json()?;
            if json.get("status").and_then(|s| s.as_str()) == Some("published") {
                return Ok(());
            }

            std::thread::sleep(Duration::from_millis(200));
        }
    }

    fn post(&self, url: &str, body: &serde_json::Value) -> Result<serde_json::Value> {
        let response = self
            .http
            .post(url)
            .header("X-Algolia-Application-Id", &self.app_id)
            .header("X-Algolia-API-Key", &self.admin_key)
            .header("Content-Type", "application/json")
            .json(body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().unwrap_or_default();
            bail!("Search API error {}: {}", status, body_text);
        }

        Ok(response.json()?)
    }
}

fn task_id_from(json: &serde_json::Value) -> Result<i64> {
    json.get("taskID")
        .and_then(|t| t.as_i64())
        .ok_or_else(|| anyhow::anyhow!("Invalid search API response: missing taskID"))
}
