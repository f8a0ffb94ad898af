use anyhow::{Context, Result, anyhow};
use reqwest::Client;
use tracing::debug;

use crate::{model::AssessmentResponse, query::AssessmentQuery};

/// Client for a remote `GET /assess` endpoint.
#[derive(Debug, Clone)]
pub struct AssessmentClient {
    base_url: String,
    http: Client,
}

impl AssessmentClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http: Client::new() }
    }

    /// Use a preconfigured HTTP client (proxies, timeouts, TLS roots).
    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn fetch(&self, query: &AssessmentQuery) -> Result<AssessmentResponse> {
        let url = format!("{}/assess", self.base_url);
        debug!(%url, ?query, "requesting remote assessment");

        let res = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .with_context(|| {
                format!("Failed to send request to assessment server at {}", self.base_url)
            })?;

        let status = res.status();
        let body = res.text().await.context("Failed to read assessment response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Assessment request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        serde_json::from_str(&body).context("Failed to parse assessment JSON")
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
