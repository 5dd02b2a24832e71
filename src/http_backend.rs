use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::error::BackendError;
use crate::provider::{HealthStatus, MigrationBackend, RepoSummary, StatusResponse, SubmitResponse};
use crate::request::{Interval, MigrationRequest};

/// Per-request timeout used by [`HttpBackend::new`].
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Talks to the migration service over HTTP.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Result<Self, BackendError> {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Every request fails with a transport error once `timeout` elapses.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, BackendError> {
        let client = Client::builder().timeout(timeout).build()?;
        Self::with_client(client, base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self, BackendError> {
        let parsed =
            Url::parse(base_url).map_err(|_| BackendError::InvalidUrl(base_url.to_string()))?;
        if parsed.cannot_be_a_base() {
            return Err(BackendError::InvalidUrl(base_url.to_string()));
        }

        Ok(HttpBackend {
            client,
            base_url: parsed,
        })
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, BackendError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| BackendError::InvalidUrl(self.base_url.to_string()))?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(BackendError::Status {
            status: status.as_u16(),
            detail: extract_detail(&body),
        });
    }

    serde_json::from_str(&body).map_err(|error| BackendError::Decode(error.to_string()))
}

/// Pulls the `detail` field out of an error body, rendering non-string values as JSON.
fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;

    match value.get("detail")? {
        Value::Null => None,
        Value::String(detail) if detail.trim().is_empty() => None,
        Value::String(detail) => Some(detail.clone()),
        other => Some(other.to_string()),
    }
}

#[async_trait]
impl MigrationBackend for HttpBackend {
    async fn submit_once(
        &self,
        request: &MigrationRequest,
    ) -> Result<SubmitResponse, BackendError> {
        let url = self.endpoint(&["migrate"])?;
        tracing::debug!(%url, "submitting one-shot migration");

        let response = self.client.post(url).json(request).send().await?;
        read_json(response).await
    }

    async fn submit_recurring(
        &self,
        request: &MigrationRequest,
        interval: Interval,
    ) -> Result<SubmitResponse, BackendError> {
        let url = self.endpoint(&["schedule"])?;
        tracing::debug!(%url, interval_minutes = interval.minutes(), "registering scheduled migration");

        let response = self
            .client
            .post(url)
            .query(&[("interval_minutes", interval.minutes())])
            .json(request)
            .send()
            .await?;
        read_json(response).await
    }

    async fn job_status(&self, job_id: &str) -> Result<StatusResponse, BackendError> {
        let url = self.endpoint(&["status", job_id])?;
        tracing::debug!(%url, "querying job status");

        let response = self.client.get(url).send().await?;
        read_json(response).await
    }

    async fn health(&self) -> Result<HealthStatus, BackendError> {
        let url = self.endpoint(&[""])?;

        let response = self.client.get(url).send().await?;
        read_json(response).await
    }

    async fn list_github_repos(&self, token: &str) -> Result<Vec<RepoSummary>, BackendError> {
        let url = self.endpoint(&["github", "repos"])?;
        tracing::debug!(%url, "listing GitHub repositories");

        let response = self
            .client
            .post(url)
            .json(&json!({ "token": token }))
            .send()
            .await?;
        read_json(response).await
    }
}
