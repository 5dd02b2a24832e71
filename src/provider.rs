use std::fmt;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::BackendError;
use crate::request::{Interval, MigrationRequest};

/// The remote migration service as the controller sees it.
#[async_trait]
pub trait MigrationBackend: Send + Sync {
    /// `POST /migrate`
    async fn submit_once(&self, request: &MigrationRequest)
        -> Result<SubmitResponse, BackendError>;

    /// `POST /schedule?interval_minutes={N}`
    async fn submit_recurring(
        &self,
        request: &MigrationRequest,
        interval: Interval,
    ) -> Result<SubmitResponse, BackendError>;

    /// `GET /status/{job_id}`
    async fn job_status(&self, job_id: &str) -> Result<StatusResponse, BackendError>;

    /// `GET /`
    async fn health(&self) -> Result<HealthStatus, BackendError>;

    /// `POST /github/repos`
    async fn list_github_repos(&self, token: &str) -> Result<Vec<RepoSummary>, BackendError>;
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct SubmitResponse {
    #[serde(default)]
    pub job_id: Option<String>,
}

impl SubmitResponse {
    /// The job id, unless the backend left it out or sent an empty one.
    pub fn job_id(&self) -> Option<&str> {
        self.job_id.as_deref().filter(|id| !id.is_empty())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    Scheduled,
    NotFound,
    Other(String),
}

impl From<String> for JobStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "pending" => JobStatus::Pending,
            "processing" => JobStatus::Processing,
            "completed" => JobStatus::Completed,
            "failed" => JobStatus::Failed,
            "scheduled" => JobStatus::Scheduled,
            "not_found" => JobStatus::NotFound,
            _ => JobStatus::Other(status),
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Processing => write!(f, "processing"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
            Self::Scheduled => write!(f, "scheduled"),
            Self::NotFound => write!(f, "not_found"),
            Self::Other(status) => write!(f, "{}", status),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct StatusResponse {
    pub status: JobStatus,
    #[serde(default)]
    pub results: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RepoSummary {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
}
