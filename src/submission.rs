use std::sync::Arc;

use crate::error::{MissingField, SubmissionError, ValidationError};
use crate::event::EventLog;
use crate::provider::{HealthStatus, MigrationBackend, RepoSummary};
use crate::request::{MigrationRequest, SyncMode};

pub struct SubmissionClient {
    backend: Arc<dyn MigrationBackend>,
}

impl SubmissionClient {
    pub fn new(backend: Arc<dyn MigrationBackend>) -> Self {
        SubmissionClient { backend }
    }

    /// Sends `request` to the endpoint matching `mode` and returns the job id.
    ///
    /// Blank credentials are rejected before anything is sent.
    pub async fn submit(
        &self,
        request: &MigrationRequest,
        mode: SyncMode,
        log: &EventLog,
    ) -> Result<String, SubmissionError> {
        request.validate()?;

        let metadata = request.actions.flags().enabled_metadata();
        if !metadata.is_empty() {
            let requested = metadata
                .iter()
                .map(|aspect| aspect.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            log.push(format!(
                "Note: {} are only migrated between GitHub, GitLab and Bitbucket; the backend decides what is supported",
                requested
            ));
        }

        let response = match mode {
            SyncMode::Manual => self.backend.submit_once(request).await,
            SyncMode::Scheduled(interval) => {
                self.backend.submit_recurring(request, interval).await
            }
        }
        .map_err(|error| {
            tracing::warn!(%error, "migration submission failed");
            SubmissionError::from_backend(&error)
        })?;

        let job_id = response
            .job_id()
            .ok_or_else(SubmissionError::missing_job_id)?
            .to_string();

        match mode {
            SyncMode::Manual => log.push_for(&job_id, "Migration started"),
            SyncMode::Scheduled(interval) => log.push_for(
                &job_id,
                format!("Scheduled migration registered (every {} min)", interval),
            ),
        }
        log.push_for(&job_id, format!("Job ID: {}", job_id));

        Ok(job_id)
    }

    pub async fn health(&self) -> Result<HealthStatus, SubmissionError> {
        self.backend
            .health()
            .await
            .map_err(|error| SubmissionError::from_query(&error))
    }

    pub async fn github_repos(&self, token: &str) -> Result<Vec<RepoSummary>, SubmissionError> {
        if token.trim().is_empty() {
            return Err(ValidationError {
                missing: vec![MissingField::GithubToken],
            }
            .into());
        }

        self.backend
            .list_github_repos(token.trim())
            .await
            .map_err(|error| SubmissionError::from_query(&error))
    }
}
