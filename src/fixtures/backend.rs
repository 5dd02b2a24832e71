use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;

use crate::error::BackendError;
use crate::provider::{HealthStatus, MigrationBackend, RepoSummary, StatusResponse, SubmitResponse};
use crate::request::{Interval, MigrationRequest};

#[derive(Clone, Debug)]
pub enum StatusReply {
    Status(Value),
    Unavailable,
    /// The query never returns.
    Hang,
}

pub fn status(status: &str) -> StatusReply {
    StatusReply::Status(json!({ "status": status }))
}

#[derive(Clone, Debug, PartialEq)]
pub enum Submission {
    Once(MigrationRequest),
    Recurring(MigrationRequest, Interval),
}

/// In-memory backend that plays back scripted status replies.
#[derive(Debug)]
pub struct ScriptedBackend {
    job_id: Option<String>,
    rejection: Option<(u16, Option<String>)>,
    replies: Mutex<VecDeque<StatusReply>>,
    fallback: Option<StatusReply>,
    status_calls: AtomicUsize,
    cancel_on: Option<(usize, CancellationToken)>,
    submissions: Mutex<Vec<Submission>>,
}

impl Default for ScriptedBackend {
    fn default() -> Self {
        ScriptedBackend {
            job_id: Some("job-1".to_string()),
            rejection: None,
            replies: Mutex::new(VecDeque::new()),
            fallback: None,
            status_calls: AtomicUsize::new(0),
            cancel_on: None,
            submissions: Mutex::new(Vec::new()),
        }
    }
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_job_id(self, job_id: Option<&str>) -> Self {
        ScriptedBackend {
            job_id: job_id.map(str::to_string),
            ..self
        }
    }

    pub fn rejecting(self, status: u16, detail: Option<&str>) -> Self {
        ScriptedBackend {
            rejection: Some((status, detail.map(str::to_string))),
            ..self
        }
    }

    pub fn then(self, reply: StatusReply) -> Self {
        self.replies
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push_back(reply);
        self
    }

    /// Reply used once the scripted queue is empty.
    pub fn then_forever(self, reply: StatusReply) -> Self {
        ScriptedBackend {
            fallback: Some(reply),
            ..self
        }
    }

    /// Cancels `token` while serving the `call`-th status query (1-based).
    pub fn cancelling_on(self, call: usize, token: CancellationToken) -> Self {
        ScriptedBackend {
            cancel_on: Some((call, token)),
            ..self
        }
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    pub fn submissions(&self) -> Vec<Submission> {
        self.submissions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn record(&self, submission: Submission) -> Result<SubmitResponse, BackendError> {
        self.submissions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(submission);

        match &self.rejection {
            Some((status, detail)) => Err(BackendError::Status {
                status: *status,
                detail: detail.clone(),
            }),
            None => Ok(SubmitResponse {
                job_id: self.job_id.clone(),
            }),
        }
    }
}

#[async_trait]
impl MigrationBackend for ScriptedBackend {
    async fn submit_once(
        &self,
        request: &MigrationRequest,
    ) -> Result<SubmitResponse, BackendError> {
        self.record(Submission::Once(request.clone()))
    }

    async fn submit_recurring(
        &self,
        request: &MigrationRequest,
        interval: Interval,
    ) -> Result<SubmitResponse, BackendError> {
        self.record(Submission::Recurring(request.clone(), interval))
    }

    async fn job_status(&self, _job_id: &str) -> Result<StatusResponse, BackendError> {
        let call = self.status_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some((cancel_at, token)) = &self.cancel_on {
            if *cancel_at == call {
                token.cancel();
            }
        }

        let next = self
            .replies
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front()
            .or_else(|| self.fallback.clone());

        match next {
            Some(StatusReply::Status(value)) => serde_json::from_value(value)
                .map_err(|error| BackendError::Decode(error.to_string())),
            Some(StatusReply::Hang) => std::future::pending().await,
            Some(StatusReply::Unavailable) | None => Err(BackendError::Status {
                status: 503,
                detail: None,
            }),
        }
    }

    async fn health(&self) -> Result<HealthStatus, BackendError> {
        Ok(HealthStatus {
            status: "Git Migrator is running".to_string(),
        })
    }

    async fn list_github_repos(&self, _token: &str) -> Result<Vec<RepoSummary>, BackendError> {
        Ok(Vec::new())
    }
}
