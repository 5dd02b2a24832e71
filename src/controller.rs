use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::actions::ActionFlags;
use crate::cli::ProviderEndpoint;
use crate::clock::Clock;
use crate::error::{SubmissionError, ValidationError};
use crate::event::EventLog;
use crate::poller::{PollConfig, PollOutcome, StatusPoller};
use crate::provider::MigrationBackend;
use crate::request::{build_request, validate_endpoints, SyncMode};
use crate::submission::SubmissionClient;

/// Everything a user fills in before pressing "migrate".
#[derive(Clone, Debug, PartialEq)]
pub struct MigrationForm {
    pub source: ProviderEndpoint,
    pub dest: ProviderEndpoint,
    pub mode: SyncMode,
    pub actions: ActionFlags,
    pub branch_input: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum RunOutcome {
    Rejected(ValidationError),
    SubmissionFailed { detail: String },
    /// A recurring registration; never polled.
    Scheduled { job_id: String },
    /// A one-shot job that was submitted but not followed.
    Submitted { job_id: String },
    Finished { job_id: String, outcome: PollOutcome },
}

impl RunOutcome {
    pub fn job_id(&self) -> Option<&str> {
        match self {
            RunOutcome::Scheduled { job_id }
            | RunOutcome::Submitted { job_id }
            | RunOutcome::Finished { job_id, .. } => Some(job_id),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        match self {
            RunOutcome::Scheduled { .. } | RunOutcome::Submitted { .. } => true,
            RunOutcome::Finished { outcome, .. } => outcome.is_success(),
            _ => false,
        }
    }
}

/// Drives one submission attempt from form to terminal outcome.
///
/// Errors never escape `run`; each one ends as a log line and a [`RunOutcome`].
pub struct MigrationController {
    client: SubmissionClient,
    poller: StatusPoller,
    log: EventLog,
}

impl MigrationController {
    pub fn new(
        backend: Arc<dyn MigrationBackend>,
        clock: Arc<dyn Clock>,
        config: PollConfig,
    ) -> Self {
        MigrationController {
            client: SubmissionClient::new(backend.clone()),
            poller: StatusPoller::new(backend, clock, config),
            log: EventLog::new(),
        }
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// Submits the form and, for manual runs, polls the job to a terminal state.
    pub async fn run(&self, form: &MigrationForm, cancel: &CancellationToken) -> RunOutcome {
        let job_id = match self.start(form).await {
            Ok(job_id) => job_id,
            Err(outcome) => return outcome,
        };

        match form.mode {
            SyncMode::Scheduled(_) => RunOutcome::Scheduled { job_id },
            SyncMode::Manual => {
                let outcome = self.poller.poll(&job_id, &self.log, cancel).await;
                tracing::info!(job_id = %job_id, ?outcome, "poll sequence finished");
                RunOutcome::Finished { job_id, outcome }
            }
        }
    }

    /// Submits the form without following the job.
    pub async fn submit(&self, form: &MigrationForm) -> RunOutcome {
        match self.start(form).await {
            Ok(job_id) if form.mode.is_manual() => RunOutcome::Submitted { job_id },
            Ok(job_id) => RunOutcome::Scheduled { job_id },
            Err(outcome) => outcome,
        }
    }

    async fn start(&self, form: &MigrationForm) -> Result<String, RunOutcome> {
        self.log.reset();

        if let Err(error) = validate_endpoints(&form.source, &form.dest) {
            self.log.push(format!("Error: {}", error));
            return Err(RunOutcome::Rejected(error));
        }

        let request = build_request(&form.source, &form.dest, form.actions, &form.branch_input);
        tracing::debug!(
            source = %form.source.provider,
            dest = %form.dest.provider,
            branches = request.actions.specific_branches.len(),
            "built migration request"
        );

        self.client
            .submit(&request, form.mode, &self.log)
            .await
            .map_err(|error| {
                self.log.push(format!("Error: {}", error));
                match error {
                    SubmissionError::Validation(error) => RunOutcome::Rejected(error),
                    SubmissionError::Rejected { detail } => {
                        RunOutcome::SubmissionFailed { detail }
                    }
                }
            })
    }
}
