use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::clock::Clock;
use crate::event::EventLog;
use crate::provider::{JobStatus, MigrationBackend};

pub const DEFAULT_POLL_DELAY: Duration = Duration::from_millis(1500);
pub const DEFAULT_MAX_ATTEMPTS: u32 = 40;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollConfig {
    pub delay: Duration,
    pub max_attempts: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        PollConfig {
            delay: DEFAULT_POLL_DELAY,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Where a poll sequence ended up.
#[derive(Clone, Debug, PartialEq)]
pub enum PollOutcome {
    Completed { results: Option<Value> },
    Failed { error: String },
    /// The job is unknown, or its status could not be read.
    NotFound,
    /// The attempt budget ran out. The job may still be running server-side.
    TimedOut { attempts: u32 },
    Cancelled,
}

impl PollOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, PollOutcome::Completed { .. })
    }
}

/// Follows a one-shot job until it reaches a terminal status or the budget runs out.
pub struct StatusPoller {
    backend: Arc<dyn MigrationBackend>,
    clock: Arc<dyn Clock>,
    config: PollConfig,
}

impl StatusPoller {
    pub fn new(
        backend: Arc<dyn MigrationBackend>,
        clock: Arc<dyn Clock>,
        config: PollConfig,
    ) -> Self {
        StatusPoller {
            backend,
            clock,
            config,
        }
    }

    pub async fn poll(
        &self,
        job_id: &str,
        log: &EventLog,
        cancel: &CancellationToken,
    ) -> PollOutcome {
        let max_attempts = self.config.max_attempts;

        for attempt in 1..=max_attempts {
            if cancel.is_cancelled() {
                return cancelled(job_id, log);
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return cancelled(job_id, log),
                _ = self.clock.sleep(self.config.delay) => {}
            }

            let reply = tokio::select! {
                biased;
                _ = cancel.cancelled() => return cancelled(job_id, log),
                reply = self.backend.job_status(job_id) => reply,
            };

            let response = match reply {
                Ok(response) => response,
                Err(error) => {
                    tracing::warn!(job_id, %error, "status query failed");
                    log.push_for(job_id, format!("Status check failed for job {}", job_id));
                    return PollOutcome::NotFound;
                }
            };

            match response.status {
                JobStatus::NotFound => {
                    tracing::warn!(job_id, "backend does not know this job");
                    log.push_for(job_id, format!("Status check failed for job {}", job_id));
                    return PollOutcome::NotFound;
                }
                JobStatus::Completed => {
                    log.push_for(job_id, format!("Migration completed (job {})", job_id));
                    if let Some(results) = &response.results {
                        log.push_for(job_id, format!("Results: {}", results));
                    }
                    return PollOutcome::Completed {
                        results: response.results,
                    };
                }
                JobStatus::Failed => {
                    let error = response
                        .error
                        .filter(|error| !error.trim().is_empty())
                        .unwrap_or_else(|| "unknown error".to_string());
                    log.push_for(job_id, format!("Migration failed: {}", error));
                    return PollOutcome::Failed { error };
                }
                status => {
                    log.push_for(
                        job_id,
                        format!("Status: {} ({}/{})", status, attempt, max_attempts),
                    );
                }
            }
        }

        log.push_for(
            job_id,
            format!(
                "Stopped polling job {} after {} attempts (timeout); it may still be running",
                job_id, max_attempts
            ),
        );
        PollOutcome::TimedOut {
            attempts: max_attempts,
        }
    }
}

fn cancelled(job_id: &str, log: &EventLog) -> PollOutcome {
    log.push_for(job_id, format!("Polling cancelled for job {}", job_id));
    PollOutcome::Cancelled
}
