use std::fmt;

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MissingField {
    SourceToken,
    SourceRepoUrl,
    DestToken,
    DestRepoUrl,
    GithubToken,
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceToken => write!(f, "source token"),
            Self::SourceRepoUrl => write!(f, "source repository URL"),
            Self::DestToken => write!(f, "destination token"),
            Self::DestRepoUrl => write!(f, "destination repository URL"),
            Self::GithubToken => write!(f, "GitHub token"),
        }
    }
}

/// Required fields are blank. Raised before anything touches the network.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("please fill in all tokens and repository URLs (missing: {})", join(.missing))]
pub struct ValidationError {
    pub missing: Vec<MissingField>,
}

fn join(fields: &[MissingField]) -> String {
    fields
        .iter()
        .map(|field| field.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A failed call to the migration backend.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("invalid backend URL `{0}`")]
    InvalidUrl(String),
    #[error("could not reach the migration backend: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend responded with {status}")]
    Status { status: u16, detail: Option<String> },
    #[error("unexpected response from the backend: {0}")]
    Decode(String),
}

impl BackendError {
    pub fn detail(&self) -> Option<&str> {
        match self {
            BackendError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{detail}")]
    Rejected { detail: String },
}

impl SubmissionError {
    pub const GENERIC: &'static str = "Migration failed to start";

    pub(crate) fn from_backend(error: &BackendError) -> Self {
        let detail = match error.detail() {
            Some(detail) => detail.to_string(),
            None => match error {
                BackendError::Transport(_) => format!("{}: {}", Self::GENERIC, error),
                _ => Self::GENERIC.to_string(),
            },
        };
        SubmissionError::Rejected { detail }
    }

    /// For auxiliary queries, where "failed to start" makes no sense.
    pub(crate) fn from_query(error: &BackendError) -> Self {
        let detail = error
            .detail()
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        SubmissionError::Rejected { detail }
    }

    pub(crate) fn missing_job_id() -> Self {
        SubmissionError::Rejected {
            detail: Self::GENERIC.to_string(),
        }
    }
}
