use std::fmt;

use serde::Serialize;

use crate::actions::{ActionFlags, ActionSelection};
use crate::branches::normalize_branches;
use crate::cli::{ProviderEndpoint, ProviderType};
use crate::error::{MissingField, ValidationError};

/// Minutes between scheduled runs. Always a whole number between one minute and one year.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Interval(u64);

impl Interval {
    pub const MIN: Interval = Interval(1);
    pub const MAX: Interval = Interval(365 * 24 * 60);

    /// Floors finite values and replaces anything below one (or not finite) with one.
    /// Values beyond [`Interval::MAX`] are capped to it.
    pub fn coerce(minutes: f64) -> Self {
        if !minutes.is_finite() || minutes < 1.0 {
            return Interval::MIN;
        }
        if minutes >= Interval::MAX.0 as f64 {
            return Interval::MAX;
        }
        Interval(minutes.floor() as u64)
    }

    pub fn coerce_str(minutes: &str) -> Self {
        minutes
            .trim()
            .parse::<f64>()
            .map(Interval::coerce)
            .unwrap_or(Interval::MIN)
    }

    pub fn minutes(self) -> u64 {
        self.0
    }
}

impl Default for Interval {
    fn default() -> Self {
        Interval(60)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncMode {
    Manual,
    Scheduled(Interval),
}

impl SyncMode {
    pub fn is_manual(self) -> bool {
        matches!(self, SyncMode::Manual)
    }
}

/// A complete, immutable description of one migration.
#[derive(Clone, Debug, PartialEq)]
pub struct MigrationRequest {
    pub source: ProviderEndpoint,
    pub dest: ProviderEndpoint,
    pub actions: ActionSelection,
}

#[derive(Serialize)]
struct MigrationPayload<'a> {
    source_type: ProviderType,
    source_token: &'a str,
    source_repo_url: &'a str,
    dest_type: ProviderType,
    dest_token: &'a str,
    dest_repo_url: &'a str,
    actions: &'a ActionSelection,
}

impl Serialize for MigrationRequest {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        MigrationPayload {
            source_type: self.source.provider,
            source_token: &self.source.token,
            source_repo_url: &self.source.repo_url,
            dest_type: self.dest.provider,
            dest_token: &self.dest.token,
            dest_repo_url: &self.dest.repo_url,
            actions: &self.actions,
        }
        .serialize(serializer)
    }
}

impl MigrationRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_endpoints(&self.source, &self.dest)
    }
}

/// Checks that both endpoints carry a token and a repository URL.
pub fn validate_endpoints(
    source: &ProviderEndpoint,
    dest: &ProviderEndpoint,
) -> Result<(), ValidationError> {
    let mut missing = Vec::new();

    if !source.has_token() {
        missing.push(MissingField::SourceToken);
    }
    if !source.has_repo_url() {
        missing.push(MissingField::SourceRepoUrl);
    }
    if !dest.has_token() {
        missing.push(MissingField::DestToken);
    }
    if !dest.has_repo_url() {
        missing.push(MissingField::DestRepoUrl);
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { missing })
    }
}

/// Builds the request the backend expects. The branch subset is derived from
/// `branch_input` here rather than stored on the flags.
pub fn build_request(
    source: &ProviderEndpoint,
    dest: &ProviderEndpoint,
    flags: ActionFlags,
    branch_input: &str,
) -> MigrationRequest {
    MigrationRequest {
        source: source.clone(),
        dest: dest.clone(),
        actions: ActionSelection::new(flags, normalize_branches(branch_input)),
    }
}
