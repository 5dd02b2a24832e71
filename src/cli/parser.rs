use std::time::Duration;

use super::reader::{self, ActionsSection, BranchInput, IntervalInput, ModeName};
use crate::actions::{ActionFlags, Aspect};
use crate::controller::MigrationForm;
use crate::http_backend::DEFAULT_REQUEST_TIMEOUT;
use crate::poller::PollConfig;
use crate::request::{Interval, SyncMode};

pub const API_URL_ENV: &str = "GIT_MIGRATOR_API_URL";
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

#[derive(Clone, Debug, PartialEq)]
pub struct ParsedConfig {
    pub form: MigrationForm,
    pub polling: PollConfig,
    pub request_timeout: Duration,
    pub api_url: Option<String>,
}

pub fn parse_config(config: reader::Config) -> ParsedConfig {
    let mode = match config.sync.mode {
        ModeName::Manual => SyncMode::Manual,
        ModeName::Scheduled => SyncMode::Scheduled(parse_interval(config.sync.interval_minutes)),
    };

    let defaults = PollConfig::default();
    let polling = PollConfig {
        delay: config
            .polling
            .delay_ms
            .map(Duration::from_millis)
            .unwrap_or(defaults.delay),
        max_attempts: config
            .polling
            .max_attempts
            .unwrap_or(defaults.max_attempts)
            .max(1),
    };

    let request_timeout = config
        .polling
        .request_timeout_ms
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT);

    ParsedConfig {
        form: MigrationForm {
            source: config.source,
            dest: config.dest,
            mode,
            actions: parse_flags(&config.actions),
            branch_input: parse_branch_input(config.actions.branches),
        },
        polling,
        request_timeout,
        api_url: config.api_url,
    }
}

fn parse_interval(input: Option<IntervalInput>) -> Interval {
    match input {
        Some(IntervalInput::Number(minutes)) => Interval::coerce(minutes),
        Some(IntervalInput::Text(minutes)) => Interval::coerce_str(&minutes),
        None => Interval::default(),
    }
}

fn parse_flags(actions: &ActionsSection) -> ActionFlags {
    [
        (Aspect::Repo, actions.migrate_repo),
        (Aspect::Branches, actions.migrate_branches),
        (Aspect::Tags, actions.migrate_tags),
        (Aspect::Issues, actions.migrate_issues),
        (Aspect::PullRequests, actions.migrate_prs),
        (Aspect::Users, actions.migrate_users),
    ]
    .into_iter()
    .fold(ActionFlags::default(), |flags, (aspect, value)| match value {
        Some(enabled) => flags.with(aspect, enabled),
        None => flags,
    })
}

fn parse_branch_input(input: Option<BranchInput>) -> String {
    match input {
        Some(BranchInput::Text(text)) => text,
        Some(BranchInput::List(branches)) => branches.join("\n"),
        None => String::new(),
    }
}

/// Picks the backend address: flag, then environment, then config file, then default.
/// Blank values are skipped.
pub fn resolve_api_url(
    flag: Option<&str>,
    env: Option<&str>,
    file: Option<&str>,
) -> String {
    [flag, env, file]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|url| !url.is_empty())
        .unwrap_or(DEFAULT_API_URL)
        .to_string()
}
