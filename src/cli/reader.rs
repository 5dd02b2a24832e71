use anyhow::Result;
use serde::Deserialize;

use super::common::ProviderEndpoint;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Config {
    pub source: ProviderEndpoint,
    pub dest: ProviderEndpoint,
    #[serde(default)]
    pub sync: SyncSection,
    #[serde(default)]
    pub actions: ActionsSection,
    #[serde(default)]
    pub polling: PollingSection,
    #[serde(default)]
    pub api_url: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeName {
    #[default]
    Manual,
    Scheduled,
}

/// Interval as typed by a person: a number, or text that may not be one.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum IntervalInput {
    Number(f64),
    Text(String),
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct SyncSection {
    #[serde(default)]
    pub mode: ModeName,
    #[serde(default)]
    pub interval_minutes: Option<IntervalInput>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum BranchInput {
    Text(String),
    List(Vec<String>),
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ActionsSection {
    pub migrate_repo: Option<bool>,
    pub migrate_branches: Option<bool>,
    pub migrate_tags: Option<bool>,
    pub migrate_issues: Option<bool>,
    pub migrate_prs: Option<bool>,
    pub migrate_users: Option<bool>,
    pub branches: Option<BranchInput>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct PollingSection {
    pub delay_ms: Option<u64>,
    pub max_attempts: Option<u32>,
    pub request_timeout_ms: Option<u64>,
}

pub fn read_config(config: &str) -> Result<Config> {
    let config: Config = serde_yaml::from_str(config)?;

    Ok(config)
}
