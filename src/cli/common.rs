use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    Github,
    Gitlab,
    Bitbucket,
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Github => write!(f, "github"),
            Self::Gitlab => write!(f, "gitlab"),
            Self::Bitbucket => write!(f, "bitbucket"),
        }
    }
}

/// One side of a migration: where the repository lives and how to reach it.
#[derive(Clone, PartialEq, Deserialize)]
pub struct ProviderEndpoint {
    #[serde(rename = "type")]
    pub provider: ProviderType,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub repo_url: String,
}

impl ProviderEndpoint {
    pub fn new(provider: ProviderType, token: &str, repo_url: &str) -> Self {
        ProviderEndpoint {
            provider,
            token: token.to_string(),
            repo_url: repo_url.to_string(),
        }
    }

    pub fn has_token(&self) -> bool {
        !self.token.trim().is_empty()
    }

    pub fn has_repo_url(&self) -> bool {
        !self.repo_url.trim().is_empty()
    }
}

// Tokens must never end up in logs.
impl fmt::Debug for ProviderEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderEndpoint")
            .field("provider", &self.provider)
            .field("token", &"<redacted>")
            .field("repo_url", &self.repo_url)
            .finish()
    }
}
