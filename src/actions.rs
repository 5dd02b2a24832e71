use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Aspect {
    Repo,
    Branches,
    Tags,
    Issues,
    PullRequests,
    Users,
}

impl Aspect {
    pub const ALL: [Aspect; 6] = [
        Aspect::Repo,
        Aspect::Branches,
        Aspect::Tags,
        Aspect::Issues,
        Aspect::PullRequests,
        Aspect::Users,
    ];

    /// Issues, pull requests and users travel through provider APIs rather than git.
    pub fn is_metadata(self) -> bool {
        matches!(self, Aspect::Issues | Aspect::PullRequests | Aspect::Users)
    }
}

impl fmt::Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Repo => write!(f, "repository"),
            Self::Branches => write!(f, "branches"),
            Self::Tags => write!(f, "tags"),
            Self::Issues => write!(f, "issues"),
            Self::PullRequests => write!(f, "pull requests"),
            Self::Users => write!(f, "users"),
        }
    }
}

/// Which parts of a repository to migrate.
///
/// Every update returns a new value; only the named flag changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionFlags {
    pub migrate_repo: bool,
    pub migrate_branches: bool,
    pub migrate_tags: bool,
    pub migrate_issues: bool,
    pub migrate_prs: bool,
    pub migrate_users: bool,
}

impl Default for ActionFlags {
    fn default() -> Self {
        ActionFlags {
            migrate_repo: true,
            migrate_branches: true,
            migrate_tags: true,
            migrate_issues: false,
            migrate_prs: false,
            migrate_users: false,
        }
    }
}

impl ActionFlags {
    pub fn get(&self, aspect: Aspect) -> bool {
        match aspect {
            Aspect::Repo => self.migrate_repo,
            Aspect::Branches => self.migrate_branches,
            Aspect::Tags => self.migrate_tags,
            Aspect::Issues => self.migrate_issues,
            Aspect::PullRequests => self.migrate_prs,
            Aspect::Users => self.migrate_users,
        }
    }

    pub fn with(self, aspect: Aspect, enabled: bool) -> Self {
        match aspect {
            Aspect::Repo => ActionFlags {
                migrate_repo: enabled,
                ..self
            },
            Aspect::Branches => ActionFlags {
                migrate_branches: enabled,
                ..self
            },
            Aspect::Tags => ActionFlags {
                migrate_tags: enabled,
                ..self
            },
            Aspect::Issues => ActionFlags {
                migrate_issues: enabled,
                ..self
            },
            Aspect::PullRequests => ActionFlags {
                migrate_prs: enabled,
                ..self
            },
            Aspect::Users => ActionFlags {
                migrate_users: enabled,
                ..self
            },
        }
    }

    pub fn toggled(self, aspect: Aspect) -> Self {
        self.with(aspect, !self.get(aspect))
    }

    pub fn enabled_metadata(&self) -> Vec<Aspect> {
        Aspect::ALL
            .into_iter()
            .filter(|aspect| aspect.is_metadata() && self.get(*aspect))
            .collect()
    }

    pub fn wants_metadata(&self) -> bool {
        !self.enabled_metadata().is_empty()
    }
}

/// The `actions` object as the backend receives it.
///
/// `specific_branches` is always serialized, an empty list meaning "all branches".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSelection {
    pub migrate_repo: bool,
    pub migrate_branches: bool,
    pub specific_branches: Vec<String>,
    pub migrate_tags: bool,
    pub migrate_issues: bool,
    pub migrate_prs: bool,
    pub migrate_users: bool,
}

impl ActionSelection {
    pub fn new(flags: ActionFlags, specific_branches: Vec<String>) -> Self {
        ActionSelection {
            migrate_repo: flags.migrate_repo,
            migrate_branches: flags.migrate_branches,
            specific_branches,
            migrate_tags: flags.migrate_tags,
            migrate_issues: flags.migrate_issues,
            migrate_prs: flags.migrate_prs,
            migrate_users: flags.migrate_users,
        }
    }

    pub fn flags(&self) -> ActionFlags {
        ActionFlags {
            migrate_repo: self.migrate_repo,
            migrate_branches: self.migrate_branches,
            migrate_tags: self.migrate_tags,
            migrate_issues: self.migrate_issues,
            migrate_prs: self.migrate_prs,
            migrate_users: self.migrate_users,
        }
    }
}
