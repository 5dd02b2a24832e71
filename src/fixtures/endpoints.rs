use crate::actions::ActionFlags;
use crate::cli::{ProviderEndpoint, ProviderType};
use crate::controller::MigrationForm;
use crate::request::SyncMode;

pub fn github_source() -> ProviderEndpoint {
    ProviderEndpoint::new(
        ProviderType::Github,
        "ghp_source",
        "https://github.com/acme/widgets",
    )
}

pub fn gitlab_dest() -> ProviderEndpoint {
    ProviderEndpoint::new(
        ProviderType::Gitlab,
        "glpat_dest",
        "https://gitlab.com/acme/widgets",
    )
}

pub fn manual_form(branch_input: &str) -> MigrationForm {
    MigrationForm {
        source: github_source(),
        dest: gitlab_dest(),
        mode: SyncMode::Manual,
        actions: ActionFlags::default(),
        branch_input: branch_input.to_string(),
    }
}
