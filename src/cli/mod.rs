pub mod common;
pub mod parser;
pub mod reader;

pub use common::*;
pub use parser::{parse_config, resolve_api_url, ParsedConfig, API_URL_ENV, DEFAULT_API_URL};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use reader::read_config;

#[derive(Parser)]
#[clap(name = "git-migrator", version, about = "Drive repository migrations between Git providers")]
pub struct Args {
    /// Base URL of the migration backend
    #[clap(long, global = true)]
    pub api_url: Option<String>,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Submit a migration described by a YAML file
    Migrate {
        #[clap(short, long, parse(from_os_str))]
        config: std::path::PathBuf,

        /// Do not follow a manual job after submitting it
        #[clap(long)]
        no_wait: bool,
    },
    /// Check that the backend is up
    Health,
    /// List the GitHub repositories a token can see
    Repos {
        /// Falls back to GITHUB_TOKEN
        #[clap(short, long)]
        token: Option<String>,
    },
}

pub fn load_config(path: &std::path::Path) -> Result<ParsedConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("could not read file `{:?}`", path))?;

    let config = read_config(&content)
        .with_context(|| format!("could not parse config `{:?}`", path))?;

    Ok(parse_config(config))
}
