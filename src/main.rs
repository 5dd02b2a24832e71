use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use git_migrator::cli::{self, Args, Command};
use git_migrator::clock::TokioClock;
use git_migrator::controller::MigrationController;
use git_migrator::http_backend::HttpBackend;
use git_migrator::submission::SubmissionClient;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    match inner_main().await {
        Ok(true) => std::process::exit(0),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            tracing::error!(error = ?e);
            std::process::exit(1);
        }
    }
}

async fn inner_main() -> Result<bool> {
    let args = Args::parse();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let env_url = std::env::var(cli::API_URL_ENV).ok();

    match args.command {
        Command::Migrate { config, no_wait } => {
            let parsed = cli::load_config(&config)?;
            let api_url = cli::resolve_api_url(
                args.api_url.as_deref(),
                env_url.as_deref(),
                parsed.api_url.as_deref(),
            );
            tracing::debug!("Using migration backend at {}", api_url);

            migrate(&api_url, parsed, no_wait).await
        }
        Command::Health => {
            let client = client(&cli::resolve_api_url(
                args.api_url.as_deref(),
                env_url.as_deref(),
                None,
            ))?;
            let health = client.health().await?;
            println!("{}", health.status);
            Ok(true)
        }
        Command::Repos { token } => {
            let token = token
                .or_else(|| std::env::var("GITHUB_TOKEN").ok())
                .ok_or_else(|| anyhow!("pass --token or set GITHUB_TOKEN"))?;
            let client = client(&cli::resolve_api_url(
                args.api_url.as_deref(),
                env_url.as_deref(),
                None,
            ))?;

            for repo in client.github_repos(&token).await? {
                match repo.description {
                    Some(description) => println!("{}\t{}\t{}", repo.name, repo.url, description),
                    None => println!("{}\t{}", repo.name, repo.url),
                }
            }
            Ok(true)
        }
    }
}

fn client(api_url: &str) -> Result<SubmissionClient> {
    let backend = HttpBackend::new(api_url).context("configuring migration backend")?;
    Ok(SubmissionClient::new(Arc::new(backend)))
}

async fn migrate(api_url: &str, parsed: cli::ParsedConfig, no_wait: bool) -> Result<bool> {
    let backend = HttpBackend::with_timeout(api_url, parsed.request_timeout)
        .context("configuring migration backend")?;
    let controller = MigrationController::new(
        Arc::new(backend),
        Arc::new(TokioClock),
        parsed.polling,
    );

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let outcome = if no_wait {
        controller.submit(&parsed.form).await
    } else {
        controller.run(&parsed.form, &cancel).await
    };

    for line in controller.log().lines() {
        println!("{}", line);
    }

    Ok(outcome.is_success())
}
