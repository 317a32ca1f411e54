//! privilege-admin - operator CLI for hotel page privileges
//!
//! Edits entitlements, role grants and user overrides, and answers permission questions.

#![allow(missing_docs)]

mod cli;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use hotel_privileges::utils::logging::init_logging;
use hotel_privileges::{Config, PrivilegeService};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is not an error
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Alternate format prints the whole context chain
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli).await?;
    init_logging(&config.logging)?;

    let service = PrivilegeService::from_config(&config)
        .await
        .context("Failed to initialize privilege service")?;

    cli::commands::execute(&service, cli.command).await
}

/// File configuration, then environment, then command line flags
async fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let base = match &cli.config {
        Some(path) => Config::from_file(path)
            .await
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => Config::default(),
    };

    let config = cli.apply_overrides(base.with_env()?);
    config.validate()?;
    Ok(config)
}
