//! cartco CLI - Vehicle lifetime TCO client
//!
//! Usage:
//!   cartco estimate --make Honda --model Civic --year 2016
//!   cartco form                Interactive form, re-submittable
//!   cartco health              Probe the estimation service
//!   cartco config              Show effective configuration

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (warn)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .compact()
                .with_writer(std::io::stderr),
        )
        .init();

    let config = commands::load_config(cli.config.as_deref(), cli.api_url.as_deref())?;
    let opts = commands::render_options(&config, cli.no_color);

    match cli.command {
        Commands::Estimate {
            make,
            model,
            year,
            json,
        } => {
            let backend = commands::build_backend(&config)?;
            let ok = commands::cmd_estimate(backend, &make, &model, &year, json, &opts).await?;
            if !ok {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Form => {
            let backend = commands::build_backend(&config)?;
            commands::cmd_form(backend, &opts).await
        }
        Commands::Health => {
            let backend = commands::build_backend(&config)?;
            if !commands::cmd_health(&backend).await {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Config => commands::cmd_config(&config),
    }
}
