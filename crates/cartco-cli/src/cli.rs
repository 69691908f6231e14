//! CLI argument definitions using clap
//!
//! This module contains the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// cartco - Estimate what a car really costs over its lifetime
#[derive(Parser)]
#[command(name = "cartco")]
#[command(about = "Vehicle lifetime total-cost-of-ownership client", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Estimation service base URL
    ///
    /// Overrides the config file and the CARTCO_API_URL environment variable.
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file path (defaults to ~/.config/cartco/config.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output (also honors NO_COLOR)
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Estimate the lifetime cost of one vehicle
    Estimate {
        /// Vehicle make (e.g., Honda)
        #[arg(long)]
        make: String,

        /// Vehicle model (e.g., Civic)
        #[arg(long)]
        model: String,

        /// Model year (e.g., 2016)
        #[arg(long, allow_hyphen_values = true)]
        year: String,

        /// Print the raw result as JSON instead of the report
        #[arg(long)]
        json: bool,
    },

    /// Fill in the form interactively and estimate repeatedly
    Form,

    /// Check whether the estimation service is up
    Health,

    /// Show the effective configuration
    Config,
}
