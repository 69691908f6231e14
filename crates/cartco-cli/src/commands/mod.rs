//! CLI command implementations
//!
//! Commands are organized by what they do:
//! - `estimate` - One-shot estimate from flags
//! - `form` - Interactive form loop
//! - `health` - Service liveness probe
//! - `config` - Effective configuration display
//!
//! Shared setup (config loading, backend construction, render options) lives here.

pub mod config;
pub mod estimate;
pub mod form;
pub mod health;

// Re-export command functions for main.rs
pub use config::*;
pub use estimate::*;
pub use form::*;
pub use health::*;

use std::io::IsTerminal;
use std::path::Path;

use anyhow::{Context, Result};
use cartco_core::{ClientConfig, HttpEstimator, RenderOptions};

/// Resolve the client configuration from file, environment and flags
pub fn load_config(config_path: Option<&Path>, api_url: Option<&str>) -> Result<ClientConfig> {
    ClientConfig::load(config_path, api_url).context("Failed to load configuration")
}

/// HTTP backend for the configured service
pub fn build_backend(config: &ClientConfig) -> Result<HttpEstimator> {
    HttpEstimator::from_config(config).context("Failed to create HTTP client")
}

/// Color only when stdout is a terminal and nobody opted out
pub fn render_options(config: &ClientConfig, no_color: bool) -> RenderOptions {
    let color = !no_color
        && std::env::var_os("NO_COLOR").is_none()
        && std::io::stdout().is_terminal();

    RenderOptions {
        currency: config.currency.clone(),
        color,
    }
}
