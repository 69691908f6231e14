//! Configuration display command

use anyhow::Result;
use cartco_core::config::default_config_path;
use cartco_core::ClientConfig;

/// Print the effective configuration and where each value came from
pub fn cmd_config(config: &ClientConfig) -> Result<()> {
    println!();
    println!("⚙️  cartco Configuration");
    println!("   ─────────────────────────────────────────────────────────────");
    for line in config_lines(config) {
        println!("{}", line);
    }
    println!();

    Ok(())
}

/// One line per setting, each tagged with the layer that supplied it
pub fn config_lines(config: &ClientConfig) -> Vec<String> {
    let timeout = match config.timeout {
        Some(timeout) => format!("{}s", timeout.as_secs()),
        None => "none".to_string(),
    };

    let file = match (&config.config_path, default_config_path()) {
        (Some(path), _) => path.display().to_string(),
        (None, Some(default)) => format!("(none, would read {})", default.display()),
        (None, None) => "(none)".to_string(),
    };

    vec![
        format!(
            "   Base URL:  {} ({})",
            config.base_url, config.base_url_source
        ),
        format!("   Timeout:   {} ({})", timeout, config.timeout_source),
        format!("   Currency:  {} ({})", config.currency, config.currency_source),
        format!("   Config:    {}", file),
    ]
}
