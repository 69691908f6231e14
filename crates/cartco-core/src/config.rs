//! Client configuration
//!
//! Values are resolved in layers, later layers winning:
//! 1. Embedded defaults
//! 2. Config file (`--config PATH`, else `~/.config/cartco/config.toml` if present)
//! 3. `CARTCO_API_URL` environment variable (base URL only)
//! 4. `--api-url` flag (base URL only)
//!
//! ```toml
//! [client]
//! base_url = "https://tco.example.com"
//! timeout_secs = 90
//! currency = "USD"
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Base URL used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Environment variable overriding the base URL
pub const API_URL_ENV: &str = "CARTCO_API_URL";

/// Request timeout used when nothing else is configured
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Currency all amounts are rendered in
pub const DEFAULT_CURRENCY: &str = "USD";

/// Where a configuration value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    Default,
    File,
    Env,
    Flag,
}

impl ValueSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::File => "config file",
            Self::Env => API_URL_ENV,
            Self::Flag => "--api-url",
        }
    }
}

impl std::fmt::Display for ValueSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Effective client configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Estimation service base URL, without trailing slash
    pub base_url: String,
    /// Per-request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
    /// ISO 4217 code used for all amounts
    pub currency: String,
    /// Layer that supplied `base_url`
    pub base_url_source: ValueSource,
    /// Layer that supplied `timeout`
    pub timeout_source: ValueSource,
    /// Layer that supplied `currency`
    pub currency_source: ValueSource,
    /// Config file that was read, if any
    pub config_path: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            currency: DEFAULT_CURRENCY.to_string(),
            base_url_source: ValueSource::Default,
            timeout_source: ValueSource::Default,
            currency_source: ValueSource::Default,
            config_path: None,
        }
    }
}

impl ClientConfig {
    /// Resolve all layers, reading the environment
    pub fn load(config_path: Option<&Path>, api_url: Option<&str>) -> Result<Self> {
        let env_url = std::env::var(API_URL_ENV).ok();
        Self::resolve(config_path, env_url.as_deref(), api_url)
    }

    /// Defaults with an explicit base URL
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let mut config = Self::default();
        config.apply_base_url(base_url, ValueSource::Flag)?;
        Ok(config)
    }

    fn resolve(
        config_path: Option<&Path>,
        env_url: Option<&str>,
        flag_url: Option<&str>,
    ) -> Result<Self> {
        let mut config = Self::default();

        let path = match config_path {
            Some(path) if !path.exists() => {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            Some(path) => Some(path.to_path_buf()),
            None => default_config_path().filter(|p| p.exists()),
        };

        if let Some(path) = path {
            let content = fs::read_to_string(&path)?;
            config.apply_file(&content)?;
            config.config_path = Some(path);
        }

        if let Some(url) = env_url.filter(|u| !u.trim().is_empty()) {
            config.apply_base_url(url, ValueSource::Env)?;
        }

        if let Some(url) = flag_url {
            config.apply_base_url(url, ValueSource::Flag)?;
        }

        Ok(config)
    }

    fn apply_file(&mut self, content: &str) -> Result<()> {
        let raw: RawConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

        let Some(client) = raw.client else {
            return Ok(());
        };

        if let Some(url) = client.base_url {
            self.apply_base_url(&url, ValueSource::File)?;
        }
        if let Some(secs) = client.timeout_secs {
            self.timeout = (secs > 0).then(|| Duration::from_secs(secs));
            self.timeout_source = ValueSource::File;
        }
        if let Some(currency) = client.currency {
            self.currency = parse_currency(&currency)?;
            self.currency_source = ValueSource::File;
        }
        Ok(())
    }

    fn apply_base_url(&mut self, url: &str, source: ValueSource) -> Result<()> {
        self.base_url = normalize_base_url(url)?;
        self.base_url_source = source;
        Ok(())
    }
}

/// Default config file location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("cartco").join("config.toml"))
}

/// Trim whitespace and trailing slashes; require an http(s) scheme
pub fn normalize_base_url(url: &str) -> Result<String> {
    let url = url.trim().trim_end_matches('/');
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(Error::Config(format!(
            "Base URL must start with http:// or https://, got '{}'",
            url
        )));
    }
    Ok(url.to_string())
}

fn parse_currency(code: &str) -> Result<String> {
    let code = code.trim();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(Error::Config(format!(
            "Currency must be a three-letter ISO 4217 code, got '{}'",
            code
        )));
    }
    Ok(code.to_ascii_uppercase())
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    client: Option<RawClient>,
}

#[derive(Debug, Deserialize)]
struct RawClient {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
    currency: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.timeout, Some(Duration::from_secs(60)));
        assert_eq!(config.currency, "USD");
        assert_eq!(config.base_url_source, ValueSource::Default);
    }

    #[test]
    fn test_file_layer() {
        let file = write_config(
            r#"
[client]
base_url = "https://tco.example.com/"
timeout_secs = 90
currency = "eur"
"#,
        );
        let config = ClientConfig::resolve(Some(file.path()), None, None).unwrap();
        assert_eq!(config.base_url, "https://tco.example.com");
        assert_eq!(config.timeout, Some(Duration::from_secs(90)));
        assert_eq!(config.currency, "EUR");
        assert_eq!(config.base_url_source, ValueSource::File);
        assert_eq!(config.timeout_source, ValueSource::File);
        assert_eq!(config.currency_source, ValueSource::File);
        assert_eq!(config.config_path.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_partial_file_keeps_default_sources() {
        let file = write_config("[client]\ncurrency = \"gbp\"\n");
        let config = ClientConfig::resolve(Some(file.path()), None, None).unwrap();

        assert_eq!(config.currency_source, ValueSource::File);
        assert_eq!(config.timeout, Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)));
        assert_eq!(config.timeout_source, ValueSource::Default);
        assert_eq!(config.base_url_source, ValueSource::Default);
    }

    #[test]
    fn test_zero_timeout_disables() {
        let file = write_config("[client]\ntimeout_secs = 0\n");
        let config = ClientConfig::resolve(Some(file.path()), None, None).unwrap();
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn test_empty_file_keeps_defaults() {
        let file = write_config("");
        let config = ClientConfig::resolve(Some(file.path()), None, None).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_precedence_flag_over_env_over_file() {
        let file = write_config("[client]\nbase_url = \"http://file:8000\"\n");

        let config =
            ClientConfig::resolve(Some(file.path()), Some("http://env:8000"), None).unwrap();
        assert_eq!(config.base_url, "http://env:8000");
        assert_eq!(config.base_url_source, ValueSource::Env);

        let config = ClientConfig::resolve(
            Some(file.path()),
            Some("http://env:8000"),
            Some("http://flag:8000"),
        )
        .unwrap();
        assert_eq!(config.base_url, "http://flag:8000");
        assert_eq!(config.base_url_source, ValueSource::Flag);
    }

    #[test]
    fn test_blank_env_ignored() {
        let file = write_config("");
        let config = ClientConfig::resolve(Some(file.path()), Some("  "), None).unwrap();
        assert_eq!(config.base_url_source, ValueSource::Default);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let err = ClientConfig::resolve(Some(Path::new("/nonexistent/cartco.toml")), None, None)
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let file = write_config("[client\nbase_url = 1");
        let err = ClientConfig::resolve(Some(file.path()), None, None).unwrap_err();
        assert!(err.to_string().contains("Invalid config TOML"));
    }

    #[test]
    fn test_invalid_currency_is_error() {
        let file = write_config("[client]\ncurrency = \"dollars\"\n");
        assert!(ClientConfig::resolve(Some(file.path()), None, None).is_err());
    }

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(
            normalize_base_url(" http://localhost:8000// ").unwrap(),
            "http://localhost:8000"
        );
        assert!(normalize_base_url("localhost:8000").is_err());
    }

    #[test]
    fn test_with_base_url() {
        let config = ClientConfig::with_base_url("https://api.example.com/").unwrap();
        assert_eq!(config.base_url, "https://api.example.com");
        assert_eq!(config.base_url_source, ValueSource::Flag);
    }
}
