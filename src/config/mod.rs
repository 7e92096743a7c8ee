use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{PortfolioError, Result};

const DEFAULT_GITHUB_API_BASE: &str = "https://api.github.com";
const DEFAULT_UNSPLASH_API_BASE: &str = "https://api.unsplash.com";
const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8000";

/// Main configuration struct for the application
///
/// Holds API credentials, upstream base URLs (overridable so tests can
/// point at a local mock server), the server bind address, and enrichment
/// settings. Loaded from an optional TOML file with environment overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// GitHub API token for authenticated requests
    pub github_token: Option<String>,
    /// Unsplash access key; image lookup is disabled when absent
    pub unsplash_access_key: Option<String>,
    /// Token required by featured-status mutation endpoints; mutation is
    /// disabled when absent
    pub admin_token: Option<String>,
    /// Base URL of the GitHub REST API
    #[serde(default = "default_github_api_base")]
    pub github_api_base: String,
    /// Base URL of the Unsplash API
    #[serde(default = "default_unsplash_api_base")]
    pub unsplash_api_base: String,
    /// Address the HTTP server binds to
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Enrichment pipeline settings
    #[serde(default)]
    pub enrichment: EnrichmentConfig,
}

/// Settings for the project enrichment fan-out
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentConfig {
    /// Maximum number of projects enriched concurrently
    pub max_concurrent: usize,
    /// Timeout applied to each outbound HTTP request, in seconds
    pub request_timeout_secs: u64,
}

fn default_github_api_base() -> String {
    DEFAULT_GITHUB_API_BASE.to_string()
}

fn default_unsplash_api_base() -> String {
    DEFAULT_UNSPLASH_API_BASE.to_string()
}

fn default_bind_address() -> String {
    DEFAULT_BIND_ADDRESS.to_string()
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            max_concurrent: 5,
            request_timeout_secs: 30,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_token: None,
            unsplash_access_key: None,
            admin_token: None,
            github_api_base: default_github_api_base(),
            unsplash_api_base: default_unsplash_api_base(),
            bind_address: default_bind_address(),
            enrichment: EnrichmentConfig::default(),
        }
    }
}

impl Config {
    /// Builds a configuration from environment variables on top of the
    /// defaults. Recognized variables: `GITHUB_TOKEN`,
    /// `UNSPLASH_ACCESS_KEY`, `PORTFOLIO_ADMIN_TOKEN`, `PORTFOLIO_BIND`,
    /// `GITHUB_API_BASE_URL`, `UNSPLASH_API_BASE_URL`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Loads configuration from the default config file location, then
    /// applies environment overrides.
    ///
    /// If the config file doesn't exist, starts from the defaults. The
    /// config file is expected to be in TOML format.
    pub fn load() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| PortfolioError::Config("Could not find config directory".into()))?;
        let config_path = config_dir.join("devfolio").join("config.toml");

        let mut config = if config_path.exists() {
            Self::from_file(&config_path)?
        } else {
            Self::default()
        };
        config.apply_env();
        Ok(config)
    }

    /// Reads a configuration from a TOML file at the given path
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| PortfolioError::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| PortfolioError::Config(format!("Failed to parse config file: {}", e)))
    }

    fn apply_env(&mut self) {
        if let Ok(token) = std::env::var("GITHUB_TOKEN") {
            self.github_token = Some(token);
        }
        if let Ok(key) = std::env::var("UNSPLASH_ACCESS_KEY") {
            self.unsplash_access_key = Some(key);
        }
        if let Ok(token) = std::env::var("PORTFOLIO_ADMIN_TOKEN") {
            self.admin_token = Some(token);
        }
        if let Ok(bind) = std::env::var("PORTFOLIO_BIND") {
            self.bind_address = bind;
        }
        if let Ok(base) = std::env::var("GITHUB_API_BASE_URL") {
            self.github_api_base = base;
        }
        if let Ok(base) = std::env::var("UNSPLASH_API_BASE_URL") {
            self.unsplash_api_base = base;
        }
    }

    /// Validates that configured credentials are not blank
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("GitHub token", &self.github_token),
            ("Unsplash access key", &self.unsplash_access_key),
            ("admin token", &self.admin_token),
        ] {
            if let Some(value) = value {
                if value.trim().is_empty() {
                    return Err(PortfolioError::Config(format!("{} is empty", name)));
                }
            }
        }
        Ok(())
    }

    /// Timeout applied to outbound HTTP requests
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.enrichment.request_timeout_secs)
    }

    /// Default config file path, for diagnostics
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("devfolio").join("config.toml"))
    }
}
