use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Prefix for environment overrides, e.g. `UPTIME_ENDPOINT`.
pub const ENV_PREFIX: &str = "UPTIME_";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse TOML from config file at {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("Failed to load config from environment: {0}")]
    Env(#[from] envy::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub endpoint: String,
    pub listen_addr: String,
    pub log_dir: String,
    /// `None` keeps the HTTP client's default behaviour.
    pub request_timeout_secs: Option<u64>,
    /// Show a fixed demo dataset instead of an empty list when loading fails.
    pub sample_on_failure: bool,
    /// Used as the structured-data URL; the request path is used otherwise.
    pub public_url: Option<String>,
}

// Partial config for layering
#[derive(Deserialize, Default, Debug)]
pub struct PartialDashboardConfig {
    endpoint: Option<String>,
    listen_addr: Option<String>,
    log_dir: Option<String>,
    request_timeout_secs: Option<u64>,
    sample_on_failure: Option<bool>,
    public_url: Option<String>,
}

fn default_endpoint() -> String {
    "https://medianode-uptime-api.dakshavalidator.in/uptime-records".to_string()
}

fn default_listen_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::merge(PartialDashboardConfig::default(), PartialDashboardConfig::default())
    }
}

impl PartialDashboardConfig {
    /// Reads a TOML file. A missing file yields an empty layer.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(envy::prefixed(ENV_PREFIX).from_env::<Self>()?)
    }

    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Ok(envy::prefixed(ENV_PREFIX).from_iter::<_, Self>(vars)?)
    }
}

impl DashboardConfig {
    /// Loads the config from an optional TOML file, then applies environment
    /// overrides (`.env` is honoured).
    pub fn load(config_path: Option<&str>) -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        // 1. Load from file (optional)
        let file_config = match config_path {
            Some(path) => PartialDashboardConfig::from_file(Path::new(path))?,
            None => PartialDashboardConfig::default(),
        };

        // 2. Load from environment variables
        let env_config = PartialDashboardConfig::from_env()?;

        // 3. Merge: environment overrides file
        Ok(Self::merge(file_config, env_config))
    }

    pub fn merge(file_config: PartialDashboardConfig, env_config: PartialDashboardConfig) -> Self {
        DashboardConfig {
            endpoint: env_config.endpoint.or(file_config.endpoint)
                .unwrap_or_else(default_endpoint),
            listen_addr: env_config.listen_addr.or(file_config.listen_addr)
                .unwrap_or_else(default_listen_addr),
            log_dir: env_config.log_dir.or(file_config.log_dir)
                .unwrap_or_else(default_log_dir),
            request_timeout_secs: env_config.request_timeout_secs.or(file_config.request_timeout_secs),
            sample_on_failure: env_config.sample_on_failure.or(file_config.sample_on_failure)
                .unwrap_or(false),
            public_url: env_config.public_url.or(file_config.public_url),
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
