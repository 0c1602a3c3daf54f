use crate::error::{ConfigError, CoreError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_CONFIG_FILE: &str = "threadscope.toml";
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_LOG_FILTER: &str = "threadscope=info,session=info,backend_client=info";

pub const ENV_BACKEND_URL: &str = "THREADSCOPE_BACKEND_URL";
pub const ENV_TIMEOUT_SECS: &str = "THREADSCOPE_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base path every backend endpoint is appended to.
    pub backend_url: String,
    /// Unset means requests wait for the backend indefinitely.
    pub request_timeout_secs: Option<u64>,
    pub user_agent: String,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            request_timeout_secs: None,
            user_agent: format!("threadscope/{}", env!("CARGO_PKG_VERSION")),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Loads defaults, then the TOML file, then environment overrides.
    ///
    /// An explicit `path` must exist. Without one, `threadscope.toml` in the
    /// working directory is read if present.
    pub fn load(path: Option<&Path>) -> Result<Self, CoreError> {
        let mut config = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::FileNotFound {
                        path: path.display().to_string(),
                    }
                    .into());
                }
                Self::read_file(path)?
            }
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::read_file(default_path)?
                } else {
                    debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                    Self::default()
                }
            }
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn read_file(path: &Path) -> Result<Self, CoreError> {
        info!("Loading configuration from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Ok(Self::from_toml_str(&contents)?)
    }

    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BACKEND_URL) {
            debug!("Backend URL overridden by {}", ENV_BACKEND_URL);
            self.backend_url = url;
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let seconds = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue {
                    field: ENV_TIMEOUT_SECS.to_string(),
                    value: raw.clone(),
                })?;
            self.request_timeout_secs = Some(seconds);
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let parsed = url::Url::parse(&self.backend_url).map_err(|e| ConfigError::InvalidValue {
            field: "backend_url".to_string(),
            value: format!("{} ({})", self.backend_url, e),
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::ValidationFailed {
                reason: format!("backend_url must use http or https, got {}", parsed.scheme()),
            });
        }

        if self.request_timeout_secs == Some(0) {
            return Err(ConfigError::ValidationFailed {
                reason: "request_timeout_secs must be greater than zero".to_string(),
            });
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
