use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::errors::ConfigError;

/// Application configuration module
/// This module handles loading and validating the runtime settings: where
/// projects live, which generation model to call and how noisy the log is.
/// The API credential itself never lives in the config file; it is read
/// from the environment.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Root directory holding one sub-directory per project
    #[serde(default = "default_projects_dir")]
    pub projects_dir: PathBuf,

    /// Generation provider settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Generation provider configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Model name
    #[serde(default = "default_model")]
    pub model: String,

    // @field: Service base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    // @field: Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    // @field: Timeout seconds for one request
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    // @field: Sampling temperature, provider default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            endpoint: default_endpoint(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
            temperature: None,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Map onto the `log` crate filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_projects_dir() -> PathBuf {
    PathBuf::from("projects")
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_api_key_env() -> String {
    "GOOGLE_API_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    // Vision requests on large pages can be slow
    300
}

impl Default for Config {
    fn default() -> Self {
        Config {
            projects_dir: default_projects_dir(),
            provider: ProviderConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Load a configuration file; fields missing from the file keep their defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ConfigError::LoadFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        serde_json::from_reader(BufReader::new(file)).map_err(|e| ConfigError::LoadFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.projects_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "projects_dir",
                reason: "must not be empty".to_string(),
            });
        }

        if self.provider.model.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "provider.model",
                reason: "must not be empty".to_string(),
            });
        }

        if self.provider.endpoint.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "provider.endpoint",
                reason: "must not be empty".to_string(),
            });
        }

        if self.provider.api_key_env.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "provider.api_key_env",
                reason: "must name an environment variable".to_string(),
            });
        }

        if self.provider.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "provider.timeout_secs",
                reason: "must be greater than zero".to_string(),
            });
        }

        if let Some(temperature) = self.provider.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(ConfigError::InvalidValue {
                    field: "provider.temperature",
                    reason: format!("{} is outside 0.0..=2.0", temperature),
                });
            }
        }

        Ok(())
    }

    /// Read the API key from the environment variable named in the config.
    ///
    /// A blank value counts as missing.
    pub fn api_key_from_env(&self) -> Result<String, ConfigError> {
        Self::api_key_from(&self.provider.api_key_env, |name| std::env::var(name).ok())
    }

    /// Same as [`Config::api_key_from_env`] with an injectable lookup
    pub fn api_key_from<F>(var_name: &str, lookup: F) -> Result<String, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(var_name) {
            Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
            _ => Err(ConfigError::MissingCredential {
                var_name: var_name.to_string(),
            }),
        }
    }
}
