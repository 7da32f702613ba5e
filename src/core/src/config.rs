use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ForgeError, Result};

/// Default Forgefile name inside a build context
pub const DEFAULT_DEFINITION_FILE: &str = "Forgefile";

/// Forge configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ForgeConfig {
    /// Forgefile name, relative to the build context
    pub definition_file: PathBuf,

    /// Directory for downloaded base images and step caches
    pub cache_dir: PathBuf,

    /// Disk size of the produced image in MB
    pub disk_size_mb: u32,

    /// Log level
    pub log_level: LogLevel,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            definition_file: PathBuf::from(DEFAULT_DEFINITION_FILE),
            cache_dir: default_cache_dir(),
            disk_size_mb: 4096,
            log_level: LogLevel::Warn,
        }
    }
}

impl ForgeConfig {
    /// Load configuration from a YAML file. Missing fields take defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ForgeError::ConfigError(format!(
                "Failed to read config at {}: {}",
                path.display(),
                e
            ))
        })?;
        let config: ForgeConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise return the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Directory holding the cached state of the step with `cache_key`.
    pub fn step_cache_path(&self, cache_key: &str) -> PathBuf {
        self.cache_dir
            .join("steps")
            .join(crate::cache_key::key_to_dirname(cache_key))
    }

    fn validate(&self) -> Result<()> {
        if self.definition_file.as_os_str().is_empty() {
            return Err(ForgeError::ConfigError(
                "definition_file must not be empty".to_string(),
            ));
        }
        if self.disk_size_mb == 0 {
            return Err(ForgeError::ConfigError(
                "disk_size_mb must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Cache directory (~/.a3s/forge/cache).
fn default_cache_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".a3s"))
        .unwrap_or_else(|| PathBuf::from(".a3s"))
        .join("forge")
        .join("cache")
}

crate::closed_enum! {
    /// Log level
    pub enum LogLevel {
        Debug => "debug",
        Info => "info",
        Warn => "warn",
        Error => "error",
    }
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}
