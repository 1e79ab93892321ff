use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{PodError, Result};

/// Environment variable overriding the state root directory.
pub const HOME_ENV: &str = "A3S_POD_HOME";

/// Name of the optional config file inside the state root.
pub const CONFIG_FILE: &str = "config.yaml";

/// Pod tool configuration
#[derive(Debug, Clone, PartialEq)]
pub struct PodConfig {
    /// State root holding `images.json` and `pods.json`
    pub root: PathBuf,

    /// Log level used when `RUST_LOG` is unset
    pub log_level: LogLevel,
}

impl Default for PodConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            log_level: LogLevel::Warn,
        }
    }
}

impl PodConfig {
    /// Load configuration for the root named by `A3S_POD_HOME`, or
    /// `~/.a3s/pod` when unset.
    pub fn load() -> Result<Self> {
        let root = std::env::var_os(HOME_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(default_root);
        Self::load_from(&root)
    }

    /// Load `<root>/config.yaml` if it exists. Settings absent from the
    /// file keep their defaults, and `root` defaults to the given directory.
    pub fn load_from(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        let file = if path.exists() {
            let data = std::fs::read_to_string(&path)?;
            serde_yaml::from_str::<ConfigFile>(&data)
                .map_err(|e| PodError::ConfigError(format!("{}: {}", path.display(), e)))?
        } else {
            ConfigFile::default()
        };

        let defaults = Self::default();
        Ok(Self {
            root: file.root.unwrap_or_else(|| root.to_path_buf()),
            log_level: file.log_level.unwrap_or(defaults.log_level),
        })
    }
}

/// On-disk form of [`PodConfig`]; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    root: Option<PathBuf>,
    log_level: Option<LogLevel>,
}

fn default_root() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".a3s"))
        .unwrap_or_else(|| PathBuf::from(".a3s"))
        .join("pod")
}

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Directive string for an env filter.
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
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
