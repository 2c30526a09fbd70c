//! Configuration loading
//!
//! Resolution order for the scheduler config file:
//! 1. an explicit `--config <PATH>`
//! 2. the `LEARNBASE_CONFIG` environment variable
//! 3. `<platform config dir>/scheduler.json`
//!
//! An explicit path must exist. The platform default is optional: when it is
//! absent the built-in defaults are used.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use learnbase_core::{ConfigParseError, SchedulerConfig};

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "LEARNBASE_CONFIG";

/// File name inside the platform config directory
pub const CONFIG_FILE_NAME: &str = "scheduler.json";

/// Environment variable selecting the server's log format
pub const LOG_FORMAT_ENV: &str = "LEARNBASE_LOG_FORMAT";

/// How the server writes its stderr logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    /// One JSON object per event, for log collectors
    Json,
}

impl LogFormat {
    pub fn parse_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "text" | "plain" => Some(LogFormat::Text),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }

    /// Flag value first, then `LEARNBASE_LOG_FORMAT`; unknown env values fall back to text
    pub fn resolve(flag: Option<LogFormat>, env: Option<&str>) -> Self {
        flag.or_else(|| env.and_then(Self::parse_name)).unwrap_or_default()
    }
}

/// Config loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ConfigParseError,
    },
}

/// Platform default config path, if the platform has a config directory
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "learnbase", "learnbase")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Read and validate one config file
pub fn load_from_path(path: &Path) -> Result<SchedulerConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    SchedulerConfig::from_json(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolve and load the scheduler configuration
pub fn load(explicit: Option<&Path>) -> Result<SchedulerConfig, ConfigError> {
    let from_env = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    load_with(explicit, from_env.as_deref(), default_config_path().as_deref())
}

fn load_with(
    explicit: Option<&Path>,
    from_env: Option<&Path>,
    platform_default: Option<&Path>,
) -> Result<SchedulerConfig, ConfigError> {
    if let Some(path) = explicit.or(from_env) {
        tracing::info!(path = %path.display(), "Loading scheduler config");
        return load_from_path(path);
    }

    match platform_default {
        Some(path) if path.is_file() => {
            tracing::info!(path = %path.display(), "Loading scheduler config");
            load_from_path(path)
        }
        _ => {
            tracing::debug!("No scheduler config file found, using defaults");
            Ok(SchedulerConfig::default())
        }
    }
}
