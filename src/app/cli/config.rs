//! TOML configuration file loading
//!
//! A file given with `--config-file` must exist. Without it, the default
//! `<config dir>/Lagpoller/lagpoller.toml` is used when present.
//!
//! ```toml
//! base-url = "http://burrow.internal:8000"
//! timeout = 30
//! retries = 2
//! retry-delay = 250
//! keep-going = true
//! format = "flat"
//! log-level = "info"
//! ```

use super::settings::Settings;
use crate::lag::api::OutputFormat;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("The specified configuration file does not exist: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("Error reading configuration file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing configuration file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for '{key}': {message}")]
    Invalid { key: String, message: String },
}

impl ConfigError {
    pub fn invalid(key: &str, message: impl Into<String>) -> Self {
        ConfigError::Invalid {
            key: key.to_string(),
            message: message.into(),
        }
    }
}

impl crate::core::error_handling::ContextualError for ConfigError {
    fn is_user_actionable(&self) -> bool {
        matches!(self, ConfigError::Invalid { .. })
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            ConfigError::Invalid { message, .. } => Some(message),
            _ => None,
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Default configuration file location, if the platform has a config directory
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("Lagpoller").join("lagpoller.toml"))
}

/// Locate and parse the configuration file, if there is one
pub async fn load_config_file(config_file: Option<&Path>) -> ConfigResult<Option<toml::Table>> {
    let path = match config_file {
        Some(path) if !path.exists() => {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            })
        }
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(None),
        },
    };

    log::debug!("Loading configuration from {}", path.display());

    let contents = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| ConfigError::Read {
            path: path.clone(),
            source: e,
        })?;

    let table = toml::from_str::<toml::Table>(&contents)
        .map_err(|e| ConfigError::Parse { path, source: e })?;

    Ok(Some(table))
}

/// Apply TOML configuration values over `settings`
pub fn apply_toml_values(settings: &mut Settings, config: &toml::Table) -> ConfigResult<()> {
    if let Some(base_url) = get_str(config, "base-url")? {
        settings.base_url = base_url.to_string();
    }
    if let Some(timeout) = get_unsigned(config, "timeout")? {
        settings.timeout = Duration::from_secs(timeout);
    }
    if let Some(retries) = get_unsigned(config, "retries")? {
        settings.retries = retries as usize;
    }
    if let Some(delay) = get_unsigned(config, "retry-delay")? {
        settings.retry_delay = Duration::from_millis(delay);
    }
    if let Some(keep_going) = get_bool(config, "keep-going")? {
        settings.keep_going = keep_going;
    }
    if let Some(format) = get_str(config, "format")? {
        settings.format = format
            .parse::<OutputFormat>()
            .map_err(|e| ConfigError::invalid("format", e))?;
    }
    if let Some(output) = get_str(config, "output")? {
        settings.output = output_path(output);
    }
    if let Some(color) = get_bool(config, "color")? {
        settings.color = Some(color);
    }
    if let Some(log_level) = get_str(config, "log-level")? {
        settings.log_level = Some(log_level.to_string());
    }
    if let Some(log_format) = get_str(config, "log-format")? {
        settings.log_format = Some(log_format.to_string());
    }
    if let Some(log_file) = get_str(config, "log-file")? {
        settings.log_file = log_file_path(log_file);
    }

    for key in config.keys() {
        if !KNOWN_KEYS.contains(&key.as_str()) {
            log::warn!("Ignoring unknown configuration key '{}'", key);
        }
    }

    Ok(())
}

const KNOWN_KEYS: [&str; 11] = [
    "base-url",
    "timeout",
    "retries",
    "retry-delay",
    "keep-going",
    "format",
    "output",
    "color",
    "log-level",
    "log-format",
    "log-file",
];

/// Magic values "none" and "-" disable file logging
pub fn log_file_path(value: &str) -> Option<PathBuf> {
    if value.eq_ignore_ascii_case("none") || value == "-" {
        None
    } else {
        Some(PathBuf::from(value))
    }
}

/// "-" selects stdout
pub fn output_path(value: &str) -> Option<PathBuf> {
    if value == "-" {
        None
    } else {
        Some(PathBuf::from(value))
    }
}

fn get_str<'a>(config: &'a toml::Table, key: &str) -> ConfigResult<Option<&'a str>> {
    match config.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_str()
            .map(Some)
            .ok_or_else(|| ConfigError::invalid(key, format!("{} must be a string", key))),
    }
}

fn get_bool(config: &toml::Table, key: &str) -> ConfigResult<Option<bool>> {
    match config.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_bool()
            .map(Some)
            .ok_or_else(|| ConfigError::invalid(key, format!("{} must be true or false", key))),
    }
}

fn get_unsigned(config: &toml::Table, key: &str) -> ConfigResult<Option<u64>> {
    match config.get(key) {
        None => Ok(None),
        Some(value) => match value.as_integer() {
            Some(n) if n >= 0 => Ok(Some(n as u64)),
            _ => Err(ConfigError::invalid(
                key,
                format!("{} must be a non-negative integer", key),
            )),
        },
    }
}
