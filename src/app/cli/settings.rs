//! Resolved run settings
//!
//! Precedence: command line > configuration file > defaults.

use super::args::Args;
use super::config::{self, ConfigError, ConfigResult};
use crate::core::logging::level_for_verbosity;
use crate::core::retry::RetryPolicy;
use crate::lag::api::{FailurePolicy, OutputFormat, DEFAULT_HTTP_TIMEOUT_SECS};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_RETRY_DELAY_MS: u64 = 500;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub base_url: String,
    pub timeout: Duration,
    pub retries: usize,
    pub retry_delay: Duration,
    pub keep_going: bool,
    pub format: OutputFormat,
    /// `None` writes to stdout
    pub output: Option<PathBuf>,
    /// `None` means auto-detect
    pub color: Option<bool>,
    pub log_level: Option<String>,
    pub log_format: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            retries: 0,
            retry_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
            keep_going: false,
            format: OutputFormat::Flat,
            output: None,
            color: None,
            log_level: None,
            log_format: None,
            log_file: None,
        }
    }
}

impl Settings {
    /// Load the configuration file named by `args` (or the default one), then
    /// apply the command line on top and validate the result
    pub async fn resolve(args: &Args) -> ConfigResult<Self> {
        let mut settings = Self::default();

        if let Some(table) = config::load_config_file(args.config_file.as_deref()).await? {
            config::apply_toml_values(&mut settings, &table)?;
        }

        settings.apply_args(args)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Override with any values given on the command line
    pub fn apply_args(&mut self, args: &Args) -> ConfigResult<()> {
        if let Some(base_url) = &args.base_url {
            self.base_url = base_url.clone();
        }
        if let Some(timeout) = args.timeout {
            self.timeout = Duration::from_secs(timeout);
        }
        if let Some(retries) = args.retries {
            self.retries = retries;
        }
        if let Some(delay) = args.retry_delay {
            self.retry_delay = Duration::from_millis(delay);
        }
        if args.keep_going {
            self.keep_going = true;
        } else if args.fail_fast {
            self.keep_going = false;
        }
        if let Some(format) = &args.format {
            self.format = format
                .parse::<OutputFormat>()
                .map_err(|e| ConfigError::invalid("format", e))?;
        }
        if let Some(output) = &args.output {
            self.output = config::output_path(&output.to_string_lossy());
        }
        if let Some(color) = args.color_choice() {
            self.color = Some(color);
        }
        if let Some(log_level) = &args.log_level {
            self.log_level = Some(log_level.clone());
        } else if args.verbosity() != 0 {
            self.log_level = Some(level_for_verbosity(args.verbosity()).to_string());
        }
        if let Some(log_format) = &args.log_format {
            self.log_format = Some(log_format.clone());
        }
        if let Some(log_file) = &args.log_file {
            self.log_file = config::log_file_path(&log_file.to_string_lossy());
        }
        Ok(())
    }

    /// Check values and normalise the base URL
    pub fn validate(&mut self) -> ConfigResult<()> {
        let base_url = self.base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(ConfigError::invalid("base-url", "base-url must not be empty"));
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::invalid(
                "base-url",
                format!(
                    "base-url must start with http:// or https:// (got '{}')",
                    base_url
                ),
            ));
        }
        self.base_url = base_url.to_string();

        if self.timeout < Duration::from_secs(1) {
            return Err(ConfigError::invalid(
                "timeout",
                "timeout must be at least 1 second",
            ));
        }

        if let Some(level) = &self.log_level {
            if level.parse::<log::LevelFilter>().is_err() {
                return Err(ConfigError::invalid(
                    "log-level",
                    format!("unknown log level '{}'", level),
                ));
            }
        }
        if let Some(format) = &self.log_format {
            if !["text", "ext", "json"].contains(&format.as_str()) {
                return Err(ConfigError::invalid(
                    "log-format",
                    format!("unknown log format '{}' (expected text, ext or json)", format),
                ));
            }
        }

        Ok(())
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::with_retries(self.retries, self.retry_delay)
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        if self.keep_going {
            FailurePolicy::Skip
        } else {
            FailurePolicy::Abort
        }
    }
}
