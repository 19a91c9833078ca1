//! Command-line arguments
//!
//! Every value option is an `Option` so that an unspecified flag falls back to
//! the configuration file, and then to the built-in default.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "lagpoller")]
#[command(about = "Poll consumer lag from a Kafka lag monitoring API and emit JSON lines")]
#[command(version)]
pub struct Args {
    /// Configuration file path
    #[arg(short = 'c', long = "config-file", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Base address of the lag API (default: http://localhost:8000)
    #[arg(short = 'b', long = "base-url", value_name = "URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds (default: 60)
    #[arg(short = 't', long = "timeout", value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Extra attempts for a request that failed with a transient error (default: 0)
    #[arg(short = 'r', long = "retries", value_name = "COUNT")]
    pub retries: Option<usize>,

    /// Delay between attempts in milliseconds (default: 500)
    #[arg(long = "retry-delay", value_name = "MILLIS")]
    pub retry_delay: Option<u64>,

    /// Skip clusters and consumers that fail instead of stopping
    #[arg(short = 'k', long = "keep-going", conflicts_with = "fail_fast")]
    pub keep_going: bool,

    /// Stop at the first failure (overrides configuration file)
    #[arg(long = "fail-fast", conflicts_with = "keep_going")]
    pub fail_fast: bool,

    /// Record format
    #[arg(short = 'F', long = "format", value_name = "FORMAT", value_parser = ["flat", "status"])]
    pub format: Option<String>,

    /// Write records to FILE instead of stdout (use '-' for stdout)
    #[arg(short = 'O', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Force colored log output
    #[arg(long = "color", conflicts_with = "no_color")]
    pub color: bool,

    /// Disable colored log output
    #[arg(long = "no-color", conflicts_with = "color")]
    pub no_color: bool,

    /// Log level
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = ["trace", "debug", "info", "warn", "error", "off"])]
    pub log_level: Option<String>,

    /// Log file path (use 'none' to disable file logging)
    #[arg(short = 'f', long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log output format
    #[arg(short = 'o', long = "log-format", value_name = "FORMAT", value_parser = ["text", "ext", "json"])]
    pub log_format: Option<String>,

    /// More log output (repeat for more)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Less log output (repeat for less)
    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, conflicts_with = "verbose")]
    pub quiet: u8,
}

impl Args {
    /// Color choice from flags: `Some(true)`, `Some(false)`, or `None` for auto
    pub fn color_choice(&self) -> Option<bool> {
        match (self.color, self.no_color) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }

    /// Net verbosity, positive for `-v`, negative for `-q`
    pub fn verbosity(&self) -> i8 {
        (self.verbose.min(i8::MAX as u8) as i8).saturating_sub(self.quiet.min(i8::MAX as u8) as i8)
    }
}
