//! TOML configuration tests
//!
//! Configuration file parsing, validation and CLI overrides.

use clap::Parser;
use lagpoller::app::cli::args::Args;
use lagpoller::app::cli::config::{apply_toml_values, ConfigError};
use lagpoller::app::cli::settings::Settings;
use lagpoller::lag::api::{FailurePolicy, OutputFormat};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

fn config_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_toml_values_applied() {
    let config: toml::Table = toml::from_str(
        r#"
        base-url = "http://burrow.internal:8000"
        timeout = 15
        retries = 2
        retry-delay = 100
        keep-going = true
        format = "status"
        output = "/tmp/lag.jsonl"
        color = false
        log-level = "debug"
        log-format = "json"
        log-file = "none"
        "#,
    )
    .unwrap();

    let mut settings = Settings::default();
    apply_toml_values(&mut settings, &config).unwrap();

    assert_eq!(settings.base_url, "http://burrow.internal:8000");
    assert_eq!(settings.timeout, Duration::from_secs(15));
    assert_eq!(settings.retries, 2);
    assert_eq!(settings.retry_delay, Duration::from_millis(100));
    assert_eq!(settings.failure_policy(), FailurePolicy::Skip);
    assert_eq!(settings.format, OutputFormat::Status);
    assert_eq!(settings.output, Some(PathBuf::from("/tmp/lag.jsonl")));
    assert_eq!(settings.color, Some(false));
    assert_eq!(settings.log_level.as_deref(), Some("debug"));
    assert_eq!(settings.log_format.as_deref(), Some("json"));
    assert_eq!(settings.log_file, None);
}

#[test]
fn test_unknown_format_in_toml() {
    let config: toml::Table = toml::from_str(r#"format = "csv""#).unwrap();
    let mut settings = Settings::default();

    let err = apply_toml_values(&mut settings, &config).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { ref key, .. } if key == "format"));
}

#[tokio::test]
async fn test_resolve_reads_config_file() {
    let file = config_file("base-url = \"http://from-file:9000/\"\nretries = 4\n");
    let args = Args::try_parse_from([
        "lagpoller",
        "--config-file",
        file.path().to_str().unwrap(),
    ])
    .unwrap();

    let settings = Settings::resolve(&args).await.unwrap();
    assert_eq!(settings.base_url, "http://from-file:9000");
    assert_eq!(settings.retries, 4);
}

#[tokio::test]
async fn test_cli_overrides_config_file() {
    let file = config_file("base-url = \"http://from-file:9000\"\nkeep-going = true\ntimeout = 30\n");
    let args = Args::try_parse_from([
        "lagpoller",
        "--config-file",
        file.path().to_str().unwrap(),
        "--base-url",
        "http://from-cli:8000",
        "--fail-fast",
    ])
    .unwrap();

    let settings = Settings::resolve(&args).await.unwrap();
    assert_eq!(settings.base_url, "http://from-cli:8000");
    assert_eq!(settings.failure_policy(), FailurePolicy::Abort);
    assert_eq!(settings.timeout, Duration::from_secs(30));
}

#[tokio::test]
async fn test_missing_config_file_is_error() {
    let args = Args::try_parse_from([
        "lagpoller",
        "--config-file",
        "/definitely/not/here/lagpoller.toml",
    ])
    .unwrap();

    let err = Settings::resolve(&args).await.unwrap_err();
    assert!(matches!(err, ConfigError::NotFound { .. }));
    assert!(err.to_string().contains("/definitely/not/here/lagpoller.toml"));
}

#[tokio::test]
async fn test_malformed_config_file_is_parse_error() {
    let file = config_file("base-url = \n");
    let args = Args::try_parse_from([
        "lagpoller",
        "--config-file",
        file.path().to_str().unwrap(),
    ])
    .unwrap();

    let err = Settings::resolve(&args).await.unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }), "got {:?}", err);
}

#[tokio::test]
async fn test_invalid_base_url_in_config_file() {
    let file = config_file("base-url = \"ftp://burrow\"\n");
    let args = Args::try_parse_from([
        "lagpoller",
        "--config-file",
        file.path().to_str().unwrap(),
    ])
    .unwrap();

    let err = Settings::resolve(&args).await.unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { ref key, .. } if key == "base-url"));
}
