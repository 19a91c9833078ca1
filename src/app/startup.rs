use super::cli::args::Args;
use super::cli::settings::Settings;
use crate::core::error_handling::log_error_with_context;
use crate::core::logging::init_logging;
use crate::lag::api::{
    HttpTransport, LagClient, LazyFile, PollError, PollResult, PollSummary, Poller, RecordWriter,
    Transport,
};
use clap::Parser;
use std::io::{IsTerminal, Write};

/// Parse arguments, set up logging and run one poll. Returns the exit code.
pub async fn startup() -> i32 {
    let args = Args::parse();

    let settings = match Settings::resolve(&args).await {
        Ok(settings) => settings,
        Err(e) => {
            // Settings never resolved, so report with a default logger
            let use_color = detect_color(args.color_choice());
            colored::control::set_override(use_color);
            match init_logging(None, None, None, use_color) {
                Ok(()) => log_error_with_context(&e, "Loading configuration"),
                Err(_) => eprintln!("Error: {}", e),
            }
            return 1;
        }
    };

    let use_color = detect_color(settings.color);
    colored::control::set_override(use_color);

    if let Err(e) = init_logging(
        settings.log_level.as_deref(),
        settings.log_format.as_deref(),
        settings.log_file.as_deref().and_then(|p| p.to_str()),
        use_color,
    ) {
        eprintln!("Error: could not initialise logging: {}", e);
        return 1;
    }

    log::info!(
        "lagpoller {} ({}, built {}) polling {}",
        env!("CARGO_PKG_VERSION"),
        crate::GIT_HASH,
        crate::BUILD_TIME,
        settings.base_url
    );
    log::debug!("Settings: {:#?}", settings);

    match poll(&settings).await {
        Ok(summary) => {
            log::info!(
                "Polled {} cluster(s), {} consumer(s), {} partition(s)",
                summary.clusters,
                summary.consumers,
                summary.partitions
            );
            if summary.is_clean() {
                0
            } else {
                log::error!("{} cluster(s) or consumer(s) failed", summary.failures.len());
                1
            }
        }
        Err(e) => {
            log_error_with_context(&e, "Polling consumer lag");
            1
        }
    }
}

fn detect_color(choice: Option<bool>) -> bool {
    choice.unwrap_or_else(|| std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none())
}

/// Run one traversal with `settings`, writing records to the configured output
pub async fn poll(settings: &Settings) -> PollResult<PollSummary> {
    let transport = HttpTransport::with_timeout(settings.timeout)?;
    let client = LagClient::new(settings.base_url.clone(), transport).with_retry(settings.retry_policy());
    let poller = Poller::new(client).with_policy(settings.failure_policy());

    match &settings.output {
        Some(path) => {
            let mut writer = RecordWriter::new(LazyFile::new(path), settings.format);
            let summary = write_records(&poller, &mut writer).await?;
            // A clean run with no records still replaces the file
            writer
                .get_mut()
                .create()
                .map_err(|e| PollError::Output { source: e })?;
            Ok(summary)
        }
        None => {
            let mut writer = RecordWriter::new(std::io::stdout(), settings.format);
            write_records(&poller, &mut writer).await
        }
    }
}

async fn write_records<T: Transport, W: Write>(
    poller: &Poller<T>,
    writer: &mut RecordWriter<W>,
) -> PollResult<PollSummary> {
    let result = poller.run(writer).await;

    // Records written before a failure are kept
    if result.is_err() {
        if let Err(e) = writer.flush() {
            log::warn!("{}", e);
        }
    }

    result
}
