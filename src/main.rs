mod cli;
mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Args, LogLevel};
use newrelic_client::transport::http::format_api_error;
use newrelic_client::{Config, NewRelic};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::fmt::writer::MakeWriterExt;

fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let tracing_level = level.to_tracing_level()?;

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: cannot open log file {:?}: {}", log_path, e);
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("newrelic started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Some(guard)
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("newrelic-client").join("newrelic.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".newrelic-client").join("newrelic.log");
    }
    PathBuf::from("newrelic.log")
}

/// Resolve configuration: CLI > env > config file > defaults
fn load_config(args: &Args) -> Config {
    let mut config = Config::load().with_overrides(|name| std::env::var(name).ok());
    if let Some(region) = args.region {
        config.region = region;
    }
    config
}

async fn run(args: Args) -> Result<()> {
    let config = load_config(&args);
    tracing::info!("Using region: {}", config.region);

    let client = NewRelic::new(config).context("Failed to initialize New Relic client")?;
    let value = commands::run(&client, args.command).await?;
    println!("{}", commands::render(&value, args.output)?);

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("Command failed: {:?}", err);
            match err.downcast_ref::<newrelic_client::Error>() {
                Some(api_err) => eprintln!("Error: {}", format_api_error(api_err)),
                None => eprintln!("Error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}
