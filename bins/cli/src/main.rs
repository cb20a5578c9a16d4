//! Agora currency command line.
//!
//! Entry point for inspecting and converting currency values against the
//! configured currency dictionary.

mod commands;
mod error;
mod opt;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use agora_core::currency::CurrencyDictionary;
use agora_shared::AppConfig;
use agora_shared::config::LoggingConfig;

use crate::opt::Cli;

fn main() -> anyhow::Result<ExitCode> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = AppConfig::load().context("failed to load configuration")?;
    init_tracing(&config.logging);

    let registry =
        CurrencyDictionary::from_config(&config.currencies).context("invalid currency configuration")?;
    debug!(currencies = registry.len(), "currency dictionary ready");

    match commands::run(&cli.command, &registry) {
        Ok(out) => {
            println!("{out}");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("error[{}]: {err}", err.error_code());
            Ok(ExitCode::from(err.exit_code()))
        }
    }
}

/// Logs go to stderr so command output on stdout stays machine-readable.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    let registry = tracing_subscriber::registry().with(filter);

    if logging.json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
