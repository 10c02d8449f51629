//! stderr logging for the CLI.
//!
//! The core logs through the `log` facade; `LogTracer` forwards those records
//! into the tracing subscriber installed here.
use std::error::Error;
use std::io::IsTerminal;

use clap::ValueEnum;
use tracing_log::LogTracer;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter, Registry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Human readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `default_filter` when set.
pub fn init(format: LogFormat, default_filter: &str) -> Result<(), Box<dyn Error>> {
    LogTracer::init()?;

    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter)?,
    };

    match format {
        LogFormat::Json => {
            let subscriber = Registry::default()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr));
            tracing::subscriber::set_global_default(subscriber)?;
        }
        LogFormat::Text => {
            let layer = fmt::layer()
                .with_target(true)
                .with_ansi(std::io::stderr().is_terminal())
                .with_writer(std::io::stderr);
            let subscriber = Registry::default().with(env_filter).with(layer);
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }
    Ok(())
}
