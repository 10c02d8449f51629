//! # pageshell Configuration Errors
//!
//! Defines [`ConfigError`] for loading and (de)serializing [`ShellConfig`](crate::config::ShellConfig).
use std::error::Error as StdError;
use std::path::PathBuf;

use crate::config::ConfigFormat;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown or unsupported config format for path: {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("I/O error reading config '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to deserialize config from {format}: {source}")]
    Deserialization {
        format: String,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("Failed to serialize config to {format}: {source}")]
    Serialization {
        format: String,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl ConfigError {
    pub(crate) fn parse(format: ConfigFormat, source: impl StdError + Send + Sync + 'static) -> Self {
        ConfigError::Deserialization { format: format.extension().to_string(), source: Box::new(source) }
    }

    pub(crate) fn serialize(format: ConfigFormat, source: impl StdError + Send + Sync + 'static) -> Self {
        ConfigError::Serialization { format: format.extension().to_string(), source: Box::new(source) }
    }
}
