//! # pageshell Kernel Errors
//!
//! Aggregates the subsystem errors into the crate-wide [`Error`] and provides
//! the [`Result`] alias used by the bootstrap path.
use std::result::Result as StdResult;

use crate::config::error::ConfigError;
use crate::dom::error::DomError;
use crate::event::error::EventBusError;
use crate::module_loader::error::ModuleLoadError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    /// DOM capability failure
    #[error("DOM error: {0}")]
    Dom(#[from] DomError),

    /// Event bus failure
    #[error("Event bus error: {0}")]
    EventBus(#[from] EventBusError),

    /// Module load failure. Only surfaced when a caller awaits the load directly.
    #[error("Module load error: {0}")]
    ModuleLoad(#[from] ModuleLoadError),

    /// Configuration failure
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error raised while the readiness-triggered initializer was running.
    #[error("Bootstrap error during {phase}: {message}")]
    Bootstrap {
        phase: BootstrapPhase,
        message: String,
        #[source]
        source: Option<Box<Error>>,
    },

    /// Generic error with message
    #[error("Error: {0}")]
    Other(String),
}

/// Represents a specific phase of UI initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
pub enum BootstrapPhase {
    #[error("Populate")]
    Populate,
    #[error("Subscribe")]
    Subscribe,
}

/// Shorthand for Result with our Error type
pub type Result<T> = StdResult<T, Error>;

impl Error {
    /// Wrap `source` as a failure of the given initialization phase.
    pub fn bootstrap(phase: BootstrapPhase, message: impl Into<String>, source: Error) -> Self {
        Error::Bootstrap {
            phase,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Other(msg.to_string())
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Other(msg)
    }
}
