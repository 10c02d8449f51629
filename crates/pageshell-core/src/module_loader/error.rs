//! # pageshell Module Loader Errors
//!
//! Defines [`ModuleLoadError`]. These never abort the bootstrap; the loader
//! logs them and resolves the handle to a failed outcome.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModuleLoadError {
    #[error("Module not found at '{}'", path.display())]
    NotFound { path: PathBuf },

    #[error("I/O error while reading module '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{path}' is not a valid module: {reason}")]
    InvalidModule { path: String, reason: String },

    #[error("Module '{path}' failed to initialize: {message}")]
    InitFailed { path: String, message: String },
}
