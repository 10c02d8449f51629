//! # pageshell Module Loader
//!
//! Loads the separately compiled computational module without blocking the
//! UI track. The module is opaque: the only contract is a load-and-initialize
//! entry point that either succeeds or fails.
//!
//! - [`ModuleSource`] performs the actual fetch and initialization.
//! - [`ModuleLoader`] spawns the load, logs failures, and returns a
//!   [`ModuleHandle`] that can be awaited or ignored.
pub mod error;
pub mod loader;
#[cfg(not(target_arch = "wasm32"))]
pub mod source;
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

use async_trait::async_trait;

use crate::module_loader::error::ModuleLoadError;

/// Fetch-and-initialize entry point for the computational module.
#[async_trait(?Send)]
pub trait ModuleSource {
    /// Short name used in diagnostics
    fn name(&self) -> &str;

    /// Fetch the module at `path` and run its initializer.
    async fn load_and_init(&self, path: &str) -> Result<(), ModuleLoadError>;
}

pub use loader::{ModuleHandle, ModuleLoader, ModuleOutcome, ModuleState};
#[cfg(not(target_arch = "wasm32"))]
pub use source::FsModuleSource;
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use web::WebModuleSource;

// Test module declaration
#[cfg(test)]
mod tests;
