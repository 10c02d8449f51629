//! # pageshell Kernel
//!
//! The `kernel` module orchestrates the shell's two independent tracks:
//!
//! - **Module track**: the computational module is loaded in the background
//!   through the [`ModuleLoader`](crate::module_loader::ModuleLoader). Its
//!   failure is logged and never reaches the UI track.
//! - **UI track**: an initializer is registered with the
//!   [`ReadinessGate`](crate::readiness::ReadinessGate). Once the document is
//!   parsed it populates the regions and subscribes the app region to
//!   `new_message`, exactly once.
//!
//! [`Bootstrap`](bootstrap::Bootstrap) wires both and hands back a
//! [`Shell`](bootstrap::Shell). Constants live in `constants`, errors in `error`.
pub mod bootstrap;
pub mod constants;
pub mod error;

pub use bootstrap::{Bootstrap, Shell, UiStage};
pub use error::{Error, Result};
