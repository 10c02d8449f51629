#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod browser;
pub mod config;
pub mod dom;
pub mod event;
pub mod host;
pub mod kernel;
pub mod module_loader;
pub mod readiness;
pub mod region;

#[cfg(test)]
mod tests;

// Re-export key public types for the binary and embedders
pub use kernel::{Bootstrap, Shell, UiStage};
pub use kernel::error::{Error, Result};
pub use config::ShellConfig;
pub use dom::{DomCapability, MemoryDocument, ReadyState};
pub use event::{EventBus, NotificationEvent, Subscription};
pub use module_loader::{ModuleHandle, ModuleLoader, ModuleOutcome, ModuleSource, ModuleState};
pub use readiness::{ReadinessGate, ReadySubscription};
pub use region::{Region, RegionId, RegionRegistry};
