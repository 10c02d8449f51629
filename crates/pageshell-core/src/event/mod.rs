//! # pageshell Event System
//!
//! Publish/subscribe between regions on top of the host's native dispatch.
//! Delivery is synchronous: every listener attached when [`EventBus::emit`]
//! is called has run before it returns.
pub mod bus;
pub mod dispatcher;
pub mod error;
pub mod types;

/// Re-export important types
pub use bus::{EventBus, Subscription};
pub use dispatcher::ListenerTable;
pub use types::NotificationEvent;

// Test module declaration
#[cfg(test)]
mod tests;
