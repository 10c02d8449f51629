//! # pageshell Event Bus Errors
//!
//! Defines [`EventBusError`], raised when subscribing to or emitting on a region fails.
use crate::dom::error::DomError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventBusError {
    #[error("Event name must not be empty")]
    EmptyEventName,

    #[error("Failed to serialize payload for event '{event_name}': {source}")]
    InvalidPayload {
        event_name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to register listener for event '{event_name}': {source}")]
    RegistrationFailed {
        event_name: String,
        #[source]
        source: DomError,
    },

    #[error("Event dispatch failed for event '{event_name}': {source}")]
    DispatchFailed {
        event_name: String,
        #[source]
        source: DomError,
    },
}
