//! # pageshell DOM Errors
//!
//! Errors reported by a [`DomCapability`](crate::dom::DomCapability).
use crate::dom::NodeId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomError {
    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector {
        selector: String,
        reason: String,
    },

    #[error("Node {0} is not part of the document")]
    NodeNotFound(NodeId),

    #[error("Host document error during '{operation}': {message}")]
    Host {
        operation: String, // e.g., "querySelectorAll", "dispatchEvent"
        message: String,
    },
}
