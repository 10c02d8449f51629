//! # pageshell DOM capability
//!
//! The shell never touches a global document. Everything it needs from the
//! host (node lookup, insertion, listener registration and dispatch) goes
//! through the injected [`DomCapability`] trait.
//!
//! - [`MemoryDocument`](memory::MemoryDocument) is a single-threaded in-memory
//!   document used by tests and the CLI.
//! - `WebDocument` (feature `web`, wasm32 only) forwards to `web_sys`.
pub mod error;
pub mod memory;
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::dom::error::DomError;
use crate::event::NotificationEvent;

/// Identifier of a node handed out by a [`DomCapability`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Where a listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTarget {
    /// The document itself (readiness notifications)
    Document,
    /// A single node
    Node(NodeId),
}

/// Type for listener identifiers
pub type ListenerId = u64;

/// Listener callback. Shared so one handler can be attached to many nodes.
pub type Listener = Rc<dyn Fn(&NotificationEvent)>;

/// Structural parse state of the host document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadyState {
    /// Still parsing
    #[default]
    Loading,
    /// Parsed, subresources may still be loading
    Interactive,
    /// Everything loaded
    Complete,
}

impl ReadyState {
    /// Whether the node tree is safe to query and mutate.
    pub fn is_parsed(&self) -> bool {
        !matches!(self, ReadyState::Loading)
    }
}

/// Ordered set of nodes matched by a selector. May be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeSet(Vec<NodeId>);

impl NodeSet {
    pub fn new(nodes: Vec<NodeId>) -> Self {
        Self(nodes)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.0.iter().copied()
    }

    pub fn first(&self) -> Option<NodeId> {
        self.0.first().copied()
    }
}

impl FromIterator<NodeId> for NodeSet {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Host document capability: select, insert after, attach/detach listeners, dispatch.
///
/// All methods take `&self`; implementations use interior mutability because
/// listeners may re-enter the document while a dispatch is in progress.
pub trait DomCapability {
    /// Current parse state of the document.
    fn ready_state(&self) -> ReadyState;

    /// Select every node matching `selector`. Zero matches is not an error.
    fn select(&self, selector: &str) -> Result<NodeSet, DomError>;

    /// Insert `markup` immediately after each node of `nodes`.
    ///
    /// Returns the number of insertions performed.
    fn insert_after(&self, nodes: &NodeSet, markup: &str) -> Result<usize, DomError>;

    /// Attach `listener` for `event_name` on `target`.
    fn add_listener(&self, target: EventTarget, event_name: &str, listener: Listener) -> Result<ListenerId, DomError>;

    /// Detach a listener. Returns `false` if it was not attached.
    fn remove_listener(&self, id: ListenerId) -> bool;

    /// Synchronously deliver `event` to the listeners currently attached to `target`.
    ///
    /// Returns the number of listeners invoked.
    fn dispatch(&self, target: EventTarget, event: &NotificationEvent) -> Result<usize, DomError>;
}

pub use memory::MemoryDocument;
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use web::WebDocument;

// Test module declaration
#[cfg(test)]
mod tests;
