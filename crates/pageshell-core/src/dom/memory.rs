use std::cell::{Cell, RefCell};
use std::fmt;

use crate::dom::error::DomError;
use crate::dom::{DomCapability, EventTarget, Listener, ListenerId, NodeId, NodeSet, ReadyState};
use crate::event::dispatcher::ListenerTable;
use crate::event::NotificationEvent;
use crate::kernel::constants::{DOM_CONTENT_LOADED_EVENT, LOAD_EVENT};

#[derive(Debug, Clone)]
enum NodeKind {
    Element { tag: String, id: Option<String> },
    Markup(String),
}

#[derive(Debug, Clone)]
struct Node {
    id: NodeId,
    kind: NodeKind,
}

/// Parsed form of the selectors the memory document understands:
/// `#id`, `tag` and `tag#id`.
#[derive(Debug, PartialEq, Eq)]
struct SimpleSelector<'a> {
    tag: Option<&'a str>,
    id: Option<&'a str>,
}

impl<'a> SimpleSelector<'a> {
    fn parse(selector: &'a str) -> Result<Self, DomError> {
        let invalid = |reason: &str| DomError::InvalidSelector {
            selector: selector.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = selector.trim();
        if trimmed.is_empty() {
            return Err(invalid("selector is empty"));
        }
        let valid_ident = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

        let (tag, id) = match trimmed.split_once('#') {
            Some((tag, id)) => (if tag.is_empty() { None } else { Some(tag) }, Some(id)),
            None => (Some(trimmed), None),
        };
        if let Some(tag) = tag {
            if !valid_ident(tag) {
                return Err(invalid("unsupported tag selector"));
            }
        }
        if let Some(id) = id {
            if !valid_ident(id) {
                return Err(invalid("unsupported id selector"));
            }
        }
        Ok(Self { tag, id })
    }

    fn matches(&self, kind: &NodeKind) -> bool {
        match kind {
            NodeKind::Element { tag, id } => {
                self.tag.is_none_or(|t| t.eq_ignore_ascii_case(tag))
                    && self.id.is_none_or(|wanted| id.as_deref() == Some(wanted))
            }
            NodeKind::Markup(_) => false,
        }
    }
}

/// In-memory, single-threaded document.
///
/// Holds an ordered list of top-level nodes: elements appended by the page and
/// markup fragments inserted after them. Readiness notifications are delivered
/// when the embedder calls [`finish_parsing`](Self::finish_parsing) or
/// [`complete`](Self::complete), which stands in for the host task that fires
/// `DOMContentLoaded` and `load`.
pub struct MemoryDocument {
    nodes: RefCell<Vec<Node>>,
    next_node_id: Cell<u64>,
    ready_state: Cell<ReadyState>,
    listeners: RefCell<ListenerTable>,
    insertions: Cell<usize>,
}

impl fmt::Debug for MemoryDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryDocument")
         .field("nodes", &self.nodes.borrow().len())
         .field("ready_state", &self.ready_state.get())
         .field("listeners", &self.listeners.borrow().len())
         .finish()
    }
}

impl MemoryDocument {
    /// Create an empty document that is still loading.
    pub fn new() -> Self {
        Self::with_ready_state(ReadyState::Loading)
    }

    /// Create an empty document in the given state.
    pub fn with_ready_state(state: ReadyState) -> Self {
        Self {
            nodes: RefCell::new(Vec::new()),
            next_node_id: Cell::new(1),
            ready_state: Cell::new(state),
            listeners: RefCell::new(ListenerTable::new()),
            insertions: Cell::new(0),
        }
    }

    /// Builder form of [`append_element`](Self::append_element).
    pub fn with_element(self, tag: &str, id: Option<&str>) -> Self {
        self.append_element(tag, id);
        self
    }

    /// Append an element to the end of the document.
    pub fn append_element(&self, tag: &str, id: Option<&str>) -> NodeId {
        let node_id = self.allocate_id();
        self.nodes.borrow_mut().push(Node {
            id: node_id,
            kind: NodeKind::Element {
                tag: tag.to_ascii_lowercase(),
                id: id.map(str::to_string),
            },
        });
        node_id
    }

    /// Mark the structural parse as finished and fire `DOMContentLoaded`.
    ///
    /// Does nothing if the document already left the loading state; returns the
    /// number of listeners invoked.
    pub fn finish_parsing(&self) -> usize {
        if self.ready_state.get().is_parsed() {
            return 0;
        }
        self.ready_state.set(ReadyState::Interactive);
        log::debug!("Document parsed, firing {}", DOM_CONTENT_LOADED_EVENT);
        self.fire_document_event(DOM_CONTENT_LOADED_EVENT)
    }

    /// Finish parsing if needed, then mark the document complete and fire `load`.
    pub fn complete(&self) -> usize {
        let mut invoked = self.finish_parsing();
        if self.ready_state.get() != ReadyState::Complete {
            self.ready_state.set(ReadyState::Complete);
            invoked += self.fire_document_event(LOAD_EVENT);
        }
        invoked
    }

    /// Deliver a bare document-level notification regardless of ready state.
    pub fn fire_document_event(&self, event_name: &str) -> usize {
        let event = NotificationEvent::new(event_name, serde_json::Value::Null);
        self.invoke(EventTarget::Document, &event)
    }

    /// Number of markup insertions performed so far.
    pub fn insertion_count(&self) -> usize {
        self.insertions.get()
    }

    /// Markup fragments sitting directly after `node`, nearest first.
    pub fn markup_after(&self, node: NodeId) -> Vec<String> {
        let nodes = self.nodes.borrow();
        let Some(position) = nodes.iter().position(|n| n.id == node) else {
            return Vec::new();
        };
        nodes[position + 1..]
            .iter()
            .map_while(|n| match &n.kind {
                NodeKind::Markup(markup) => Some(markup.clone()),
                NodeKind::Element { .. } => None,
            })
            .collect()
    }

    /// Number of listeners attached to `target` for `event_name`.
    pub fn listener_count(&self, target: EventTarget, event_name: &str) -> usize {
        self.listeners.borrow().count(target, event_name)
    }

    /// Serialize the document as one node per line.
    pub fn render(&self) -> String {
        self.nodes
            .borrow()
            .iter()
            .map(|node| match &node.kind {
                NodeKind::Element { tag, id: Some(id) } => format!("<{tag} id=\"{id}\"></{tag}>"),
                NodeKind::Element { tag, id: None } => format!("<{tag}></{tag}>"),
                NodeKind::Markup(markup) => markup.clone(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn allocate_id(&self) -> NodeId {
        let id = self.next_node_id.get();
        self.next_node_id.set(id + 1);
        NodeId(id)
    }

    fn contains(&self, node: NodeId) -> bool {
        self.nodes.borrow().iter().any(|n| n.id == node)
    }

    fn check_target(&self, target: EventTarget) -> Result<(), DomError> {
        match target {
            EventTarget::Document => Ok(()),
            EventTarget::Node(node) if self.contains(node) => Ok(()),
            EventTarget::Node(node) => Err(DomError::NodeNotFound(node)),
        }
    }

    fn invoke(&self, target: EventTarget, event: &NotificationEvent) -> usize {
        // Snapshot first: listeners may touch the table while running.
        let listeners = self.listeners.borrow().snapshot(target, &event.name);
        for listener in &listeners {
            listener(event);
        }
        listeners.len()
    }
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl DomCapability for MemoryDocument {
    fn ready_state(&self) -> ReadyState {
        self.ready_state.get()
    }

    fn select(&self, selector: &str) -> Result<NodeSet, DomError> {
        let selector = SimpleSelector::parse(selector)?;
        Ok(self
            .nodes
            .borrow()
            .iter()
            .filter(|n| selector.matches(&n.kind))
            .map(|n| n.id)
            .collect())
    }

    fn insert_after(&self, nodes: &NodeSet, markup: &str) -> Result<usize, DomError> {
        // Validate the whole set before mutating anything.
        for node in nodes.iter() {
            if !self.contains(node) {
                return Err(DomError::NodeNotFound(node));
            }
        }
        let mut inserted = 0;
        for node in nodes.iter() {
            let new_id = self.allocate_id();
            let mut doc = self.nodes.borrow_mut();
            if let Some(position) = doc.iter().position(|n| n.id == node) {
                doc.insert(position + 1, Node { id: new_id, kind: NodeKind::Markup(markup.to_string()) });
                inserted += 1;
            }
        }
        self.insertions.set(self.insertions.get() + inserted);
        Ok(inserted)
    }

    fn add_listener(&self, target: EventTarget, event_name: &str, listener: Listener) -> Result<ListenerId, DomError> {
        self.check_target(target)?;
        Ok(self.listeners.borrow_mut().register(target, event_name, listener))
    }

    fn remove_listener(&self, id: ListenerId) -> bool {
        self.listeners.borrow_mut().unregister(id)
    }

    fn dispatch(&self, target: EventTarget, event: &NotificationEvent) -> Result<usize, DomError> {
        self.check_target(target)?;
        Ok(self.invoke(target, event))
    }
}
