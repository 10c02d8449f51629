//! Test doubles shared across the crate's unit tests.
use std::cell::{Cell, RefCell};

use async_trait::async_trait;
use futures::channel::oneshot;

use crate::dom::error::DomError;
use crate::dom::{DomCapability, EventTarget, Listener, ListenerId, MemoryDocument, NodeSet, ReadyState};
use crate::event::NotificationEvent;
use crate::module_loader::error::ModuleLoadError;
use crate::module_loader::ModuleSource;

/// Document in `state` with the three regions in page order.
pub(crate) fn page(state: ReadyState) -> MemoryDocument {
    MemoryDocument::with_ready_state(state)
        .with_element("div", Some("nav"))
        .with_element("div", Some("app"))
        .with_element("div", Some("message_bar"))
}

/// Module source with a scripted result, optionally held until released.
pub(crate) struct StubSource {
    result: Result<(), String>,
    release: RefCell<Option<oneshot::Receiver<()>>>,
    paths: RefCell<Vec<String>>,
}

impl StubSource {
    pub(crate) fn succeeding() -> Self {
        Self { result: Ok(()), release: RefCell::new(None), paths: RefCell::new(Vec::new()) }
    }

    pub(crate) fn failing(message: &str) -> Self {
        Self { result: Err(message.to_string()), release: RefCell::new(None), paths: RefCell::new(Vec::new()) }
    }

    /// Block the load until the returned sender fires (or is dropped).
    pub(crate) fn held(self) -> (Self, oneshot::Sender<()>) {
        let (tx, rx) = oneshot::channel();
        *self.release.borrow_mut() = Some(rx);
        (self, tx)
    }

    pub(crate) fn calls(&self) -> usize {
        self.paths.borrow().len()
    }

    /// Every path a load was attempted against, in order.
    pub(crate) fn paths(&self) -> Vec<String> {
        self.paths.borrow().clone()
    }
}

#[async_trait(?Send)]
impl ModuleSource for StubSource {
    fn name(&self) -> &str {
        "stub"
    }

    async fn load_and_init(&self, path: &str) -> Result<(), ModuleLoadError> {
        self.paths.borrow_mut().push(path.to_string());
        let release = self.release.borrow_mut().take();
        if let Some(release) = release {
            let _ = release.await;
        }
        self.result.clone().map_err(|message| ModuleLoadError::InitFailed {
            path: path.to_string(),
            message,
        })
    }
}

/// Memory document that can be told to reject particular operations.
pub(crate) struct FaultyDocument {
    pub(crate) inner: MemoryDocument,
    /// Number of `insert_after` calls that succeed before the rest fail
    insert_budget: Cell<Option<usize>>,
    reject_node_listeners: Cell<bool>,
    reject_document_listeners: Cell<bool>,
}

impl FaultyDocument {
    pub(crate) fn new(inner: MemoryDocument) -> Self {
        Self {
            inner,
            insert_budget: Cell::new(None),
            reject_node_listeners: Cell::new(false),
            reject_document_listeners: Cell::new(false),
        }
    }

    pub(crate) fn fail_inserts_after(self, allowed: usize) -> Self {
        self.insert_budget.set(Some(allowed));
        self
    }

    pub(crate) fn reject_node_listeners(self) -> Self {
        self.reject_node_listeners.set(true);
        self
    }

    pub(crate) fn reject_document_listeners(self) -> Self {
        self.reject_document_listeners.set(true);
        self
    }

    fn refused(operation: &str) -> DomError {
        DomError::Host { operation: operation.to_string(), message: "refused by test document".to_string() }
    }
}

impl DomCapability for FaultyDocument {
    fn ready_state(&self) -> ReadyState {
        self.inner.ready_state()
    }

    fn select(&self, selector: &str) -> Result<NodeSet, DomError> {
        self.inner.select(selector)
    }

    fn insert_after(&self, nodes: &NodeSet, markup: &str) -> Result<usize, DomError> {
        match self.insert_budget.get() {
            Some(0) => return Err(Self::refused("insert_after")),
            Some(n) => self.insert_budget.set(Some(n - 1)),
            None => {}
        }
        self.inner.insert_after(nodes, markup)
    }

    fn add_listener(&self, target: EventTarget, event_name: &str, listener: Listener) -> Result<ListenerId, DomError> {
        let refuse = match target {
            EventTarget::Document => self.reject_document_listeners.get(),
            EventTarget::Node(_) => self.reject_node_listeners.get(),
        };
        if refuse {
            return Err(Self::refused("add_listener"));
        }
        self.inner.add_listener(target, event_name, listener)
    }

    fn remove_listener(&self, id: ListenerId) -> bool {
        self.inner.remove_listener(id)
    }

    fn dispatch(&self, target: EventTarget, event: &NotificationEvent) -> Result<usize, DomError> {
        self.inner.dispatch(target, event)
    }
}
