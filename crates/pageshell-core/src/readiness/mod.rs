//! # pageshell Readiness Gate
//!
//! Defers an initializer until the document's structural parse is complete.
//! If the document is already parsed the initializer runs inline; otherwise a
//! one-shot subscription to `DOMContentLoaded` runs it on the first
//! notification and then detaches itself.
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::dom::error::DomError;
use crate::dom::{DomCapability, EventTarget, Listener, ListenerId};
use crate::event::NotificationEvent;
use crate::kernel::constants::DOM_CONTENT_LOADED_EVENT;

type Initializer = Box<dyn FnOnce()>;

/// Pending initializer slot shared between the gate's listener and the subscription.
struct PendingInit {
    initializer: RefCell<Option<Initializer>>,
    listener: Cell<Option<ListenerId>>,
    dom: Weak<dyn DomCapability>,
}

impl PendingInit {
    /// Take the initializer and detach the listener. `None` once fired or cancelled.
    fn take(&self) -> Option<Initializer> {
        let initializer = self.initializer.borrow_mut().take()?;
        if let (Some(dom), Some(id)) = (self.dom.upgrade(), self.listener.take()) {
            dom.remove_listener(id);
        }
        Some(initializer)
    }
}

/// Handle returned by [`ReadinessGate::on_ready`].
pub enum ReadySubscription {
    /// The document was already parsed; the initializer ran inline.
    Immediate,
    /// Waiting for the ready notification.
    Pending(Rc<PendingInitHandle>),
}

/// Opaque wrapper so the pending slot stays private.
pub struct PendingInitHandle(PendingInit);

impl fmt::Debug for ReadySubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadySubscription::Immediate => f.write_str("ReadySubscription::Immediate"),
            ReadySubscription::Pending(_) => f
                .debug_struct("ReadySubscription::Pending")
                .field("is_pending", &self.is_pending())
                .finish(),
        }
    }
}

impl ReadySubscription {
    /// Whether the initializer ran synchronously inside `on_ready`.
    pub fn ran_inline(&self) -> bool {
        matches!(self, ReadySubscription::Immediate)
    }

    /// Whether the initializer is still waiting to run.
    pub fn is_pending(&self) -> bool {
        match self {
            ReadySubscription::Immediate => false,
            ReadySubscription::Pending(handle) => handle.0.initializer.borrow().is_some(),
        }
    }

    /// Drop a pending initializer without running it.
    ///
    /// Returns `true` if something was cancelled.
    pub fn cancel(&self) -> bool {
        match self {
            ReadySubscription::Immediate => false,
            ReadySubscription::Pending(handle) => handle.0.take().is_some(),
        }
    }
}

/// Runs initializers once the document is ready.
#[derive(Clone)]
pub struct ReadinessGate {
    dom: Rc<dyn DomCapability>,
}

impl fmt::Debug for ReadinessGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadinessGate")
         .field("ready_state", &self.dom.ready_state())
         .finish()
    }
}

impl ReadinessGate {
    pub fn new(dom: Rc<dyn DomCapability>) -> Self {
        Self { dom }
    }

    /// Run `initializer` exactly once, as soon as the document is parsed.
    ///
    /// Panics inside the initializer are not caught here.
    pub fn on_ready<F>(&self, initializer: F) -> Result<ReadySubscription, DomError>
    where
        F: FnOnce() + 'static,
    {
        if self.dom.ready_state().is_parsed() {
            log::debug!("Document already parsed, running initializer inline");
            initializer();
            return Ok(ReadySubscription::Immediate);
        }

        let handle = Rc::new(PendingInitHandle(PendingInit {
            initializer: RefCell::new(Some(Box::new(initializer))),
            listener: Cell::new(None),
            dom: Rc::downgrade(&self.dom),
        }));

        // The slot only holds the document weakly, so this does not form a cycle.
        let slot = handle.clone();
        let listener: Listener = Rc::new(move |_event: &NotificationEvent| {
            if let Some(initializer) = slot.0.take() {
                log::debug!("{} received, running initializer", DOM_CONTENT_LOADED_EVENT);
                initializer();
            }
        });
        let id = self.dom.add_listener(EventTarget::Document, DOM_CONTENT_LOADED_EVENT, listener)?;
        handle.0.listener.set(Some(id));
        log::debug!("Document still loading, initializer deferred until {}", DOM_CONTENT_LOADED_EVENT);

        Ok(ReadySubscription::Pending(handle))
    }
}
