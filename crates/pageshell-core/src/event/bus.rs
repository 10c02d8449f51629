use std::fmt;
use std::rc::{Rc, Weak};

use serde::Serialize;
use serde_json::Value;

use crate::dom::{DomCapability, EventTarget, Listener, ListenerId};
use crate::event::error::EventBusError;
use crate::event::NotificationEvent;
use crate::region::Region;

/// Listeners attached to a region for one event name.
///
/// Dropping a subscription leaves the listeners attached, the way a native
/// listener outlives the code that added it. Call
/// [`unsubscribe`](Self::unsubscribe) to detach.
pub struct Subscription {
    event_name: String,
    listeners: Vec<ListenerId>,
    dom: Weak<dyn DomCapability>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
         .field("event_name", &self.event_name)
         .field("listeners", &self.listeners)
         .finish_non_exhaustive()
    }
}

impl Subscription {
    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    /// Number of nodes the handler was attached to.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Detach every listener. Returns how many were still attached.
    pub fn unsubscribe(self) -> usize {
        let Some(dom) = self.dom.upgrade() else {
            return 0;
        };
        self.listeners.iter().filter(|id| dom.remove_listener(**id)).count()
    }
}

/// Per-region publish/subscribe surface.
#[derive(Clone)]
pub struct EventBus {
    dom: Rc<dyn DomCapability>,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus").finish_non_exhaustive()
    }
}

impl EventBus {
    pub fn new(dom: Rc<dyn DomCapability>) -> Self {
        Self { dom }
    }

    /// Attach `handler` for `event_name` on every node of `region`.
    ///
    /// A region with no nodes yields an empty subscription.
    pub fn on<F>(&self, region: &Region, event_name: &str, handler: F) -> Result<Subscription, EventBusError>
    where
        F: Fn(&NotificationEvent) + 'static,
    {
        if event_name.is_empty() {
            return Err(EventBusError::EmptyEventName);
        }
        let handler: Listener = Rc::new(handler);
        let mut listeners = Vec::with_capacity(region.nodes().len());
        for node in region.nodes().iter() {
            match self.dom.add_listener(EventTarget::Node(node), event_name, handler.clone()) {
                Ok(id) => listeners.push(id),
                Err(source) => {
                    // Leave nothing half attached.
                    for id in listeners {
                        self.dom.remove_listener(id);
                    }
                    return Err(EventBusError::RegistrationFailed { event_name: event_name.to_string(), source });
                }
            }
        }
        log::debug!(
            "Subscribed to '{}' on region '{}' ({} node(s))",
            event_name,
            region.id(),
            listeners.len()
        );
        Ok(Subscription {
            event_name: event_name.to_string(),
            listeners,
            dom: Rc::downgrade(&self.dom),
        })
    }

    /// Dispatch `event_name` with `detail` on every node of `region`.
    ///
    /// Returns the number of listener invocations. Zero listeners is fine.
    pub fn emit(&self, region: &Region, event_name: &str, detail: Value) -> Result<usize, EventBusError> {
        if event_name.is_empty() {
            return Err(EventBusError::EmptyEventName);
        }
        let event = NotificationEvent::new(event_name, detail);
        let mut invoked = 0;
        for node in region.nodes().iter() {
            invoked += self
                .dom
                .dispatch(EventTarget::Node(node), &event)
                .map_err(|source| EventBusError::DispatchFailed { event_name: event_name.to_string(), source })?;
        }
        log::debug!("Emitted '{}' on region '{}' to {} listener(s)", event_name, region.id(), invoked);
        Ok(invoked)
    }

    /// Serialize `payload` and emit it as the event detail.
    pub fn emit_serialized<T: Serialize>(&self, region: &Region, event_name: &str, payload: &T) -> Result<usize, EventBusError> {
        let detail = serde_json::to_value(payload)
            .map_err(|source| EventBusError::InvalidPayload { event_name: event_name.to_string(), source })?;
        self.emit(region, event_name, detail)
    }
}
