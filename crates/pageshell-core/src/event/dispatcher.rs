use std::collections::HashMap;
use std::fmt;

use crate::dom::{EventTarget, Listener, ListenerId};

//--------------------------------------------------
// ListenerTable (used by in-process documents)
//--------------------------------------------------

/// Listener registry keyed by target and event name.
///
/// Listeners for one key are kept in registration order. Dispatch works on a
/// snapshot so a listener may add or remove listeners while being invoked.
pub struct ListenerTable {
    listeners: HashMap<(EventTarget, String), Vec<(ListenerId, Listener)>>,
    next_listener_id: ListenerId,
}

// Manual Debug implementation, listeners are opaque closures
impl fmt::Debug for ListenerTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listener_count: usize = self.listeners.values().map(|v| v.len()).sum();
        f.debug_struct("ListenerTable")
         .field("keys", &self.listeners.len())
         .field("listener_count", &listener_count)
         .field("next_listener_id", &self.next_listener_id)
         .finish()
    }
}

impl ListenerTable {
    pub fn new() -> Self {
        Self {
            listeners: HashMap::new(),
            next_listener_id: 1,
        }
    }

    pub fn register(&mut self, target: EventTarget, event_name: &str, listener: Listener) -> ListenerId {
        let id = self.next_listener_id; self.next_listener_id += 1;
        self.listeners.entry((target, event_name.to_string())).or_default().push((id, listener));
        id
    }

    pub fn unregister(&mut self, id: ListenerId) -> bool {
        let mut found = false;
        self.listeners.values_mut().for_each(|listeners| {
            let len_before = listeners.len(); listeners.retain(|(l_id, _)| *l_id != id);
            if listeners.len() < len_before { found = true; }
        });
        self.listeners.retain(|_, listeners| !listeners.is_empty());
        found
    }

    /// Listeners registered for `target`/`event_name` right now, in registration order.
    pub fn snapshot(&self, target: EventTarget, event_name: &str) -> Vec<Listener> {
        self.listeners
            .get(&(target, event_name.to_string()))
            .map(|listeners| listeners.iter().map(|(_, l)| l.clone()).collect())
            .unwrap_or_default()
    }

    pub fn count(&self, target: EventTarget, event_name: &str) -> usize {
        self.listeners.get(&(target, event_name.to_string())).map_or(0, |l| l.len())
    }

    pub fn len(&self) -> usize { self.listeners.values().map(|v| v.len()).sum() }

    pub fn is_empty(&self) -> bool { self.len() == 0 }
}

impl Default for ListenerTable { fn default() -> Self { Self::new() } }
