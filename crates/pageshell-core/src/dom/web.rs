use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CustomEvent, CustomEventInit, Document, Element};

use crate::dom::error::DomError;
use crate::dom::{DomCapability, EventTarget, Listener, ListenerId, NodeId, NodeSet, ReadyState};
use crate::event::NotificationEvent;

type JsListener = Closure<dyn FnMut(web_sys::Event)>;

struct Registration {
    target: EventTarget,
    event_name: String,
    closure: JsListener,
}

fn host_error(operation: &str, value: JsValue) -> DomError {
    DomError::Host {
        operation: operation.to_string(),
        message: value.as_string().unwrap_or_else(|| format!("{:?}", value)),
    }
}

fn detail_to_json(detail: JsValue) -> serde_json::Value {
    if detail.is_undefined() || detail.is_null() {
        return serde_json::Value::Null;
    }
    js_sys::JSON::stringify(&detail)
        .ok()
        .and_then(|s| s.as_string())
        .and_then(|s| serde_json::from_str(&s).ok())
        .unwrap_or(serde_json::Value::Null)
}

/// [`DomCapability`] over the browser document.
///
/// Elements get a [`NodeId`] the first time a selector returns them; the same
/// element always maps to the same id. Listener closures are kept alive in a
/// table until removed.
pub struct WebDocument {
    document: Document,
    elements: RefCell<Vec<(NodeId, Element)>>,
    next_node_id: Cell<u64>,
    registrations: RefCell<HashMap<ListenerId, Registration>>,
    next_listener_id: Cell<ListenerId>,
}

impl WebDocument {
    /// Wrap the document of the current window.
    pub fn from_window() -> Result<Self, DomError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| DomError::Host {
                operation: "window.document".to_string(),
                message: "no document available".to_string(),
            })?;
        Ok(Self::new(document))
    }

    pub fn new(document: Document) -> Self {
        Self {
            document,
            elements: RefCell::new(Vec::new()),
            next_node_id: Cell::new(1),
            registrations: RefCell::new(HashMap::new()),
            next_listener_id: Cell::new(1),
        }
    }

    fn node_for(&self, element: Element) -> NodeId {
        let mut elements = self.elements.borrow_mut();
        if let Some((id, _)) = elements.iter().find(|(_, e)| *e == element) {
            return *id;
        }
        let id = NodeId(self.next_node_id.get());
        self.next_node_id.set(id.0 + 1);
        elements.push((id, element));
        id
    }

    fn element(&self, node: NodeId) -> Result<Element, DomError> {
        self.elements
            .borrow()
            .iter()
            .find(|(id, _)| *id == node)
            .map(|(_, e)| e.clone())
            .ok_or(DomError::NodeNotFound(node))
    }

    fn js_target(&self, target: EventTarget) -> Result<web_sys::EventTarget, DomError> {
        match target {
            EventTarget::Document => Ok(self.document.clone().into()),
            EventTarget::Node(node) => Ok(self.element(node)?.into()),
        }
    }
}

impl DomCapability for WebDocument {
    fn ready_state(&self) -> ReadyState {
        match self.document.ready_state().as_str() {
            "loading" => ReadyState::Loading,
            "interactive" => ReadyState::Interactive,
            _ => ReadyState::Complete,
        }
    }

    fn select(&self, selector: &str) -> Result<NodeSet, DomError> {
        let list = self
            .document
            .query_selector_all(selector)
            .map_err(|e| DomError::InvalidSelector {
                selector: selector.to_string(),
                reason: format!("{:?}", e),
            })?;
        let mut nodes = Vec::with_capacity(list.length() as usize);
        for index in 0..list.length() {
            if let Some(element) = list.item(index).and_then(|n| n.dyn_into::<Element>().ok()) {
                nodes.push(self.node_for(element));
            }
        }
        Ok(NodeSet::new(nodes))
    }

    fn insert_after(&self, nodes: &NodeSet, markup: &str) -> Result<usize, DomError> {
        let mut inserted = 0;
        for node in nodes.iter() {
            self.element(node)?
                .insert_adjacent_html("afterend", markup)
                .map_err(|e| host_error("insertAdjacentHTML", e))?;
            inserted += 1;
        }
        Ok(inserted)
    }

    fn add_listener(&self, target: EventTarget, event_name: &str, listener: Listener) -> Result<ListenerId, DomError> {
        let js_target = self.js_target(target)?;
        let name = event_name.to_string();
        let closure: JsListener = Closure::wrap(Box::new(move |event: web_sys::Event| {
            let detail = event
                .dyn_ref::<CustomEvent>()
                .map(|custom| detail_to_json(custom.detail()))
                .unwrap_or(serde_json::Value::Null);
            listener(&NotificationEvent::new(name.clone(), detail));
        }) as Box<dyn FnMut(web_sys::Event)>);
        js_target
            .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())
            .map_err(|e| host_error("addEventListener", e))?;

        let id = self.next_listener_id.get();
        self.next_listener_id.set(id + 1);
        self.registrations.borrow_mut().insert(id, Registration {
            target,
            event_name: event_name.to_string(),
            closure,
        });
        Ok(id)
    }

    fn remove_listener(&self, id: ListenerId) -> bool {
        let Some(registration) = self.registrations.borrow_mut().remove(&id) else {
            return false;
        };
        if let Ok(js_target) = self.js_target(registration.target) {
            let _ = js_target.remove_event_listener_with_callback(
                &registration.event_name,
                registration.closure.as_ref().unchecked_ref(),
            );
        }
        // The closure may be the one currently running; free it on a later tick.
        let closure = registration.closure;
        wasm_bindgen_futures::spawn_local(async move { drop(closure) });
        true
    }

    fn dispatch(&self, target: EventTarget, event: &NotificationEvent) -> Result<usize, DomError> {
        let js_target = self.js_target(target)?;
        let detail = serde_json::to_string(&event.detail)
            .ok()
            .and_then(|json| js_sys::JSON::parse(&json).ok())
            .unwrap_or(JsValue::NULL);
        let init = CustomEventInit::new();
        init.set_detail(&detail);
        let custom = CustomEvent::new_with_event_init_dict(&event.name, &init)
            .map_err(|e| host_error("new CustomEvent", e))?;
        let attached = self
            .registrations
            .borrow()
            .values()
            .filter(|r| r.target == target && r.event_name == event.name)
            .count();
        js_target
            .dispatch_event(&custom)
            .map_err(|e| host_error("dispatchEvent", e))?;
        Ok(attached)
    }
}
