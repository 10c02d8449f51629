use std::cell::RefCell;
use std::rc::Rc;

use serde_json::json;

use crate::dom::error::DomError;
use crate::dom::{DomCapability, EventTarget, Listener, MemoryDocument, NodeId, NodeSet, ReadyState};
use crate::event::NotificationEvent;

fn page() -> MemoryDocument {
    MemoryDocument::new()
        .with_element("div", Some("nav"))
        .with_element("div", Some("app"))
        .with_element("div", Some("message_bar"))
}

fn recorder(log: &Rc<RefCell<Vec<String>>>, tag: &'static str) -> Listener {
    let log = log.clone();
    Rc::new(move |event: &NotificationEvent| log.borrow_mut().push(format!("{}:{}", tag, event.detail)))
}

#[test]
fn test_select_by_id_tag_and_both() {
    let doc = page().with_element("p", None);

    let by_id = doc.select("#app").expect("select #app");
    assert_eq!(by_id.len(), 1);

    let by_tag_and_id = doc.select("div#app").expect("select div#app");
    assert_eq!(by_tag_and_id, by_id);

    let divs = doc.select("div").expect("select div");
    assert_eq!(divs.len(), 3);

    let wrong_tag = doc.select("span#app").expect("select span#app");
    assert!(wrong_tag.is_empty());
}

#[test]
fn test_select_missing_is_empty_not_error() {
    let doc = page();
    let missing = doc.select("#sidebar").expect("missing selector should not error");
    assert!(missing.is_empty());
}

#[test]
fn test_select_rejects_unsupported_selectors() {
    let doc = page();
    for selector in ["", "   ", "#", "div > p", ".class", "#a b"] {
        match doc.select(selector) {
            Err(DomError::InvalidSelector { .. }) => {}
            other => panic!("expected InvalidSelector for {:?}, got {:?}", selector, other),
        }
    }
}

#[test]
fn test_insert_after_places_markup_directly_after_node() {
    let doc = page();
    let app = doc.select("#app").unwrap();

    let inserted = doc.insert_after(&app, "<p> App Contents </p>").unwrap();
    assert_eq!(inserted, 1);
    assert_eq!(doc.insertion_count(), 1);
    assert_eq!(doc.markup_after(app.first().unwrap()), vec!["<p> App Contents </p>".to_string()]);

    let rendered = doc.render();
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines, vec![
        "<div id=\"nav\"></div>",
        "<div id=\"app\"></div>",
        "<p> App Contents </p>",
        "<div id=\"message_bar\"></div>",
    ]);
}

#[test]
fn test_insert_after_every_matched_node() {
    let doc = MemoryDocument::new()
        .with_element("section", None)
        .with_element("section", None);
    let sections = doc.select("section").unwrap();

    assert_eq!(doc.insert_after(&sections, "<hr>").unwrap(), 2);
    for node in sections.iter() {
        assert_eq!(doc.markup_after(node), vec!["<hr>".to_string()]);
    }
}

#[test]
fn test_insert_after_zero_nodes_is_noop() {
    let doc = page();
    let before = doc.render();

    assert_eq!(doc.insert_after(&NodeSet::empty(), "<p>x</p>").unwrap(), 0);
    assert_eq!(doc.render(), before);
    assert_eq!(doc.insertion_count(), 0);
}

#[test]
fn test_insert_after_unknown_node_fails_without_mutation() {
    let doc = page();
    let before = doc.render();
    let app = doc.select("#app").unwrap().first().unwrap();
    let set = NodeSet::new(vec![app, NodeId(999)]);

    match doc.insert_after(&set, "<p>x</p>") {
        Err(DomError::NodeNotFound(NodeId(999))) => {}
        other => panic!("expected NodeNotFound, got {:?}", other),
    }
    assert_eq!(doc.render(), before, "no partial insertion expected");
}

#[test]
fn test_listeners_run_in_registration_order() {
    let doc = page();
    let app = doc.select("#app").unwrap().first().unwrap();
    let log = Rc::new(RefCell::new(Vec::new()));

    doc.add_listener(EventTarget::Node(app), "new_message", recorder(&log, "first")).unwrap();
    doc.add_listener(EventTarget::Node(app), "new_message", recorder(&log, "second")).unwrap();
    doc.add_listener(EventTarget::Node(app), "other", recorder(&log, "other")).unwrap();

    let invoked = doc
        .dispatch(EventTarget::Node(app), &NotificationEvent::new("new_message", json!(1)))
        .unwrap();
    assert_eq!(invoked, 2);
    assert_eq!(*log.borrow(), vec!["first:1".to_string(), "second:1".to_string()]);
}

#[test]
fn test_remove_listener() {
    let doc = page();
    let app = doc.select("#app").unwrap().first().unwrap();
    let log = Rc::new(RefCell::new(Vec::new()));

    let id = doc.add_listener(EventTarget::Node(app), "ping", recorder(&log, "l")).unwrap();
    assert!(doc.remove_listener(id));
    assert!(!doc.remove_listener(id), "second removal should report false");

    let invoked = doc.dispatch(EventTarget::Node(app), &NotificationEvent::new("ping", json!(null))).unwrap();
    assert_eq!(invoked, 0);
    assert!(log.borrow().is_empty());
}

#[test]
fn test_listener_added_during_dispatch_misses_current_event() {
    let doc = Rc::new(page());
    let app = doc.select("#app").unwrap().first().unwrap();
    let log = Rc::new(RefCell::new(Vec::new()));

    let doc_for_listener = doc.clone();
    let log_for_listener = log.clone();
    let adder: Listener = Rc::new(move |_event: &NotificationEvent| {
        log_for_listener.borrow_mut().push("adder".to_string());
        doc_for_listener
            .add_listener(EventTarget::Node(app), "ping", recorder(&log_for_listener, "late"))
            .unwrap();
    });
    doc.add_listener(EventTarget::Node(app), "ping", adder).unwrap();

    doc.dispatch(EventTarget::Node(app), &NotificationEvent::new("ping", json!(1))).unwrap();
    assert_eq!(*log.borrow(), vec!["adder".to_string()]);

    doc.dispatch(EventTarget::Node(app), &NotificationEvent::new("ping", json!(2))).unwrap();
    assert!(log.borrow().contains(&"late:2".to_string()));
}

#[test]
fn test_listener_on_unknown_node_is_rejected() {
    let doc = page();
    let log = Rc::new(RefCell::new(Vec::new()));
    let result = doc.add_listener(EventTarget::Node(NodeId(404)), "ping", recorder(&log, "x"));
    assert!(matches!(result, Err(DomError::NodeNotFound(NodeId(404)))));
}

#[test]
fn test_finish_parsing_fires_dom_content_loaded_once() {
    let doc = page();
    let log = Rc::new(RefCell::new(Vec::new()));
    doc.add_listener(EventTarget::Document, "DOMContentLoaded", recorder(&log, "ready")).unwrap();

    assert_eq!(doc.ready_state(), ReadyState::Loading);
    assert_eq!(doc.finish_parsing(), 1);
    assert_eq!(doc.ready_state(), ReadyState::Interactive);
    assert_eq!(doc.finish_parsing(), 0, "already parsed, no second notification");
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn test_complete_fires_load_after_parse() {
    let doc = page();
    let log = Rc::new(RefCell::new(Vec::new()));
    doc.add_listener(EventTarget::Document, "DOMContentLoaded", recorder(&log, "ready")).unwrap();
    doc.add_listener(EventTarget::Document, "load", recorder(&log, "load")).unwrap();

    assert_eq!(doc.complete(), 2);
    assert_eq!(doc.ready_state(), ReadyState::Complete);
    assert_eq!(*log.borrow(), vec!["ready:null".to_string(), "load:null".to_string()]);
    assert_eq!(doc.complete(), 0);
}

#[test]
fn test_with_ready_state_complete() {
    let doc = MemoryDocument::with_ready_state(ReadyState::Complete);
    assert!(doc.ready_state().is_parsed());
    assert_eq!(doc.finish_parsing(), 0);
}
