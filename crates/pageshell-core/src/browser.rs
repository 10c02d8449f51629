//! # pageshell Browser Entry
//!
//! Assembles the browser backend: the window's document, the microtask
//! spawner and the dynamic-import module source. On wasm32 with the `web`
//! feature the bootstrap runs as soon as the module is instantiated.
use std::cell::RefCell;
use std::rc::Rc;

use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::prelude::*;
use web_sys::console;

use crate::config::ShellConfig;
use crate::dom::WebDocument;
use crate::host::WebSpawner;
use crate::kernel::{Bootstrap, Result, Shell};
use crate::module_loader::WebModuleSource;

thread_local! {
    // Keeps region subscriptions reachable for the life of the page
    static SHELL: RefCell<Option<Shell>> = const { RefCell::new(None) };
}

/// Forwards `log` records to the browser console.
struct ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format!("[{}] {}", record.level(), record.args()));
        match record.level() {
            Level::Error => console::error_1(&line),
            Level::Warn => console::warn_1(&line),
            _ => console::log_1(&line),
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Bootstrap the shell against the current window's document.
pub fn launch(config: ShellConfig) -> Result<Shell> {
    let dom = Rc::new(WebDocument::from_window()?);
    Bootstrap::new(dom, Rc::new(WebSpawner), Rc::new(WebModuleSource), config).start()
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let config = ShellConfig::web();
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(config.log_level.parse().unwrap_or(LevelFilter::Info));
    }

    match launch(config) {
        Ok(shell) => SHELL.with(|slot| *slot.borrow_mut() = Some(shell)),
        Err(e) => console::error_1(&JsValue::from_str(&format!("Bootstrap failed: {}", e))),
    }
}
