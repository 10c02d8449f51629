use async_trait::async_trait;
use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::module_loader::error::ModuleLoadError;
use crate::module_loader::ModuleSource;

// Resolve against the page, not against this snippet's own URL.
#[wasm_bindgen(inline_js = "export function import_module(path) { return import(new URL(path, document.baseURI).href); }")]
extern "C" {
    #[wasm_bindgen(catch)]
    fn import_module(path: &str) -> Result<Promise, JsValue>;
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// Loads the module with a dynamic `import()` and runs its default export.
///
/// `path` must name the wasm-pack JS glue (see
/// [`WEB_MODULE_PATH`](crate::kernel::constants::WEB_MODULE_PATH)), not the `.wasm` binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebModuleSource;

#[async_trait(?Send)]
impl ModuleSource for WebModuleSource {
    fn name(&self) -> &str {
        "dynamic-import"
    }

    async fn load_and_init(&self, path: &str) -> Result<(), ModuleLoadError> {
        let init_failed = |value: JsValue| ModuleLoadError::InitFailed {
            path: path.to_string(),
            message: describe(&value),
        };

        let promise = import_module(path).map_err(init_failed)?;
        let namespace = JsFuture::from(promise).await.map_err(init_failed)?;

        // wasm-pack glue exports its initializer as `default`; plain modules may not.
        let init = Reflect::get(&namespace, &JsValue::from_str("default")).map_err(init_failed)?;
        if let Some(init) = init.dyn_ref::<Function>() {
            let result = init.call0(&JsValue::UNDEFINED).map_err(init_failed)?;
            if let Some(promise) = result.dyn_ref::<Promise>() {
                JsFuture::from(promise.clone()).await.map_err(init_failed)?;
            }
        }
        Ok(())
    }
}
