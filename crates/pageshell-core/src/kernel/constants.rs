/// Application name
pub const APP_NAME: &str = "pageshell";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default relative path of the computational module binary, read by `FsModuleSource`
pub const DEFAULT_MODULE_PATH: &str = "pkg/index_bg.wasm";

/// Default path of the wasm-pack JS glue, imported by `WebModuleSource`.
/// Resolved against the page URL.
pub const WEB_MODULE_PATH: &str = "./pkg/index.js";

/// Event the app region listens for
pub const NEW_MESSAGE_EVENT: &str = "new_message";

/// Document notification fired once the structural parse completes
pub const DOM_CONTENT_LOADED_EVENT: &str = "DOMContentLoaded";

/// Document notification fired once every subresource has loaded
pub const LOAD_EVENT: &str = "load";

/// Diagnostic marker logged at the end of UI initialization
pub const PAGE_LOADED_MARKER: &str = "page loaded";
