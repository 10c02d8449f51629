use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Named, payload-carrying signal dispatched on a region.
///
/// `detail` is free-form; the shell enforces no schema beyond it being
/// serializable, which is what diagnostic logging relies on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationEvent {
    /// Event name, e.g. `new_message`
    #[serde(rename = "type")]
    pub name: String,
    /// Structured payload
    #[serde(default)]
    pub detail: Value,
}

impl NotificationEvent {
    pub fn new(name: impl Into<String>, detail: Value) -> Self {
        Self { name: name.into(), detail }
    }

    /// Deserialize the payload into a concrete type.
    pub fn detail_as<T: for<'de> Deserialize<'de>>(&self) -> Option<T> {
        serde_json::from_value(self.detail.clone()).ok()
    }
}
