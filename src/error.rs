//! UI Errors
//!
//! Every failure the controller can hit. None of them are fatal: they are
//! logged and turned into a static message or an unchanged page.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum UiError {
    /// The request never produced a response (fetch rejected).
    #[error("network error: {0}")]
    Network(String),

    /// The response body was not what the endpoint promises.
    #[error("parse error: {0}")]
    Parse(String),

    /// The server answered, but refused (`error: true`, non-2xx status, ...).
    #[error("rejected: {0}")]
    Rejected(String),

    /// A required `data-*`/`href`/`action` attribute is absent.
    #[error("missing attribute `{attribute}` on {selector}")]
    MissingAttribute { selector: String, attribute: String },

    /// A DOM lookup or JS call failed.
    #[error("dom error: {0}")]
    Dom(String),
}

impl UiError {
    pub fn missing(selector: &str, attribute: &str) -> Self {
        Self::MissingAttribute {
            selector: selector.to_string(),
            attribute: attribute.to_string(),
        }
    }
}

impl From<serde_json::Error> for UiError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

impl From<wasm_bindgen::JsValue> for UiError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Dom(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}
