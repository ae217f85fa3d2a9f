//! DOM Delegation Utilities
//!
//! One listener on the document, matching event targets by selector.
//! Elements added later (e.g. HTML injected into a modal) are matched
//! without rebinding anything.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Event, Node};

/// Bind a handler for `event_type` on the document.
///
/// Meant to be called once at startup: the closure is leaked so it lives
/// as long as the page, and repeated calls stack up listeners.
pub fn bind_document_listener<F>(event_type: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let document = web_sys::window()
        .and_then(|win| win.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let callback = Closure::<dyn FnMut(Event)>::new(handler);
    document.add_event_listener_with_callback(event_type, callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

/// Element the event was dispatched on.
///
/// Text nodes resolve to their parent element so `closest` still works.
pub fn event_element(ev: &Event) -> Option<Element> {
    let target = ev.target()?;
    if let Some(el) = target.dyn_ref::<Element>() {
        return Some(el.clone());
    }
    target.dyn_ref::<Node>().and_then(|node| node.parent_element())
}

/// Nearest ancestor (or self) matching `selector`.
///
/// An invalid selector is treated as no match.
pub fn closest(el: &Element, selector: &str) -> Option<Element> {
    el.closest(selector).ok().flatten()
}

/// Attribute value, with empty strings treated as missing.
pub fn attr(el: &Element, name: &str) -> Option<String> {
    el.get_attribute(name).filter(|v| !v.trim().is_empty())
}

/// Join selectors into one selector list (`a, b, c`).
pub fn selector_list<S: AsRef<str>>(selectors: &[S]) -> String {
    selectors
        .iter()
        .map(|s| s.as_ref().trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}
