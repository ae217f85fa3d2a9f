//! Browser Page
//!
//! `Page` over the live document, Bootstrap modal bindings, and the two
//! document-level listeners that feed the controller.

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, FormData, HtmlDocument, HtmlFormElement, HtmlInputElement};

use crate::action::{resolve_click, resolve_submit, Action, Attributes, Target};
use crate::commands::FetchTransport;
use crate::components::{mount_banner, BannerHandle};
use crate::config::{UiConfig, CONFIG_ELEMENT_ID};
use crate::controller::Controller;
use crate::csrf;
use crate::error::UiError;
use crate::markup;
use crate::models::FavoriteStatus;
use crate::page::{Dialog, Page, Region};

#[wasm_bindgen]
extern "C" {
    /// A `bootstrap.Modal` instance
    type BootstrapModal;

    #[wasm_bindgen(catch, js_namespace = ["bootstrap", "Modal"], js_name = getOrCreateInstance)]
    fn modal_instance(element: &Element) -> Result<BootstrapModal, JsValue>;

    #[wasm_bindgen(method)]
    fn show(this: &BootstrapModal);

    #[wasm_bindgen(method)]
    fn hide(this: &BootstrapModal);
}

impl Attributes for Element {
    fn attr(&self, name: &str) -> Option<String> {
        // form.action is already resolved; a missing attribute reads as the document URL
        if name == "action" {
            if let Some(form) = self.dyn_ref::<HtmlFormElement>() {
                return Some(form.action()).filter(|url| !url.is_empty());
            }
        }
        dom_delegate::attr(self, name)
    }
}

impl Target for Element {
    type Node = Element;

    fn closest(&self, selector: &str) -> Option<Element> {
        dom_delegate::closest(self, selector)
    }
}

pub type BrowserController = Controller<BrowserPage, FetchTransport>;

type Resolver = fn(&Element, &UiConfig) -> Option<Result<Action<Element>, UiError>>;

/// Read the `#listing-ui-config` override block, if the page has one.
pub fn load_config() -> UiConfig {
    let json = web_sys::window()
        .and_then(|win| win.document())
        .and_then(|doc| doc.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content());
    UiConfig::from_json_or_default(json.as_deref())
}

/// Build the controller and bind the document listeners. Call once.
pub fn install(config: UiConfig) -> Result<Rc<BrowserController>, UiError> {
    let page = BrowserPage::new(config.clone())?;
    let controller = Rc::new(Controller::new(config, page, FetchTransport));

    let on_click = Rc::clone(&controller);
    dom_delegate::bind_document_listener("click", move |ev: Event| {
        handle_event(&on_click, &ev, resolve_click::<Element>);
    })?;

    let on_submit = Rc::clone(&controller);
    dom_delegate::bind_document_listener("submit", move |ev: Event| {
        handle_event(&on_submit, &ev, resolve_submit::<Element>);
    })?;

    log::info!("[UI] delegated listeners installed");
    Ok(controller)
}

fn handle_event(controller: &Rc<BrowserController>, ev: &Event, resolve: Resolver) {
    let Some(target) = dom_delegate::event_element(ev) else {
        return;
    };

    let Some(resolved) = resolve(&target, controller.config()) else {
        return;
    };
    ev.prevent_default();
    if let Some(task) = controller.accept(resolved) {
        wasm_bindgen_futures::spawn_local(task);
    }
}

pub struct BrowserPage {
    document: Document,
    config: UiConfig,
}

impl BrowserPage {
    pub fn new(config: UiConfig) -> Result<Self, UiError> {
        let document = web_sys::window()
            .and_then(|win| win.document())
            .ok_or_else(|| UiError::Dom("no document".to_string()))?;
        Ok(Self { document, config })
    }

    fn by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn region_id(&self, region: Region) -> &str {
        let ids = &self.config.elements;
        match region {
            Region::PropertyDetail => &ids.property_detail,
            Region::ContactContent => &ids.contact_content,
        }
    }

    fn dialog_id(&self, dialog: Dialog) -> &str {
        let ids = &self.config.elements;
        match dialog {
            Dialog::Property => &ids.property_modal,
            Dialog::Contact => &ids.contact_modal,
        }
    }

    fn modal(&self, dialog: Dialog) -> Option<BootstrapModal> {
        let id = self.dialog_id(dialog);
        let Some(el) = self.by_id(id) else {
            log::warn!("[UI] #{} not on page", id);
            return None;
        };
        match modal_instance(&el) {
            Ok(modal) => Some(modal),
            Err(e) => {
                log::error!("[UI] bootstrap.Modal unavailable for #{}: {:?}", id, e);
                None
            }
        }
    }
}

fn query_all(root: &Element, selector: &str) -> Vec<Element> {
    let Ok(list) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

impl Page for BrowserPage {
    type Node = Element;
    type Banner = BannerHandle;

    fn set_content(&self, region: Region, html: &str) -> bool {
        let id = self.region_id(region);
        match self.by_id(id) {
            Some(el) => {
                el.set_inner_html(html);
                true
            }
            None => {
                log::warn!("[UI] #{} not on page", id);
                false
            }
        }
    }

    fn show_dialog(&self, dialog: Dialog) {
        if let Some(modal) = self.modal(dialog) {
            modal.show();
        }
    }

    fn hide_dialog(&self, dialog: Dialog) {
        if let Some(modal) = self.modal(dialog) {
            modal.hide();
        }
    }

    fn set_favorite_icon(&self, button: &Element, status: FavoriteStatus) {
        let icon = button
            .query_selector(&self.config.selectors.favorite_icon)
            .ok()
            .flatten()
            .unwrap_or_else(|| button.clone());

        let classes = status.icon_classes();
        let list = icon.class_list();
        for class in classes.remove {
            let _ = list.remove_1(class);
        }
        for class in classes.add {
            let _ = list.add_1(class);
        }
    }

    fn csrf_token(&self) -> Option<String> {
        let endpoints = &self.config.endpoints;

        let cookie = self
            .document
            .dyn_ref::<HtmlDocument>()
            .and_then(|doc| doc.cookie().ok())
            .and_then(|cookies| csrf::cookie_value(&cookies, &endpoints.csrf_cookie));

        let field = self
            .document
            .query_selector(&format!("input[name=\"{}\"]", endpoints.csrf_field))
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .map(|input| input.value());

        csrf::resolve_token(cookie, field)
    }

    fn form_fields(&self, form: &Element) -> Result<Vec<(String, String)>, UiError> {
        let form = form
            .dyn_ref::<HtmlFormElement>()
            .ok_or_else(|| UiError::Dom("submit target is not a <form>".to_string()))?;

        let data = FormData::new_with_form(form)?;
        let entries = js_sys::try_iter(&data)?
            .ok_or_else(|| UiError::Dom("FormData is not iterable".to_string()))?;

        let mut fields = Vec::new();
        for entry in entries {
            let pair = js_sys::Array::from(&entry?);
            // file inputs yield Blobs; only text fields go out
            if let (Some(name), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string()) {
                fields.push((name, value));
            }
        }
        Ok(fields)
    }

    fn clear_form_errors(&self, form: &Element) {
        for el in query_all(form, "[data-field-errors]") {
            el.remove();
        }
        for el in query_all(form, ".is-invalid") {
            let _ = el.class_list().remove_1("is-invalid");
        }
    }

    fn show_field_errors(&self, form: &Element, field: &str, messages: &[String]) -> bool {
        let selector = format!("[name=\"{}\"]", field);
        let Some(input) = form.query_selector(&selector).ok().flatten() else {
            return false;
        };
        let _ = input.class_list().add_1("is-invalid");
        input
            .insert_adjacent_html("afterend", &markup::field_errors(messages))
            .is_ok()
    }

    fn show_form_message(&self, message: &str, extra: &[String]) {
        let id = &self.config.elements.form_message;
        let Some(el) = self.by_id(id) else {
            log::warn!("[UI] #{} not on page: {}", id, message);
            return;
        };
        let list = el.class_list();
        let _ = list.remove_2("d-none", "alert-success");
        let _ = list.add_1("alert-danger");
        el.set_inner_html(&markup::form_message(message, extra));
    }

    fn show_banner(&self, title: &str, message: &str, warning: Option<&str>) -> Option<BannerHandle> {
        let body = self.document.body()?;
        Some(mount_banner(
            body,
            title.to_string(),
            message.to_string(),
            warning.map(str::to_string),
        ))
    }

    fn dismiss_banner(&self, banner: BannerHandle) {
        drop(banner);
    }

    fn navigate(&self, url: &str) {
        let Some(win) = web_sys::window() else {
            return;
        };
        if let Err(e) = win.location().set_href(url) {
            log::error!("[UI] navigation to {} failed: {:?}", url, e);
        }
    }

    async fn sleep(&self, ms: u32) {
        // gloo-timers only exposes its timers on wasm targets
        #[cfg(target_arch = "wasm32")]
        gloo_timers::future::TimeoutFuture::new(ms).await;
        #[cfg(not(target_arch = "wasm32"))]
        let _ = ms;
    }
}
