//! UI Configuration
//!
//! Selectors, element ids, endpoints and texts the controller works with.
//! Defaults match the site's templates; a page can override any field with
//! a JSON block:
//!
//! ```html
//! <script type="application/json" id="listing-ui-config">
//!   { "banner_dismiss_ms": 3000, "texts": { "loading_property": "Cargando..." } }
//! </script>
//! ```

use serde::Deserialize;

/// Id of the optional `<script type="application/json">` override block.
pub const CONFIG_ELEMENT_ID: &str = "listing-ui-config";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub selectors: Selectors,
    pub elements: ElementIds,
    pub endpoints: Endpoints,
    pub texts: Texts,
    /// How long the success banner stays before it is removed
    pub banner_dismiss_ms: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            selectors: Selectors::default(),
            elements: ElementIds::default(),
            endpoints: Endpoints::default(),
            texts: Texts::default(),
            banner_dismiss_ms: 5000,
        }
    }
}

impl UiConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse an override block, falling back to defaults when it is malformed.
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        match json.map(str::trim).filter(|s| !s.is_empty()) {
            None => Self::default(),
            Some(json) => Self::from_json(json).unwrap_or_else(|e| {
                log::warn!("invalid #{} block, using defaults: {}", CONFIG_ELEMENT_ID, e);
                Self::default()
            }),
        }
    }
}

/// CSS selectors matched against click/submit targets
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Selectors {
    /// Any of these marks a favorite button
    pub favorite: Vec<String>,
    /// Icon inside a favorite button whose classes reflect the state
    pub favorite_icon: String,
    pub view_property: String,
    pub contact_button: String,
    pub contact_form: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            favorite: vec![
                ".toggle-favorite".to_string(),
                ".favorite-btn".to_string(),
                ".toggle-favorite-button".to_string(),
            ],
            favorite_icon: "i".to_string(),
            view_property: ".view-property".to_string(),
            contact_button: "#openContactBtn".to_string(),
            contact_form: "#contactForm".to_string(),
        }
    }
}

impl Selectors {
    pub fn favorite_list(&self) -> String {
        dom_delegate::selector_list(self.favorite.as_slice())
    }
}

/// Ids of the modal markup rendered by the server
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub property_modal: String,
    pub property_detail: String,
    pub contact_modal: String,
    pub contact_content: String,
    pub form_message: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            property_modal: "propertyModal".to_string(),
            property_detail: "propertyDetailContent".to_string(),
            contact_modal: "contactModal".to_string(),
            contact_content: "contactModalContent".to_string(),
            form_message: "formMessage".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    /// `{id}` is replaced by the property id
    pub favorite_toggle: String,
    /// Query parameter asking the detail view for its modal fragment
    pub modal_param: String,
    pub csrf_cookie: String,
    pub csrf_field: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            favorite_toggle: "/toggle_favorite/{id}/".to_string(),
            modal_param: "modal".to_string(),
            csrf_cookie: "csrftoken".to_string(),
            csrf_field: "csrfmiddlewaretoken".to_string(),
        }
    }
}

/// User-facing strings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Texts {
    pub loading_property: String,
    pub property_error: String,
    pub loading_contact: String,
    pub contact_error: String,
    pub contact_denied: String,
    pub sent_title: String,
    pub sent_message: String,
    pub email_not_sent: String,
    pub submit_failed: String,
    pub submit_error: String,
}

impl Default for Texts {
    fn default() -> Self {
        Self {
            loading_property: "Loading property...".to_string(),
            property_error: "Error loading property.".to_string(),
            loading_contact: "Loading contact form...".to_string(),
            contact_error: "Error loading form.".to_string(),
            contact_denied: "No se puede contactar al propietario.".to_string(),
            sent_title: "¡Mensaje enviado!".to_string(),
            sent_message: "El propietario recibirá tu mensaje pronto.".to_string(),
            email_not_sent: "No se pudo enviar el email al propietario.".to_string(),
            submit_failed: "Error al enviar el mensaje.".to_string(),
            submit_error: "Error al enviar el mensaje. Por favor, intenta nuevamente.".to_string(),
        }
    }
}
