//! Delegated Actions
//!
//! Turns the target of a document-level click or submit into one of the
//! four things this page knows how to do.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::config::UiConfig;
use crate::error::UiError;

/// Attributes that may carry a property id, most specific first
pub const PROPERTY_ID_ATTRS: &[&str] = &["data-property-id", "data-propertyid", "data-id"];

/// Read access to an element's attributes
pub trait Attributes {
    /// Attribute value; empty values count as absent.
    fn attr(&self, name: &str) -> Option<String>;
}

/// Where an event landed
pub trait Target {
    type Node: Attributes;

    /// Nearest ancestor (or self) matching `selector`
    fn closest(&self, selector: &str) -> Option<Self::Node>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action<N> {
    ToggleFavorite {
        button: N,
        property_id: String,
        url: String,
    },
    OpenDetail {
        url: String,
    },
    OpenContactForm {
        url: String,
    },
    SubmitContactForm {
        form: N,
        action: String,
    },
}

impl<N> Action<N> {
    pub fn name(&self) -> &'static str {
        match self {
            Action::ToggleFavorite { .. } => "toggle-favorite",
            Action::OpenDetail { .. } => "open-detail",
            Action::OpenContactForm { .. } => "open-contact-form",
            Action::SubmitContactForm { .. } => "submit-contact-form",
        }
    }

    /// UI element whose state this action updates.
    ///
    /// A newer action with the same key supersedes an older one in flight.
    pub fn element_key(&self) -> String {
        match self {
            Action::ToggleFavorite { property_id, .. } => format!("favorite:{}", property_id),
            Action::OpenDetail { .. } => "property-detail".to_string(),
            Action::OpenContactForm { .. } => "contact-content".to_string(),
            Action::SubmitContactForm { .. } => "contact-form".to_string(),
        }
    }
}

/// Resolve a click target.
///
/// `None` means the click is not ours and must be left alone. `Some(Err(_))`
/// means it is ours but unusable: default handling is still suppressed.
pub fn resolve_click<T: Target>(
    target: &T,
    config: &UiConfig,
) -> Option<Result<Action<T::Node>, UiError>> {
    let selectors = &config.selectors;

    let favorite = selectors.favorite_list();
    if let Some(button) = target.closest(&favorite) {
        return Some(favorite_action(button, &favorite, config));
    }

    if let Some(link) = target.closest(&selectors.view_property) {
        return Some(
            link.attr("href")
                .map(|url| Action::OpenDetail { url })
                .ok_or_else(|| UiError::missing(&selectors.view_property, "href")),
        );
    }

    if let Some(button) = target.closest(&selectors.contact_button) {
        // No URL: the button keeps its default behaviour
        return button.attr("data-url").map(|url| Ok(Action::OpenContactForm { url }));
    }

    None
}

/// Resolve a submit target.
///
/// A form without an action posts back to the current document, the same
/// place a native submit would go.
pub fn resolve_submit<T: Target>(
    target: &T,
    config: &UiConfig,
) -> Option<Result<Action<T::Node>, UiError>> {
    let form = target.closest(&config.selectors.contact_form)?;
    let action = form.attr("action").unwrap_or_default();
    Some(Ok(Action::SubmitContactForm { form, action }))
}

fn favorite_action<N: Attributes>(
    button: N,
    selector: &str,
    config: &UiConfig,
) -> Result<Action<N>, UiError> {
    let property_id = PROPERTY_ID_ATTRS
        .iter()
        .find_map(|name| button.attr(name))
        .ok_or_else(|| UiError::missing(selector, PROPERTY_ID_ATTRS[0]))?;

    let url = button
        .attr("data-toggle-url")
        .unwrap_or_else(|| favorite_url(&config.endpoints.favorite_toggle, &property_id));

    Ok(Action::ToggleFavorite {
        button,
        property_id,
        url,
    })
}

/// Fill `{id}` in the toggle endpoint template.
pub fn favorite_url(template: &str, property_id: &str) -> String {
    let id = utf8_percent_encode(property_id.trim(), NON_ALPHANUMERIC).to_string();
    template.replace("{id}", &id)
}
