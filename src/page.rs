//! Page Surface
//!
//! Everything the controller does to the document, as one trait. The
//! browser implementation lives in `browser.rs`.

use crate::action::Attributes;
use crate::error::UiError;
use crate::models::FavoriteStatus;

/// Containers whose content is replaced by server fragments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    PropertyDetail,
    ContactContent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialog {
    Property,
    Contact,
}

#[allow(async_fn_in_trait)]
pub trait Page {
    /// Element handle (buttons, forms)
    type Node: Attributes + Clone;
    /// Keeps a success banner on screen until dismissed
    type Banner;

    /// Replace a region's content. `false` if the region isn't on the page.
    fn set_content(&self, region: Region, html: &str) -> bool;

    fn show_dialog(&self, dialog: Dialog);

    fn hide_dialog(&self, dialog: Dialog);

    fn set_favorite_icon(&self, button: &Self::Node, status: FavoriteStatus);

    /// CSRF token from the cookie or the hidden form field
    fn csrf_token(&self) -> Option<String>;

    /// Text fields of a form, in document order
    fn form_fields(&self, form: &Self::Node) -> Result<Vec<(String, String)>, UiError>;

    /// Drop error markers left by a previous submission
    fn clear_form_errors(&self, form: &Self::Node);

    /// Show messages next to the named field. `false` if the form has no such field.
    fn show_field_errors(&self, form: &Self::Node, field: &str, messages: &[String]) -> bool;

    /// General message area of the contact form
    fn show_form_message(&self, message: &str, extra: &[String]);

    fn show_banner(&self, title: &str, message: &str, warning: Option<&str>) -> Option<Self::Banner>;

    fn dismiss_banner(&self, banner: Self::Banner);

    fn navigate(&self, url: &str);

    async fn sleep(&self, ms: u32);
}
