//! Wire Models
//!
//! Response bodies of the listing site's AJAX endpoints.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Key Django uses for errors not tied to one field
pub const NON_FIELD_ERRORS: &str = "__all__";

/// Favorite state after a toggle, as reported by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FavoriteStatus {
    Added,
    Removed,
}

/// CSS classes to add and remove on the heart icon
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconClasses {
    pub add: &'static [&'static str],
    pub remove: &'static [&'static str],
}

impl FavoriteStatus {
    pub fn icon_classes(self) -> IconClasses {
        match self {
            FavoriteStatus::Added => IconClasses {
                add: &["bi-heart-fill", "text-danger"],
                remove: &["bi-heart"],
            },
            FavoriteStatus::Removed => IconClasses {
                add: &["bi-heart"],
                remove: &["bi-heart-fill", "text-danger"],
            },
        }
    }
}

/// `POST /toggle_favorite/<id>/` body
#[derive(Debug, Clone, Deserialize)]
pub struct FavoriteBody {
    pub status: Option<FavoriteStatus>,
    #[serde(default)]
    pub error: bool,
}

/// JSON answer of the contact-form GET when the form can't be shown
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DenialBody {
    pub redirect: Option<String>,
    pub message: Option<String>,
}

/// What the contact-form GET produced
#[derive(Debug, Clone, PartialEq)]
pub enum ContactFormReply {
    /// Rendered form fragment
    Form(String),
    /// The server wants the whole page elsewhere
    Redirect(String),
    /// Contact not possible; optional explanation
    Denied(Option<String>),
}

impl From<DenialBody> for ContactFormReply {
    fn from(body: DenialBody) -> Self {
        match body.redirect.filter(|r| !r.is_empty()) {
            Some(url) => ContactFormReply::Redirect(url),
            None => ContactFormReply::Denied(body.message.filter(|m| !m.is_empty())),
        }
    }
}

/// `POST <contact action>` body
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SubmitOutcome {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
    /// Django `form.errors`: field name -> messages
    #[serde(default)]
    pub errors: BTreeMap<String, Vec<String>>,
    /// Present on success; `false` when the owner email failed to go out
    pub email_sent: Option<bool>,
}
