//! Markup Snippets
//!
//! Small HTML fragments written into modal containers. Anything that comes
//! from the server as text (not as a rendered fragment) is escaped.

/// Bootstrap alert flavours used by the controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlertKind {
    Danger,
    Warning,
}

impl AlertKind {
    fn class(self) -> &'static str {
        match self {
            AlertKind::Danger => "alert-danger",
            AlertKind::Warning => "alert-warning",
        }
    }
}

pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Spinner shown while a fragment loads
pub fn loading(text: &str) -> String {
    format!(
        r#"<div class="text-center p-5 w-100"><div class="spinner-border text-primary"></div><p class="mt-3">{}</p></div>"#,
        escape_html(text)
    )
}

pub fn alert(kind: AlertKind, text: &str) -> String {
    format!(r#"<div class="alert {}">{}</div>"#, kind.class(), escape_html(text))
}

/// Error list placed right after an invalid form field.
///
/// The `data-field-errors` marker lets the next submission clear it.
pub fn field_errors(messages: &[String]) -> String {
    let items: String = messages
        .iter()
        .map(|m| format!("<div>{}</div>", escape_html(m)))
        .collect();
    format!(r#"<div class="invalid-feedback d-block" data-field-errors>{}</div>"#, items)
}

/// General form message, optionally followed by errors that had no field to sit next to.
pub fn form_message(message: &str, extra: &[String]) -> String {
    let mut html = escape_html(message);
    if !extra.is_empty() {
        html.push_str(r#"<ul class="mb-0">"#);
        for m in extra {
            html.push_str(&format!("<li>{}</li>", escape_html(m)));
        }
        html.push_str("</ul>");
    }
    html
}
