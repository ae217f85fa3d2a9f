//! Contact Form Commands
//!
//! The form is fetched as a fragment and posted back as url-encoded fields.
//! Both endpoints answer JSON when they refuse.

use super::transport::{HttpRequest, Transport};
use crate::error::UiError;
use crate::models::{ContactFormReply, DenialBody, SubmitOutcome};

/// Load the contact form: a fragment, or a JSON redirect/denial.
pub async fn load_contact_form<T: Transport>(
    transport: &T,
    url: &str,
) -> Result<ContactFormReply, UiError> {
    let response = transport.send(HttpRequest::get(url).ajax()).await?;

    if response.is_json() {
        let body: DenialBody = serde_json::from_str(&response.body)?;
        return Ok(body.into());
    }
    if !response.ok() {
        return Err(response.status_error());
    }
    Ok(ContactFormReply::Form(response.body))
}

/// Post the form fields.
///
/// Validation failures come back as HTTP 400 with a JSON body, so the body
/// is parsed whatever the status.
pub async fn submit_contact_form<T: Transport>(
    transport: &T,
    action: &str,
    fields: &[(String, String)],
    csrf_token: Option<&str>,
) -> Result<SubmitOutcome, UiError> {
    let mut request = HttpRequest::post(action)
        .ajax()
        .header("Accept", "application/json")
        .form(fields);
    if let Some(token) = csrf_token {
        request = request.header("X-CSRFToken", token);
    }

    let response = transport.send(request).await?;
    serde_json::from_str(&response.body).map_err(|e| {
        if response.ok() {
            UiError::from(e)
        } else {
            response.status_error()
        }
    })
}
