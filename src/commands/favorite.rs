//! Favorite Commands

use super::transport::{HttpRequest, Transport};
use crate::error::UiError;
use crate::models::{FavoriteBody, FavoriteStatus};

/// Flip the favorite state of a property; the server answers with the new state.
pub async fn toggle_favorite<T: Transport>(
    transport: &T,
    url: &str,
    csrf_token: Option<&str>,
) -> Result<FavoriteStatus, UiError> {
    let request = HttpRequest::post(url)
        .ajax()
        .header("X-CSRFToken", csrf_token.unwrap_or(""))
        .header("Accept", "application/json")
        .form(&[]);

    let response = transport.send(request).await?;

    let body: FavoriteBody = match serde_json::from_str(&response.body) {
        Ok(body) => body,
        // login redirect pages, 403 CSRF pages, ...
        Err(_) if !response.ok() => return Err(response.status_error()),
        Err(e) => return Err(e.into()),
    };

    if body.error {
        return Err(UiError::Rejected(format!("favorite toggle refused (HTTP {})", response.status)));
    }
    body.status
        .ok_or_else(|| UiError::Parse("favorite response without `status`".to_string()))
}
