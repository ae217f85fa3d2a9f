//! CSRF Token Lookup

use percent_encoding::percent_decode_str;

/// Value of cookie `name` in a `document.cookie` string, percent-decoded.
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| percent_decode_str(value).decode_utf8_lossy().into_owned())
        .filter(|value| !value.is_empty())
}

/// Cookie first, then the hidden form field.
pub fn resolve_token(cookie: Option<String>, hidden_field: Option<String>) -> Option<String> {
    cookie.or(hidden_field.filter(|v| !v.is_empty()))
}
