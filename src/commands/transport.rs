//! HTTP Transport
//!
//! Commands describe requests as plain data and hand them to a `Transport`.
//! In the browser that is `fetch` (through gloo-net) with same-origin
//! credentials, so the Django session cookie rides along.

use gloo_net::http::{Method as FetchMethod, RequestBuilder};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use web_sys::RequestCredentials;

use crate::error::UiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// Already `application/x-www-form-urlencoded`
    pub form: Option<String>,
}

impl HttpRequest {
    pub fn get(url: &str) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn post(url: &str) -> Self {
        Self::new(Method::Post, url)
    }

    fn new(method: Method, url: &str) -> Self {
        Self {
            method,
            url: url.to_string(),
            headers: Vec::new(),
            form: None,
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Mark as AJAX; the Django views answer JSON/fragments instead of redirects.
    pub fn ajax(self) -> Self {
        self.header("X-Requested-With", "XMLHttpRequest")
    }

    pub fn form(mut self, fields: &[(String, String)]) -> Self {
        self.form = Some(encode_form(fields));
        self
    }

    #[cfg(test)]
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .map_or(false, |ct| ct.contains("application/json"))
    }

    pub fn status_error(&self) -> UiError {
        UiError::Rejected(format!("HTTP {}", self.status))
    }
}

#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, UiError>;
}

/// `fetch`-backed transport
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

impl Transport for FetchTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, UiError> {
        let method = match request.method {
            Method::Get => FetchMethod::GET,
            Method::Post => FetchMethod::POST,
        };

        let mut builder = RequestBuilder::new(&request.url)
            .method(method)
            .credentials(RequestCredentials::SameOrigin);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let built = match request.form {
            Some(body) => builder
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(body),
            None => builder.build(),
        };
        let fetch = built.map_err(|e| UiError::Network(e.to_string()))?;

        let response = fetch
            .send()
            .await
            .map_err(|e| UiError::Network(e.to_string()))?;

        let status = response.status();
        let content_type = response.headers().get("content-type");
        let body = response
            .text()
            .await
            .map_err(|e| UiError::Parse(e.to_string()))?;

        Ok(HttpResponse {
            status,
            content_type,
            body,
        })
    }
}

pub fn encode_form(fields: &[(String, String)]) -> String {
    fields
        .iter()
        .map(|(name, value)| {
            format!(
                "{}={}",
                utf8_percent_encode(name, NON_ALPHANUMERIC),
                utf8_percent_encode(value, NON_ALPHANUMERIC)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}
