//! Property Detail Commands

use super::transport::{HttpRequest, Transport};
use crate::error::UiError;

/// Append `param=1` to a URL, keeping any fragment at the end.
pub fn with_query_flag(url: &str, param: &str) -> String {
    let (base, fragment) = match url.split_once('#') {
        Some((base, fragment)) => (base, Some(fragment)),
        None => (url, None),
    };

    let separator = if !base.contains('?') {
        "?"
    } else if base.ends_with('?') || base.ends_with('&') {
        ""
    } else {
        "&"
    };

    let mut out = format!("{}{}{}=1", base, separator, param);
    if let Some(fragment) = fragment {
        out.push('#');
        out.push_str(fragment);
    }
    out
}

/// Fetch the modal fragment of a property detail page.
pub async fn fetch_property_detail<T: Transport>(
    transport: &T,
    url: &str,
    modal_param: &str,
) -> Result<String, UiError> {
    let request = HttpRequest::get(&with_query_flag(url, modal_param)).ajax();
    let response = transport.send(request).await?;
    if !response.ok() {
        return Err(response.status_error());
    }
    Ok(response.body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::transport::tests::{html, FakeTransport};
    use futures::executor::block_on;

    #[test]
    fn test_with_query_flag() {
        assert_eq!(with_query_flag("/propiedad/3/", "modal"), "/propiedad/3/?modal=1");
        assert_eq!(with_query_flag("/propiedad/3/?ref=home", "modal"), "/propiedad/3/?ref=home&modal=1");
        assert_eq!(with_query_flag("/propiedad/3/?", "modal"), "/propiedad/3/?modal=1");
        assert_eq!(with_query_flag("/propiedad/3/#fotos", "modal"), "/propiedad/3/?modal=1#fotos");
    }

    #[test]
    fn test_fetch_property_detail() {
        let transport = FakeTransport::replying(vec![html(200, "<div>casa</div>")]);

        let body = block_on(fetch_property_detail(&transport, "/propiedad/3/", "modal")).unwrap();
        assert_eq!(body, "<div>casa</div>");

        let sent = transport.requests();
        assert_eq!(sent[0].url, "/propiedad/3/?modal=1");
        assert_eq!(sent[0].header_value("X-Requested-With"), Some("XMLHttpRequest"));
    }

    #[test]
    fn test_fetch_property_detail_error_status() {
        let transport = FakeTransport::replying(vec![html(404, "<h1>Not Found</h1>")]);
        let err = block_on(fetch_property_detail(&transport, "/propiedad/9/", "modal")).unwrap_err();
        assert_eq!(err, UiError::Rejected("HTTP 404".to_string()));
    }
}
