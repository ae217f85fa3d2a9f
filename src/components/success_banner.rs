//! Success Banner Component
//!
//! Fixed-position Bootstrap alert shown after a contact message goes out.

use leptos::prelude::*;

/// Success alert with an optional warning line
///
/// The close button uses Bootstrap's own `data-bs-dismiss`, so users can
/// close it before the timer does.
#[component]
pub fn SuccessBanner(
    #[prop(into)] title: String,
    #[prop(into)] message: String,
    warning: Option<String>,
) -> impl IntoView {
    view! {
        <div
            class="alert alert-success alert-dismissible fade show position-fixed top-0 start-50 translate-middle-x mt-3"
            style="z-index: 9999;"
            role="alert"
        >
            <strong>{title}</strong>
            " "
            {message}
            {warning.map(|w| view! { <div class="small mt-1">{w}</div> })}
            <button type="button" class="btn-close" data-bs-dismiss="alert" aria-label="Close"></button>
        </div>
    }
}

/// A mounted banner. Dropping it removes the banner from the page.
pub struct BannerHandle(Box<dyn std::any::Any>);

/// Append a `SuccessBanner` to `parent`.
pub fn mount_banner(
    parent: web_sys::HtmlElement,
    title: String,
    message: String,
    warning: Option<String>,
) -> BannerHandle {
    let handle = leptos::mount::mount_to(parent, move || {
        view! { <SuccessBanner title=title message=message warning=warning /> }
    });
    BannerHandle(Box::new(handle))
}
