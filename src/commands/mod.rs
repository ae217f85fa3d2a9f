//! Listing Site Endpoints
//!
//! Wrappers around the Django AJAX endpoints, organized by domain.

mod contact;
mod favorite;
mod property;
pub mod transport;

pub use contact::*;
pub use favorite::*;
pub use property::*;
pub use transport::{FetchTransport, Transport};
