//! UI Components
//!
//! Leptos components mounted next to the server-rendered markup.

mod success_banner;

pub use success_banner::{mount_banner, BannerHandle};
