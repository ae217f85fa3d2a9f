//! Listing UI Entry Point
//!
//! Loaded on the server-rendered listing pages. Installs one click and one
//! submit listener on the document and leaves the markup to the server.

mod action;
mod browser;
mod commands;
mod components;
mod config;
mod controller;
mod csrf;
mod error;
mod generation;
mod markup;
mod models;
mod page;

fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());

    let config = browser::load_config();
    match browser::install(config) {
        // listeners hold their own references; nothing left to keep alive here
        Ok(_controller) => log::info!("[UI] listing UI ready"),
        Err(e) => log::error!("[UI] listing UI not installed: {}", e),
    }
}
