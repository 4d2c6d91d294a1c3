//! # seaton-client
//!
//! Leptos + WASM shell for the Seaton web site.
//!
//! The theme and background-video controllers live in the `seaton-web` core
//! crate and know nothing about the DOM. This crate supplies the browser
//! adapters for their collaborator traits (`util`), the reactive view models
//! mirrored from them (`state`), and the components that mount them
//! (`components`).

pub mod app;
pub mod components;
pub mod state;
pub mod util;

/// WASM entry point: install logging, then hydrate the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        leptos::logging::warn!("console logger already installed: {e}");
    }
    leptos::mount::hydrate_body(app::App);
}
