//! Browser adapters for the core's collaborator traits.
//!
//! SYSTEM CONTEXT
//! ==============
//! Everything that touches `web-sys` lives here, behind `hydrate`, so the
//! controllers and the rest of the client stay testable on the host.
//! `config` is the exception: it only parses the embedded settings.

pub mod config;

#[cfg(feature = "hydrate")]
pub mod color_scheme;
#[cfg(feature = "hydrate")]
pub mod scheduler;
#[cfg(feature = "hydrate")]
pub mod storage;
#[cfg(feature = "hydrate")]
pub mod video;

/// Best-effort message from a thrown JS value.
#[cfg(feature = "hydrate")]
pub(crate) fn js_error_message(value: &wasm_bindgen::JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
