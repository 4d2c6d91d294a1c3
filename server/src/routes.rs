//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! A single Axum router: Leptos SSR renders the page, `/pkg` serves the WASM
//! bundle that hydrates it, and the public directory (hero videos, posters,
//! fallback images) is the fallback service.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::error::ServerError;

pub const DEFAULT_PORT: u16 = 3000;

/// `PORT` from the environment, or [`DEFAULT_PORT`] when unset.
pub fn port_from(raw: Option<&str>) -> Result<u16, ServerError> {
    match raw {
        None => Ok(DEFAULT_PORT),
        Some(raw) => raw.trim().parse().map_err(|_| ServerError::InvalidPort(raw.to_owned())),
    }
}

/// Directory holding the site's media files.
fn public_dir(override_dir: Option<String>) -> PathBuf {
    override_dir.map_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../public"), PathBuf::from)
}

/// Leptos SSR at `/`, the WASM bundle at `/pkg`, media files as fallback.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded.
pub fn app(public_override: Option<String>) -> Result<Router, ServerError> {
    let conf = get_configuration(None).map_err(|e| ServerError::Config(e.to_string()))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(seaton_client::app::App);
    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || seaton_client::app::shell(opts.clone())
        })
        .with_state(leptos_options);

    Ok(Router::new()
        .route("/healthz", get(healthz))
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")))
        .fallback_service(ServeDir::new(public_dir(public_override)))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http()))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
