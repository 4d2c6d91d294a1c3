//! Theme preference and adaptive background-media controllers for the
//! Seaton web site.
//!
//! This crate holds the browser-independent core. Everything that touches the
//! DOM (storage, media queries, the `<video>` element, timers, resize
//! observation) sits behind the traits in [`platform`], so the controllers
//! run unchanged under the WASM client and under plain `cargo test` with the
//! fakes in `fakes`.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`theme`] | Light/dark/system preference, persistence, resolution |
//! | [`media`] | Source selection, playback health, stall recovery, viewport easing |
//! | [`platform`] | Collaborator traits implemented by the host |
//! | [`config`] | Typed site configuration with defaults |
//! | [`error`] | Error enums for the few fallible operations |
//! | [`icon`] | Closed icon tag mapping with size/stroke tables |
//! | [`consts`] | Shared numeric and string defaults |

pub mod config;
pub mod consts;
pub mod error;
pub mod icon;
pub mod media;
pub mod platform;
pub mod theme;

#[cfg(test)]
pub(crate) mod fakes;
