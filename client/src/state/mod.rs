//! Reactive view models mirrored from the core controllers.
//!
//! DESIGN
//! ======
//! Controllers own the behaviour; these plain structs are what components
//! read through `RwSignal`s. Keeping them free of DOM types lets them be
//! tested without the `hydrate` feature.

pub mod media;
pub mod theme;
