//! Light/dark/system theme preference.
//!
//! [`ThemeMode`] is what the user asked for and what gets persisted;
//! [`ResolvedTheme`] is what the document actually shows. [`resolve`] maps
//! one to the other, and [`ThemeController`] owns the lifecycle: reading the
//! stored mode at start, writing it on change, and tracking the OS
//! preference while the mode is `System`.

mod controller;
mod mode;

pub use controller::ThemeController;
pub use mode::{ResolvedTheme, ThemeMode, resolve};
