//! UI components.
//!
//! ARCHITECTURE
//! ============
//! Components read view signals from context and forward user input to the
//! core controllers; they never hold controller state themselves.

pub mod background_video;
pub mod icon;
pub mod theme_toggle;
