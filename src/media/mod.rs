//! Adaptive background video.
//!
//! ARCHITECTURE
//! ============
//! - [`source`] picks one URL from the candidate list (network, battery,
//!   device class, viewport, format support).
//! - [`health`] is the pure `Loading → Playing ⇄ Stalled → Errored` machine.
//! - [`easing`] moves scale/opacity toward viewport-derived targets.
//! - [`controller`] wires those to the element, scheduler, and observers and
//!   owns teardown.

pub mod controller;
pub mod easing;
pub mod health;
pub mod source;

pub use controller::{BackgroundVideoProps, MediaController, MediaHost, MediaPlaybackState};
pub use easing::{Presentation, ViewportEasing};
pub use health::{HealthSignal, PlaybackHealth};
pub use source::{DeviceProfile, EffectiveType, Quality, VideoSource, select_source, target_quality};

/// Events the controller consumes from the `<video>` element.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// `canplay`: enough data to start.
    CanPlay,
    /// `error`: decode or network failure. Terminal for the mount.
    Error { message: String },
    /// `stalled`: fetching data but none arriving.
    Stalled,
    /// `suspend`: data loading stopped.
    Suspend,
    /// `pause`.
    Pause,
    /// `progress`, with the end of the first buffered range and the duration.
    Progress { buffered_secs: f64, duration_secs: f64 },
}

/// What the video slot renders.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RenderMode {
    #[default]
    Video,
    /// The video failed and a static image replaces it.
    FallbackImage(String),
    /// The video failed and there is nothing to show.
    Empty,
}
