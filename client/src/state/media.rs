//! Background video view model.

#[cfg(test)]
#[path = "media_test.rs"]
mod media_test;

use seaton_web::media::{Presentation, RenderMode};

/// Boolean attributes that keep the backdrop out of picture-in-picture and
/// cast menus.
pub const VIDEO_LOCKDOWN_ATTRIBUTES: [&str; 2] = ["disablepictureinpicture", "disableremoteplayback"];

/// What the video slot renders, mirrored from the controller's surface calls.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BackdropView {
    pub render_mode: RenderMode,
    pub loading: bool,
}

impl BackdropView {
    pub fn shows_video(&self) -> bool {
        self.render_mode == RenderMode::Video
    }

    pub fn fallback_image(&self) -> Option<&str> {
        match &self.render_mode {
            RenderMode::FallbackImage(url) => Some(url),
            RenderMode::Video | RenderMode::Empty => None,
        }
    }
}

/// CSS `filter` for an optional blur.
pub fn filter_css(blur_px: f64) -> String {
    if blur_px > 0.0 { format!("blur({blur_px}px)") } else { "none".to_owned() }
}

/// Inline style for the `<video>` at `presentation`.
pub fn video_style(presentation: Presentation, blur_px: f64) -> String {
    format!(
        "opacity: {}; transform: {}; filter: {}",
        presentation.opacity,
        presentation.css_transform(),
        filter_css(blur_px)
    )
}

/// Inline style for the fallback image layer.
pub fn fallback_style(url: &str, opacity: f64, blur_px: f64) -> String {
    format!("background-image: url({url}); opacity: {opacity}; filter: {}", filter_css(blur_px))
}

/// `preload` attribute: eager for above-the-fold video.
pub fn preload_hint(priority: bool) -> &'static str {
    if priority { "auto" } else { "metadata" }
}
