//! Video source selection.
//!
//! ALGORITHM
//! =========
//! 1. An explicit quality preference picks the first playable candidate of
//!    that quality.
//! 2. Otherwise a target quality is derived from the device profile: slow
//!    network, low battery, or save-data force `Low`; else the viewport
//!    breakpoint decides, capped at `Medium` on mobile.
//! 3. Candidates of the target quality whose MIME type the engine can play
//!    are kept.
//! 4. Among those, the smallest declared width that still covers the
//!    viewport wins.
//! 5. With no match, qualities are tried `High → Medium → Low`; failing
//!    that, the first candidate is used unconditionally.

#[cfg(test)]
#[path = "source_test.rs"]
mod source_test;

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::config::MediaConfig;
use crate::platform::CapabilityProbe;

/// Resolution/bitrate tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Low,
    Medium,
    High,
}

impl Quality {
    /// Order tried when nothing matches the target quality.
    pub const FALLBACK_ORDER: [Self; 3] = [Self::High, Self::Medium, Self::Low];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// One candidate rendition of the background video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSource {
    pub src: String,
    /// MIME type, optionally with a `codecs` parameter.
    #[serde(rename = "type")]
    pub mime_type: String,
    /// Untagged candidates match every quality.
    #[serde(default)]
    pub quality: Option<Quality>,
    /// Intrinsic pixel width, when known.
    #[serde(default)]
    pub width: Option<u32>,
    /// Media query for the `<source>` element.
    #[serde(default)]
    pub media: Option<String>,
}

impl VideoSource {
    #[must_use]
    pub fn new(src: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self { src: src.into(), mime_type: mime_type.into(), quality: None, width: None, media: None }
    }

    #[must_use]
    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.quality = Some(quality);
        self
    }

    #[must_use]
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    #[must_use]
    pub fn matches(&self, quality: Quality) -> bool {
        self.quality.is_none_or(|own| own == quality)
    }
}

/// `navigator.connection.effectiveType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EffectiveType {
    SlowTwoG,
    TwoG,
    ThreeG,
    FourG,
    #[default]
    Unknown,
}

impl EffectiveType {
    /// Total parse; anything unrecognised is `Unknown`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "slow-2g" => Self::SlowTwoG,
            "2g" => Self::TwoG,
            "3g" => Self::ThreeG,
            "4g" => Self::FourG,
            _ => Self::Unknown,
        }
    }
}

/// Best-effort network, battery, and device signals. Absent values mean
/// "no constraint".
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeviceProfile {
    pub save_data: bool,
    pub effective_type: EffectiveType,
    /// 0.0..=1.0
    pub battery_level: Option<f64>,
    pub charging: Option<bool>,
    pub user_agent: String,
    /// Window width in CSS pixels.
    pub viewport_width: f64,
}

impl DeviceProfile {
    #[must_use]
    pub fn is_mobile(&self) -> bool {
        is_mobile_user_agent(&self.user_agent)
    }

    /// `slow-2g` and `2g` always; `3g` only on mobile devices.
    #[must_use]
    pub fn is_slow_network(&self) -> bool {
        match self.effective_type {
            EffectiveType::SlowTwoG | EffectiveType::TwoG => true,
            EffectiveType::ThreeG => self.is_mobile(),
            EffectiveType::FourG | EffectiveType::Unknown => false,
        }
    }

    /// Below `threshold` and not known to be charging.
    #[must_use]
    pub fn is_low_battery(&self, threshold: f64) -> bool {
        if self.charging == Some(true) {
            return false;
        }
        self.battery_level.is_some_and(|level| level < threshold)
    }
}

const MOBILE_UA_MARKERS: [&str; 9] =
    ["android", "iphone", "ipad", "ipod", "mobile", "opera mini", "iemobile", "blackberry", "webos"];

/// User-agent heuristic for phones and tablets.
#[must_use]
pub fn is_mobile_user_agent(user_agent: &str) -> bool {
    let ua = user_agent.to_ascii_lowercase();
    MOBILE_UA_MARKERS.iter().any(|marker| ua.contains(marker))
}

/// Quality tier the device should fetch.
#[must_use]
pub fn target_quality(profile: &DeviceProfile, config: &MediaConfig) -> Quality {
    if profile.save_data || profile.is_slow_network() || profile.is_low_battery(config.low_battery_level) {
        return Quality::Low;
    }
    let by_viewport = if profile.viewport_width < config.low_quality_max_width_px {
        Quality::Low
    } else if profile.viewport_width < config.medium_quality_max_width_px {
        Quality::Medium
    } else {
        Quality::High
    };
    if profile.is_mobile() { by_viewport.min(Quality::Medium) } else { by_viewport }
}

/// MIME string handed to the capability probe. Bare container types get the
/// baseline codec parameters so the answer reflects real decodability.
#[must_use]
pub fn probe_type(mime: &str) -> Cow<'_, str> {
    if mime.contains("codecs") {
        return Cow::Borrowed(mime);
    }
    match mime.trim().to_ascii_lowercase().as_str() {
        "video/webm" => Cow::Borrowed("video/webm; codecs=\"vp8, vorbis\""),
        "video/mp4" => Cow::Borrowed("video/mp4; codecs=\"avc1.42E01E, mp4a.40.2\""),
        "video/ogg" => Cow::Borrowed("video/ogg; codecs=\"theora, vorbis\""),
        _ => Cow::Borrowed(mime),
    }
}

fn playable(source: &VideoSource, probe: &dyn CapabilityProbe) -> bool {
    probe.can_play(&probe_type(&source.mime_type))
}

/// Pick the source to load. `None` only for an empty candidate list.
#[must_use]
pub fn select_source<'a>(
    candidates: &'a [VideoSource],
    profile: &DeviceProfile,
    probe: &dyn CapabilityProbe,
    preference: Option<Quality>,
    config: &MediaConfig,
) -> Option<&'a VideoSource> {
    if let Some(preferred) = preference {
        if let Some(hit) = candidates
            .iter()
            .find(|c| c.quality == Some(preferred) && playable(c, probe))
        {
            return Some(hit);
        }
    }

    let target = target_quality(profile, config);
    let matches = candidates
        .iter()
        .filter(|c| c.matches(target) && playable(c, probe))
        .collect::<Vec<_>>();
    if let Some(best) = pick_by_width(&matches, profile.viewport_width) {
        return Some(best);
    }

    for quality in Quality::FALLBACK_ORDER {
        if let Some(hit) = candidates
            .iter()
            .find(|c| c.matches(quality) && playable(c, probe))
        {
            tracing::debug!(target = target.as_str(), chosen = quality.as_str(), "no source at target quality");
            return Some(hit);
        }
    }

    let last_resort = candidates.first();
    if let Some(source) = last_resort {
        tracing::warn!(src = %source.src, "no playable source reported; using first candidate");
    }
    last_resort
}

/// Smallest declared width covering the viewport; else the widest declared;
/// else the first match.
fn pick_by_width<'a>(matches: &[&'a VideoSource], viewport_width: f64) -> Option<&'a VideoSource> {
    let sized = matches
        .iter()
        .filter_map(|c| c.width.map(|w| (f64::from(w), *c)))
        .collect::<Vec<_>>();
    if sized.is_empty() {
        return matches.first().copied();
    }
    let covering = sized
        .iter()
        .filter(|(w, _)| *w >= viewport_width)
        .min_by(|a, b| a.0.total_cmp(&b.0));
    let chosen = covering.or_else(|| sized.iter().max_by(|a, b| a.0.total_cmp(&b.0)));
    chosen.map(|(_, c)| *c)
}
