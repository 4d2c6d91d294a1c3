//! Typed site configuration.
//!
//! Every field has a default from [`crate::consts`], so a host can supply a
//! partial JSON document (or none at all) and still get a usable config.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::consts::{
    EASING_BLEND, EASING_EPSILON, HIDDEN_OPACITY, HIDDEN_SCALE, LOADING_TIMEOUT_MS, LOW_BATTERY_LEVEL,
    LOW_QUALITY_MAX_WIDTH_PX, MEDIUM_QUALITY_MAX_WIDTH_PX, MOBILE_CONTAINER_PX, NARROW_OPACITY, NARROW_SCALE,
    STALL_NUDGE_SECS, STALL_POLL_INTERVAL_MS, THEME_STORAGE_KEY, WIDE_OPACITY, WIDE_SCALE,
};
use crate::error::ConfigError;
use crate::media::Presentation;
use crate::theme::{ResolvedTheme, ThemeMode};

/// Root configuration for both controllers.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub theme: ThemeConfig,
    pub media: MediaConfig,
}

impl SiteConfig {
    /// Parse and validate a JSON config document.
    ///
    /// Missing fields take their defaults. Values that would break the
    /// controllers (zero poll interval, blend outside `(0, 1]`) are rejected.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.theme.storage_key.trim().is_empty() {
            return Err(ConfigError::Invalid("theme.storage_key must not be empty".into()));
        }
        let media = &self.media;
        if media.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid("media.poll_interval_ms must be positive".into()));
        }
        if !(media.blend > 0.0 && media.blend <= 1.0) {
            return Err(ConfigError::Invalid(format!("media.blend must be in (0, 1], got {}", media.blend)));
        }
        if !(media.epsilon > 0.0) {
            return Err(ConfigError::Invalid(format!("media.epsilon must be positive, got {}", media.epsilon)));
        }
        if media.low_quality_max_width_px > media.medium_quality_max_width_px {
            return Err(ConfigError::Invalid(
                "media.low_quality_max_width_px exceeds media.medium_quality_max_width_px".into(),
            ));
        }
        if !(0.0..=1.0).contains(&media.low_battery_level) {
            return Err(ConfigError::Invalid(format!(
                "media.low_battery_level must be in [0, 1], got {}",
                media.low_battery_level
            )));
        }
        Ok(())
    }
}

/// Theme preference settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Storage key for the persisted mode.
    pub storage_key: String,
    /// Mode used when nothing valid is stored.
    pub default_mode: ThemeMode,
    /// Resolution of `System` when the OS signal is unavailable.
    pub system_fallback: ResolvedTheme,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: THEME_STORAGE_KEY.to_owned(),
            default_mode: ThemeMode::Dark,
            system_fallback: ResolvedTheme::Dark,
        }
    }
}

/// Background media settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    pub poll_interval_ms: u32,
    pub nudge_secs: f64,
    pub loading_timeout_ms: u32,
    pub blend: f64,
    pub epsilon: f64,
    pub mobile_container_px: f64,
    pub low_quality_max_width_px: f64,
    pub medium_quality_max_width_px: f64,
    pub low_battery_level: f64,
    pub narrow: Presentation,
    pub wide: Presentation,
    pub hidden: Presentation,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: STALL_POLL_INTERVAL_MS,
            nudge_secs: STALL_NUDGE_SECS,
            loading_timeout_ms: LOADING_TIMEOUT_MS,
            blend: EASING_BLEND,
            epsilon: EASING_EPSILON,
            mobile_container_px: MOBILE_CONTAINER_PX,
            low_quality_max_width_px: LOW_QUALITY_MAX_WIDTH_PX,
            medium_quality_max_width_px: MEDIUM_QUALITY_MAX_WIDTH_PX,
            low_battery_level: LOW_BATTERY_LEVEL,
            narrow: Presentation { scale: NARROW_SCALE, opacity: NARROW_OPACITY },
            wide: Presentation { scale: WIDE_SCALE, opacity: WIDE_OPACITY },
            hidden: Presentation { scale: HIDDEN_SCALE, opacity: HIDDEN_OPACITY },
        }
    }
}
