//! Embedded site settings.
//!
//! `site.json` ships inside the WASM bundle. A broken document never blocks
//! the page: each half falls back to its defaults with a warning.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use seaton_web::config::SiteConfig;
use seaton_web::media::BackgroundVideoProps;

pub const SITE_JSON: &str = include_str!("../../site.json");

#[derive(Deserialize, Default)]
#[serde(default)]
struct HeroSection {
    hero: BackgroundVideoProps,
}

/// Controller configuration plus the hero video slot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SiteSettings {
    pub config: SiteConfig,
    pub hero: BackgroundVideoProps,
}

impl SiteSettings {
    pub fn load(raw: &str) -> Self {
        let config = SiteConfig::from_json(raw).unwrap_or_else(|e| {
            leptos::logging::warn!("{e}; using default site config");
            SiteConfig::default()
        });
        let hero = serde_json::from_str::<HeroSection>(raw)
            .map(|section| section.hero)
            .unwrap_or_else(|e| {
                leptos::logging::warn!("invalid hero section: {e}; rendering no video");
                BackgroundVideoProps::default()
            });
        Self { config, hero }
    }
}
