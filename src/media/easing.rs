//! Per-frame easing of the video's scale and opacity.

#[cfg(test)]
#[path = "easing_test.rs"]
mod easing_test;

use serde::{Deserialize, Serialize};

use crate::config::MediaConfig;

/// Scale and opacity written to the video element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Presentation {
    pub scale: f64,
    pub opacity: f64,
}

impl Presentation {
    /// Viewport target for a container of `width` CSS pixels.
    #[must_use]
    pub fn for_container(width: f64, config: &MediaConfig) -> Self {
        if width < config.mobile_container_px { config.narrow } else { config.wide }
    }

    /// CSS `transform` value; `none` at unit scale.
    #[must_use]
    pub fn css_transform(self) -> String {
        if (self.scale - 1.0).abs() < f64::EPSILON {
            "none".to_owned()
        } else {
            format!("scale({})", self.scale)
        }
    }
}

/// Eased presentation moving toward a target a fixed fraction per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportEasing {
    current: Presentation,
    target: Presentation,
}

impl ViewportEasing {
    /// Start at rest at `at`.
    #[must_use]
    pub fn new(at: Presentation) -> Self {
        Self { current: at, target: at }
    }

    #[must_use]
    pub fn current(&self) -> Presentation {
        self.current
    }

    #[must_use]
    pub fn target(&self) -> Presentation {
        self.target
    }

    pub fn retarget(&mut self, target: Presentation) {
        self.target = target;
    }

    #[must_use]
    pub fn is_settled(&self, epsilon: f64) -> bool {
        (self.target.scale - self.current.scale).abs() < epsilon
            && (self.target.opacity - self.current.opacity).abs() < epsilon
    }

    /// Advance one frame: `current += (target - current) * blend`, snapping
    /// each component once it is within `epsilon`.
    pub fn step(&mut self, blend: f64, epsilon: f64) -> Presentation {
        self.current.scale = approach(self.current.scale, self.target.scale, blend, epsilon);
        self.current.opacity = approach(self.current.opacity, self.target.opacity, blend, epsilon);
        self.current
    }
}

fn approach(current: f64, target: f64, blend: f64, epsilon: f64) -> f64 {
    let next = current + (target - current) * blend;
    if (target - next).abs() < epsilon { target } else { next }
}
