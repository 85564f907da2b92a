//! Configuration for the motion core.
//!
//! Every timing constant lives here so hosts can retune a page without a
//! rebuild. Missing JSON fields fall back to the defaults.

use serde::{Deserialize, Serialize};

use crate::error::{MotionError, Result};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Fraction of a section's area that must be visible to count as intersecting.
    pub observer_threshold: f32,
    /// Shrinks the observed viewport from the bottom edge, in px.
    pub observer_bottom_margin_px: f32,

    /// Sections stay hidden and unobserved for this long after registration.
    pub reveal_delay_ms: f64,
    /// Extra delay per section index.
    pub reveal_stagger_ms: f64,

    /// Fixed header allowance subtracted from anchor scroll targets.
    pub header_offset_px: f32,
    pub scroll_duration_ms: f64,

    /// Carousel advance per frame, in px.
    pub carousel_speed_px: f64,

    pub page_fade_delay_ms: f64,
    pub page_fade_duration_ms: f64,
    /// Header/footer fade; `chrome_stagger_ms` is added per element index.
    pub chrome_fade_delay_ms: f64,
    pub chrome_stagger_ms: f64,
    pub chrome_fade_duration_ms: f64,

    pub roles: RoleTimings,
}

/// Durations and distances of the per-role motions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleTimings {
    pub scale_entrance_ms: f64,
    pub scale_exit_ms: f64,
    pub slide_entrance_ms: f64,
    pub slide_exit_ms: f64,
    pub slide_entrance_px: f32,
    pub slide_exit_px: f32,
    pub hover_ms: f64,
    pub hover_lift_px: f32,
    pub hover_scale: f32,
}

impl Default for RoleTimings {
    fn default() -> Self {
        Self {
            scale_entrance_ms: 1200.0,
            scale_exit_ms: 700.0,
            slide_entrance_ms: 1100.0,
            slide_exit_ms: 650.0,
            slide_entrance_px: 80.0,
            slide_exit_px: 60.0,
            hover_ms: 220.0,
            hover_lift_px: 6.0,
            hover_scale: 1.02,
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            observer_threshold: 0.15,
            observer_bottom_margin_px: 50.0,
            reveal_delay_ms: 700.0,
            reveal_stagger_ms: 30.0,
            header_offset_px: 120.0,
            scroll_duration_ms: 1000.0,
            carousel_speed_px: 1.0,
            page_fade_delay_ms: 500.0,
            page_fade_duration_ms: 600.0,
            chrome_fade_delay_ms: 600.0,
            chrome_stagger_ms: 200.0,
            chrome_fade_duration_ms: 800.0,
            roles: RoleTimings::default(),
        }
    }
}

impl MotionConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        let cfg: MotionConfig =
            serde_json::from_str(s).map_err(|e| MotionError::ConfigParse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// IntersectionObserver `rootMargin` string.
    pub fn root_margin(&self) -> String {
        format!("0px 0px -{}px 0px", self.observer_bottom_margin_px)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.observer_threshold) {
            return Err(MotionError::InvalidConfig(format!(
                "observer_threshold must be within [0, 1], got {}",
                self.observer_threshold
            )));
        }
        let durations = [
            ("scroll_duration_ms", self.scroll_duration_ms),
            ("page_fade_duration_ms", self.page_fade_duration_ms),
            ("chrome_fade_duration_ms", self.chrome_fade_duration_ms),
            ("roles.scale_entrance_ms", self.roles.scale_entrance_ms),
            ("roles.scale_exit_ms", self.roles.scale_exit_ms),
            ("roles.slide_entrance_ms", self.roles.slide_entrance_ms),
            ("roles.slide_exit_ms", self.roles.slide_exit_ms),
            ("roles.hover_ms", self.roles.hover_ms),
        ];
        for (name, v) in durations {
            if !(v.is_finite() && v > 0.0) {
                return Err(MotionError::InvalidConfig(format!(
                    "{name} must be positive, got {v}"
                )));
            }
        }
        let delays = [
            ("reveal_delay_ms", self.reveal_delay_ms),
            ("reveal_stagger_ms", self.reveal_stagger_ms),
            ("page_fade_delay_ms", self.page_fade_delay_ms),
            ("chrome_fade_delay_ms", self.chrome_fade_delay_ms),
            ("chrome_stagger_ms", self.chrome_stagger_ms),
        ];
        for (name, v) in delays {
            if !(v.is_finite() && v >= 0.0) {
                return Err(MotionError::InvalidConfig(format!(
                    "{name} must be non-negative, got {v}"
                )));
            }
        }
        if !(self.carousel_speed_px.is_finite() && self.carousel_speed_px >= 0.0) {
            return Err(MotionError::InvalidConfig(format!(
                "carousel_speed_px must be non-negative, got {}",
                self.carousel_speed_px
            )));
        }
        Ok(())
    }
}
