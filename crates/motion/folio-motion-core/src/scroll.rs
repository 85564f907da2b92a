//! Smooth anchor scrolling.

use crate::config::MotionConfig;
use crate::easing::Easing;
use crate::style::Property;
use crate::tween::TweenSpec;

/// Fragment id of an in-page anchor href (`"#about"` -> `"about"`).
pub fn anchor_fragment(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Scroll from `current_y` to `target_top` minus the header allowance.
pub fn plan_scroll(current_y: f32, target_top: f32, cfg: &MotionConfig) -> TweenSpec {
    TweenSpec::new(cfg.scroll_duration_ms, Easing::InOut).channel(
        Property::ScrollY,
        current_y,
        target_top - cfg.header_offset_px,
    )
}
