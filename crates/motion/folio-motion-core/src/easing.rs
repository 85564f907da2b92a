//! Easing curves mapping normalized progress in [0, 1] to eased progress in [0, 1].
//!
//! Every curve satisfies `apply(0) == 0`, `apply(1) == 1` and is monotonic
//! non-decreasing on the unit interval. Inputs outside [0, 1] are clamped.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    #[default]
    Linear,
    /// `1 - (1 - p)^3`; entrances and hover lifts.
    CubicOut,
    /// `p^2`; the quicker slide exits.
    QuadIn,
    /// `p^3`; the center shrink exit.
    CubicIn,
    /// `2p^2` below the midpoint, `1 - (-2p + 2)^3 / 2` above; smooth scrolling.
    InOut,
}

impl Easing {
    pub const ALL: [Easing; 5] = [
        Easing::Linear,
        Easing::CubicOut,
        Easing::QuadIn,
        Easing::CubicIn,
        Easing::InOut,
    ];

    #[inline]
    pub fn apply(self, progress: f32) -> f32 {
        let p = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        match self {
            Easing::Linear => p,
            Easing::CubicOut => 1.0 - (1.0 - p).powi(3),
            Easing::QuadIn => p * p,
            Easing::CubicIn => p * p * p,
            Easing::InOut => {
                if p < 0.5 {
                    2.0 * p * p
                } else {
                    1.0 - (-2.0 * p + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}
