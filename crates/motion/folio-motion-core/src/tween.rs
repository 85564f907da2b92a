//! Tweens: time-indexed interpolation of a target's visual channels.
//!
//! A tween's clock starts on its first sampled frame, not when it is created,
//! so queueing a tween between frames never skips its opening values.

use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::error::{MotionError, Result};
use crate::ids::TargetId;
use crate::interp::{lerp_f32, progress};
use crate::style::{Property, StyleSink};

/// One interpolated property. `easing` overrides the tween's default when set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub property: Property,
    pub from: f32,
    pub to: f32,
    #[serde(default)]
    pub easing: Option<Easing>,
}

/// Immutable description of a tween, independent of any target.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TweenSpec {
    pub duration_ms: f64,
    pub easing: Easing,
    #[serde(default)]
    pub delay_ms: f64,
    pub channels: Vec<Channel>,
}

impl TweenSpec {
    pub fn new(duration_ms: f64, easing: Easing) -> Self {
        Self {
            duration_ms,
            easing,
            delay_ms: 0.0,
            channels: Vec::new(),
        }
    }

    pub fn channel(mut self, property: Property, from: f32, to: f32) -> Self {
        self.channels.push(Channel {
            property,
            from,
            to,
            easing: None,
        });
        self
    }

    pub fn channel_eased(mut self, property: Property, from: f32, to: f32, easing: Easing) -> Self {
        self.channels.push(Channel {
            property,
            from,
            to,
            easing: Some(easing),
        });
        self
    }

    pub fn delayed(mut self, delay_ms: f64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.duration_ms.is_finite() && self.duration_ms > 0.0) {
            return Err(MotionError::InvalidDuration(self.duration_ms));
        }
        if !(self.delay_ms.is_finite() && self.delay_ms >= 0.0) {
            return Err(MotionError::InvalidDelay(self.delay_ms));
        }
        for ch in &self.channels {
            for value in [ch.from, ch.to] {
                if !value.is_finite() {
                    return Err(MotionError::NonFiniteValue {
                        property: ch.property,
                        value,
                    });
                }
            }
        }
        Ok(())
    }

    /// End value of `property`, if this spec animates it.
    pub fn end_value(&self, property: Property) -> Option<f32> {
        self.channels
            .iter()
            .rev()
            .find(|c| c.property == property)
            .map(|c| c.to)
    }
}

/// Result of sampling a tween on one frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sample {
    pub progress: f32,
    pub finished: bool,
}

/// A running tween bound to one target.
#[derive(Clone, Debug)]
pub struct Tween {
    target: TargetId,
    spec: TweenSpec,
    start_time: Option<f64>,
}

impl Tween {
    pub fn new(target: TargetId, spec: TweenSpec) -> Result<Self> {
        spec.validate()?;
        Ok(Self {
            target,
            spec,
            start_time: None,
        })
    }

    pub fn target(&self) -> TargetId {
        self.target
    }

    pub fn spec(&self) -> &TweenSpec {
        &self.spec
    }

    /// Timestamp of the first sampled frame; `None` until then.
    pub fn start_time(&self) -> Option<f64> {
        self.start_time
    }

    /// Sample at `now` (ms) and write every channel to `sink`.
    ///
    /// The first call pins the start time. On the first frame where the elapsed
    /// time reaches the duration the exact end values are written.
    pub fn sample<S: StyleSink + ?Sized>(&mut self, now: f64, sink: &mut S) -> Sample {
        let start = *self.start_time.get_or_insert(now);
        let elapsed = now - start - self.spec.delay_ms;
        if elapsed >= self.spec.duration_ms {
            for ch in &self.spec.channels {
                sink.write(self.target, ch.property, ch.to);
            }
            return Sample {
                progress: 1.0,
                finished: true,
            };
        }

        // Rounding to f32 must not report completion ahead of the clock.
        let p = progress(elapsed, self.spec.duration_ms).min(1.0 - f32::EPSILON / 2.0);
        for ch in &self.spec.channels {
            let eased = ch.easing.unwrap_or(self.spec.easing).apply(p);
            sink.write(self.target, ch.property, lerp_f32(ch.from, ch.to, eased));
        }
        Sample {
            progress: p,
            finished: false,
        }
    }
}
