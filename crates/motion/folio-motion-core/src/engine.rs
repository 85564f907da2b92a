//! Tween engine: owns running tweens and steps them once per frame.
//!
//! Tweens on the same target are sampled in start order, so the most recently
//! started one wins the frame. Owners that need a single writer per target
//! call [`TweenEngine::supersede`] after starting the replacement.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::ids::{IdAllocator, TargetId, TweenId};
use crate::style::StyleSink;
use crate::tween::Tween;

/// A tween that completed on the current frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finished {
    pub tween: TweenId,
    pub target: TargetId,
}

#[derive(Debug, Default)]
pub struct TweenEngine {
    ids: IdAllocator,
    running: Vec<(TweenId, Tween)>,
}

impl TweenEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a tween; its clock starts on the next `tick`.
    pub fn start(&mut self, tween: Tween) -> TweenId {
        let id = self.ids.alloc_tween();
        debug!(
            "tween {:?} queued on {:?} ({}ms)",
            id,
            tween.target(),
            tween.spec().duration_ms
        );
        self.running.push((id, tween));
        id
    }

    /// Sample every running tween at `now`, writing into `sink`. Completed
    /// tweens are retired and appended to `finished`.
    pub fn tick<S: StyleSink + ?Sized>(
        &mut self,
        now: f64,
        sink: &mut S,
        finished: &mut Vec<Finished>,
    ) {
        self.running.retain_mut(|(id, tween)| {
            let sample = tween.sample(now, &mut *sink);
            if sample.finished {
                finished.push(Finished {
                    tween: *id,
                    target: tween.target(),
                });
            }
            !sample.finished
        });
    }

    /// Drop every running tween on `target` except `keep`. Dropped tweens do
    /// not report as finished. Returns how many were dropped.
    pub fn supersede(&mut self, target: TargetId, keep: TweenId) -> usize {
        let before = self.running.len();
        self.running.retain(|(id, tw)| *id == keep || tw.target() != target);
        let dropped = before - self.running.len();
        if dropped > 0 {
            debug!("{dropped} tween(s) on {target:?} superseded by {keep:?}");
        }
        dropped
    }

    pub fn is_running(&self, id: TweenId) -> bool {
        self.running.iter().any(|(t, _)| *t == id)
    }

    /// Number of running tweens targeting `target`.
    pub fn count_for(&self, target: TargetId) -> usize {
        self.running
            .iter()
            .filter(|(_, tw)| tw.target() == target)
            .count()
    }

    pub fn len(&self) -> usize {
        self.running.len()
    }

    pub fn is_idle(&self) -> bool {
        self.running.is_empty()
    }
}
