//! Visibility trigger: per-section reveal state machine.
//!
//! ```text
//! Hidden --intersect--> Entering --tween done--> Visible
//!   ^                      |                        |
//!   |                    loss                     loss
//!   |                      v                        |
//!   +----tween done---- Exiting <-------------------+
//!                          |
//!                      intersect --> Entering
//! ```
//!
//! Sections are armed after a staggered delay. Reports that arrive earlier
//! are held and only the latest one is replayed on arming.

use hashbrown::HashMap;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::ids::{TargetId, TweenId};
use crate::role::AnimationRole;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Hidden,
    Entering,
    Visible,
    Exiting,
}

/// Which motion a report asks for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    Enter,
    Exit,
}

#[derive(Debug)]
struct Observed {
    role: AnimationRole,
    phase: Phase,
    armed_at: f64,
    armed: bool,
    pending: Option<bool>,
    active: Option<TweenId>,
}

#[derive(Debug)]
pub struct VisibilityTrigger {
    reveal_delay_ms: f64,
    reveal_stagger_ms: f64,
    entries: HashMap<TargetId, Observed>,
}

impl VisibilityTrigger {
    pub fn new(reveal_delay_ms: f64, reveal_stagger_ms: f64) -> Self {
        Self {
            reveal_delay_ms,
            reveal_stagger_ms,
            entries: HashMap::new(),
        }
    }

    /// Observe `target` as the `index`-th section. Returns the timestamp at
    /// which it is armed.
    pub fn register(
        &mut self,
        target: TargetId,
        role: AnimationRole,
        index: u32,
        now: f64,
    ) -> f64 {
        let armed_at = now + self.reveal_delay_ms + f64::from(index) * self.reveal_stagger_ms;
        self.entries.insert(
            target,
            Observed {
                role,
                phase: Phase::Hidden,
                armed_at,
                armed: false,
                pending: None,
                active: None,
            },
        );
        armed_at
    }

    pub fn contains(&self, target: TargetId) -> bool {
        self.entries.contains_key(&target)
    }

    pub fn phase(&self, target: TargetId) -> Option<Phase> {
        self.entries.get(&target).map(|e| e.phase)
    }

    pub fn role(&self, target: TargetId) -> Option<AnimationRole> {
        self.entries.get(&target).map(|e| e.role)
    }

    pub fn is_armed(&self, target: TargetId) -> bool {
        self.entries.get(&target).is_some_and(|e| e.armed)
    }

    /// Whether any section is still waiting for its arming time.
    pub fn has_unarmed(&self) -> bool {
        self.entries.values().any(|e| !e.armed)
    }

    /// Arm every section whose delay has elapsed. Each newly armed section is
    /// returned with the latest report that arrived while it was waiting.
    pub fn arm_due(&mut self, now: f64) -> Vec<(TargetId, Option<bool>)> {
        let mut armed: Vec<(TargetId, Option<bool>)> = self
            .entries
            .iter_mut()
            .filter(|(_, e)| !e.armed && now >= e.armed_at)
            .map(|(id, e)| {
                e.armed = true;
                (*id, e.pending.take())
            })
            .collect();
        armed.sort_unstable_by_key(|(id, _)| *id);
        armed
    }

    /// Feed an intersection report. Returns the motion to start, if any.
    pub fn report(&mut self, target: TargetId, intersecting: bool) -> Option<Transition> {
        let Some(entry) = self.entries.get_mut(&target) else {
            warn!("intersection report for unobserved target {target:?}");
            return None;
        };
        if !entry.armed {
            entry.pending = Some(intersecting);
            return None;
        }
        let next = match (entry.phase, intersecting) {
            (Phase::Hidden | Phase::Exiting, true) => Some((Phase::Entering, Transition::Enter)),
            (Phase::Entering | Phase::Visible, false) => Some((Phase::Exiting, Transition::Exit)),
            _ => None,
        };
        let (phase, transition) = next?;
        debug!("{target:?}: {:?} -> {phase:?}", entry.phase);
        entry.phase = phase;
        entry.active = None;
        Some(transition)
    }

    /// Remember which tween drives the current phase.
    pub fn bind_tween(&mut self, target: TargetId, tween: TweenId) {
        if let Some(entry) = self.entries.get_mut(&target) {
            entry.active = Some(tween);
        }
    }

    /// A tween finished. Only the tween bound to the current phase settles it.
    pub fn tween_finished(&mut self, target: TargetId, tween: TweenId) -> Option<Phase> {
        let entry = self.entries.get_mut(&target)?;
        if entry.active != Some(tween) {
            return None;
        }
        entry.active = None;
        entry.phase = match entry.phase {
            Phase::Entering => Phase::Visible,
            Phase::Exiting => Phase::Hidden,
            settled => settled,
        };
        debug!("{target:?}: settled {:?}", entry.phase);
        Some(entry.phase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn armed_trigger() -> (VisibilityTrigger, TargetId) {
        let mut vt = VisibilityTrigger::new(700.0, 30.0);
        let t = TargetId(4);
        vt.register(t, AnimationRole::CenterScale, 0, 0.0);
        vt.arm_due(700.0);
        (vt, t)
    }

    #[test]
    fn staggered_arming() {
        let mut vt = VisibilityTrigger::new(700.0, 30.0);
        assert_eq!(vt.register(TargetId(0), AnimationRole::CenterScale, 0, 100.0), 800.0);
        assert_eq!(vt.register(TargetId(1), AnimationRole::SlideLeft, 1, 100.0), 830.0);
        assert_eq!(vt.register(TargetId(2), AnimationRole::SlideRight, 2, 100.0), 860.0);

        assert!(vt.arm_due(799.0).is_empty());
        assert_eq!(vt.arm_due(830.0), vec![(TargetId(0), None), (TargetId(1), None)]);
        assert!(vt.has_unarmed());
        assert_eq!(vt.arm_due(900.0), vec![(TargetId(2), None)]);
        assert!(!vt.has_unarmed());
    }

    #[test]
    fn early_reports_are_deferred_until_armed() {
        let mut vt = VisibilityTrigger::new(700.0, 30.0);
        let t = TargetId(0);
        vt.register(t, AnimationRole::CenterScale, 0, 0.0);
        assert_eq!(vt.report(t, false), None);
        assert_eq!(vt.report(t, true), None);
        assert_eq!(vt.phase(t), Some(Phase::Hidden));
        assert_eq!(vt.arm_due(700.0), vec![(t, Some(true))]);
    }

    #[test]
    fn full_cycle_is_restartable() {
        let (mut vt, t) = armed_trigger();
        assert_eq!(vt.report(t, false), None, "loss while hidden is ignored");
        assert_eq!(vt.report(t, true), Some(Transition::Enter));
        vt.bind_tween(t, TweenId(0));
        assert_eq!(vt.report(t, true), None, "duplicate report ignored");
        assert_eq!(vt.tween_finished(t, TweenId(0)), Some(Phase::Visible));

        assert_eq!(vt.report(t, false), Some(Transition::Exit));
        vt.bind_tween(t, TweenId(1));
        assert_eq!(vt.tween_finished(t, TweenId(1)), Some(Phase::Hidden));

        assert_eq!(vt.report(t, true), Some(Transition::Enter));
        assert_eq!(vt.phase(t), Some(Phase::Entering));
    }

    #[test]
    fn superseded_tween_does_not_settle() {
        let (mut vt, t) = armed_trigger();
        vt.report(t, true);
        vt.bind_tween(t, TweenId(0));
        vt.report(t, false);
        vt.bind_tween(t, TweenId(1));
        assert_eq!(vt.tween_finished(t, TweenId(0)), None);
        assert_eq!(vt.phase(t), Some(Phase::Exiting));
        assert_eq!(vt.report(t, true), Some(Transition::Enter));
    }

    #[test]
    fn unknown_target_is_ignored() {
        let mut vt = VisibilityTrigger::new(0.0, 0.0);
        assert_eq!(vt.report(TargetId(9), true), None);
        assert_eq!(vt.tween_finished(TargetId(9), TweenId(0)), None);
    }
}
