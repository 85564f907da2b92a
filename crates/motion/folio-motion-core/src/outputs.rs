//! Output contracts from the stage.
//!
//! Outputs carry the full visual state of every target written this frame
//! and a separate list of semantic events. Adapters apply changes to the host.

use serde::{Deserialize, Serialize};

use crate::ids::{TargetId, TweenId};
use crate::modal::ModalEffect;
use crate::style::VisualState;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Change {
    pub target: TargetId,
    pub state: VisualState,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum CoreEvent {
    TweenFinished { tween: TweenId, target: TargetId },
    /// Section delay elapsed; the host should make the element visible.
    SectionArmed { target: TargetId },
    ModalOpened,
    ModalClosed,
    /// Viewport scroll animation planned toward `target_y`.
    ScrollTo { from_y: f32, target_y: f32 },
}

impl CoreEvent {
    /// Host effect to apply for a modal transition, if this is one.
    pub fn modal_effect(&self) -> Option<ModalEffect> {
        match self {
            CoreEvent::ModalOpened => Some(ModalEffect { open: true }),
            CoreEvent::ModalClosed => Some(ModalEffect { open: false }),
            _ => None,
        }
    }
}

impl From<ModalEffect> for CoreEvent {
    fn from(effect: ModalEffect) -> Self {
        if effect.open {
            CoreEvent::ModalOpened
        } else {
            CoreEvent::ModalClosed
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub changes: Vec<Change>,
    #[serde(default)]
    pub events: Vec<CoreEvent>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.changes.clear();
        self.events.clear();
    }

    #[inline]
    pub fn push_change(&mut self, change: Change) {
        self.changes.push(change);
    }

    #[inline]
    pub fn push_event(&mut self, event: CoreEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.events.is_empty()
    }

    /// Latest state written for `target` this frame.
    pub fn change_for(&self, target: TargetId) -> Option<&VisualState> {
        self.changes
            .iter()
            .rev()
            .find(|c| c.target == target)
            .map(|c| &c.state)
    }
}
