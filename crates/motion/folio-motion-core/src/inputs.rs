//! Input contracts for the stage.
//!
//! Adapters collect host events between frames and hand them to
//! `Stage::update()` in arrival order.

use serde::{Deserialize, Serialize};

use crate::ids::TargetId;
use crate::modal::ModalEvent;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Inputs {
    #[serde(default)]
    pub events: Vec<HostEvent>,
}

impl Inputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: HostEvent) {
        self.events.push(event);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl From<Vec<HostEvent>> for Inputs {
    fn from(events: Vec<HostEvent>) -> Self {
        Self { events }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostEvent {
    Intersection {
        target: TargetId,
        intersecting: bool,
    },
    PointerEnter {
        target: TargetId,
    },
    PointerLeave {
        target: TargetId,
    },
    /// An in-page anchor was activated and its target resolved.
    ScrollRequest {
        current_y: f32,
        target_top: f32,
    },
    Modal(ModalEvent),
    CarouselResized {
        track_width: f64,
    },
}
