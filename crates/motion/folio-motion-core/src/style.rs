//! Per-target visual state.
//!
//! Each animated target owns exactly one `VisualState`. Tweens write into it
//! through a [`StyleSink`]; the adapter reads it back and renders inline styles.

use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};

use crate::ids::TargetId;

/// Animatable channels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    Opacity,
    /// Horizontal translation in px.
    TranslateX,
    /// Vertical translation in px.
    TranslateY,
    Scale,
    /// Vertical scroll position of the viewport in px.
    ScrollY,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VisualState {
    pub opacity: f32,
    pub translate_x: f32,
    pub translate_y: f32,
    pub scale: f32,
    pub scroll_y: f32,
}

impl Default for VisualState {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
            scale: 1.0,
            scroll_y: 0.0,
        }
    }
}

impl VisualState {
    /// Fully transparent, otherwise at rest.
    pub fn hidden() -> Self {
        Self {
            opacity: 0.0,
            ..Self::default()
        }
    }

    #[inline]
    pub fn get(&self, property: Property) -> f32 {
        match property {
            Property::Opacity => self.opacity,
            Property::TranslateX => self.translate_x,
            Property::TranslateY => self.translate_y,
            Property::Scale => self.scale,
            Property::ScrollY => self.scroll_y,
        }
    }

    #[inline]
    pub fn set(&mut self, property: Property, value: f32) {
        match property {
            Property::Opacity => self.opacity = value,
            Property::TranslateX => self.translate_x = value,
            Property::TranslateY => self.translate_y = value,
            Property::Scale => self.scale = value,
            Property::ScrollY => self.scroll_y = value,
        }
    }

    pub fn has_identity_transform(&self) -> bool {
        self.translate_x == 0.0 && self.translate_y == 0.0 && self.scale == 1.0
    }

    /// CSS `transform` value for the 2-D channels.
    pub fn transform_css(&self) -> String {
        if self.has_identity_transform() {
            return "none".to_string();
        }
        format!(
            "translateX({}px) translateY({}px) scale({})",
            self.translate_x, self.translate_y, self.scale
        )
    }
}

/// Destination for interpolated values.
pub trait StyleSink {
    fn write(&mut self, target: TargetId, property: Property, value: f32);
}

/// Owned table of visual states with dirty tracking.
#[derive(Debug, Default)]
pub struct StyleTable {
    states: HashMap<TargetId, VisualState>,
    dirty: HashSet<TargetId>,
}

impl StyleTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, target: TargetId, state: VisualState) {
        self.states.insert(target, state);
        self.dirty.insert(target);
    }

    pub fn get(&self, target: TargetId) -> Option<&VisualState> {
        self.states.get(&target)
    }

    pub fn contains(&self, target: TargetId) -> bool {
        self.states.contains_key(&target)
    }

    /// Current state, falling back to the resting default.
    pub fn current(&self, target: TargetId) -> VisualState {
        self.states.get(&target).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Drain the targets written since the last call, in ascending id order.
    pub fn drain_dirty(&mut self) -> Vec<(TargetId, VisualState)> {
        let mut ids: Vec<TargetId> = self.dirty.drain().collect();
        ids.sort_unstable();
        ids.into_iter()
            .filter_map(|id| self.states.get(&id).map(|s| (id, *s)))
            .collect()
    }
}

impl StyleSink for StyleTable {
    fn write(&mut self, target: TargetId, property: Property, value: f32) {
        self.states.entry(target).or_default().set(property, value);
        self.dirty.insert(target);
    }
}
