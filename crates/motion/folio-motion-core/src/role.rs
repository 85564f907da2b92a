//! Animation roles and their enter/leave motion pairs.
//!
//! A role is resolved once from page markers and never changes. The motion
//! pair is looked up at registration, not re-derived per frame.

use serde::{Deserialize, Serialize};

use crate::config::RoleTimings;
use crate::easing::Easing;
use crate::style::{Property, VisualState};
use crate::tween::TweenSpec;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationRole {
    /// Grows out of the center of the section.
    CenterScale,
    /// Slides in from the left edge.
    SlideLeft,
    /// Slides in from the right edge.
    SlideRight,
    /// Card that lifts on pointer hover.
    HoverLift,
    #[default]
    None,
}

impl AnimationRole {
    /// Resolve the role from an element's id and class list.
    pub fn from_markers<'a, I>(id: Option<&str>, classes: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        match id {
            Some("webDevelopment") => return AnimationRole::SlideLeft,
            Some("cyberSecurity") => return AnimationRole::SlideRight,
            _ => {}
        }
        let mut role = AnimationRole::None;
        for class in classes {
            match class {
                "tomGriffin" => return AnimationRole::CenterScale,
                "listBox" => role = AnimationRole::HoverLift,
                _ => {}
            }
        }
        role
    }

    /// Roles that enter and leave with viewport visibility.
    pub fn is_scroll_triggered(self) -> bool {
        matches!(
            self,
            AnimationRole::CenterScale | AnimationRole::SlideLeft | AnimationRole::SlideRight
        )
    }

    pub fn is_hover_triggered(self) -> bool {
        self == AnimationRole::HoverLift
    }

    pub fn motion_pair(self, t: &RoleTimings) -> Option<MotionPair> {
        match self {
            AnimationRole::CenterScale => Some(MotionPair {
                enter: Motion::From(
                    TweenSpec::new(t.scale_entrance_ms, Easing::CubicOut)
                        .channel_eased(Property::Opacity, 0.0, 1.0, Easing::Linear)
                        .channel(Property::Scale, 0.3, 1.0),
                ),
                leave: Motion::Toward(Toward {
                    duration_ms: t.scale_exit_ms,
                    easing: Easing::CubicIn,
                    end: vec![(Property::Opacity, 0.0), (Property::Scale, 0.2)],
                }),
            }),
            AnimationRole::SlideLeft | AnimationRole::SlideRight => {
                let side = if self == AnimationRole::SlideLeft {
                    -1.0
                } else {
                    1.0
                };
                Some(MotionPair {
                    enter: Motion::From(
                        TweenSpec::new(t.slide_entrance_ms, Easing::CubicOut)
                            .channel(Property::Opacity, 0.0, 1.0)
                            .channel(Property::TranslateX, side * t.slide_entrance_px, 0.0)
                            .channel(Property::Scale, 0.7, 1.0),
                    ),
                    leave: Motion::Toward(Toward {
                        duration_ms: t.slide_exit_ms,
                        easing: Easing::QuadIn,
                        end: vec![
                            (Property::Opacity, 0.0),
                            (Property::TranslateX, side * t.slide_exit_px),
                            (Property::Scale, 0.7),
                        ],
                    }),
                })
            }
            AnimationRole::HoverLift => Some(MotionPair {
                enter: Motion::Toward(Toward {
                    duration_ms: t.hover_ms,
                    easing: Easing::CubicOut,
                    end: vec![
                        (Property::TranslateY, -t.hover_lift_px),
                        (Property::Scale, t.hover_scale),
                    ],
                }),
                leave: Motion::Toward(Toward {
                    duration_ms: t.hover_ms,
                    easing: Easing::CubicOut,
                    end: vec![(Property::TranslateY, 0.0), (Property::Scale, 1.0)],
                }),
            }),
            AnimationRole::None => None,
        }
    }
}

/// Enter/leave pair for a role.
#[derive(Clone, Debug, PartialEq)]
pub struct MotionPair {
    pub enter: Motion,
    pub leave: Motion,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Motion {
    /// Snap to fixed opening values, then animate.
    From(TweenSpec),
    /// Animate from whatever the target currently shows.
    Toward(Toward),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toward {
    pub duration_ms: f64,
    pub easing: Easing,
    pub end: Vec<(Property, f32)>,
}

impl Motion {
    /// Concrete spec for a target currently in `current`.
    pub fn resolve(&self, current: &VisualState) -> TweenSpec {
        match self {
            Motion::From(spec) => spec.clone(),
            Motion::Toward(t) => t.end.iter().fold(
                TweenSpec::new(t.duration_ms, t.easing),
                |spec, &(property, to)| spec.channel(property, current.get(property), to),
            ),
        }
    }
}
