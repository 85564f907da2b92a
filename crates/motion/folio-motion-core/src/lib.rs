//! Folio Motion Core (host-agnostic)
//!
//! Tweens, easing curves, scroll-triggered reveals, hover lifts, the logo
//! carousel and the contact modal, all driven by explicit timestamps and host
//! events. Adapters (the wasm crate) own the DOM and apply the returned
//! style changes once per animation frame.

pub mod carousel;
pub mod config;
pub mod easing;
pub mod engine;
pub mod error;
pub mod ids;
pub mod inputs;
pub mod interp;
pub mod modal;
pub mod outputs;
pub mod role;
pub mod scroll;
pub mod stage;
pub mod style;
pub mod tween;
pub mod visibility;

// Re-exports for consumers (adapters)
pub use carousel::{CarouselDriver, CarouselState};
pub use config::{MotionConfig, RoleTimings};
pub use easing::Easing;
pub use engine::{Finished, TweenEngine};
pub use error::{MotionError, Result};
pub use ids::{IdAllocator, TargetId, TweenId};
pub use inputs::{HostEvent, Inputs};
pub use modal::{Modal, ModalEffect, ModalEvent};
pub use outputs::{Change, CoreEvent, Outputs};
pub use role::{AnimationRole, Motion, MotionPair, Toward};
pub use scroll::{anchor_fragment, plan_scroll};
pub use stage::Stage;
pub use style::{Property, StyleSink, StyleTable, VisualState};
pub use tween::{Channel, Sample, Tween, TweenSpec};
pub use visibility::{Phase, Transition, VisibilityTrigger};
