//! Error type shared by the core.

use thiserror::Error;

use crate::ids::TargetId;
use crate::role::AnimationRole;
use crate::style::Property;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MotionError {
    #[error("tween duration must be positive and finite, got {0}ms")]
    InvalidDuration(f64),
    #[error("tween delay must be non-negative and finite, got {0}ms")]
    InvalidDelay(f64),
    #[error("non-finite value for {property:?}: {value}")]
    NonFiniteValue { property: Property, value: f32 },
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("config parse error: {0}")]
    ConfigParse(String),
    #[error("unknown target {0:?}")]
    UnknownTarget(TargetId),
    #[error("role {0:?} has no scroll-triggered motion")]
    UnsupportedRole(AnimationRole),
}

pub type Result<T> = std::result::Result<T, MotionError>;
