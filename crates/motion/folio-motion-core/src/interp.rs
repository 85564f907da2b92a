//! Interpolation helpers.

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Normalized progress of `elapsed` over `duration`, clamped to [0, 1].
/// A non-positive duration counts as already complete.
#[inline]
pub fn progress(elapsed: f64, duration: f64) -> f32 {
    if duration <= 0.0 {
        return 1.0;
    }
    (elapsed / duration).clamp(0.0, 1.0) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_endpoints() {
        assert_eq!(lerp_f32(0.3, 1.0, 0.0), 0.3);
        assert_eq!(lerp_f32(0.3, 1.0, 1.0), 1.0);
        assert!((lerp_f32(-80.0, 0.0, 0.5) + 40.0).abs() < 1e-6);
    }

    #[test]
    fn progress_clamps() {
        assert_eq!(progress(-5.0, 100.0), 0.0);
        assert_eq!(progress(50.0, 100.0), 0.5);
        assert_eq!(progress(250.0, 100.0), 1.0);
        assert_eq!(progress(1.0, 0.0), 1.0);
    }
}
