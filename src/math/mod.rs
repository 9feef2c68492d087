mod transform;
mod vec2;

pub use transform::Transform;
pub use vec2::Vec2;

/// Utility functions
pub mod utils {
    /// Returns true if two floats are approximately equal
    #[inline]
    pub fn approx_eq(a: f32, b: f32, epsilon: f32) -> bool {
        (a - b).abs() < epsilon
    }

    /// Clamps a value into [0, 1], mapping NaN to 0
    #[inline]
    pub fn clamp01(value: f32) -> f32 {
        if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, 1.0)
        }
    }

    /// Returns `value` if it is finite and at least `min`, else `min`
    #[inline]
    pub fn at_least(value: f32, min: f32) -> f32 {
        if value.is_finite() && value >= min {
            value
        } else {
            min
        }
    }
}

#[cfg(test)]
mod tests {
    use super::utils::*;

    #[test]
    fn test_clamp01() {
        assert_eq!(clamp01(-1.0), 0.0);
        assert_eq!(clamp01(0.25), 0.25);
        assert_eq!(clamp01(7.0), 1.0);
        assert_eq!(clamp01(f32::NAN), 0.0);
    }

    #[test]
    fn test_at_least() {
        assert_eq!(at_least(0.0, 1e-3), 1e-3);
        assert_eq!(at_least(-5.0, 1e-3), 1e-3);
        assert_eq!(at_least(f32::INFINITY, 1e-3), 1e-3);
        assert_eq!(at_least(2.0, 1e-3), 2.0);
        assert!(approx_eq(0.1 + 0.2, 0.3, 1e-6));
    }
}
