use super::vec2::Vec2;

/// A 2D rigid transformation: a position plus a rotation angle in radians.
///
/// This is the value the default [`Transforms`](crate::entity::Transforms)
/// table stores per entity. The physics engine only ever reads the position
/// and applies relative moves through `translate` / `rotate`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Position (translation)
    pub position: Vec2,
    /// Rotation angle in radians
    pub rotation: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// Identity transform (no translation or rotation)
    pub const IDENTITY: Self = Self {
        position: Vec2::ZERO,
        rotation: 0.0,
    };

    /// Creates a new transform from position and rotation
    #[inline]
    pub const fn new(position: Vec2, rotation: f32) -> Self {
        Self { position, rotation }
    }

    /// Creates a transform with only translation
    #[inline]
    pub const fn from_position(position: Vec2) -> Self {
        Self {
            position,
            rotation: 0.0,
        }
    }

    /// Moves the transform by `delta`
    #[inline]
    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    /// Rotates the transform by `delta` radians
    #[inline]
    pub fn rotate(&mut self, delta: f32) {
        self.rotation += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    const EPSILON: f32 = 1e-5;

    fn vec2_approx_eq(a: Vec2, b: Vec2) -> bool {
        a.distance_squared(b) < EPSILON * EPSILON
    }

    #[test]
    fn test_identity() {
        let t = Transform::default();
        assert_eq!(t, Transform::IDENTITY);
        assert_eq!(t, Transform::new(Vec2::ZERO, 0.0));
    }

    #[test]
    fn test_translation_only() {
        let t = Transform::from_position(Vec2::new(1.0, 2.0));
        assert_eq!(t.position, Vec2::new(1.0, 2.0));
        assert_eq!(t.rotation, 0.0);
    }

    #[test]
    fn test_translate_and_rotate() {
        let mut t = Transform::from_position(Vec2::new(1.0, 1.0));
        t.translate(Vec2::new(1.0, -2.0));
        t.translate(Vec2::new(0.5, 0.0));
        t.rotate(PI / 2.0);
        t.rotate(-PI / 4.0);

        assert!(vec2_approx_eq(t.position, Vec2::new(2.5, -1.0)));
        assert!((t.rotation - PI / 4.0).abs() < EPSILON);
    }
}
