use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// A 2D vector with f32 components.
///
/// Used throughout the engine for positions, velocities, forces and normals.
/// The engine works in screen-style coordinates: +x to the right, +y down.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[repr(C)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    /// Zero vector (0, 0)
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Unit vector along X axis (1, 0)
    pub const X: Self = Self::new(1.0, 0.0);

    /// Unit vector along Y axis (0, 1)
    pub const Y: Self = Self::new(0.0, 1.0);

    /// One vector (1, 1)
    pub const ONE: Self = Self::new(1.0, 1.0);

    /// Creates a new Vec2 from components
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Creates a Vec2 with both components set to the same value
    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self::new(v, v)
    }

    /// Dot product of two vectors
    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// 2D cross product (z component of the 3D cross product)
    #[inline]
    pub fn cross(self, other: Self) -> f32 {
        self.x * other.y - self.y * other.x
    }

    /// Perpendicular vector, rotated 90 degrees: `(-y, x)`
    #[inline]
    pub fn perp(self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// Squared length of the vector (avoids sqrt)
    #[inline]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    /// Length (magnitude) of the vector
    #[inline]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Returns a normalized (unit length) version of the vector
    /// Returns zero vector if the input is zero or near-zero
    #[inline]
    pub fn normalize(self) -> Self {
        let len_sq = self.length_squared();
        if len_sq > 1e-10 {
            self / len_sq.sqrt()
        } else {
            Self::ZERO
        }
    }

    /// Returns a normalized vector and its original length
    /// Returns (ZERO, 0.0) if the input is zero or near-zero
    #[inline]
    pub fn normalize_with_length(self) -> (Self, f32) {
        let len_sq = self.length_squared();
        if len_sq > 1e-10 {
            let len = len_sq.sqrt();
            (self / len, len)
        } else {
            (Self::ZERO, 0.0)
        }
    }

    /// Attempts to normalize, returning None if the vector is too small
    #[inline]
    pub fn try_normalize(self) -> Option<Self> {
        let len_sq = self.length_squared();
        if len_sq > 1e-10 {
            Some(self / len_sq.sqrt())
        } else {
            None
        }
    }

    /// Returns true if the vector is approximately zero
    #[inline]
    pub fn is_near_zero(self, epsilon: f32) -> bool {
        self.length_squared() < epsilon * epsilon
    }

    /// Returns true if both components are finite
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Linear interpolation between two vectors
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }

    /// Component-wise minimum
    #[inline]
    pub fn min(self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y))
    }

    /// Component-wise maximum
    #[inline]
    pub fn max(self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y))
    }

    /// Clamps each component to the range [min, max]
    #[inline]
    pub fn clamp(self, min: Self, max: Self) -> Self {
        self.max(min).min(max)
    }

    /// Component-wise absolute value
    #[inline]
    pub fn abs(self) -> Self {
        Self::new(self.x.abs(), self.y.abs())
    }

    /// Scales the vector down so its length does not exceed `max_length`
    #[inline]
    pub fn clamp_length(self, max_length: f32) -> Self {
        let len_sq = self.length_squared();
        if len_sq > max_length * max_length {
            self * (max_length / len_sq.sqrt())
        } else {
            self
        }
    }

    /// Projects this vector onto another vector
    #[inline]
    pub fn project_onto(self, other: Self) -> Self {
        let other_len_sq = other.length_squared();
        if other_len_sq > 1e-10 {
            other * (self.dot(other) / other_len_sq)
        } else {
            Self::ZERO
        }
    }

    /// Returns the component of this vector perpendicular to another
    #[inline]
    pub fn reject_from(self, other: Self) -> Self {
        self - self.project_onto(other)
    }

    /// Returns the distance between two points
    #[inline]
    pub fn distance(self, other: Self) -> f32 {
        (other - self).length()
    }

    /// Returns the squared distance between two points
    #[inline]
    pub fn distance_squared(self, other: Self) -> f32 {
        (other - self).length_squared()
    }
}

// Operator overloads

impl Add for Vec2 {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl SubAssign for Vec2 {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }
}

impl Mul<Vec2> for f32 {
    type Output = Vec2;

    #[inline]
    fn mul(self, vec: Vec2) -> Vec2 {
        Vec2::new(self * vec.x, self * vec.y)
    }
}

impl MulAssign<f32> for Vec2 {
    #[inline]
    fn mul_assign(&mut self, scalar: f32) {
        self.x *= scalar;
        self.y *= scalar;
    }
}

impl Div<f32> for Vec2 {
    type Output = Self;

    #[inline]
    fn div(self, scalar: f32) -> Self {
        let inv = 1.0 / scalar;
        Self::new(self.x * inv, self.y * inv)
    }
}

impl DivAssign<f32> for Vec2 {
    #[inline]
    fn div_assign(&mut self, scalar: f32) {
        let inv = 1.0 / scalar;
        self.x *= inv;
        self.y *= inv;
    }
}

impl Neg for Vec2 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl From<[f32; 2]> for Vec2 {
    #[inline]
    fn from([x, y]: [f32; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<(f32, f32)> for Vec2 {
    #[inline]
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

impl From<Vec2> for (f32, f32) {
    #[inline]
    fn from(v: Vec2) -> Self {
        (v.x, v.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn vec2_approx_eq(a: Vec2, b: Vec2) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
    }

    #[test]
    fn test_dot_and_cross() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(3.0, 4.0);
        assert!(approx_eq(a.dot(b), 11.0));
        assert!(approx_eq(Vec2::X.cross(Vec2::Y), 1.0));
        assert!(approx_eq(Vec2::Y.cross(Vec2::X), -1.0));
    }

    #[test]
    fn test_perp_is_orthogonal() {
        let v = Vec2::new(3.0, -7.0);
        assert!(approx_eq(v.dot(v.perp()), 0.0));
    }

    #[test]
    fn test_normalize() {
        let v = Vec2::new(3.0, 4.0);
        let n = v.normalize();
        assert!(approx_eq(n.length(), 1.0));
        assert!(vec2_approx_eq(n, Vec2::new(0.6, 0.8)));

        assert_eq!(Vec2::ZERO.normalize(), Vec2::ZERO);
        assert!(Vec2::ZERO.try_normalize().is_none());

        let (dir, len) = v.normalize_with_length();
        assert!(approx_eq(len, 5.0));
        assert!(vec2_approx_eq(dir, n));
    }

    #[test]
    fn test_clamp_length() {
        let v = Vec2::new(30.0, 40.0);
        assert!(approx_eq(v.clamp_length(10.0).length(), 10.0));
        assert_eq!(Vec2::new(1.0, 1.0).clamp_length(10.0), Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_reject_from() {
        let v = Vec2::new(3.0, 4.0);
        assert!(vec2_approx_eq(v.reject_from(Vec2::Y), Vec2::new(3.0, 0.0)));
        assert!(vec2_approx_eq(v.project_onto(Vec2::Y), Vec2::new(0.0, 4.0)));
    }

    #[test]
    fn test_operators() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(4.0, 6.0);

        assert!(vec2_approx_eq(a + b, Vec2::new(5.0, 8.0)));
        assert!(vec2_approx_eq(b - a, Vec2::new(3.0, 4.0)));
        assert!(vec2_approx_eq(a * 2.0, Vec2::new(2.0, 4.0)));
        assert!(vec2_approx_eq(2.0 * a, Vec2::new(2.0, 4.0)));
        assert!(vec2_approx_eq(b / 2.0, Vec2::new(2.0, 3.0)));
        assert!(vec2_approx_eq(-a, Vec2::new(-1.0, -2.0)));

        let mut c = a;
        c += b;
        c -= a;
        c *= 0.5;
        assert!(vec2_approx_eq(c, Vec2::new(2.0, 3.0)));
    }

    #[test]
    fn test_min_max_clamp() {
        let v = Vec2::new(5.0, -5.0);
        let clamped = v.clamp(Vec2::splat(-1.0), Vec2::splat(1.0));
        assert_eq!(clamped, Vec2::new(1.0, -1.0));
        assert_eq!(v.abs(), Vec2::splat(5.0));
        assert!(approx_eq(Vec2::ZERO.distance(Vec2::new(3.0, 4.0)), 5.0));
    }
}
