use crate::math::Vec2;

/// An axis-aligned bounding box defined by minimum and maximum points.
///
/// Used for broad-phase filtering, box geometry and spatial queries.
/// With y growing downward, `min.y` is the top edge and `max.y` the bottom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner (left, top)
    pub min: Vec2,
    /// Maximum corner (right, bottom)
    pub max: Vec2,
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Aabb {
    /// An empty AABB that contains no points
    pub const EMPTY: Self = Self {
        min: Vec2::new(f32::INFINITY, f32::INFINITY),
        max: Vec2::new(f32::NEG_INFINITY, f32::NEG_INFINITY),
    };

    /// Creates an AABB from minimum and maximum points
    #[inline]
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Creates an AABB from center and half-extents
    #[inline]
    pub fn from_center_half_extents(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Returns the center of the AABB
    #[inline]
    pub fn center(self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Returns the half-extents (half the size in each dimension)
    #[inline]
    pub fn half_extents(self) -> Vec2 {
        (self.max - self.min) * 0.5
    }

    /// Returns the full size (extents) of the AABB
    #[inline]
    pub fn size(self) -> Vec2 {
        self.max - self.min
    }

    /// Returns the area of the AABB
    #[inline]
    pub fn area(self) -> f32 {
        let size = self.size();
        size.x * size.y
    }

    /// Returns true if this AABB is empty
    #[inline]
    pub fn is_empty(self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Returns true if this AABB contains the given point (edges included)
    #[inline]
    pub fn contains_point(self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Returns true if this AABB intersects another AABB (touching counts)
    #[inline]
    pub fn intersects(self, other: Self) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// Returns the intersection of two AABBs; empty if they don't intersect
    #[inline]
    pub fn intersection(self, other: Self) -> Self {
        Self {
            min: self.min.max(other.min),
            max: self.max.min(other.max),
        }
    }

    /// Returns the closest point on (or in) the AABB to the given point
    #[inline]
    pub fn closest_point(self, point: Vec2) -> Vec2 {
        point.clamp(self.min, self.max)
    }

    /// Returns the squared distance from a point to the AABB
    #[inline]
    pub fn distance_squared_to_point(self, point: Vec2) -> f32 {
        self.closest_point(point).distance_squared(point)
    }

    /// Slab test against a ray.
    ///
    /// Returns `Some((t_enter, t_exit))` when the infinite line through the
    /// ray crosses the box and the exit lies ahead of the origin. `t_enter` is
    /// negative when the origin is inside. A ray parallel to an axis misses if
    /// its origin lies outside the box's range on that axis.
    pub fn ray_intersection(self, origin: Vec2, direction: Vec2) -> Option<(f32, f32)> {
        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;

        for (o, d, lo, hi) in [
            (origin.x, direction.x, self.min.x, self.max.x),
            (origin.y, direction.y, self.min.y, self.max.y),
        ] {
            if d.abs() < 1e-8 {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / d;
            let t1 = (lo - o) * inv;
            let t2 = (hi - o) * inv;
            t_enter = t_enter.max(t1.min(t2));
            t_exit = t_exit.min(t1.max(t2));
        }

        if t_exit >= t_enter && t_exit >= 0.0 {
            Some((t_enter, t_exit))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_center_half_extents() {
        let aabb = Aabb::from_center_half_extents(Vec2::new(1.0, 2.0), Vec2::new(1.0, 1.0));
        assert_eq!(aabb.min, Vec2::new(0.0, 1.0));
        assert_eq!(aabb.max, Vec2::new(2.0, 3.0));
        assert_eq!(aabb.center(), Vec2::new(1.0, 2.0));
        assert_eq!(aabb.half_extents(), Vec2::new(1.0, 1.0));
        assert_eq!(aabb.area(), 4.0);
    }

    #[test]
    fn test_contains_point() {
        let aabb = Aabb::new(Vec2::ZERO, Vec2::ONE);
        assert!(aabb.contains_point(Vec2::new(0.5, 0.5)));
        assert!(aabb.contains_point(Vec2::ZERO));
        assert!(aabb.contains_point(Vec2::ONE));
        assert!(!aabb.contains_point(Vec2::new(2.0, 0.5)));
    }

    #[test]
    fn test_intersects() {
        let a = Aabb::new(Vec2::ZERO, Vec2::ONE);
        let b = Aabb::new(Vec2::new(0.5, 0.5), Vec2::new(1.5, 1.5));
        let c = Aabb::new(Vec2::new(2.0, 0.0), Vec2::new(3.0, 1.0));
        let touching = Aabb::new(Vec2::new(1.0, 0.0), Vec2::new(2.0, 1.0));

        assert!(a.intersects(b));
        assert!(b.intersects(a));
        assert!(!a.intersects(c));
        assert!(a.intersects(touching));
        assert!(a.intersection(c).is_empty());
    }

    #[test]
    fn test_closest_point() {
        let aabb = Aabb::new(Vec2::ZERO, Vec2::ONE);
        assert_eq!(aabb.closest_point(Vec2::new(0.5, 0.5)), Vec2::new(0.5, 0.5));
        assert_eq!(aabb.closest_point(Vec2::new(2.0, 0.5)), Vec2::new(1.0, 0.5));
        assert_eq!(aabb.distance_squared_to_point(Vec2::new(3.0, 0.5)), 4.0);
    }

    #[test]
    fn test_ray_intersection() {
        let aabb = Aabb::new(Vec2::ZERO, Vec2::ONE);

        let (t_enter, t_exit) = aabb
            .ray_intersection(Vec2::new(-1.0, 0.5), Vec2::X)
            .expect("ray should hit");
        assert!((t_enter - 1.0).abs() < 1e-6);
        assert!((t_exit - 2.0).abs() < 1e-6);

        // Parallel and outside the y range
        assert!(aabb.ray_intersection(Vec2::new(-1.0, 2.0), Vec2::X).is_none());

        // Box behind the origin
        assert!(aabb.ray_intersection(Vec2::new(3.0, 0.5), Vec2::X).is_none());

        // Origin inside
        let (t_enter, t_exit) = aabb
            .ray_intersection(Vec2::new(0.5, 0.5), Vec2::X)
            .expect("ray should hit");
        assert!(t_enter < 0.0);
        assert!((t_exit - 0.5).abs() < 1e-6);
    }
}
