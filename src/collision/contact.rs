use crate::math::Vec2;

/// A handle to a shape in the physics world.
///
/// Ids are handed out in increasing order and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(pub(crate) u32);

impl ShapeId {
    /// Returns the raw id
    pub fn raw(self) -> u32 {
        self.0
    }
}

/// A handle to a body in the physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle {
    index: u32,
    generation: u32,
}

impl BodyHandle {
    /// Creates a new body handle
    pub fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Returns the index of this handle
    pub fn index(self) -> usize {
        self.index as usize
    }

    pub fn generation(self) -> u32 {
        self.generation
    }
}

/// A single contact point between two shapes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactPoint {
    /// Contact point in world space
    pub point: Vec2,
    /// Contact normal (pointing from A to B)
    pub normal: Vec2,
    /// Penetration depth (positive when overlapping)
    pub penetration: f32,
}

impl ContactPoint {
    pub fn new(point: Vec2, normal: Vec2, penetration: f32) -> Self {
        Self {
            point,
            normal,
            penetration,
        }
    }
}

/// The result of a narrow-phase test between shapes A and B.
///
/// `normal` is unit length and points from A toward B; moving B along it by
/// `penetration` separates the pair. Boxes stay axis-aligned, so one contact
/// point per pair is enough.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactManifold {
    pub shape_a: ShapeId,
    pub shape_b: ShapeId,
    /// Contact point; its normal matches `normal`
    pub contact: ContactPoint,
    pub normal: Vec2,
    pub penetration: f32,
}

impl ContactManifold {
    /// Creates a manifold from its contact point
    pub fn new(shape_a: ShapeId, shape_b: ShapeId, contact: ContactPoint) -> Self {
        Self {
            shape_a,
            shape_b,
            contact,
            normal: contact.normal,
            penetration: contact.penetration,
        }
    }

    /// Exchanges A and B, flipping the normal so it still points A to B
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.shape_a, &mut self.shape_b);
        self.normal = -self.normal;
        self.contact.normal = -self.contact.normal;
    }

    /// Returns a copy with A and B exchanged
    pub fn swapped(mut self) -> Self {
        self.swap();
        self
    }
}

/// A collision pair identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollisionPair {
    /// First shape (always has smaller id)
    pub shape_a: ShapeId,
    /// Second shape (always has larger id)
    pub shape_b: ShapeId,
}

impl CollisionPair {
    /// Creates a new collision pair, ensuring consistent ordering
    pub fn new(a: ShapeId, b: ShapeId) -> Self {
        if a <= b {
            Self {
                shape_a: a,
                shape_b: b,
            }
        } else {
            Self {
                shape_a: b,
                shape_b: a,
            }
        }
    }

    /// Returns true if the pair includes `shape`
    pub fn contains(&self, shape: ShapeId) -> bool {
        self.shape_a == shape || self.shape_b == shape
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifold_swap() {
        let manifold = ContactManifold::new(
            ShapeId(4),
            ShapeId(2),
            ContactPoint::new(Vec2::ZERO, Vec2::X, 0.5),
        )
        .swapped();

        assert_eq!(manifold.shape_a, ShapeId(2));
        assert_eq!(manifold.shape_b, ShapeId(4));
        assert_eq!(manifold.normal, -Vec2::X);
        assert_eq!(manifold.contact.normal, -Vec2::X);
        assert_eq!(manifold.penetration, 0.5);
    }

    #[test]
    fn test_collision_pair_ordering() {
        let pair1 = CollisionPair::new(ShapeId(1), ShapeId(2));
        let pair2 = CollisionPair::new(ShapeId(2), ShapeId(1));

        assert_eq!(pair1, pair2);
        assert_eq!(pair1.shape_a, ShapeId(1));
        assert_eq!(pair1.shape_b, ShapeId(2));
        assert!(pair1.contains(ShapeId(2)));
        assert!(!pair1.contains(ShapeId(7)));
        assert!(CollisionPair::new(ShapeId(0), ShapeId(9)) < pair1);
    }
}
