use std::collections::BTreeSet;

use crate::collision::ShapeId;
use crate::entity::EntityHandle;
use crate::math::utils::at_least;
use crate::math::Vec2;

use super::aabb::Aabb;
use super::material::Material;

/// Smallest half extent or radius a shape can have
pub const MIN_EXTENT: f32 = 1e-4;

/// The type of collision shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShapeType {
    Box,
    Circle,
}

/// Geometry of a collision shape, in the owning entity's frame.
///
/// Boxes are axis-aligned: entity rotation does not turn them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeKind {
    /// An axis-aligned box defined by half-extents
    Box { half_extents: Vec2 },
    /// A circle defined by its radius
    Circle { radius: f32 },
}

impl ShapeKind {
    /// Creates a box from half-extents
    #[inline]
    pub fn cuboid(half_extents: Vec2) -> Self {
        let h = half_extents.abs();
        Self::Box {
            half_extents: Vec2::new(at_least(h.x, MIN_EXTENT), at_least(h.y, MIN_EXTENT)),
        }
    }

    /// Creates a box from full dimensions
    #[inline]
    pub fn cuboid_from_size(size: Vec2) -> Self {
        Self::cuboid(size * 0.5)
    }

    /// Creates a circle
    #[inline]
    pub fn circle(radius: f32) -> Self {
        Self::Circle {
            radius: at_least(radius.abs(), MIN_EXTENT),
        }
    }

    /// Returns the shape type
    #[inline]
    pub fn shape_type(&self) -> ShapeType {
        match self {
            ShapeKind::Box { .. } => ShapeType::Box,
            ShapeKind::Circle { .. } => ShapeType::Circle,
        }
    }

    /// Bounds of this geometry centered at `center`
    #[inline]
    pub fn aabb_at(&self, center: Vec2) -> Aabb {
        match *self {
            ShapeKind::Box { half_extents } => Aabb::from_center_half_extents(center, half_extents),
            ShapeKind::Circle { radius } => {
                Aabb::from_center_half_extents(center, Vec2::splat(radius))
            }
        }
    }

    /// Area of the shape
    #[inline]
    pub fn area(&self) -> f32 {
        match *self {
            ShapeKind::Box { half_extents } => 4.0 * half_extents.x * half_extents.y,
            ShapeKind::Circle { radius } => std::f32::consts::PI * radius * radius,
        }
    }
}

/// Description for creating a shape
#[derive(Debug, Clone, Copy)]
pub struct ShapeDesc {
    pub kind: ShapeKind,
    pub offset: Vec2,
    pub material: Material,
    pub is_trigger: bool,
    pub enabled: bool,
}

impl ShapeDesc {
    /// Creates a description for the given geometry
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            offset: Vec2::ZERO,
            material: Material::default(),
            is_trigger: false,
            enabled: true,
        }
    }

    /// A box shape from half-extents
    pub fn cuboid(half_extents: Vec2) -> Self {
        Self::new(ShapeKind::cuboid(half_extents))
    }

    /// A box shape from full width and height
    pub fn cuboid_from_size(size: Vec2) -> Self {
        Self::new(ShapeKind::cuboid_from_size(size))
    }

    /// A circle shape
    pub fn circle(radius: f32) -> Self {
        Self::new(ShapeKind::circle(radius))
    }

    /// Sets the offset from the entity's position
    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    /// Sets the material
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    /// Makes this shape a trigger: it reports overlaps but never collides
    pub fn trigger(mut self) -> Self {
        self.is_trigger = true;
        self
    }

    /// Sets whether the shape takes part in simulation and queries
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// A collision shape registered with the world.
///
/// The shape remembers which other shapes it touched in the current and the
/// previous sub-step; the difference drives enter/stay/exit events.
#[derive(Debug, Clone)]
pub struct Shape {
    id: ShapeId,
    entity: EntityHandle,
    kind: ShapeKind,
    /// Trigger shapes report overlaps but are never resolved
    pub is_trigger: bool,
    pub material: Material,
    /// Offset of the shape center from the entity position
    pub offset: Vec2,
    /// Disabled shapes are skipped by simulation and queries
    pub enabled: bool,
    bounds: Aabb,
    located: bool,
    current_contacts: BTreeSet<ShapeId>,
    previous_contacts: BTreeSet<ShapeId>,
}

impl Shape {
    pub(crate) fn new(id: ShapeId, entity: EntityHandle, desc: ShapeDesc) -> Self {
        Self {
            id,
            entity,
            kind: desc.kind,
            is_trigger: desc.is_trigger,
            material: desc.material,
            offset: desc.offset,
            enabled: desc.enabled,
            bounds: Aabb::EMPTY,
            located: false,
            current_contacts: BTreeSet::new(),
            previous_contacts: BTreeSet::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> ShapeId {
        self.id
    }

    /// The entity this shape belongs to
    #[inline]
    pub fn entity(&self) -> EntityHandle {
        self.entity
    }

    #[inline]
    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    /// Replaces the geometry; bounds refresh on the next update
    pub fn set_kind(&mut self, kind: ShapeKind) {
        self.kind = match kind {
            ShapeKind::Box { half_extents } => ShapeKind::cuboid(half_extents),
            ShapeKind::Circle { radius } => ShapeKind::circle(radius),
        };
    }

    #[inline]
    pub fn shape_type(&self) -> ShapeType {
        self.kind.shape_type()
    }

    /// Recomputes and caches the world bounds for an entity at `world_position`
    pub fn compute_bounds(&mut self, world_position: Vec2) -> Aabb {
        self.bounds = self.kind.aabb_at(world_position + self.offset);
        self.located = true;
        self.bounds
    }

    /// Cached world bounds from the last update
    #[inline]
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// World-space center, from the cached bounds
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.bounds.center()
    }

    /// Returns true if the entity had a transform at the last bounds update
    #[inline]
    pub fn is_located(&self) -> bool {
        self.located
    }

    pub(crate) fn mark_unlocated(&mut self) {
        self.located = false;
    }

    /// Returns true if this shape is enabled and was located at the last update
    #[inline]
    pub fn is_active(&self) -> bool {
        self.enabled && self.located
    }

    /// Returns true if the world-space point lies inside the shape (boundary included)
    pub fn contains_point(&self, point: Vec2) -> bool {
        match self.kind {
            ShapeKind::Box { .. } => self.bounds.contains_point(point),
            ShapeKind::Circle { radius } => {
                self.center().distance_squared(point) <= radius * radius
            }
        }
    }

    /// Returns true if the shape overlaps a circle (touching counts)
    pub fn overlaps_circle(&self, center: Vec2, radius: f32) -> bool {
        match self.kind {
            ShapeKind::Box { .. } => {
                self.bounds.distance_squared_to_point(center) <= radius * radius
            }
            ShapeKind::Circle { radius: own } => {
                let sum = own + radius;
                self.center().distance_squared(center) <= sum * sum
            }
        }
    }

    #[inline]
    pub fn area(&self) -> f32 {
        self.kind.area()
    }

    /// Mass of the shape from its area and material density
    #[inline]
    pub fn mass(&self) -> f32 {
        self.area() * self.material.density()
    }

    /// Shapes touched during the current sub-step
    pub fn current_contacts(&self) -> &BTreeSet<ShapeId> {
        &self.current_contacts
    }

    /// Shapes touched during the previous sub-step
    pub fn previous_contacts(&self) -> &BTreeSet<ShapeId> {
        &self.previous_contacts
    }

    /// Returns true if this shape is touching `other` in the current sub-step
    pub fn is_touching(&self, other: ShapeId) -> bool {
        self.current_contacts.contains(&other)
    }

    /// Moves the current contacts into the previous set and clears current
    pub(crate) fn begin_contacts(&mut self) {
        std::mem::swap(&mut self.current_contacts, &mut self.previous_contacts);
        self.current_contacts.clear();
    }

    pub(crate) fn add_contact(&mut self, other: ShapeId) {
        self.current_contacts.insert(other);
    }

    /// Forgets a shape that left the world
    pub(crate) fn forget(&mut self, other: ShapeId) {
        self.current_contacts.remove(&other);
        self.previous_contacts.remove(&other);
    }

    /// Forgets every contact
    pub(crate) fn clear_contacts(&mut self) {
        self.current_contacts.clear();
        self.previous_contacts.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(desc: ShapeDesc) -> Shape {
        Shape::new(ShapeId(0), EntityHandle::new(0, 0), desc)
    }

    #[test]
    fn test_box_bounds_with_offset() {
        let mut s = shape(ShapeDesc::cuboid(Vec2::new(2.0, 1.0)).with_offset(Vec2::new(1.0, 0.0)));
        let bounds = s.compute_bounds(Vec2::new(10.0, 5.0));

        assert_eq!(bounds.min, Vec2::new(9.0, 4.0));
        assert_eq!(bounds.max, Vec2::new(13.0, 6.0));
        assert_eq!(s.center(), Vec2::new(11.0, 5.0));
        assert!(s.is_active());
    }

    #[test]
    fn test_circle_contains_point() {
        let mut s = shape(ShapeDesc::circle(1.0));
        s.compute_bounds(Vec2::ZERO);

        assert!(s.contains_point(Vec2::new(0.5, 0.5)));
        assert!(s.contains_point(Vec2::new(1.0, 0.0)));
        // Inside the bounds but outside the circle
        assert!(!s.contains_point(Vec2::new(0.9, 0.9)));
    }

    #[test]
    fn test_box_contains_point() {
        let mut s = shape(ShapeDesc::cuboid_from_size(Vec2::new(4.0, 4.0)));
        s.compute_bounds(Vec2::new(10.0, 0.0));

        assert!(s.contains_point(Vec2::new(8.0, 0.0)));
        assert!(s.contains_point(Vec2::new(11.0, 1.5)));
        assert!(!s.contains_point(Vec2::new(7.9, 0.0)));
    }

    #[test]
    fn test_area_and_mass() {
        let s = shape(
            ShapeDesc::cuboid(Vec2::new(1.0, 2.0)).with_material(Material::new(0.5, 0.0, 2.0)),
        );
        assert_eq!(s.area(), 8.0);
        assert_eq!(s.mass(), 16.0);

        let c = shape(ShapeDesc::circle(1.0));
        assert!((c.area() - std::f32::consts::PI).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_geometry_is_clamped() {
        let s = shape(ShapeDesc::circle(-2.0));
        assert_eq!(*s.kind(), ShapeKind::Circle { radius: 2.0 });

        let b = shape(ShapeDesc::cuboid(Vec2::new(0.0, -1.0)));
        assert_eq!(
            *b.kind(),
            ShapeKind::Box {
                half_extents: Vec2::new(MIN_EXTENT, 1.0)
            }
        );
    }

    #[test]
    fn test_contact_sets_roll_over() {
        let mut s = shape(ShapeDesc::circle(1.0));
        s.add_contact(ShapeId(3));
        s.add_contact(ShapeId(1));
        assert!(s.is_touching(ShapeId(3)));

        s.begin_contacts();
        assert!(s.current_contacts().is_empty());
        assert_eq!(
            s.previous_contacts().iter().copied().collect::<Vec<_>>(),
            vec![ShapeId(1), ShapeId(3)]
        );

        s.forget(ShapeId(1));
        assert_eq!(s.previous_contacts().len(), 1);
    }

    #[test]
    fn test_overlaps_circle() {
        let mut b = shape(ShapeDesc::cuboid(Vec2::ONE));
        b.compute_bounds(Vec2::ZERO);
        assert!(b.overlaps_circle(Vec2::new(2.0, 0.0), 1.0));
        assert!(!b.overlaps_circle(Vec2::new(2.0, 2.0), 1.0));
    }
}
