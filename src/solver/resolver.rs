use crate::collision::ContactManifold;
use crate::dynamics::RigidBody;
use crate::entity::{EntityHandle, TransformStore};
use crate::geometry::Material;
use crate::math::Vec2;

use super::SolverConfig;

/// Tangential speeds below this produce no friction
pub const FRICTION_EPSILON: f32 = 1e-4;

/// One side of a contact: the shape's body (if it has one), the entity that
/// owns the shape, and the shape's material.
///
/// Only dynamic bodies are moved. Kinematic bodies contribute their velocity
/// but are never corrected, and a side without a body behaves as static.
#[derive(Debug)]
pub struct ContactSide<'a> {
    pub body: Option<&'a mut RigidBody>,
    pub entity: EntityHandle,
    pub material: Material,
}

impl<'a> ContactSide<'a> {
    pub fn new(body: Option<&'a mut RigidBody>, entity: EntityHandle, material: Material) -> Self {
        Self {
            body,
            entity,
            material,
        }
    }

    /// Inverse mass seen by the solver
    #[inline]
    pub fn inverse_mass(&self) -> f32 {
        self.body
            .as_deref()
            .map_or(0.0, RigidBody::solver_inverse_mass)
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.body.as_deref().map_or(Vec2::ZERO, RigidBody::velocity)
    }

    /// Returns true if the side has no body or a static one
    #[inline]
    pub fn is_static(&self) -> bool {
        self.body.as_deref().map_or(true, RigidBody::is_static)
    }

    fn apply_velocity_change(&mut self, delta: Vec2) {
        if let Some(body) = self.body.as_deref_mut() {
            body.apply_velocity_change(delta);
        }
    }
}

/// Position correction followed by impulse and friction.
///
/// Resolves one pair in isolation. [`World::step`](crate::World::step) does not
/// call this; it runs every pair through the position passes first and then
/// through the impulse and friction pass.
///
/// Does nothing when both sides are static.
pub fn resolve(
    manifold: &ContactManifold,
    a: &mut ContactSide<'_>,
    b: &mut ContactSide<'_>,
    config: &SolverConfig,
    transforms: &mut impl TransformStore,
) {
    if a.is_static() && b.is_static() {
        return;
    }

    resolve_position(manifold, a, b, config, transforms);
    let j = resolve_impulse(manifold, a, b);
    resolve_friction(manifold, a, b, j);
}

/// Pushes the two entities apart along the normal, leaving `slop` of
/// penetration. Returns the correction applied before mass weighting.
pub fn resolve_position(
    manifold: &ContactManifold,
    a: &ContactSide<'_>,
    b: &ContactSide<'_>,
    config: &SolverConfig,
    transforms: &mut impl TransformStore,
) -> Vec2 {
    let inv_a = a.inverse_mass();
    let inv_b = b.inverse_mass();
    let total = inv_a + inv_b;
    if total <= 0.0 {
        return Vec2::ZERO;
    }

    let correctable = (manifold.penetration - config.slop).max(0.0);
    if correctable <= 0.0 {
        return Vec2::ZERO;
    }

    let correction = manifold.normal * (correctable / total * config.correction_percent);
    if inv_a > 0.0 {
        transforms.translate(a.entity, -correction * inv_a);
    }
    if inv_b > 0.0 {
        transforms.translate(b.entity, correction * inv_b);
    }
    correction
}

/// Applies the normal impulse that cancels the approaching velocity, scaled by
/// restitution. Returns the impulse magnitude, 0 when nothing was applied.
pub fn resolve_impulse(
    manifold: &ContactManifold,
    a: &mut ContactSide<'_>,
    b: &mut ContactSide<'_>,
) -> f32 {
    let inv_a = a.inverse_mass();
    let inv_b = b.inverse_mass();
    let total = inv_a + inv_b;
    if total <= 0.0 {
        return 0.0;
    }

    let normal = manifold.normal;
    let relative = b.velocity() - a.velocity();
    let along_normal = relative.dot(normal);

    // Already separating
    if along_normal > 0.0 {
        return 0.0;
    }

    let restitution = a.material.combined_restitution(&b.material);
    let j = -(1.0 + restitution) * along_normal / total;

    let impulse = normal * j;
    a.apply_velocity_change(-impulse * inv_a);
    b.apply_velocity_change(impulse * inv_b);
    j
}

/// Coulomb friction along the contact tangent, bounded by `|j| * mu`
pub fn resolve_friction(
    manifold: &ContactManifold,
    a: &mut ContactSide<'_>,
    b: &mut ContactSide<'_>,
    normal_impulse: f32,
) -> f32 {
    let inv_a = a.inverse_mass();
    let inv_b = b.inverse_mass();
    let total = inv_a + inv_b;
    if total <= 0.0 {
        return 0.0;
    }

    let normal = manifold.normal;
    let relative = b.velocity() - a.velocity();
    let tangent = relative - normal * relative.dot(normal);
    let (tangent, speed) = tangent.normalize_with_length();
    if speed < FRICTION_EPSILON {
        return 0.0;
    }

    let mu = a.material.combined_friction(&b.material);
    let max_friction = normal_impulse.abs() * mu;
    let jt = (-relative.dot(tangent) / total).clamp(-max_friction, max_friction);

    let impulse = tangent * jt;
    a.apply_velocity_change(-impulse * inv_a);
    b.apply_velocity_change(impulse * inv_b);
    jt
}
