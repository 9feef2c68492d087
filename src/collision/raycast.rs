use crate::entity::EntityHandle;
use crate::geometry::{Aabb, Shape, ShapeKind};
use crate::math::Vec2;

use super::contact::ShapeId;

/// Tolerance used to decide which box edge a ray hit lies on
pub const RAY_EPSILON: f32 = 1e-3;

/// Result of a ray cast query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    /// Shape that was hit
    pub shape: ShapeId,
    /// Entity owning the shape
    pub entity: EntityHandle,
    /// World space hit point
    pub point: Vec2,
    /// Surface normal at hit point
    pub normal: Vec2,
    /// Distance from ray origin
    pub distance: f32,
}

/// Casts a ray against one shape's cached bounds.
///
/// `direction` need not be normalized; a zero direction never hits. Hits
/// are accepted for distances in `[0, max_distance]`.
pub fn raycast_shape(
    shape: &Shape,
    origin: Vec2,
    direction: Vec2,
    max_distance: f32,
) -> Option<RaycastHit> {
    let direction = direction.try_normalize()?;
    if max_distance.is_nan() || max_distance < 0.0 {
        return None;
    }

    let (distance, normal) = match *shape.kind() {
        ShapeKind::Box { .. } => ray_box(shape.bounds(), origin, direction)?,
        ShapeKind::Circle { radius } => ray_circle(shape.center(), radius, origin, direction)?,
    };

    if distance > max_distance {
        return None;
    }

    Some(RaycastHit {
        shape: shape.id(),
        entity: shape.entity(),
        point: origin + direction * distance,
        normal,
        distance,
    })
}

/// Slab test; uses the exit distance when the origin is inside the box
fn ray_box(bounds: Aabb, origin: Vec2, direction: Vec2) -> Option<(f32, Vec2)> {
    let (t_enter, t_exit) = bounds.ray_intersection(origin, direction)?;
    let t = if t_enter >= 0.0 { t_enter } else { t_exit };
    let point = origin + direction * t;

    let normal = if (point.x - bounds.min.x).abs() < RAY_EPSILON {
        Vec2::new(-1.0, 0.0)
    } else if (point.x - bounds.max.x).abs() < RAY_EPSILON {
        Vec2::new(1.0, 0.0)
    } else if (point.y - bounds.min.y).abs() < RAY_EPSILON {
        Vec2::new(0.0, -1.0)
    } else if (point.y - bounds.max.y).abs() < RAY_EPSILON {
        Vec2::new(0.0, 1.0)
    } else {
        -direction
    };

    Some((t, normal))
}

/// Ray vs circle with a normalized direction; the nearest non-negative root wins
fn ray_circle(center: Vec2, radius: f32, origin: Vec2, direction: Vec2) -> Option<(f32, Vec2)> {
    let m = origin - center;
    let b = m.dot(direction);
    let c = m.length_squared() - radius * radius;

    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    let root = discriminant.sqrt();
    let near = -b - root;
    let far = -b + root;
    let t = if near >= 0.0 {
        near
    } else if far >= 0.0 {
        far
    } else {
        return None;
    };

    let point = origin + direction * t;
    let normal = (point - center).try_normalize().unwrap_or(-direction);
    Some((t, normal))
}
