//! Pairwise contact generation.
//!
//! Every algorithm reads the shapes' cached bounds, so bounds must be
//! current before detection runs. A returned manifold always has a unit
//! normal pointing from `a` to `b` and a non-negative penetration.

use crate::geometry::{Shape, ShapeKind, ShapeType};
use crate::math::Vec2;

use super::contact::{ContactManifold, ContactPoint};

/// Signature shared by all pairwise detection routines
pub type DetectFn = fn(&Shape, &Shape) -> Option<ContactManifold>;

/// Below this squared distance the closest-point direction is degenerate
const DEGENERATE_DISTANCE_SQ: f32 = 1e-12;

/// Picks the detection routine for an ordered pair of shape types
pub fn detector(a: ShapeType, b: ShapeType) -> DetectFn {
    match (a, b) {
        (ShapeType::Box, ShapeType::Box) => box_box,
        (ShapeType::Circle, ShapeType::Circle) => circle_circle,
        (ShapeType::Box, ShapeType::Circle) => box_circle,
        (ShapeType::Circle, ShapeType::Box) => circle_box,
    }
}

/// Tests two shapes for contact
#[inline]
pub fn detect(a: &Shape, b: &Shape) -> Option<ContactManifold> {
    detector(a.shape_type(), b.shape_type())(a, b)
}

/// Box vs box on the cached bounds.
///
/// The normal follows the axis of least overlap; the contact point is the
/// middle of the overlap region.
pub fn box_box(a: &Shape, b: &Shape) -> Option<ContactManifold> {
    let ba = a.bounds();
    let bb = b.bounds();

    // Overlap when B sits on the max side of A, and on the min side
    let max_side = ba.max - bb.min;
    let min_side = bb.max - ba.min;

    let overlap_x = max_side.x.min(min_side.x);
    let overlap_y = max_side.y.min(min_side.y);
    if overlap_x <= 0.0 || overlap_y <= 0.0 {
        return None;
    }

    let (normal, penetration) = if overlap_x < overlap_y {
        let nx = if max_side.x < min_side.x { 1.0 } else { -1.0 };
        (Vec2::new(nx, 0.0), overlap_x)
    } else {
        let ny = if max_side.y < min_side.y { 1.0 } else { -1.0 };
        (Vec2::new(0.0, ny), overlap_y)
    };

    let point = ba.intersection(bb).center();
    Some(ContactManifold::new(
        a.id(),
        b.id(),
        ContactPoint::new(point, normal, penetration),
    ))
}

/// Circle vs circle
pub fn circle_circle(a: &Shape, b: &Shape) -> Option<ContactManifold> {
    let ra = radius(a)?;
    let rb = radius(b)?;
    let ca = a.center();
    let cb = b.center();

    let sum = ra + rb;
    let delta = cb - ca;
    let dist_sq = delta.length_squared();
    if dist_sq >= sum * sum {
        return None;
    }

    let dist = dist_sq.sqrt();
    let normal = if dist_sq > DEGENERATE_DISTANCE_SQ {
        delta / dist
    } else {
        Vec2::X
    };

    Some(ContactManifold::new(
        a.id(),
        b.id(),
        ContactPoint::new(ca + normal * ra, normal, sum - dist),
    ))
}

/// Box vs circle.
///
/// When the circle center is inside the box (or exactly on its boundary)
/// the nearest edge decides the normal. Ties go to the first of
/// left, right, top, bottom.
pub fn box_circle(a: &Shape, b: &Shape) -> Option<ContactManifold> {
    let r = radius(b)?;
    let bounds = a.bounds();
    let center = b.center();

    let closest = bounds.closest_point(center);
    let delta = center - closest;
    let dist_sq = delta.length_squared();
    if dist_sq >= r * r {
        return None;
    }

    let contact = if dist_sq > DEGENERATE_DISTANCE_SQ {
        let dist = dist_sq.sqrt();
        ContactPoint::new(closest, delta / dist, r - dist)
    } else {
        // Edges in tie-break order: (distance, outward normal, projection)
        let edges = [
            (
                center.x - bounds.min.x,
                Vec2::new(-1.0, 0.0),
                Vec2::new(bounds.min.x, center.y),
            ),
            (
                bounds.max.x - center.x,
                Vec2::new(1.0, 0.0),
                Vec2::new(bounds.max.x, center.y),
            ),
            (
                center.y - bounds.min.y,
                Vec2::new(0.0, -1.0),
                Vec2::new(center.x, bounds.min.y),
            ),
            (
                bounds.max.y - center.y,
                Vec2::new(0.0, 1.0),
                Vec2::new(center.x, bounds.max.y),
            ),
        ];

        let mut nearest = edges[0];
        for edge in &edges[1..] {
            if edge.0 < nearest.0 {
                nearest = *edge;
            }
        }

        let (distance, normal, point) = nearest;
        ContactPoint::new(point, normal, distance.max(0.0) + r)
    };

    Some(ContactManifold::new(a.id(), b.id(), contact))
}

/// Circle vs box: box vs circle with the roles exchanged
pub fn circle_box(a: &Shape, b: &Shape) -> Option<ContactManifold> {
    box_circle(b, a).map(ContactManifold::swapped)
}

#[inline]
fn radius(shape: &Shape) -> Option<f32> {
    match *shape.kind() {
        ShapeKind::Circle { radius } => Some(radius),
        ShapeKind::Box { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::ShapeId;
    use crate::entity::EntityHandle;
    use crate::geometry::ShapeDesc;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn placed(id: u32, desc: ShapeDesc, position: Vec2) -> Shape {
        let mut shape = Shape::new(ShapeId(id), EntityHandle::new(id, 0), desc);
        shape.compute_bounds(position);
        shape
    }

    fn assert_well_formed(m: &ContactManifold) {
        assert!(approx_eq(m.normal.length(), 1.0), "normal {:?}", m.normal);
        assert!(m.penetration >= 0.0);
        assert_eq!(m.contact.normal, m.normal);
    }

    #[test]
    fn test_circle_circle() {
        let a = placed(0, ShapeDesc::circle(1.0), Vec2::ZERO);
        let b = placed(1, ShapeDesc::circle(1.0), Vec2::new(1.5, 0.0));

        let m = detect(&a, &b).expect("circles overlap");
        assert_well_formed(&m);
        assert_eq!(m.normal, Vec2::X);
        assert!(approx_eq(m.penetration, 0.5));
        assert_eq!(m.contact.point, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_circle_circle_separated_and_touching() {
        let a = placed(0, ShapeDesc::circle(1.0), Vec2::ZERO);
        let far = placed(1, ShapeDesc::circle(1.0), Vec2::new(3.0, 0.0));
        let touching = placed(2, ShapeDesc::circle(1.0), Vec2::new(2.0, 0.0));

        assert!(detect(&a, &far).is_none());
        assert!(detect(&a, &touching).is_none());
    }

    #[test]
    fn test_circle_circle_coincident_centers() {
        let a = placed(0, ShapeDesc::circle(1.0), Vec2::ONE);
        let b = placed(1, ShapeDesc::circle(0.5), Vec2::ONE);

        let m = detect(&a, &b).expect("coincident circles overlap");
        assert_eq!(m.normal, Vec2::X);
        assert!(approx_eq(m.penetration, 1.5));
    }

    #[test]
    fn test_box_box_axis_of_least_overlap() {
        // B overlaps A by 1 on x and 3 on y, to the right of A
        let a = placed(0, ShapeDesc::cuboid(Vec2::new(2.0, 2.0)), Vec2::ZERO);
        let b = placed(1, ShapeDesc::cuboid(Vec2::new(2.0, 2.0)), Vec2::new(3.0, 1.0));

        let m = detect(&a, &b).expect("boxes overlap");
        assert_well_formed(&m);
        assert_eq!(m.normal, Vec2::X);
        assert!(approx_eq(m.penetration, 1.0));
        // Overlap region: x in [1, 2], y in [-1, 2]
        assert_eq!(m.contact.point, Vec2::new(1.5, 0.5));

        let m = detect(&b, &a).expect("boxes overlap");
        assert_eq!(m.normal, -Vec2::X);
    }

    #[test]
    fn test_box_box_vertical() {
        // Box resting slightly inside a floor below it (y grows down)
        let body = placed(0, ShapeDesc::cuboid(Vec2::new(1.0, 1.0)), Vec2::new(0.0, -0.9));
        let floor = placed(1, ShapeDesc::cuboid(Vec2::new(10.0, 1.0)), Vec2::new(0.0, 1.0));

        let m = detect(&body, &floor).expect("boxes overlap");
        assert_eq!(m.normal, Vec2::Y);
        assert!(approx_eq(m.penetration, 0.1));
    }

    #[test]
    fn test_box_box_zero_overlap() {
        let a = placed(0, ShapeDesc::cuboid(Vec2::ONE), Vec2::ZERO);
        let edge = placed(1, ShapeDesc::cuboid(Vec2::ONE), Vec2::new(2.0, 0.5));
        let apart = placed(2, ShapeDesc::cuboid(Vec2::ONE), Vec2::new(0.5, 5.0));

        assert!(detect(&a, &edge).is_none());
        assert!(detect(&a, &apart).is_none());
    }

    #[test]
    fn test_box_circle_outside() {
        let a = placed(0, ShapeDesc::cuboid(Vec2::ONE), Vec2::ZERO);
        let b = placed(1, ShapeDesc::circle(1.0), Vec2::new(1.5, 0.0));

        let m = detect(&a, &b).expect("shapes overlap");
        assert_well_formed(&m);
        assert_eq!(m.normal, Vec2::X);
        assert!(approx_eq(m.penetration, 0.5));
        assert_eq!(m.contact.point, Vec2::new(1.0, 0.0));

        let far = placed(2, ShapeDesc::circle(1.0), Vec2::new(2.0, 2.0));
        assert!(detect(&a, &far).is_none());
    }

    #[test]
    fn test_box_circle_center_inside_uses_nearest_edge() {
        let a = placed(0, ShapeDesc::cuboid(Vec2::new(2.0, 2.0)), Vec2::ZERO);
        let b = placed(1, ShapeDesc::circle(0.5), Vec2::new(0.0, 1.5));

        let m = detect(&a, &b).expect("shapes overlap");
        assert_well_formed(&m);
        // Nearest edge is the bottom (max y)
        assert_eq!(m.normal, Vec2::Y);
        assert!(approx_eq(m.penetration, 1.0));
        assert_eq!(m.contact.point, Vec2::new(0.0, 2.0));
    }

    #[test]
    fn test_box_circle_tie_break_prefers_left() {
        // Center of the box is equally far from all four edges
        let a = placed(0, ShapeDesc::cuboid(Vec2::ONE), Vec2::ZERO);
        let b = placed(1, ShapeDesc::circle(0.25), Vec2::ZERO);

        let m = detect(&a, &b).expect("shapes overlap");
        assert_eq!(m.normal, -Vec2::X);
        assert!(approx_eq(m.penetration, 1.25));

        // Equal distance to right and bottom: right wins
        let c = placed(2, ShapeDesc::circle(0.25), Vec2::new(0.5, 0.5));
        let m = detect(&a, &c).expect("shapes overlap");
        assert_eq!(m.normal, Vec2::X);
    }

    #[test]
    fn test_circle_box_is_swapped_and_negated() {
        let circle = placed(3, ShapeDesc::circle(1.0), Vec2::new(1.5, 0.0));
        let boxed = placed(7, ShapeDesc::cuboid(Vec2::ONE), Vec2::ZERO);

        let m = detect(&circle, &boxed).expect("shapes overlap");
        assert_well_formed(&m);
        assert_eq!(m.shape_a, ShapeId(3));
        assert_eq!(m.shape_b, ShapeId(7));
        assert_eq!(m.normal, -Vec2::X);
        assert!(approx_eq(m.penetration, 0.5));
    }

    #[test]
    fn test_dispatch_table_covers_every_pair() {
        let kinds = [ShapeType::Box, ShapeType::Circle];
        for a in kinds {
            for b in kinds {
                let circle = placed(0, ShapeDesc::circle(1.0), Vec2::ZERO);
                let boxed = placed(1, ShapeDesc::cuboid(Vec2::ONE), Vec2::new(0.5, 0.0));
                let pick = |t: ShapeType| if t == ShapeType::Box { &boxed } else { &circle };
                let (sa, sb) = (pick(a), pick(b));
                if sa.id() == sb.id() {
                    continue;
                }
                assert!(detector(a, b)(sa, sb).is_some());
            }
        }
    }
}
