//! Candidate pair generation.
//!
//! An all-pairs AABB sweep over active shapes. The cost is quadratic in the
//! number of shapes, which stays cheap up to roughly a hundred shapes.

use crate::geometry::{Aabb, Shape};

use super::contact::CollisionPair;

/// Returns every pair of active shapes whose cached bounds overlap and that
/// `filter` accepts. Pairs come out in ascending id order.
///
/// `shapes` must be sorted by id.
pub fn query_pairs(
    shapes: &[Shape],
    mut filter: impl FnMut(&Shape, &Shape) -> bool,
) -> Vec<CollisionPair> {
    let mut pairs = Vec::new();

    for (i, a) in shapes.iter().enumerate() {
        if !a.is_active() {
            continue;
        }
        for b in &shapes[i + 1..] {
            if !b.is_active() || !a.bounds().intersects(b.bounds()) {
                continue;
            }
            if filter(a, b) {
                pairs.push(CollisionPair::new(a.id(), b.id()));
            }
        }
    }

    pairs
}

/// Calls `callback` with every active shape whose bounds overlap `aabb`
pub fn query_aabb<'a>(shapes: &'a [Shape], aabb: Aabb, mut callback: impl FnMut(&'a Shape)) {
    for shape in shapes {
        if shape.is_active() && shape.bounds().intersects(aabb) {
            callback(shape);
        }
    }
}
