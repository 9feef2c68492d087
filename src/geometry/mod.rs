mod aabb;
mod material;
mod shape;

pub use aabb::Aabb;
pub use material::{Material, MIN_DENSITY};
pub use shape::{Shape, ShapeDesc, ShapeKind, ShapeType, MIN_EXTENT};
