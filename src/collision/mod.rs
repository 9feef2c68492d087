pub mod broad_phase;
pub mod contact;
pub mod narrow_phase;
pub mod raycast;

pub use contact::{BodyHandle, CollisionPair, ContactManifold, ContactPoint, ShapeId};
pub use narrow_phase::{detect, detector, DetectFn};
pub use raycast::{raycast_shape, RaycastHit, RAY_EPSILON};
