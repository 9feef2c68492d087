mod integrator;
mod rigid_body;

pub use integrator::{integrate, Motion, SpeedLimits};
pub use rigid_body::{BodyType, RigidBody, RigidBodyDesc, MIN_MASS, WAKE_EPSILON};
