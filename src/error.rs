//! Error types for world registry operations.
//!
//! Simulation itself never fails: bad numeric input is clamped. Only misuse
//! of the body and shape registries is reported.

use thiserror::Error;

use crate::collision::{BodyHandle, ShapeId};
use crate::entity::EntityHandle;

/// Errors returned by [`World`](crate::World) registry operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhysicsError {
    /// The body handle is stale or was never issued by this world.
    #[error("unknown body {0:?}")]
    UnknownBody(BodyHandle),

    /// The shape id is not registered with this world.
    #[error("unknown shape {0:?}")]
    UnknownShape(ShapeId),

    /// The entity already owns a body.
    #[error("entity {entity:?} already has body {existing:?}")]
    DuplicateBody {
        /// The entity that was registered twice.
        entity: EntityHandle,
        /// The body it already owns.
        existing: BodyHandle,
    },
}

/// Result alias for registry operations.
pub type Result<T> = std::result::Result<T, PhysicsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PhysicsError::UnknownShape(ShapeId(7));
        assert_eq!(err.to_string(), "unknown shape ShapeId(7)");

        let err = PhysicsError::DuplicateBody {
            entity: EntityHandle::new(1, 0),
            existing: BodyHandle::new(0, 0),
        };
        assert!(err.to_string().contains("already has body"));
    }
}
