//! # RustPhy2D
//!
//! A small 2D rigid body physics and collision engine for games.
//!
//! ## Features
//!
//! - **Fixed Timestep**: Frame time is accumulated and simulated in fixed sub-steps
//! - **Rigid Bodies**: Dynamic, static and kinematic bodies with drag and sleeping
//! - **Collision Shapes**: Axis-aligned boxes and circles
//! - **Contact Resolution**: Position correction, restitution impulses and Coulomb friction
//! - **Queries**: Ray casts, circle overlap and point queries
//! - **Events**: Enter, stay and exit callbacks for collisions and triggers
//!
//! Coordinates are in screen space: +y points down, so default gravity is
//! `(0, 980)` pixels per second squared.
//!
//! ## Quick Start
//!
//! ```rust
//! use rustphy2d::prelude::*;
//!
//! let mut transforms = Transforms::new();
//! let mut world = World::default();
//!
//! // A static floor
//! let floor = transforms.spawn_at(Vec2::new(0.0, 300.0));
//! world.register_shape(floor, ShapeDesc::cuboid(Vec2::new(400.0, 10.0)));
//!
//! // A falling ball
//! let ball = transforms.spawn_at(Vec2::new(0.0, 100.0));
//! world.register_body(ball, RigidBodyDesc::dynamic()).unwrap();
//! world.register_shape(ball, ShapeDesc::circle(10.0));
//!
//! let mut events = EventLog::new();
//! for _ in 0..120 {
//!     world.step(1.0 / 60.0, &mut transforms, &mut events);
//! }
//!
//! let y = transforms.position(ball).unwrap().y;
//! assert!(y > 270.0 && y < 291.0);
//! assert!(events.collisions(ball, ContactPhase::Enter) >= 1);
//! ```

pub mod collision;
pub mod dynamics;
pub mod entity;
pub mod error;
pub mod events;
pub mod geometry;
pub mod math;
pub mod solver;
pub mod world;

pub use error::{PhysicsError, Result};
pub use world::{World, WorldConfig, MIN_FIXED_TIMESTEP};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::collision::{BodyHandle, ContactManifold, ContactPoint, RaycastHit, ShapeId};
    pub use crate::dynamics::{BodyType, RigidBody, RigidBodyDesc};
    pub use crate::entity::{EntityHandle, TransformStore, Transforms};
    pub use crate::error::{PhysicsError, Result};
    pub use crate::events::{
        CollisionEvent, ContactListener, ContactPhase, EventLog, PhysicsEvent, TriggerEvent,
    };
    pub use crate::geometry::{Aabb, Material, Shape, ShapeDesc, ShapeKind, ShapeType};
    pub use crate::math::{Transform, Vec2};
    pub use crate::solver::SolverConfig;
    pub use crate::world::{World, WorldConfig};
}
