use crate::entity::EntityHandle;
use crate::math::utils::{at_least, clamp01};
use crate::math::Vec2;

/// Smallest mass a body can have
pub const MIN_MASS: f32 = 1e-4;

/// Forces, impulses and velocities at or below this magnitude do not wake a body
pub const WAKE_EPSILON: f32 = 1e-4;

/// The type of rigid body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyType {
    /// Dynamic bodies are affected by forces and collisions
    #[default]
    Dynamic,
    /// Static bodies never move
    Static,
    /// Kinematic bodies are moved by the game, never by the solver
    Kinematic,
}

/// A rigid body in the physics simulation.
///
/// Position lives with the owning entity's transform; the body holds the
/// motion state and integrates it. Mass, drag and angular drag are clamped
/// on every write.
#[derive(Debug, Clone)]
pub struct RigidBody {
    entity: EntityHandle,
    body_type: BodyType,

    mass: f32,
    /// Inverse mass (0 for static bodies)
    inverse_mass: f32,

    velocity: Vec2,
    /// Angular velocity in radians per second
    angular_velocity: f32,

    // Accumulators, reset after each integration
    force: Vec2,
    torque: f32,

    drag: f32,
    angular_drag: f32,
    /// Multiplier applied to world gravity
    pub gravity_scale: f32,
    /// Whether world gravity applies to this body
    pub use_gravity: bool,
    /// Disabled bodies are not integrated
    pub enabled: bool,

    allow_sleep: bool,
    sleeping: bool,
    sleep_timer: f32,
}

impl RigidBody {
    /// Creates a body for `entity` from a description
    pub fn new(entity: EntityHandle, desc: &RigidBodyDesc) -> Self {
        let mut body = Self {
            entity,
            body_type: desc.body_type,
            mass: 1.0,
            inverse_mass: 1.0,
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            force: Vec2::ZERO,
            torque: 0.0,
            drag: clamp01(desc.drag),
            angular_drag: clamp01(desc.angular_drag),
            gravity_scale: desc.gravity_scale,
            use_gravity: desc.use_gravity,
            enabled: desc.enabled,
            allow_sleep: desc.allow_sleep,
            sleeping: false,
            sleep_timer: 0.0,
        };
        body.set_mass(desc.mass);
        if body.body_type != BodyType::Static {
            body.velocity = desc.velocity;
            body.angular_velocity = desc.angular_velocity;
        }
        body
    }

    /// The entity this body belongs to
    #[inline]
    pub fn entity(&self) -> EntityHandle {
        self.entity
    }

    #[inline]
    pub fn body_type(&self) -> BodyType {
        self.body_type
    }

    /// Changes the body type, recomputing the inverse mass and waking the body
    pub fn set_body_type(&mut self, body_type: BodyType) {
        self.body_type = body_type;
        self.update_inverse_mass();
        if body_type == BodyType::Static {
            self.velocity = Vec2::ZERO;
            self.angular_velocity = 0.0;
            self.clear_forces();
        }
        self.wake_up();
    }

    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Sets the mass, clamped to at least [`MIN_MASS`]
    pub fn set_mass(&mut self, mass: f32) {
        self.mass = at_least(mass, MIN_MASS);
        self.update_inverse_mass();
    }

    #[inline]
    pub fn inverse_mass(&self) -> f32 {
        self.inverse_mass
    }

    fn update_inverse_mass(&mut self) {
        self.inverse_mass = if self.body_type == BodyType::Static {
            0.0
        } else {
            1.0 / self.mass
        };
    }

    /// Inverse mass as seen by the contact solver: only dynamic bodies move
    #[inline]
    pub fn solver_inverse_mass(&self) -> f32 {
        if self.is_dynamic() {
            self.inverse_mass
        } else {
            0.0
        }
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    #[inline]
    pub fn angular_velocity(&self) -> f32 {
        self.angular_velocity
    }

    /// Accumulated force since the last integration
    #[inline]
    pub fn force(&self) -> Vec2 {
        self.force
    }

    /// Accumulated torque since the last integration
    #[inline]
    pub fn torque(&self) -> f32 {
        self.torque
    }

    #[inline]
    pub fn drag(&self) -> f32 {
        self.drag
    }

    pub fn set_drag(&mut self, drag: f32) {
        self.drag = clamp01(drag);
    }

    #[inline]
    pub fn angular_drag(&self) -> f32 {
        self.angular_drag
    }

    pub fn set_angular_drag(&mut self, angular_drag: f32) {
        self.angular_drag = clamp01(angular_drag);
    }

    #[inline]
    pub fn allow_sleep(&self) -> bool {
        self.allow_sleep
    }

    /// Allows or forbids sleeping; forbidding wakes the body
    pub fn set_allow_sleep(&mut self, allow: bool) {
        self.allow_sleep = allow;
        if !allow {
            self.wake_up();
        }
    }

    #[inline]
    pub fn is_sleeping(&self) -> bool {
        self.sleeping
    }

    /// Time spent below the sleep thresholds so far
    #[inline]
    pub fn sleep_timer(&self) -> f32 {
        self.sleep_timer
    }

    /// Returns true if this is a dynamic body
    #[inline]
    pub fn is_dynamic(&self) -> bool {
        self.body_type == BodyType::Dynamic
    }

    /// Returns true if this is a static body
    #[inline]
    pub fn is_static(&self) -> bool {
        self.body_type == BodyType::Static
    }

    /// Returns true if this is a kinematic body
    #[inline]
    pub fn is_kinematic(&self) -> bool {
        self.body_type == BodyType::Kinematic
    }

    /// Returns true if the body is dynamic, enabled and awake
    #[inline]
    pub fn is_simulated(&self) -> bool {
        self.is_dynamic() && self.enabled && !self.sleeping
    }

    /// Returns true if the body can push others: an awake dynamic body or a
    /// moving kinematic one
    pub fn is_moving(&self) -> bool {
        match self.body_type {
            BodyType::Dynamic => self.enabled && !self.sleeping,
            BodyType::Kinematic => {
                self.enabled
                    && (self.velocity.length_squared() > WAKE_EPSILON * WAKE_EPSILON
                        || self.angular_velocity.abs() > WAKE_EPSILON)
            }
            BodyType::Static => false,
        }
    }

    /// Adds a force, applied at the next integration
    pub fn add_force(&mut self, force: Vec2) {
        if self.is_dynamic() {
            self.force += force;
            self.wake_if_significant(force.length());
        }
    }

    /// Adds a torque, applied at the next integration
    pub fn add_torque(&mut self, torque: f32) {
        if self.is_dynamic() {
            self.torque += torque;
            self.wake_if_significant(torque.abs());
        }
    }

    /// Changes the velocity immediately by `impulse / mass`
    pub fn add_impulse(&mut self, impulse: Vec2) {
        if self.is_dynamic() {
            self.velocity += impulse * self.inverse_mass;
            self.wake_if_significant(impulse.length());
        }
    }

    /// Sets the velocity. Ignored for static bodies; a kinematic body keeps it
    /// as its contact velocity.
    pub fn set_velocity(&mut self, velocity: Vec2) {
        if self.is_static() {
            return;
        }
        self.velocity = velocity;
        self.wake_if_significant(velocity.length());
    }

    /// Sets the angular velocity. Ignored for static bodies.
    pub fn set_angular_velocity(&mut self, angular_velocity: f32) {
        if self.is_static() {
            return;
        }
        self.angular_velocity = angular_velocity;
        self.wake_if_significant(angular_velocity.abs());
    }

    /// Adds to the force accumulator without touching the sleep state.
    /// Gravity goes through here, so it never keeps a resting body awake.
    pub(crate) fn accumulate_force(&mut self, force: Vec2) {
        if self.is_dynamic() {
            self.force += force;
        }
    }

    /// Velocity change from the contact solver
    pub(crate) fn apply_velocity_change(&mut self, delta: Vec2) {
        if self.is_dynamic() {
            self.velocity += delta;
        }
    }

    pub(crate) fn set_motion(&mut self, velocity: Vec2, angular_velocity: f32) {
        self.velocity = velocity;
        self.angular_velocity = angular_velocity;
    }

    fn wake_if_significant(&mut self, magnitude: f32) {
        if magnitude > WAKE_EPSILON {
            self.wake_up();
        }
    }

    /// Clears accumulated forces
    pub fn clear_forces(&mut self) {
        self.force = Vec2::ZERO;
        self.torque = 0.0;
    }

    /// Wakes up the body
    pub fn wake_up(&mut self) {
        self.sleeping = false;
        self.sleep_timer = 0.0;
    }

    /// Puts the body to sleep, zeroing its motion
    pub fn sleep(&mut self) {
        if self.allow_sleep && self.is_dynamic() {
            self.sleeping = true;
            self.velocity = Vec2::ZERO;
            self.angular_velocity = 0.0;
            self.clear_forces();
        }
    }

    /// Updates sleep state
    pub fn update_sleep(
        &mut self,
        dt: f32,
        linear_threshold: f32,
        angular_threshold: f32,
        time_to_sleep: f32,
    ) {
        if !self.allow_sleep || !self.is_dynamic() || self.sleeping {
            return;
        }

        if self.velocity.length() < linear_threshold
            && self.angular_velocity.abs() < angular_threshold
        {
            self.sleep_timer += dt;
            if self.sleep_timer >= time_to_sleep {
                self.sleep();
            }
        } else {
            self.sleep_timer = 0.0;
        }
    }
}

/// Description for creating a rigid body
#[derive(Debug, Clone)]
pub struct RigidBodyDesc {
    pub body_type: BodyType,
    pub mass: f32,
    pub velocity: Vec2,
    pub angular_velocity: f32,
    pub drag: f32,
    pub angular_drag: f32,
    pub gravity_scale: f32,
    pub use_gravity: bool,
    pub allow_sleep: bool,
    pub enabled: bool,
}

impl Default for RigidBodyDesc {
    fn default() -> Self {
        Self {
            body_type: BodyType::Dynamic,
            mass: 1.0,
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            drag: 0.0,
            angular_drag: 0.05,
            gravity_scale: 1.0,
            use_gravity: true,
            allow_sleep: true,
            enabled: true,
        }
    }
}

impl RigidBodyDesc {
    /// Creates a new dynamic body description
    pub fn dynamic() -> Self {
        Self::default()
    }

    /// Creates a new static body description
    pub fn fixed() -> Self {
        Self {
            body_type: BodyType::Static,
            use_gravity: false,
            ..Self::default()
        }
    }

    /// Creates a new kinematic body description
    pub fn kinematic() -> Self {
        Self {
            body_type: BodyType::Kinematic,
            use_gravity: false,
            ..Self::default()
        }
    }

    /// Sets the mass
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    /// Sets the initial velocity
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Sets the initial angular velocity
    pub fn with_angular_velocity(mut self, angular_velocity: f32) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    /// Sets linear drag
    pub fn with_drag(mut self, drag: f32) -> Self {
        self.drag = drag;
        self
    }

    /// Sets angular drag
    pub fn with_angular_drag(mut self, angular_drag: f32) -> Self {
        self.angular_drag = angular_drag;
        self
    }

    /// Sets the gravity scale
    pub fn with_gravity_scale(mut self, gravity_scale: f32) -> Self {
        self.gravity_scale = gravity_scale;
        self
    }

    /// Turns world gravity on or off for this body
    pub fn with_gravity(mut self, use_gravity: bool) -> Self {
        self.use_gravity = use_gravity;
        self
    }

    /// Allows or forbids sleeping
    pub fn with_allow_sleep(mut self, allow_sleep: bool) -> Self {
        self.allow_sleep = allow_sleep;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}
