use std::collections::{BTreeMap, HashMap};

use tracing::{debug, trace, warn};

use crate::collision::{
    broad_phase, detect, raycast_shape, BodyHandle, CollisionPair, ContactManifold, ContactPoint,
    RaycastHit, ShapeId,
};
use crate::dynamics::{integrate, RigidBody, RigidBodyDesc, SpeedLimits};
use crate::entity::{EntityHandle, TransformStore};
use crate::error::{PhysicsError, Result};
use crate::events::{CollisionEvent, ContactListener, TriggerEvent};
use crate::geometry::{Aabb, Shape, ShapeDesc};
use crate::math::utils::at_least;
use crate::math::Vec2;
use crate::solver::{
    resolve_friction, resolve_impulse, resolve_position, ContactSide, SolverConfig,
};

/// Smallest fixed timestep the world accepts
pub const MIN_FIXED_TIMESTEP: f32 = 1e-4;

/// Slack when comparing the accumulator with the fixed timestep, so float
/// round-off never drops a whole sub-step
const ACCUMULATOR_EPSILON: f32 = 1e-6;

/// Configuration for the physics world.
///
/// Units follow screen space: pixels, seconds and radians, with +y pointing
/// down. Values are clamped by [`WorldConfig::sanitized`] when a world is
/// created.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldConfig {
    /// Gravity acceleration
    pub gravity: Vec2,
    /// Length of one simulation sub-step in seconds
    pub fixed_timestep: f32,
    /// Most sub-steps a single `step` call may run; extra time is dropped
    pub max_accumulated_steps: usize,
    /// Linear speed limit applied after integration
    pub max_speed: f32,
    /// Angular speed limit (radians per second)
    pub max_angular_speed: f32,
    /// Bodies slower than this may fall asleep
    pub sleep_linear_threshold: f32,
    /// Bodies turning slower than this may fall asleep
    pub sleep_angular_threshold: f32,
    /// Time a body must stay slow before sleeping
    pub sleep_time: f32,
    /// Solver configuration
    pub solver: SolverConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, 980.0),
            fixed_timestep: 1.0 / 60.0,
            max_accumulated_steps: 5,
            max_speed: 2000.0,
            max_angular_speed: 50.0,
            sleep_linear_threshold: 5.0,
            sleep_angular_threshold: 0.1,
            sleep_time: 0.5,
            solver: SolverConfig::default(),
        }
    }
}

impl WorldConfig {
    /// Returns a copy with every field clamped into its valid range
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        Self {
            gravity: if self.gravity.is_finite() {
                self.gravity
            } else {
                defaults.gravity
            },
            fixed_timestep: at_least(self.fixed_timestep, MIN_FIXED_TIMESTEP),
            max_accumulated_steps: self.max_accumulated_steps.max(1),
            max_speed: non_negative_or(self.max_speed, defaults.max_speed),
            max_angular_speed: non_negative_or(self.max_angular_speed, defaults.max_angular_speed),
            sleep_linear_threshold: non_negative_or(
                self.sleep_linear_threshold,
                defaults.sleep_linear_threshold,
            ),
            sleep_angular_threshold: non_negative_or(
                self.sleep_angular_threshold,
                defaults.sleep_angular_threshold,
            ),
            sleep_time: non_negative_or(self.sleep_time, defaults.sleep_time),
            solver: self.solver.sanitized(),
        }
    }

    fn speed_limits(&self) -> SpeedLimits {
        SpeedLimits {
            max_speed: self.max_speed,
            max_angular_speed: self.max_angular_speed,
        }
    }
}

fn non_negative_or(value: f32, fallback: f32) -> f32 {
    if value.is_nan() || value < 0.0 {
        fallback
    } else {
        value
    }
}

#[derive(Debug, Clone)]
struct BodySlot {
    generation: u32,
    body: Option<RigidBody>,
}

/// The physics world: body and shape registries plus the fixed-timestep loop.
///
/// Entity positions are not stored here. Every `step` borrows the game's
/// [`TransformStore`] and a [`ContactListener`]; bodies and shapes can only be
/// registered or removed between steps.
pub struct World {
    /// Configuration
    config: WorldConfig,
    /// Body slots, indexed by `BodyHandle::index`
    bodies: Vec<BodySlot>,
    /// Free body indices for reuse
    free_bodies: Vec<u32>,
    num_bodies: usize,
    body_by_entity: HashMap<EntityHandle, BodyHandle>,
    /// Shapes sorted by id
    shapes: Vec<Shape>,
    next_shape_id: u32,
    /// Manifolds of the current sub-step
    manifolds: BTreeMap<CollisionPair, ContactManifold>,
    /// Manifolds of the previous sub-step, used for exit payloads
    previous_manifolds: BTreeMap<CollisionPair, ContactManifold>,
    accumulator: f32,
    /// Current simulation time
    time: f32,
}

impl Default for World {
    fn default() -> Self {
        Self::new(WorldConfig::default())
    }
}

impl World {
    /// Creates a new physics world with the given configuration
    pub fn new(config: WorldConfig) -> Self {
        Self {
            config: config.sanitized(),
            bodies: Vec::new(),
            free_bodies: Vec::new(),
            num_bodies: 0,
            body_by_entity: HashMap::new(),
            shapes: Vec::new(),
            next_shape_id: 0,
            manifolds: BTreeMap::new(),
            previous_manifolds: BTreeMap::new(),
            accumulator: 0.0,
            time: 0.0,
        }
    }

    // Registries

    /// Creates a body for `entity`. An entity can own at most one body.
    pub fn register_body(
        &mut self,
        entity: EntityHandle,
        desc: RigidBodyDesc,
    ) -> Result<BodyHandle> {
        if let Some(&existing) = self.body_by_entity.get(&entity) {
            return Err(PhysicsError::DuplicateBody { entity, existing });
        }

        let body = RigidBody::new(entity, &desc);
        let handle = if let Some(index) = self.free_bodies.pop() {
            let slot = &mut self.bodies[index as usize];
            slot.body = Some(body);
            BodyHandle::new(index, slot.generation)
        } else {
            let index = self.bodies.len() as u32;
            self.bodies.push(BodySlot {
                generation: 0,
                body: Some(body),
            });
            BodyHandle::new(index, 0)
        };

        self.body_by_entity.insert(entity, handle);
        self.num_bodies += 1;
        debug!(?entity, ?handle, body_type = ?desc.body_type, "registered body");
        Ok(handle)
    }

    /// Removes a body and returns it. The handle becomes stale.
    pub fn unregister_body(&mut self, handle: BodyHandle) -> Result<RigidBody> {
        let slot = self
            .bodies
            .get_mut(handle.index())
            .filter(|slot| slot.generation == handle.generation())
            .ok_or(PhysicsError::UnknownBody(handle))?;
        let body = slot.body.take().ok_or(PhysicsError::UnknownBody(handle))?;

        slot.generation = slot.generation.wrapping_add(1);
        self.free_bodies.push(handle.index() as u32);
        self.body_by_entity.remove(&body.entity());
        self.num_bodies -= 1;
        debug!(?handle, entity = ?body.entity(), "unregistered body");
        Ok(body)
    }

    /// Adds a shape to `entity` and returns its id
    pub fn register_shape(&mut self, entity: EntityHandle, desc: ShapeDesc) -> ShapeId {
        let id = ShapeId(self.next_shape_id);
        self.next_shape_id += 1;
        // Ids grow monotonically, so pushing keeps the list sorted
        self.shapes.push(Shape::new(id, entity, desc));
        debug!(
            ?entity,
            ?id,
            kind = ?desc.kind.shape_type(),
            trigger = desc.is_trigger,
            "registered shape"
        );
        id
    }

    /// Removes a shape and returns it. No later event mentions it.
    pub fn unregister_shape(&mut self, id: ShapeId) -> Result<Shape> {
        let index = self.shape_index(id).ok_or(PhysicsError::UnknownShape(id))?;
        let mut shape = self.shapes.remove(index);
        shape.clear_contacts();

        for other in &mut self.shapes {
            other.forget(id);
        }
        self.manifolds.retain(|pair, _| !pair.contains(id));
        self.previous_manifolds.retain(|pair, _| !pair.contains(id));

        debug!(?id, entity = ?shape.entity(), "unregistered shape");
        Ok(shape)
    }

    /// Gets a reference to a body
    pub fn body(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.bodies
            .get(handle.index())
            .filter(|slot| slot.generation == handle.generation())
            .and_then(|slot| slot.body.as_ref())
    }

    /// Gets a mutable reference to a body
    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        self.bodies
            .get_mut(handle.index())
            .filter(|slot| slot.generation == handle.generation())
            .and_then(|slot| slot.body.as_mut())
    }

    /// The body owned by `entity`, if any
    pub fn body_of(&self, entity: EntityHandle) -> Option<BodyHandle> {
        self.body_by_entity.get(&entity).copied()
    }

    /// Returns an iterator over all bodies
    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, &RigidBody)> + '_ {
        self.bodies.iter().enumerate().filter_map(|(index, slot)| {
            slot.body
                .as_ref()
                .map(|body| (BodyHandle::new(index as u32, slot.generation), body))
        })
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shape_index(id).map(|index| &self.shapes[index])
    }

    pub fn shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        let index = self.shape_index(id)?;
        Some(&mut self.shapes[index])
    }

    /// All shapes in id order
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Shapes attached to `entity`
    pub fn shapes_of(&self, entity: EntityHandle) -> impl Iterator<Item = &Shape> + '_ {
        self.shapes.iter().filter(move |shape| shape.entity() == entity)
    }

    /// Sets a body's mass to the total mass (area times density) of its
    /// entity's shapes and returns it. Bodies without shapes keep their mass.
    pub fn sync_mass_from_shapes(&mut self, handle: BodyHandle) -> Result<f32> {
        let entity = self
            .body(handle)
            .ok_or(PhysicsError::UnknownBody(handle))?
            .entity();
        let total: f32 = self.shapes_of(entity).map(Shape::mass).sum();

        let body = self.body_mut(handle).ok_or(PhysicsError::UnknownBody(handle))?;
        if total > 0.0 {
            body.set_mass(total);
        }
        Ok(body.mass())
    }

    // Configuration

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Sets the gravity
    pub fn set_gravity(&mut self, gravity: Vec2) {
        if gravity.is_finite() {
            self.config.gravity = gravity;
        }
    }

    /// Gets the gravity
    pub fn gravity(&self) -> Vec2 {
        self.config.gravity
    }

    pub fn fixed_timestep(&self) -> f32 {
        self.config.fixed_timestep
    }

    /// Sets the fixed timestep, clamped to at least [`MIN_FIXED_TIMESTEP`]
    pub fn set_fixed_timestep(&mut self, fixed_timestep: f32) {
        self.config.fixed_timestep = at_least(fixed_timestep, MIN_FIXED_TIMESTEP);
    }

    /// Returns the number of bodies in the world
    pub fn num_bodies(&self) -> usize {
        self.num_bodies
    }

    pub fn num_shapes(&self) -> usize {
        self.shapes.len()
    }

    /// Returns the current simulation time
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Manifold of the last sub-step for two shapes, oriented as stored
    /// (smaller id is shape A)
    pub fn manifold(&self, a: ShapeId, b: ShapeId) -> Option<&ContactManifold> {
        self.manifolds.get(&CollisionPair::new(a, b))
    }

    /// All manifolds of the last sub-step, in pair order
    pub fn manifolds(&self) -> impl Iterator<Item = &ContactManifold> + '_ {
        self.manifolds.values()
    }

    // Simulation

    /// Advances the simulation by `dt` seconds of frame time and returns the
    /// number of fixed sub-steps run.
    ///
    /// Negative or non-finite `dt` counts as zero. Time beyond
    /// `max_accumulated_steps` sub-steps is dropped.
    pub fn step(
        &mut self,
        dt: f32,
        transforms: &mut impl TransformStore,
        listener: &mut impl ContactListener,
    ) -> usize {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        let fixed = self.config.fixed_timestep;
        let max_accumulated = fixed * self.config.max_accumulated_steps as f32;

        self.accumulator += dt;
        if self.accumulator > max_accumulated {
            warn!(
                dropped = self.accumulator - max_accumulated,
                max_steps = self.config.max_accumulated_steps,
                "physics is falling behind, dropping simulated time"
            );
            self.accumulator = max_accumulated;
        }

        let mut steps = 0;
        while self.accumulator + ACCUMULATOR_EPSILON >= fixed {
            self.substep(fixed, transforms, listener);
            self.accumulator = (self.accumulator - fixed).max(0.0);
            steps += 1;
        }
        steps
    }

    /// Performs a single simulation substep
    fn substep(
        &mut self,
        dt: f32,
        transforms: &mut impl TransformStore,
        listener: &mut impl ContactListener,
    ) {
        self.integrate_bodies(dt, transforms);
        self.update_bounds(transforms);

        for shape in &mut self.shapes {
            shape.begin_contacts();
        }
        std::mem::swap(&mut self.manifolds, &mut self.previous_manifolds);
        self.manifolds.clear();

        let pairs = self.find_pairs();
        self.detect_collisions(&pairs);

        let solvable: Vec<CollisionPair> = self
            .manifolds
            .keys()
            .copied()
            .filter(|pair| self.is_solvable(*pair))
            .collect();
        self.solve_positions(&solvable, transforms);
        self.solve_velocities(&solvable, transforms);

        self.dispatch_events(transforms, listener);
        self.update_sleep(dt);
        self.time += dt;

        trace!(
            time = self.time,
            pairs = pairs.len(),
            manifolds = self.manifolds.len(),
            solved = solvable.len(),
            "physics sub-step"
        );
    }

    /// Integrates every awake dynamic body and moves its entity
    fn integrate_bodies(&mut self, dt: f32, transforms: &mut impl TransformStore) {
        let gravity = self.config.gravity;
        let limits = self.config.speed_limits();

        for body in self.bodies.iter_mut().filter_map(|slot| slot.body.as_mut()) {
            let motion = integrate(body, gravity, dt, limits);
            if motion.is_zero() {
                continue;
            }
            transforms.translate(body.entity(), motion.translation);
            if motion.rotation != 0.0 {
                transforms.rotate(body.entity(), motion.rotation);
            }
        }
    }

    /// Recomputes cached bounds of every shape from the current transforms.
    ///
    /// Runs at the start of every sub-step. Call it directly to make queries
    /// see entities moved since the last step.
    pub fn update_bounds(&mut self, transforms: &impl TransformStore) {
        for shape in &mut self.shapes {
            match transforms.world_position(shape.entity()) {
                Some(position) => {
                    shape.compute_bounds(position);
                }
                None => shape.mark_unlocated(),
            }
        }
    }

    /// Broad phase: overlapping pairs on different entities where at least one
    /// side has a non-static body
    fn find_pairs(&self) -> Vec<CollisionPair> {
        broad_phase::query_pairs(&self.shapes, |a, b| {
            a.entity() != b.entity() && (self.has_mobile_body(a) || self.has_mobile_body(b))
        })
    }

    fn has_mobile_body(&self, shape: &Shape) -> bool {
        self.entity_body(shape.entity())
            .is_some_and(|body| !body.is_static())
    }

    /// Narrow phase: stores manifolds, records contacts and wakes bodies
    /// touched by something moving
    fn detect_collisions(&mut self, pairs: &[CollisionPair]) {
        for &pair in pairs {
            let (Some(ia), Some(ib)) =
                (self.shape_index(pair.shape_a), self.shape_index(pair.shape_b))
            else {
                continue;
            };
            let Some(manifold) = detect(&self.shapes[ia], &self.shapes[ib]) else {
                continue;
            };

            self.shapes[ia].add_contact(pair.shape_b);
            self.shapes[ib].add_contact(pair.shape_a);
            self.manifolds.insert(pair, manifold);

            if self.shapes[ia].is_trigger || self.shapes[ib].is_trigger {
                continue;
            }
            let (ea, eb) = (self.shapes[ia].entity(), self.shapes[ib].entity());
            let moving_a = self.entity_body(ea).is_some_and(RigidBody::is_moving);
            let moving_b = self.entity_body(eb).is_some_and(RigidBody::is_moving);
            if moving_b {
                self.wake_entity(ea);
            }
            if moving_a {
                self.wake_entity(eb);
            }
        }
    }

    fn wake_entity(&mut self, entity: EntityHandle) {
        if let Some(body) = self.entity_body_mut(entity) {
            if body.is_dynamic() && body.is_sleeping() {
                body.wake_up();
                trace!(?entity, "woken by contact");
            }
        }
    }

    /// A pair is resolved when neither shape is a trigger and at least one
    /// side is an awake dynamic body
    fn is_solvable(&self, pair: CollisionPair) -> bool {
        let (Some(a), Some(b)) = (self.shape(pair.shape_a), self.shape(pair.shape_b)) else {
            return false;
        };
        if a.is_trigger || b.is_trigger {
            return false;
        }
        let simulated =
            |shape: &Shape| self.entity_body(shape.entity()).is_some_and(RigidBody::is_simulated);
        simulated(a) || simulated(b)
    }

    /// Position-only passes; each one refreshes bounds and re-detects
    fn solve_positions(&mut self, pairs: &[CollisionPair], transforms: &mut impl TransformStore) {
        if pairs.is_empty() {
            return;
        }
        for _ in 0..self.config.solver.position_iterations {
            self.update_bounds(transforms);
            for &pair in pairs {
                self.solve_pair(pair, transforms, false);
            }
        }
    }

    /// One impulse and friction pass on freshly detected manifolds
    fn solve_velocities(&mut self, pairs: &[CollisionPair], transforms: &mut impl TransformStore) {
        if pairs.is_empty() {
            return;
        }
        self.update_bounds(transforms);
        for &pair in pairs {
            self.solve_pair(pair, transforms, true);
        }
    }

    fn solve_pair(
        &mut self,
        pair: CollisionPair,
        transforms: &mut impl TransformStore,
        impulses: bool,
    ) {
        let (Some(ia), Some(ib)) =
            (self.shape_index(pair.shape_a), self.shape_index(pair.shape_b))
        else {
            return;
        };
        let slot_a = self.entity_slot(self.shapes[ia].entity());
        let slot_b = self.entity_slot(self.shapes[ib].entity());

        let shapes = &self.shapes;
        let (shape_a, shape_b) = (&shapes[ia], &shapes[ib]);
        let Some(manifold) = detect(shape_a, shape_b) else {
            return;
        };

        let (body_a, body_b) = get_pair_mut(&mut self.bodies, slot_a, slot_b);
        let mut side_a = ContactSide::new(
            body_a.and_then(|slot| slot.body.as_mut()),
            shape_a.entity(),
            shape_a.material,
        );
        let mut side_b = ContactSide::new(
            body_b.and_then(|slot| slot.body.as_mut()),
            shape_b.entity(),
            shape_b.material,
        );

        if impulses {
            let j = resolve_impulse(&manifold, &mut side_a, &mut side_b);
            resolve_friction(&manifold, &mut side_a, &mut side_b, j);
            self.manifolds.insert(pair, manifold);
        } else {
            resolve_position(&manifold, &side_a, &side_b, &self.config.solver, transforms);
        }
    }

    /// Turns contact-set differences into callbacks, shape by shape in id order
    fn dispatch_events(
        &self,
        transforms: &impl TransformStore,
        listener: &mut impl ContactListener,
    ) {
        for shape in &self.shapes {
            let entity = shape.entity();
            if !transforms.contains(entity) {
                continue;
            }

            for &other_id in shape.current_contacts() {
                let Some(other) = self.shape(other_id) else {
                    continue;
                };
                let entered = !shape.previous_contacts().contains(&other_id);

                if shape.is_trigger || other.is_trigger {
                    let event = trigger_event(shape, other);
                    if entered {
                        listener.on_trigger_enter(entity, &event);
                    } else {
                        listener.on_trigger_stay(entity, &event);
                    }
                } else {
                    let manifold = self.manifolds.get(&CollisionPair::new(shape.id(), other_id));
                    let event = collision_event(shape, other, manifold);
                    if entered {
                        listener.on_collision_enter(entity, &event);
                    } else {
                        listener.on_collision_stay(entity, &event);
                    }
                }
            }

            for &other_id in shape.previous_contacts().difference(shape.current_contacts()) {
                let Some(other) = self.shape(other_id) else {
                    continue;
                };

                if shape.is_trigger || other.is_trigger {
                    listener.on_trigger_exit(entity, &trigger_event(shape, other));
                } else {
                    let manifold = self
                        .previous_manifolds
                        .get(&CollisionPair::new(shape.id(), other_id));
                    listener.on_collision_exit(entity, &collision_event(shape, other, manifold));
                }
            }
        }
    }

    fn update_sleep(&mut self, dt: f32) {
        let config = &self.config;
        for body in self.bodies.iter_mut().filter_map(|slot| slot.body.as_mut()) {
            if body.is_simulated() {
                body.update_sleep(
                    dt,
                    config.sleep_linear_threshold,
                    config.sleep_angular_threshold,
                    config.sleep_time,
                );
            }
        }
    }

    // Queries

    /// Closest hit along the ray within `max_distance`.
    ///
    /// Queries read cached bounds from the last step or [`World::update_bounds`].
    pub fn raycast(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> Option<RaycastHit> {
        self.active_shapes()
            .filter_map(|shape| raycast_shape(shape, origin, direction, max_distance))
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    /// Every hit along the ray within `max_distance`, nearest first.
    /// Triggers are included.
    pub fn raycast_all(&self, origin: Vec2, direction: Vec2, max_distance: f32) -> Vec<RaycastHit> {
        let mut hits: Vec<RaycastHit> = self
            .active_shapes()
            .filter_map(|shape| raycast_shape(shape, origin, direction, max_distance))
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    /// Shapes overlapping a circle; touching counts
    pub fn overlap_circle(&self, center: Vec2, radius: f32) -> Vec<ShapeId> {
        let radius = if radius.is_finite() { radius.abs() } else { 0.0 };
        let bounds = Aabb::from_center_half_extents(center, Vec2::splat(radius));

        let mut found = Vec::new();
        broad_phase::query_aabb(&self.shapes, bounds, |shape| {
            if shape.overlaps_circle(center, radius) {
                found.push(shape.id());
            }
        });
        found
    }

    /// Shapes containing a point
    pub fn query_point(&self, point: Vec2) -> Vec<ShapeId> {
        let mut found = Vec::new();
        broad_phase::query_aabb(&self.shapes, Aabb::new(point, point), |shape| {
            if shape.contains_point(point) {
                found.push(shape.id());
            }
        });
        found
    }

    fn active_shapes(&self) -> impl Iterator<Item = &Shape> + '_ {
        self.shapes.iter().filter(|shape| shape.is_active())
    }

    // Lookups

    fn shape_index(&self, id: ShapeId) -> Option<usize> {
        self.shapes.binary_search_by_key(&id, Shape::id).ok()
    }

    /// Slot index of the live body owned by `entity`
    fn entity_slot(&self, entity: EntityHandle) -> Option<usize> {
        let handle = self.body_by_entity.get(&entity)?;
        self.body(*handle).map(|_| handle.index())
    }

    fn entity_body(&self, entity: EntityHandle) -> Option<&RigidBody> {
        self.body_by_entity
            .get(&entity)
            .and_then(|handle| self.body(*handle))
    }

    fn entity_body_mut(&mut self, entity: EntityHandle) -> Option<&mut RigidBody> {
        let handle = *self.body_by_entity.get(&entity)?;
        self.body_mut(handle)
    }
}

fn trigger_event(shape: &Shape, other: &Shape) -> TriggerEvent {
    TriggerEvent {
        shape: shape.id(),
        other: other.id(),
        other_entity: other.entity(),
    }
}

/// Builds the event seen from `shape`, flipping the stored normal when
/// `shape` is side B of the manifold
fn collision_event(
    shape: &Shape,
    other: &Shape,
    manifold: Option<&ContactManifold>,
) -> CollisionEvent {
    let (contact, normal, penetration) = match manifold {
        Some(manifold) => {
            let sign = if manifold.shape_a == shape.id() { 1.0 } else { -1.0 };
            let mut contact = manifold.contact;
            contact.normal = contact.normal * sign;
            (contact, manifold.normal * sign, manifold.penetration)
        }
        None => (ContactPoint::new(shape.center(), Vec2::ZERO, 0.0), Vec2::ZERO, 0.0),
    };

    CollisionEvent {
        shape: shape.id(),
        other: other.id(),
        other_entity: other.entity(),
        contact,
        normal,
        penetration,
    }
}

/// Mutable access to up to two distinct elements
fn get_pair_mut<T>(
    slice: &mut [T],
    a: Option<usize>,
    b: Option<usize>,
) -> (Option<&mut T>, Option<&mut T>) {
    match (a, b) {
        (Some(a), Some(b)) if a != b => {
            if a < b {
                let (left, right) = slice.split_at_mut(b);
                (left.get_mut(a), right.first_mut())
            } else {
                let (left, right) = slice.split_at_mut(a);
                (right.first_mut(), left.get_mut(b))
            }
        }
        (Some(a), _) => (slice.get_mut(a), None),
        (None, Some(b)) => (None, slice.get_mut(b)),
        (None, None) => (None, None),
    }
}
