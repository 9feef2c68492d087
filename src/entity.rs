//! The boundary between the physics world and the game's entities.
//!
//! Bodies and shapes only remember which entity they belong to through an
//! [`EntityHandle`]. Positions live outside the engine, behind the
//! [`TransformStore`] trait; [`Transforms`] is a ready-made implementation.

use crate::math::{Transform, Vec2};

/// A non-owning, generational reference to a game entity.
///
/// A handle whose generation no longer matches its slot refers to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityHandle {
    index: u32,
    generation: u32,
}

impl EntityHandle {
    /// Creates a handle from raw parts
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index of this handle
    pub fn index(self) -> usize {
        self.index as usize
    }

    /// Generation of this handle
    pub fn generation(self) -> u32 {
        self.generation
    }
}

/// Read and mutation access to entity positions.
///
/// The engine never owns entity positions. Integration and position
/// correction write through `translate`/`rotate`; detection reads through
/// `world_position`.
pub trait TransformStore {
    /// Local position of the entity, or `None` if it has no transform
    fn position(&self, entity: EntityHandle) -> Option<Vec2>;

    /// Sets the position; ignored for unknown entities
    fn set_position(&mut self, entity: EntityHandle, position: Vec2);

    /// Rotates the entity by `radians`; ignored for unknown entities
    fn rotate(&mut self, entity: EntityHandle, radians: f32);

    /// Moves the entity by `delta`
    fn translate(&mut self, entity: EntityHandle, delta: Vec2) {
        if let Some(position) = self.position(entity) {
            self.set_position(entity, position + delta);
        }
    }

    /// World-space position; equal to `position` without a scene hierarchy
    fn world_position(&self, entity: EntityHandle) -> Option<Vec2> {
        self.position(entity)
    }

    /// Returns true if the entity still has a transform
    fn contains(&self, entity: EntityHandle) -> bool {
        self.position(entity).is_some()
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    transform: Option<Transform>,
}

/// A generational table of entity transforms.
#[derive(Debug, Clone, Default)]
pub struct Transforms {
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
}

impl Transforms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an entity with the given transform
    pub fn spawn(&mut self, transform: Transform) -> EntityHandle {
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.transform = Some(transform);
            return EntityHandle::new(index, slot.generation);
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            transform: Some(transform),
        });
        EntityHandle::new(index, 0)
    }

    /// Creates an entity at `position` with no rotation
    pub fn spawn_at(&mut self, position: Vec2) -> EntityHandle {
        self.spawn(Transform::from_position(position))
    }

    /// Removes an entity; its handle (and any copy of it) goes stale
    pub fn despawn(&mut self, entity: EntityHandle) -> Option<Transform> {
        let slot = self.slots.get_mut(entity.index())?;
        if slot.generation != entity.generation {
            return None;
        }
        let transform = slot.transform.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(entity.index);
        self.len -= 1;
        Some(transform)
    }

    pub fn get(&self, entity: EntityHandle) -> Option<&Transform> {
        self.slots
            .get(entity.index())
            .filter(|slot| slot.generation == entity.generation)
            .and_then(|slot| slot.transform.as_ref())
    }

    pub fn get_mut(&mut self, entity: EntityHandle) -> Option<&mut Transform> {
        self.slots
            .get_mut(entity.index())
            .filter(|slot| slot.generation == entity.generation)
            .and_then(|slot| slot.transform.as_mut())
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl TransformStore for Transforms {
    fn position(&self, entity: EntityHandle) -> Option<Vec2> {
        self.get(entity).map(|t| t.position)
    }

    fn set_position(&mut self, entity: EntityHandle, position: Vec2) {
        if let Some(t) = self.get_mut(entity) {
            t.position = position;
        }
    }

    fn rotate(&mut self, entity: EntityHandle, radians: f32) {
        if let Some(t) = self.get_mut(entity) {
            t.rotate(radians);
        }
    }

    fn translate(&mut self, entity: EntityHandle, delta: Vec2) {
        if let Some(t) = self.get_mut(entity) {
            t.translate(delta);
        }
    }
}
