//! Contact events delivered to the game after each sub-step.
//!
//! Events are addressed to the entity owning a shape. For every touching
//! pair both entities hear about it, each from its own shape's point of view.

use crate::collision::{ContactPoint, ShapeId};
use crate::entity::EntityHandle;
use crate::math::Vec2;

/// Payload of a collision callback, seen from `shape`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEvent {
    /// The receiving entity's shape
    pub shape: ShapeId,
    /// The shape it touched
    pub other: ShapeId,
    /// Entity owning `other`
    pub other_entity: EntityHandle,
    /// Contact point; its normal points from `shape` toward `other`
    pub contact: ContactPoint,
    /// Normal pointing from `shape` toward `other`
    pub normal: Vec2,
    pub penetration: f32,
}

/// Payload of a trigger callback, seen from `shape`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerEvent {
    pub shape: ShapeId,
    pub other: ShapeId,
    pub other_entity: EntityHandle,
}

/// Receives contact callbacks during [`World::step`](crate::World::step).
///
/// Every method defaults to doing nothing. The listener cannot reach the
/// world while a step runs, so registration happens before or after a step.
pub trait ContactListener {
    fn on_collision_enter(&mut self, _entity: EntityHandle, _event: &CollisionEvent) {}
    fn on_collision_stay(&mut self, _entity: EntityHandle, _event: &CollisionEvent) {}
    fn on_collision_exit(&mut self, _entity: EntityHandle, _event: &CollisionEvent) {}
    fn on_trigger_enter(&mut self, _entity: EntityHandle, _event: &TriggerEvent) {}
    fn on_trigger_stay(&mut self, _entity: EntityHandle, _event: &TriggerEvent) {}
    fn on_trigger_exit(&mut self, _entity: EntityHandle, _event: &TriggerEvent) {}
}

/// Ignores every event
impl ContactListener for () {}

/// Phase of a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactPhase {
    Enter,
    Stay,
    Exit,
}

/// One recorded callback
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhysicsEvent {
    Collision {
        entity: EntityHandle,
        phase: ContactPhase,
        event: CollisionEvent,
    },
    Trigger {
        entity: EntityHandle,
        phase: ContactPhase,
        event: TriggerEvent,
    },
}

impl PhysicsEvent {
    /// The entity that received the callback
    pub fn entity(&self) -> EntityHandle {
        match self {
            PhysicsEvent::Collision { entity, .. } | PhysicsEvent::Trigger { entity, .. } => {
                *entity
            }
        }
    }

    pub fn phase(&self) -> ContactPhase {
        match self {
            PhysicsEvent::Collision { phase, .. } | PhysicsEvent::Trigger { phase, .. } => *phase,
        }
    }

    pub fn is_trigger(&self) -> bool {
        matches!(self, PhysicsEvent::Trigger { .. })
    }
}

/// A listener that records every callback in order
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    pub events: Vec<PhysicsEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of recorded collision callbacks in `phase` for `entity`
    pub fn collisions(&self, entity: EntityHandle, phase: ContactPhase) -> usize {
        self.count(entity, phase, false)
    }

    /// Number of recorded trigger callbacks in `phase` for `entity`
    pub fn triggers(&self, entity: EntityHandle, phase: ContactPhase) -> usize {
        self.count(entity, phase, true)
    }

    fn count(&self, entity: EntityHandle, phase: ContactPhase, trigger: bool) -> usize {
        self.events
            .iter()
            .filter(|e| e.entity() == entity && e.phase() == phase && e.is_trigger() == trigger)
            .count()
    }

    fn push_collision(
        &mut self,
        entity: EntityHandle,
        phase: ContactPhase,
        event: &CollisionEvent,
    ) {
        self.events.push(PhysicsEvent::Collision {
            entity,
            phase,
            event: *event,
        });
    }

    fn push_trigger(&mut self, entity: EntityHandle, phase: ContactPhase, event: &TriggerEvent) {
        self.events.push(PhysicsEvent::Trigger {
            entity,
            phase,
            event: *event,
        });
    }
}

impl ContactListener for EventLog {
    fn on_collision_enter(&mut self, entity: EntityHandle, event: &CollisionEvent) {
        self.push_collision(entity, ContactPhase::Enter, event);
    }

    fn on_collision_stay(&mut self, entity: EntityHandle, event: &CollisionEvent) {
        self.push_collision(entity, ContactPhase::Stay, event);
    }

    fn on_collision_exit(&mut self, entity: EntityHandle, event: &CollisionEvent) {
        self.push_collision(entity, ContactPhase::Exit, event);
    }

    fn on_trigger_enter(&mut self, entity: EntityHandle, event: &TriggerEvent) {
        self.push_trigger(entity, ContactPhase::Enter, event);
    }

    fn on_trigger_stay(&mut self, entity: EntityHandle, event: &TriggerEvent) {
        self.push_trigger(entity, ContactPhase::Stay, event);
    }

    fn on_trigger_exit(&mut self, entity: EntityHandle, event: &TriggerEvent) {
        self.push_trigger(entity, ContactPhase::Exit, event);
    }
}
