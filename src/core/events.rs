use crate::collision::ContactInfo;
use crate::core::BodyHandle;
use std::collections::VecDeque;

/// A resolved contact between two bodies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEvent {
    /// The first body in the collision (always dynamic)
    pub body_a: BodyHandle,

    /// The second body in the collision
    pub body_b: BodyHandle,

    /// Contact geometry, normal pointing from `body_b` toward `body_a`
    pub contact: ContactInfo,

    /// Magnitude of the normal impulse, zero when the bodies were already separating
    pub normal_impulse: f32,
}

/// Types of body events
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyEventType {
    /// A body has been added to the world
    Added,

    /// A body has been removed from the world
    Removed,

    /// A dynamic body changed position during the update
    Moved,

    /// A body was teleported out of the planet
    PenetrationCorrected {
        /// How far below the safe distance the body was
        depth: f32,
    },

    /// A body's ground state flipped
    GroundChanged {
        /// The new ground state
        on_ground: bool,
    },
}

/// An event related to a single body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyEvent {
    /// The type of body event
    pub event_type: BodyEventType,

    /// The body that the event refers to
    pub body: BodyHandle,
}

/// Receives physics events synchronously as they are produced.
///
/// Used for debug visuals and audio without the world holding any
/// reference to those systems.
pub trait PhysicsObserver {
    /// Called for every resolved contact
    fn on_collision(&mut self, _event: &CollisionEvent) {}

    /// Called for every body event
    fn on_body_event(&mut self, _event: &BodyEvent) {}
}

/// A queue of physics events
#[derive(Debug, Default)]
pub struct EventQueue {
    /// Collision events
    collision_events: VecDeque<CollisionEvent>,

    /// Body events
    body_events: VecDeque<BodyEvent>,
}

impl EventQueue {
    /// Creates a new empty event queue
    pub fn new() -> Self {
        Self {
            collision_events: VecDeque::new(),
            body_events: VecDeque::new(),
        }
    }

    /// Adds a collision event to the queue
    pub fn add_collision_event(&mut self, event: CollisionEvent) {
        self.collision_events.push_back(event);
    }

    /// Adds a body event to the queue
    pub fn add_body_event(&mut self, event: BodyEvent) {
        self.body_events.push_back(event);
    }

    /// Gets the next collision event from the queue
    pub fn next_collision_event(&mut self) -> Option<CollisionEvent> {
        self.collision_events.pop_front()
    }

    /// Gets the next body event from the queue
    pub fn next_body_event(&mut self) -> Option<BodyEvent> {
        self.body_events.pop_front()
    }

    /// Returns the queued collision events in order
    pub fn collision_events(&self) -> impl Iterator<Item = &CollisionEvent> {
        self.collision_events.iter()
    }

    /// Returns the queued body events in order
    pub fn body_events(&self) -> impl Iterator<Item = &BodyEvent> {
        self.body_events.iter()
    }

    /// Returns whether there are any collision events in the queue
    pub fn has_collision_events(&self) -> bool {
        !self.collision_events.is_empty()
    }

    /// Returns whether there are any body events in the queue
    pub fn has_body_events(&self) -> bool {
        !self.body_events.is_empty()
    }

    /// Returns whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.collision_events.is_empty() && self.body_events.is_empty()
    }

    /// Clears all events from the queue
    pub fn clear(&mut self) {
        self.collision_events.clear();
        self.body_events.clear();
    }

    /// Gets all collision events involving a specific body
    pub fn get_collision_events_for_body(&self, body: BodyHandle) -> Vec<&CollisionEvent> {
        self.collision_events
            .iter()
            .filter(|e| e.body_a == body || e.body_b == body)
            .collect()
    }

    /// Gets all body events for a specific body
    pub fn get_body_events_for_body(&self, body: BodyHandle) -> Vec<&BodyEvent> {
        self.body_events
            .iter()
            .filter(|e| e.body == body)
            .collect()
    }

    /// Gets all body events matching `predicate`
    pub fn get_body_events_where(&self, predicate: impl Fn(&BodyEventType) -> bool) -> Vec<&BodyEvent> {
        self.body_events
            .iter()
            .filter(|e| predicate(&e.event_type))
            .collect()
    }
}
