pub mod world;
pub mod config;
pub mod storage;
pub mod events;
mod scheduler;

pub use self::world::PhysicsWorld;
pub use self::config::SimulationConfig;
pub use self::storage::{BodyStorage, Storage};
pub use self::events::{BodyEvent, BodyEventType, CollisionEvent, EventQueue, PhysicsObserver};
pub use self::scheduler::{FixedStepScheduler, StepPlan};

use std::fmt;

/// A unique identifier for a body in the physics world.
///
/// Handles are issued in increasing order and never reused, so sorting by
/// handle gives insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub(crate) u32);

impl BodyHandle {
    /// Returns the raw index of the handle
    pub fn index(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for BodyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "body#{}", self.0)
    }
}
