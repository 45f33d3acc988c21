pub mod narrow_phase;
mod contact_solver;

pub use self::contact_solver::{ContactResponse, ContactSolver, ImpulseSolver};

use crate::math::Vector3;

/// Detailed contact between two colliders
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactInfo {
    /// Unit contact normal, pointing from the second collider toward the first
    pub normal: Vector3,

    /// Overlap distance along the normal
    pub depth: f32,

    /// Approximate contact point in world space
    pub point: Vector3,
}

impl ContactInfo {
    /// Creates a new contact
    pub fn new(normal: Vector3, depth: f32, point: Vector3) -> Self {
        Self { normal, depth, point }
    }

    /// Returns the same contact seen from the other collider
    pub fn flipped(self) -> Self {
        Self {
            normal: -self.normal,
            ..self
        }
    }
}
