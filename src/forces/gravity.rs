use crate::bodies::RigidBody;
use crate::math::{self, Vector3};

/// Constant gravity along a fixed direction, used when no planet is installed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformGravity {
    /// The gravity acceleration vector
    gravity: Vector3,
}

impl UniformGravity {
    /// Creates a new uniform gravity with the given acceleration vector
    pub fn new(gravity: Vector3) -> Self {
        Self { gravity }
    }

    /// Creates downward gravity with the given magnitude
    pub fn downward(magnitude: f32) -> Self {
        Self::new(Vector3::new(0.0, -magnitude, 0.0))
    }

    /// Gets the current gravity acceleration
    pub fn get_gravity(&self) -> Vector3 {
        self.gravity
    }

    /// Sets the gravity acceleration vector
    pub fn set_gravity(&mut self, gravity: Vector3) {
        self.gravity = gravity;
    }

    /// The "up" direction implied by this gravity (+Y when gravity is zero)
    pub fn up(&self) -> Vector3 {
        math::safe_normalize(-self.gravity, math::up())
    }

    /// Applies F = m * g to the body if it uses gravity
    pub fn apply(&self, body: &mut RigidBody) {
        if !body.is_affected_by_gravity() {
            return;
        }
        let force = self.gravity * body.get_mass();
        body.apply_force(force);
    }
}

impl Default for UniformGravity {
    fn default() -> Self {
        Self::downward(9.81)
    }
}
