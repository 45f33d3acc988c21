use crate::bodies::RigidBody;
use crate::collision::ContactInfo;
use crate::math::{Vector3, EPSILON};

/// Velocity and position changes produced by resolving one contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactResponse {
    /// Velocity change for the first body
    pub velocity_delta_a: Vector3,

    /// Velocity change for the second body
    pub velocity_delta_b: Vector3,

    /// Position correction for the first body
    pub correction_a: Vector3,

    /// Position correction for the second body
    pub correction_b: Vector3,

    /// Magnitude of the normal impulse
    pub normal_impulse: f32,
}

/// Trait for contact solvers
pub trait ContactSolver {
    /// Computes the response for a contact whose normal points from `b` toward `a`.
    ///
    /// Returns `None` when the bodies are already separating or neither can move.
    fn resolve(&self, a: &RigidBody, b: &RigidBody, contact: &ContactInfo) -> Option<ContactResponse>;
}

/// Single-iteration impulse solver with gentle positional correction
#[derive(Debug, Clone, Copy)]
pub struct ImpulseSolver {
    /// Fraction of the penetration depth removed per resolution
    correction_factor: f32,
}

impl ImpulseSolver {
    /// Creates a new impulse solver
    pub fn new(correction_factor: f32) -> Self {
        Self {
            correction_factor: correction_factor.clamp(0.0, 1.0),
        }
    }

    /// Returns the positional correction factor
    pub fn get_correction_factor(&self) -> f32 {
        self.correction_factor
    }
}

impl Default for ImpulseSolver {
    fn default() -> Self {
        Self::new(0.2)
    }
}

impl ContactSolver for ImpulseSolver {
    fn resolve(&self, a: &RigidBody, b: &RigidBody, contact: &ContactInfo) -> Option<ContactResponse> {
        let normal = contact.normal;
        let inv_mass_a = a.get_inverse_mass();
        let inv_mass_b = b.get_inverse_mass();
        let inv_mass_sum = inv_mass_a + inv_mass_b;

        if inv_mass_sum <= 0.0 {
            return None;
        }

        let relative_velocity = a.get_linear_velocity() - b.get_linear_velocity();
        let vel_along_normal = relative_velocity.dot(&normal);

        // Already moving apart
        if vel_along_normal > 0.0 {
            return None;
        }

        let restitution = a.get_material().restitution.min(b.get_material().restitution);
        let j = -(1.0 + restitution) * vel_along_normal / inv_mass_sum;

        let mut velocity_delta_a = normal * (j * inv_mass_a);
        let mut velocity_delta_b = -normal * (j * inv_mass_b);

        // Coulomb friction on the post-impulse tangential velocity
        let relative_after = (a.get_linear_velocity() + velocity_delta_a) - (b.get_linear_velocity() + velocity_delta_b);
        let tangential = relative_after - normal * relative_after.dot(&normal);
        let tangential_speed = tangential.norm();
        if tangential_speed > EPSILON {
            let tangent = tangential / tangential_speed;
            let friction = a.get_material().combined_friction(b.get_material());
            let jt = (-tangential_speed / inv_mass_sum).clamp(-friction * j, friction * j);

            velocity_delta_a += tangent * (jt * inv_mass_a);
            velocity_delta_b -= tangent * (jt * inv_mass_b);
        }

        let correction = contact.depth.max(0.0) * self.correction_factor / inv_mass_sum;

        Some(ContactResponse {
            velocity_delta_a,
            velocity_delta_b,
            correction_a: normal * (correction * inv_mass_a),
            correction_b: -normal * (correction * inv_mass_b),
            normal_impulse: j,
        })
    }
}
