use crate::bodies::Material;
use crate::error::PhysicsError;
use crate::math::Vector3;
use crate::Result;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Configuration parameters for the physics simulation
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct SimulationConfig {
    /// Magnitude of the uniform gravity used when no planet is installed
    pub gravity: f32,

    /// Number of fixed sub-steps per simulated second
    pub physics_fps: u32,

    /// The maximum number of full sub-steps per update
    pub max_substeps: u32,

    /// Frame deltas above this are clamped before entering the accumulator
    pub max_frame_delta: f32,

    /// Default restitution for bodies spawned by the world
    pub restitution: f32,

    /// Default friction for bodies spawned by the world
    pub friction: f32,

    /// Fraction of the penetration depth corrected per contact
    pub correction_factor: f32,

    /// Flat-world floor height
    pub ground_height: f32,

    /// Distance above the flat-world floor within which a body counts as resting on it
    pub ground_snap_tolerance: f32,

    /// Contact normal alignment with "up" above which a contact grounds a body
    pub ground_normal_threshold: f32,
}

impl SimulationConfig {
    /// Duration of one fixed sub-step in seconds
    pub fn fixed_time_step(&self) -> f32 {
        1.0 / self.physics_fps.max(1) as f32
    }

    /// Uniform gravity as an acceleration vector
    pub fn gravity_vector(&self) -> Vector3 {
        Vector3::new(0.0, -self.gravity, 0.0)
    }

    /// Material given to bodies created through the world's spawn helpers
    pub fn default_material(&self) -> Material {
        Material::new(self.friction, self.restitution)
    }

    /// Checks that the tunables describe a runnable simulation
    pub fn validate(&self) -> Result<()> {
        if self.physics_fps == 0 {
            return Err(PhysicsError::InvalidParameter("physics_fps must be positive".to_string()));
        }
        if self.max_substeps == 0 {
            return Err(PhysicsError::InvalidParameter("max_substeps must be positive".to_string()));
        }
        if !(self.max_frame_delta.is_finite() && self.max_frame_delta > 0.0) {
            return Err(PhysicsError::InvalidParameter(format!(
                "max_frame_delta must be positive, got {}",
                self.max_frame_delta
            )));
        }
        if !self.gravity.is_finite() {
            return Err(PhysicsError::InvalidParameter(format!("non-finite gravity {}", self.gravity)));
        }
        if !self.default_material().is_valid() {
            return Err(PhysicsError::InvalidParameter(format!(
                "invalid default material (restitution {}, friction {})",
                self.restitution, self.friction
            )));
        }
        if !(self.ground_snap_tolerance.is_finite() && self.ground_snap_tolerance >= 0.0) {
            return Err(PhysicsError::InvalidParameter(format!(
                "ground_snap_tolerance must be non-negative, got {}",
                self.ground_snap_tolerance
            )));
        }
        if !(0.0..=1.0).contains(&self.correction_factor) {
            return Err(PhysicsError::InvalidParameter(format!(
                "correction_factor must be in [0, 1], got {}",
                self.correction_factor
            )));
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravity: 9.81,
            physics_fps: 60,
            max_substeps: 5,
            max_frame_delta: 0.25,
            restitution: 0.3,
            friction: 0.5,
            correction_factor: 0.2,
            ground_height: 0.0,
            ground_snap_tolerance: 0.01,
            ground_normal_threshold: 0.7,
        }
    }
}
