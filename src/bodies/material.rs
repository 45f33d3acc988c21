#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Surface response properties for physics objects
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Material {
    /// Coefficient of restitution (bounciness), 0-1
    pub restitution: f32,

    /// Coefficient of friction, >= 0
    pub friction: f32,
}

impl Material {
    /// Creates a new material with the specified properties
    pub fn new(friction: f32, restitution: f32) -> Self {
        Self {
            friction,
            restitution,
        }
    }

    /// Creates a material for ice (low friction, slight bounce)
    pub fn ice() -> Self {
        Self::new(0.05, 0.1)
    }

    /// Creates a material for rubber (high friction, high restitution)
    pub fn rubber() -> Self {
        Self::new(0.8, 0.7)
    }

    /// Creates a material for terrain and concrete (high friction, low restitution)
    pub fn concrete() -> Self {
        Self::new(0.9, 0.1)
    }

    /// Returns true if restitution lies in [0, 1] and friction is non-negative
    pub fn is_valid(&self) -> bool {
        (0.0..=1.0).contains(&self.restitution) && self.friction.is_finite() && self.friction >= 0.0
    }

    /// Friction used for a contact between two materials (geometric mean)
    pub fn combined_friction(&self, other: &Material) -> f32 {
        (self.friction * other.friction).sqrt()
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            friction: 0.5,
            restitution: 0.3,
        }
    }
}
