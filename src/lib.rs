pub mod math;
pub mod core;
pub mod bodies;
pub mod shapes;
pub mod collision;
pub mod forces;
pub mod locomotion;

/// Re-export common types for easier usage
pub use crate::core::{BodyHandle, PhysicsWorld, SimulationConfig};
pub use crate::bodies::{EntityLink, Material, RigidBody, RigidBodyType};
pub use crate::forces::{PlanetConfig, PlanetField};
pub use crate::shapes::Collider;
pub use crate::math::Vector3;
pub use crate::error::PhysicsError;

/// Error types for the physics engine
pub mod error {
    use thiserror::Error;

    #[derive(Error, Debug, Clone, PartialEq)]
    pub enum PhysicsError {
        #[error("Invalid body: {0}")]
        InvalidBody(String),

        #[error("Invalid parameter: {0}")]
        InvalidParameter(String),

        #[error("Resource not found: {0}")]
        ResourceNotFound(String),
    }
}

/// Result type for physics engine operations
pub type Result<T> = std::result::Result<T, error::PhysicsError>;

/// Engine version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
