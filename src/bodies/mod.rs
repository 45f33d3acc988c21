mod rigid_body;
mod material;
mod body_type;
mod entity_link;

pub use self::rigid_body::{RigidBody, DEFAULT_MAX_FALL_SPEED, DEFAULT_REST_VELOCITY_THRESHOLD};
pub use self::material::Material;
pub use self::body_type::RigidBodyType;
pub use self::entity_link::EntityLink;

/// Flags for controlling body behavior
pub mod body_flags {
    use bitflags::bitflags;

    bitflags! {
        /// Flags for controlling the behavior of rigid bodies
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct BodyFlags: u32 {
            /// Body is affected by the active gravity model
            const AFFECTED_BY_GRAVITY = 0x01;

            /// Body is resting on the ground this step
            const ON_GROUND = 0x02;

            /// Body generates collision events
            const GENERATE_COLLISION_EVENTS = 0x04;
        }
    }
}
