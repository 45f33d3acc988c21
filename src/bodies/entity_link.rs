use crate::math::{self, Vector3};

/// Narrow link between a physics body and the gameplay entity driving it.
///
/// Physics only reads `is_jumping` and only writes `surface_normal`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityLink {
    /// Opaque identifier of the gameplay entity
    pub entity_id: u64,

    /// Set by the gameplay layer while a jump is in progress
    pub is_jumping: bool,

    /// Written by physics every step: the local "up" at the body
    pub surface_normal: Vector3,
}

impl EntityLink {
    /// Creates a link for the given entity
    pub fn new(entity_id: u64) -> Self {
        Self {
            entity_id,
            is_jumping: false,
            surface_normal: math::up(),
        }
    }
}

impl Default for EntityLink {
    fn default() -> Self {
        Self::new(0)
    }
}
