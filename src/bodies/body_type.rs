/// Type of rigid body, determining how it behaves in the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum RigidBodyType {
    /// Dynamic bodies are integrated, receive gravity and respond to collisions
    Dynamic,

    /// Static bodies never move and have infinite mass
    Static,
}
