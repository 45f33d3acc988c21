use crate::math::{Aabb, Vector3};

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// An axis-aligned box collision shape positioned in world space
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct BoxShape {
    /// Center of the box, mirrors the owning body's position
    pub center: Vector3,

    /// The half-extents of the box (half-width, half-height, half-depth)
    pub half_extents: Vector3,
}

impl BoxShape {
    /// Creates a new box with the given center and half-extents
    pub fn new(center: Vector3, half_extents: Vector3) -> Self {
        Self { center, half_extents }
    }

    /// Returns the half-extents of the box
    pub fn get_half_extents(&self) -> Vector3 {
        self.half_extents
    }

    /// Returns the world-space bounds of the box
    pub fn get_bounds(&self) -> Aabb {
        Aabb::from_center_half_extents(self.center, self.half_extents)
    }
}
