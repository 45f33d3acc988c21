use crate::collision::{narrow_phase, ContactInfo};
use crate::math::Vector3;
use crate::shapes::{BoxShape, Sphere};

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// The collision shape owned by a rigid body.
///
/// The set of shapes is closed: every pairwise query is an exhaustive match,
/// so adding a shape fails to compile until each pair is handled.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Collider {
    /// Sphere collider
    Sphere(Sphere),

    /// Axis-aligned box collider
    Box(BoxShape),
}

impl Collider {
    /// Creates a sphere collider
    pub fn sphere(center: Vector3, radius: f32) -> Self {
        Self::Sphere(Sphere::new(center, radius))
    }

    /// Creates a box collider from half-extents
    pub fn cuboid(center: Vector3, half_extents: Vector3) -> Self {
        Self::Box(BoxShape::new(center, half_extents))
    }

    /// Returns the type name of the shape
    pub fn shape_type(&self) -> &'static str {
        match self {
            Self::Sphere(_) => "Sphere",
            Self::Box(_) => "Box",
        }
    }

    /// Returns the collider center
    pub fn center(&self) -> Vector3 {
        match self {
            Self::Sphere(sphere) => sphere.center,
            Self::Box(cuboid) => cuboid.center,
        }
    }

    /// Moves the collider center to `center`
    pub fn set_center(&mut self, center: Vector3) {
        match self {
            Self::Sphere(sphere) => sphere.center = center,
            Self::Box(cuboid) => cuboid.center = center,
        }
    }

    /// Radius used by the planet model: the sphere radius, or the largest box half-extent
    pub fn bounding_radius(&self) -> f32 {
        match self {
            Self::Sphere(sphere) => sphere.radius,
            Self::Box(cuboid) => cuboid.half_extents.x.max(cuboid.half_extents.y).max(cuboid.half_extents.z),
        }
    }

    /// Distance from the center down to the lowest point along world Y
    pub fn extent_below(&self) -> f32 {
        match self {
            Self::Sphere(sphere) => sphere.radius,
            Self::Box(cuboid) => cuboid.half_extents.y,
        }
    }

    /// Returns true if every dimension is finite and strictly positive
    pub fn has_valid_dimensions(&self) -> bool {
        match self {
            Self::Sphere(sphere) => sphere.radius.is_finite() && sphere.radius > 0.0,
            Self::Box(cuboid) => {
                let h = cuboid.half_extents;
                [h.x, h.y, h.z].iter().all(|e| e.is_finite() && *e > 0.0)
            }
        }
    }

    /// Returns true if the two colliders overlap
    pub fn intersects(&self, other: &Collider) -> bool {
        match (self, other) {
            (Self::Sphere(a), Self::Sphere(b)) => narrow_phase::sphere_sphere_intersects(a, b),
            (Self::Sphere(sphere), Self::Box(cuboid)) | (Self::Box(cuboid), Self::Sphere(sphere)) => {
                narrow_phase::sphere_box_intersects(sphere, cuboid)
            }
            (Self::Box(a), Self::Box(b)) => narrow_phase::box_box_intersects(a, b),
        }
    }

    /// Returns contact details if the colliders overlap.
    ///
    /// The normal points from `other` toward `self`.
    pub fn get_collision_info(&self, other: &Collider) -> Option<ContactInfo> {
        match (self, other) {
            (Self::Sphere(a), Self::Sphere(b)) => narrow_phase::sphere_sphere(a, b),
            (Self::Sphere(sphere), Self::Box(cuboid)) => narrow_phase::sphere_box(sphere, cuboid),
            (Self::Box(cuboid), Self::Sphere(sphere)) => {
                narrow_phase::sphere_box(sphere, cuboid).map(ContactInfo::flipped)
            }
            (Self::Box(a), Self::Box(b)) => narrow_phase::box_box(a, b),
        }
    }
}
