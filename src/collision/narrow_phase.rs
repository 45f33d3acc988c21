//! Pairwise shape queries.
//!
//! Every contact returned here uses the same orientation: the normal points
//! from the second shape toward the first, so moving the first shape along the
//! normal by `depth` separates the pair.

use crate::collision::ContactInfo;
use crate::math::{self, Vector3, EPSILON};
use crate::shapes::{BoxShape, Sphere};

/// Returns true if two spheres overlap (touching does not count)
pub fn sphere_sphere_intersects(a: &Sphere, b: &Sphere) -> bool {
    let min_dist = a.radius + b.radius;
    (a.center - b.center).norm_squared() < min_dist * min_dist
}

/// Sphere vs sphere contact
pub fn sphere_sphere(a: &Sphere, b: &Sphere) -> Option<ContactInfo> {
    if !sphere_sphere_intersects(a, b) {
        return None;
    }

    let delta = a.center - b.center;
    let distance = delta.norm();
    // Coincident centers have no direction; push A straight up
    let normal = math::safe_normalize(delta, math::up());
    let depth = (a.radius + b.radius) - distance;
    let point = a.center - normal * a.radius;

    Some(ContactInfo::new(normal, depth, point))
}

/// Returns true if a sphere touches or overlaps a box
pub fn sphere_box_intersects(sphere: &Sphere, cuboid: &BoxShape) -> bool {
    let closest = cuboid.get_bounds().closest_point(sphere.center);
    (sphere.center - closest).norm_squared() <= sphere.radius * sphere.radius
}

/// Sphere vs box contact, normal pointing from the box toward the sphere
pub fn sphere_box(sphere: &Sphere, cuboid: &BoxShape) -> Option<ContactInfo> {
    let bounds = cuboid.get_bounds();
    let closest = bounds.closest_point(sphere.center);
    let offset = sphere.center - closest;
    let distance_sq = offset.norm_squared();

    if distance_sq > sphere.radius * sphere.radius {
        return None;
    }

    let distance = distance_sq.sqrt();
    if distance > EPSILON {
        let normal = offset / distance;
        return Some(ContactInfo::new(normal, sphere.radius - distance, closest));
    }

    // Center on or inside the box: leave through the nearest face
    let (normal, face_distance, point) = nearest_face(cuboid, sphere.center);
    Some(ContactInfo::new(normal, sphere.radius + face_distance, point))
}

/// Finds the face of the box closest to an interior point.
///
/// Faces are checked in +X, -X, +Y, -Y, +Z, -Z order and the first minimum wins.
fn nearest_face(cuboid: &BoxShape, point: Vector3) -> (Vector3, f32, Vector3) {
    let bounds = cuboid.get_bounds();
    let mut best_axis = 0;
    let mut best_sign = 1.0;
    let mut best_distance = f32::MAX;

    for axis in 0..3 {
        let to_max = bounds.max[axis] - point[axis];
        let to_min = point[axis] - bounds.min[axis];

        if to_max < best_distance {
            best_axis = axis;
            best_sign = 1.0;
            best_distance = to_max;
        }
        if to_min < best_distance {
            best_axis = axis;
            best_sign = -1.0;
            best_distance = to_min;
        }
    }

    let mut normal = Vector3::zeros();
    normal[best_axis] = best_sign;

    let mut face_point = point;
    face_point[best_axis] = if best_sign > 0.0 { bounds.max[best_axis] } else { bounds.min[best_axis] };

    (normal, best_distance.max(0.0), face_point)
}

/// Returns true if two boxes overlap on all three world axes
pub fn box_box_intersects(a: &BoxShape, b: &BoxShape) -> bool {
    a.get_bounds().intersects(&b.get_bounds())
}

/// Box vs box contact using the separating axis test on the world axes
pub fn box_box(a: &BoxShape, b: &BoxShape) -> Option<ContactInfo> {
    let overlap = a.get_bounds().overlap(&b.get_bounds());

    if overlap.x <= 0.0 || overlap.y <= 0.0 || overlap.z <= 0.0 {
        return None;
    }

    let mut axis = 0;
    for candidate in 1..3 {
        if overlap[candidate] < overlap[axis] {
            axis = candidate;
        }
    }

    let displacement = a.center - b.center;
    let mut normal = Vector3::zeros();
    normal[axis] = if displacement[axis] < 0.0 { -1.0 } else { 1.0 };

    let point = (a.center + b.center) * 0.5;
    Some(ContactInfo::new(normal, overlap[axis], point))
}
