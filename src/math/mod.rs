mod aabb;

pub use aabb::Aabb;

/// 3D vector used throughout the engine
pub type Vector3 = nalgebra::Vector3<f32>;

/// Constant for a very small number, used for comparisons
pub const EPSILON: f32 = 1.0e-6;

/// Returns true if the two floating point values are approximately equal
#[inline]
pub fn approx_eq(a: f32, b: f32) -> bool {
    approx::abs_diff_eq!(a, b, epsilon = EPSILON)
}

/// Returns true if the value is approximately zero
#[inline]
pub fn approx_zero(a: f32) -> bool {
    a.abs() < EPSILON
}

/// Normalizes `v`, or returns `fallback` when `v` is too short to have a direction
#[inline]
pub fn safe_normalize(v: Vector3, fallback: Vector3) -> Vector3 {
    v.try_normalize(EPSILON).unwrap_or(fallback)
}

/// Returns true if every component of the vector is finite
#[inline]
pub fn is_finite(v: &Vector3) -> bool {
    v.x.is_finite() && v.y.is_finite() && v.z.is_finite()
}

/// World up axis
#[inline]
pub fn up() -> Vector3 {
    Vector3::new(0.0, 1.0, 0.0)
}
