use planet_physics::math::{self, Aabb, Vector3};
use approx::assert_relative_eq;

#[test]
fn test_aabb_from_center() {
    let aabb = Aabb::from_center_half_extents(Vector3::new(1.0, 2.0, 3.0), Vector3::new(0.5, 1.0, 1.5));

    assert_eq!(aabb.min, Vector3::new(0.5, 1.0, 1.5));
    assert_eq!(aabb.max, Vector3::new(1.5, 3.0, 4.5));
    assert_eq!(aabb.center(), Vector3::new(1.0, 2.0, 3.0));
    assert_eq!(aabb.half_extents(), Vector3::new(0.5, 1.0, 1.5));
}

#[test]
fn test_aabb_overlap_and_intersection() {
    let a = Aabb::new(Vector3::new(-1.0, -1.0, -1.0), Vector3::new(1.0, 1.0, 1.0));
    let b = a.translated(Vector3::new(1.5, 0.0, 0.0));

    let overlap = a.overlap(&b);
    assert_relative_eq!(overlap.x, 0.5);
    assert_relative_eq!(overlap.y, 2.0);
    assert_relative_eq!(overlap.z, 2.0);
    assert!(a.intersects(&b));

    // Touching faces share no volume
    let touching = a.translated(Vector3::new(2.0, 0.0, 0.0));
    assert_relative_eq!(a.overlap(&touching).x, 0.0);
    assert!(!a.intersects(&touching));

    let apart = a.translated(Vector3::new(0.0, 3.0, 0.0));
    assert!(a.overlap(&apart).y < 0.0);
    assert!(!a.intersects(&apart));
}

#[test]
fn test_aabb_points() {
    let aabb = Aabb::new(Vector3::new(-1.0, -1.0, -1.0), Vector3::new(1.0, 1.0, 1.0));

    assert!(aabb.contains_point(Vector3::zeros()));
    assert!(aabb.contains_point(Vector3::new(1.0, 1.0, 1.0)));
    assert!(!aabb.contains_point(Vector3::new(1.1, 0.0, 0.0)));

    assert_eq!(aabb.closest_point(Vector3::new(3.0, 0.5, -4.0)), Vector3::new(1.0, 0.5, -1.0));
    assert_eq!(aabb.closest_point(Vector3::new(0.2, 0.3, 0.4)), Vector3::new(0.2, 0.3, 0.4));
}

#[test]
fn test_safe_normalize() {
    let fallback = Vector3::new(0.0, 0.0, 1.0);

    let n = math::safe_normalize(Vector3::new(3.0, 0.0, 4.0), fallback);
    assert_relative_eq!(n.norm(), 1.0);
    assert_relative_eq!(n.x, 0.6);
    assert_relative_eq!(n.z, 0.8);

    assert_eq!(math::safe_normalize(Vector3::zeros(), fallback), fallback);
    assert_eq!(math::safe_normalize(Vector3::new(1e-9, 0.0, 0.0), fallback), fallback);
}

#[test]
fn test_scalar_helpers() {
    assert!(math::approx_eq(1.0, 1.0 + 1e-7));
    assert!(!math::approx_eq(1.0, 1.001));
    assert!(math::approx_zero(-1e-7));
    assert!(!math::approx_zero(0.01));

    assert!(math::is_finite(&Vector3::new(1.0, 2.0, 3.0)));
    assert!(!math::is_finite(&Vector3::new(1.0, f32::NAN, 3.0)));
    assert!(!math::is_finite(&Vector3::new(f32::INFINITY, 0.0, 0.0)));
}
