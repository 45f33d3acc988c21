mod sphere;
mod box_shape;
mod collider;

pub use self::sphere::Sphere;
pub use self::box_shape::BoxShape;
pub use self::collider::Collider;
