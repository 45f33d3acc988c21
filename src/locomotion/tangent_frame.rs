use crate::math::{self, Vector3, EPSILON};

/// Orthonormal basis on the plane tangent to a surface.
///
/// `forward` and `right` span the tangent plane; `right = forward × up`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TangentFrame {
    /// Forward direction in the tangent plane
    pub forward: Vector3,

    /// Right direction in the tangent plane
    pub right: Vector3,

    /// Surface normal
    pub up: Vector3,
}

impl TangentFrame {
    /// Builds a frame around `up`, aiming `forward` as close to `reference_forward` as the plane allows.
    ///
    /// When the reference is parallel to `up` (looking straight at the pole),
    /// the world axis least aligned with `up` is projected instead.
    pub fn new(up: Vector3, reference_forward: Vector3) -> Self {
        let up = math::safe_normalize(up, math::up());

        let forward = project_onto_plane(reference_forward, up)
            .try_normalize(EPSILON)
            .unwrap_or_else(|| fallback_forward(up));
        let right = forward.cross(&up);

        Self { forward, right, up }
    }

    /// Frame for flat ground with forward along -Z
    pub fn flat() -> Self {
        Self::new(math::up(), Vector3::new(0.0, 0.0, -1.0))
    }

    /// Converts a (forward, right) pair into a world-space tangent vector
    pub fn to_world(&self, forward_amount: f32, right_amount: f32) -> Vector3 {
        self.forward * forward_amount + self.right * right_amount
    }

    /// Component of `v` along `up`
    pub fn radial(&self, v: Vector3) -> f32 {
        v.dot(&self.up)
    }

    /// Component of `v` lying in the tangent plane
    pub fn tangential(&self, v: Vector3) -> Vector3 {
        project_onto_plane(v, self.up)
    }
}

fn project_onto_plane(v: Vector3, normal: Vector3) -> Vector3 {
    v - normal * v.dot(&normal)
}

fn fallback_forward(up: Vector3) -> Vector3 {
    let axis = if up.x.abs() < 0.9 {
        Vector3::new(1.0, 0.0, 0.0)
    } else {
        Vector3::new(0.0, 0.0, 1.0)
    };
    math::safe_normalize(project_onto_plane(axis, up), Vector3::new(0.0, 0.0, 1.0))
}
