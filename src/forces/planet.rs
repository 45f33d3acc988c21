//! Radial gravity around a spherical planet.
//!
//! Bodies are pulled toward the planet center with constant strength (no
//! inverse-square falloff) and held on a shell at
//! `radius + surface_offset + body_radius` by a snapping force.

use crate::bodies::RigidBody;
use crate::error::PhysicsError;
use crate::math::{self, Vector3};
use crate::Result;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Tunables for surface interaction on a planet
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct PlanetConfig {
    /// |distance error| below which a body counts as grounded
    pub ground_threshold: f32,

    /// Height of the resting shell above the planet radius
    pub surface_offset: f32,

    /// Push force per unit of distance error per unit of mass
    pub snap_force: f32,

    /// Multiplier on `snap_force` while the linked entity is jumping
    pub jump_snap_factor: f32,

    /// `min_safe_distance = radius * min_safe_distance_factor`
    pub min_safe_distance_factor: f32,

    /// Distance error above which the push force applies
    pub snap_epsilon: f32,

    /// Velocity multiplier applied every step while grounded
    pub ground_damping: f32,

    /// Additional velocity multiplier while grounded near the south pole
    pub pole_damping: f32,

    /// Angle from straight south (radians) treated as "near the pole"
    pub pole_angle_threshold: f32,

    /// Distance floor for the gravity direction
    pub min_gravity_distance: f32,
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            ground_threshold: 0.25,
            surface_offset: 0.05,
            snap_force: 40.0,
            jump_snap_factor: 0.1,
            min_safe_distance_factor: 0.9,
            snap_epsilon: 0.01,
            ground_damping: 0.98,
            pole_damping: 0.9,
            pole_angle_threshold: 0.2,
            min_gravity_distance: 0.001,
        }
    }
}

/// Outcome of the surface pass for one body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceState {
    /// Whether the body sits within the ground band
    pub on_ground: bool,

    /// `ideal_distance - distance`; positive when below the shell
    pub distance_error: f32,

    /// Outward direction at the body
    pub normal: Vector3,

    /// Depth of an emergency correction performed during the pass
    pub corrected: Option<f32>,
}

/// A spherical radial gravity source
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct PlanetField {
    /// Planet center
    center: Vector3,

    /// Planet radius
    radius: f32,

    /// Gravity acceleration toward the center
    gravity_strength: f32,

    /// Surface interaction tunables
    config: PlanetConfig,
}

impl PlanetField {
    /// Creates a planet with default surface tunables
    pub fn new(center: Vector3, radius: f32, gravity_strength: f32) -> Self {
        Self {
            center,
            radius,
            gravity_strength,
            config: PlanetConfig::default(),
        }
    }

    /// Replaces the surface tunables
    pub fn with_config(mut self, config: PlanetConfig) -> Self {
        self.config = config;
        self
    }

    /// Checks the planet parameters
    pub fn validate(&self) -> Result<()> {
        if !math::is_finite(&self.center) {
            return Err(PhysicsError::InvalidParameter(format!("non-finite planet center {:?}", self.center)));
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(PhysicsError::InvalidParameter(format!("planet radius must be positive, got {}", self.radius)));
        }
        if !(self.gravity_strength.is_finite() && self.gravity_strength >= 0.0) {
            return Err(PhysicsError::InvalidParameter(format!(
                "planet gravity must be non-negative, got {}",
                self.gravity_strength
            )));
        }
        let factor = self.config.min_safe_distance_factor;
        if !(factor > 0.0 && factor <= 1.0) {
            return Err(PhysicsError::InvalidParameter(format!(
                "min_safe_distance_factor must be in (0, 1], got {}",
                factor
            )));
        }
        if self.config.ground_threshold < 0.0 || self.config.snap_force < 0.0 {
            return Err(PhysicsError::InvalidParameter(
                "ground_threshold and snap_force must be non-negative".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns the planet center
    pub fn get_center(&self) -> Vector3 {
        self.center
    }

    /// Moves the planet center
    pub fn set_center(&mut self, center: Vector3) {
        self.center = center;
    }

    /// Returns the planet radius
    pub fn get_radius(&self) -> f32 {
        self.radius
    }

    /// Returns the gravity acceleration
    pub fn get_gravity_strength(&self) -> f32 {
        self.gravity_strength
    }

    /// Returns the surface tunables
    pub fn get_config(&self) -> &PlanetConfig {
        &self.config
    }

    /// Distance from the center below which a body is teleported out
    pub fn min_safe_distance(&self) -> f32 {
        self.radius * self.config.min_safe_distance_factor
    }

    /// Resting distance from the center for a body of the given radius
    pub fn ideal_distance(&self, body_radius: f32) -> f32 {
        self.radius + self.config.surface_offset + body_radius
    }

    /// Outward unit normal at `position` (+Y at the exact center)
    pub fn surface_normal_at(&self, position: Vector3) -> Vector3 {
        math::safe_normalize(position - self.center, math::up())
    }

    /// Direction of the pull at `position`, zero at the exact center
    pub fn gravity_direction(&self, position: Vector3) -> Vector3 {
        let to_center = self.center - position;
        let distance = to_center.norm().max(self.config.min_gravity_distance);
        to_center / distance
    }

    /// Point on the resting shell directly above `position`
    pub fn project_to_surface(&self, position: Vector3, body_radius: f32) -> Vector3 {
        self.center + self.surface_normal_at(position) * self.ideal_distance(body_radius)
    }

    /// Applies the radial pull to a body that uses gravity
    pub fn apply_gravity(&self, body: &mut RigidBody) {
        if body.is_static() || !body.is_affected_by_gravity() {
            return;
        }
        let force = self.gravity_direction(body.get_position()) * (body.get_mass() * self.gravity_strength);
        body.apply_force(force);
    }

    /// Teleports a body found deep inside the planet back out.
    ///
    /// Returns the penetration depth below `min_safe_distance` when a
    /// correction was made. The inward radial velocity is removed as well.
    pub fn enforce_safe_distance(&self, body: &mut RigidBody) -> Option<f32> {
        if body.is_static() {
            return None;
        }

        let from_center = body.get_position() - self.center;
        let distance = from_center.norm();
        let min_safe = self.min_safe_distance();

        if distance >= min_safe {
            return None;
        }

        let normal = math::safe_normalize(from_center, math::up());
        body.set_position(self.center + normal * (min_safe + body.get_bounding_radius()));
        remove_inward_velocity(body, normal);

        Some(min_safe - distance)
    }

    /// Surface interaction pass for one body, run after force integration.
    ///
    /// Writes the surface normal and ground state, and queues the snapping
    /// force for the next integration.
    pub fn resolve_surface(&self, body: &mut RigidBody) -> SurfaceState {
        let corrected = self.enforce_safe_distance(body);

        let from_center = body.get_position() - self.center;
        let distance = from_center.norm();
        let normal = math::safe_normalize(from_center, math::up());
        body.set_surface_normal(normal);

        let distance_error = self.ideal_distance(body.get_bounding_radius()) - distance;

        if body.is_static() || !body.is_affected_by_gravity() {
            body.set_on_ground(false);
            return SurfaceState { on_ground: false, distance_error, normal, corrected };
        }

        let on_ground = distance_error.abs() < self.config.ground_threshold;

        if distance_error > self.config.snap_epsilon {
            let mut push_factor = self.config.snap_force;
            if body.is_jumping() {
                push_factor *= self.config.jump_snap_factor;
            }
            body.apply_force(normal * (distance_error * push_factor * body.get_mass()));
            remove_inward_velocity(body, normal);
        }

        if on_ground {
            remove_inward_velocity(body, normal);

            let mut damping = self.config.ground_damping;
            let south = Vector3::new(0.0, -1.0, 0.0);
            if normal.dot(&south) > self.config.pole_angle_threshold.cos() {
                damping *= self.config.pole_damping;
            }
            body.set_linear_velocity(body.get_linear_velocity() * damping);
        }

        body.set_on_ground(on_ground);

        SurfaceState { on_ground, distance_error, normal, corrected }
    }
}

/// Cancels the velocity component pointing against `normal`
fn remove_inward_velocity(body: &mut RigidBody, normal: Vector3) {
    let velocity = body.get_linear_velocity();
    let radial = velocity.dot(&normal);
    if radial < 0.0 {
        body.set_linear_velocity(velocity - normal * radial);
    }
}
