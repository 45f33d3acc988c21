use crate::bodies::{body_flags::BodyFlags, EntityLink, Material, RigidBodyType};
use crate::collision::ContactInfo;
use crate::error::PhysicsError;
use crate::math::{self, Vector3};
use crate::shapes::Collider;
use crate::Result;

/// Default cap on downward (negative Y) speed
pub const DEFAULT_MAX_FALL_SPEED: f32 = 50.0;

/// Default speed below which a velocity component is snapped to zero
pub const DEFAULT_REST_VELOCITY_THRESHOLD: f32 = 0.01;

/// A rigid body for physics simulation.
///
/// A body owns exactly one collider whose center always equals the body
/// position. Static bodies have zero inverse mass and never move.
#[derive(Debug, Clone)]
pub struct RigidBody {
    /// The body's position in world space
    position: Vector3,

    /// The body's linear velocity
    linear_velocity: Vector3,

    /// Forces to be integrated in the next step
    accumulated_force: Vector3,

    /// The body's material properties
    material: Material,

    /// The body's collision shape
    collider: Collider,

    /// The body's type (dynamic or static)
    body_type: RigidBodyType,

    /// The body's mass
    mass: f32,

    /// Inverse of the body's mass, zero for static bodies
    inv_mass: f32,

    /// The body's flags
    flags: BodyFlags,

    /// Local "up" written by the active gravity model
    surface_normal: Vector3,

    /// Optional link to the gameplay entity
    link: Option<EntityLink>,

    /// Maximum downward speed along world Y
    max_fall_speed: f32,

    /// Velocity components below this magnitude are zeroed
    rest_velocity_threshold: f32,
}

impl RigidBody {
    /// Creates a new rigid body around the given collider.
    ///
    /// The body position is taken from the collider center. `mass` is ignored
    /// for static bodies.
    pub fn new(collider: Collider, body_type: RigidBodyType, mass: f32) -> Self {
        let (mass, inv_mass, flags) = match body_type {
            RigidBodyType::Dynamic => {
                let inv_mass = if mass > 0.0 { 1.0 / mass } else { 0.0 };
                (
                    mass,
                    inv_mass,
                    BodyFlags::AFFECTED_BY_GRAVITY | BodyFlags::GENERATE_COLLISION_EVENTS,
                )
            }
            RigidBodyType::Static => (0.0, 0.0, BodyFlags::GENERATE_COLLISION_EVENTS),
        };

        Self {
            position: collider.center(),
            linear_velocity: Vector3::zeros(),
            accumulated_force: Vector3::zeros(),
            material: Material::default(),
            collider,
            body_type,
            mass,
            inv_mass,
            flags,
            surface_normal: math::up(),
            link: None,
            max_fall_speed: DEFAULT_MAX_FALL_SPEED,
            rest_velocity_threshold: DEFAULT_REST_VELOCITY_THRESHOLD,
        }
    }

    /// Creates a new dynamic body with the given collider and mass
    pub fn new_dynamic(collider: Collider, mass: f32) -> Self {
        Self::new(collider, RigidBodyType::Dynamic, mass)
    }

    /// Creates a new static body with the given collider
    pub fn new_static(collider: Collider) -> Self {
        Self::new(collider, RigidBodyType::Static, 0.0)
    }

    /// Creates a dynamic sphere body
    pub fn new_sphere(position: Vector3, radius: f32, mass: f32) -> Self {
        Self::new_dynamic(Collider::sphere(position, radius), mass)
    }

    /// Creates a dynamic box body
    pub fn new_box(position: Vector3, half_extents: Vector3, mass: f32) -> Self {
        Self::new_dynamic(Collider::cuboid(position, half_extents), mass)
    }

    /// Creates a static sphere body
    pub fn new_static_sphere(position: Vector3, radius: f32) -> Self {
        Self::new_static(Collider::sphere(position, radius))
    }

    /// Creates a static box body
    pub fn new_static_box(position: Vector3, half_extents: Vector3) -> Self {
        Self::new_static(Collider::cuboid(position, half_extents))
    }

    /// Sets the initial velocity
    pub fn with_velocity(mut self, velocity: Vector3) -> Self {
        self.set_linear_velocity(velocity);
        self
    }

    /// Sets the material
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    /// Sets the restitution, keeping the current friction
    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.material.restitution = restitution;
        self
    }

    /// Sets the friction, keeping the current restitution
    pub fn with_friction(mut self, friction: f32) -> Self {
        self.material.friction = friction;
        self
    }

    /// Sets whether the body is affected by gravity
    pub fn with_gravity(mut self, affected: bool) -> Self {
        self.set_affected_by_gravity(affected);
        self
    }

    /// Links the body to a gameplay entity
    pub fn with_link(mut self, link: EntityLink) -> Self {
        self.link = Some(link);
        self
    }

    /// Sets the maximum downward speed
    pub fn with_max_fall_speed(mut self, speed: f32) -> Self {
        self.max_fall_speed = speed.max(0.0);
        self
    }

    /// Sets the rest velocity threshold used by stabilization
    pub fn with_rest_velocity_threshold(mut self, threshold: f32) -> Self {
        self.rest_velocity_threshold = threshold.max(0.0);
        self
    }

    /// Checks that the body can be registered with a world
    pub fn validate(&self) -> Result<()> {
        if !math::is_finite(&self.position) {
            return Err(PhysicsError::InvalidBody(format!("non-finite position {:?}", self.position)));
        }
        if !math::is_finite(&self.linear_velocity) {
            return Err(PhysicsError::InvalidBody(format!("non-finite velocity {:?}", self.linear_velocity)));
        }
        if !self.collider.has_valid_dimensions() {
            return Err(PhysicsError::InvalidBody(format!(
                "{} collider has non-positive dimensions",
                self.collider.shape_type()
            )));
        }
        if !self.material.is_valid() {
            return Err(PhysicsError::InvalidBody(format!("invalid material {:?}", self.material)));
        }
        match self.body_type {
            RigidBodyType::Dynamic if !(self.mass.is_finite() && self.mass > 0.0) => {
                Err(PhysicsError::InvalidBody(format!("dynamic body needs a positive mass, got {}", self.mass)))
            }
            _ => Ok(()),
        }
    }

    /// Returns the body's position
    pub fn get_position(&self) -> Vector3 {
        self.position
    }

    /// Sets the body's position and moves the collider with it
    pub fn set_position(&mut self, position: Vector3) {
        self.position = position;
        self.collider.set_center(position);
    }

    /// Moves the body by `offset`
    pub fn translate(&mut self, offset: Vector3) {
        self.set_position(self.position + offset);
    }

    /// Returns the body's linear velocity
    pub fn get_linear_velocity(&self) -> Vector3 {
        self.linear_velocity
    }

    /// Sets the body's linear velocity (ignored for static bodies)
    pub fn set_linear_velocity(&mut self, velocity: Vector3) {
        if self.is_static() {
            return;
        }
        self.linear_velocity = velocity;
    }

    /// Returns the force accumulated since the last integration
    pub fn get_accumulated_force(&self) -> Vector3 {
        self.accumulated_force
    }

    /// Returns the body's material
    pub fn get_material(&self) -> &Material {
        &self.material
    }

    /// Sets the body's material
    pub fn set_material(&mut self, material: Material) {
        self.material = material;
    }

    /// Returns the body's collider
    pub fn get_collider(&self) -> &Collider {
        &self.collider
    }

    /// Radius used by the planet model
    pub fn get_bounding_radius(&self) -> f32 {
        self.collider.bounding_radius()
    }

    /// Returns the body's mass
    pub fn get_mass(&self) -> f32 {
        self.mass
    }

    /// Sets the mass of a dynamic body
    pub fn set_mass(&mut self, mass: f32) -> Result<()> {
        if self.is_static() {
            return Err(PhysicsError::InvalidParameter("static bodies have no mass".to_string()));
        }
        if !(mass.is_finite() && mass > 0.0) {
            return Err(PhysicsError::InvalidParameter(format!("mass must be positive, got {}", mass)));
        }
        self.mass = mass;
        self.inv_mass = 1.0 / mass;
        Ok(())
    }

    /// Returns the body's inverse mass
    pub fn get_inverse_mass(&self) -> f32 {
        self.inv_mass
    }

    /// Returns the body type
    pub fn get_body_type(&self) -> RigidBodyType {
        self.body_type
    }

    /// Returns true for static bodies
    pub fn is_static(&self) -> bool {
        self.body_type == RigidBodyType::Static
    }

    /// Returns whether the body is affected by gravity
    pub fn is_affected_by_gravity(&self) -> bool {
        self.flags.contains(BodyFlags::AFFECTED_BY_GRAVITY)
    }

    /// Sets whether the body is affected by gravity (static bodies never are)
    pub fn set_affected_by_gravity(&mut self, affected: bool) {
        self.flags.set(BodyFlags::AFFECTED_BY_GRAVITY, affected && !self.is_static());
    }

    /// Returns whether the body generates collision events
    pub fn generates_collision_events(&self) -> bool {
        self.flags.contains(BodyFlags::GENERATE_COLLISION_EVENTS)
    }

    /// Sets whether the body generates collision events
    pub fn set_generates_collision_events(&mut self, generates: bool) {
        self.flags.set(BodyFlags::GENERATE_COLLISION_EVENTS, generates);
    }

    /// Returns whether the body rested on the ground during the last step
    pub fn is_on_ground(&self) -> bool {
        self.flags.contains(BodyFlags::ON_GROUND)
    }

    /// Sets the ground state. The world recomputes this every step.
    pub fn set_on_ground(&mut self, on_ground: bool) {
        self.flags.set(BodyFlags::ON_GROUND, on_ground);
    }

    /// Returns the local "up" computed by the active gravity model
    pub fn get_surface_normal(&self) -> Vector3 {
        self.surface_normal
    }

    /// Sets the local "up" and mirrors it to the linked entity.
    /// The world recomputes this every step.
    pub fn set_surface_normal(&mut self, normal: Vector3) {
        self.surface_normal = normal;
        if let Some(link) = self.link.as_mut() {
            link.surface_normal = normal;
        }
    }

    /// Returns the entity link, if any
    pub fn get_link(&self) -> Option<&EntityLink> {
        self.link.as_ref()
    }

    /// Returns the entity link, creating a default one if missing
    pub fn link_mut(&mut self) -> &mut EntityLink {
        let normal = self.surface_normal;
        self.link.get_or_insert_with(|| EntityLink {
            surface_normal: normal,
            ..EntityLink::default()
        })
    }

    /// Returns true while the linked entity reports an active jump
    pub fn is_jumping(&self) -> bool {
        self.link.map_or(false, |link| link.is_jumping)
    }

    /// Returns the maximum downward speed
    pub fn get_max_fall_speed(&self) -> f32 {
        self.max_fall_speed
    }

    /// Returns the rest velocity threshold
    pub fn get_rest_velocity_threshold(&self) -> f32 {
        self.rest_velocity_threshold
    }

    /// Accumulates a force for the next integration
    pub fn apply_force(&mut self, force: Vector3) {
        if self.is_static() {
            return;
        }
        self.accumulated_force += force;
    }

    /// Applies an instantaneous change in momentum
    pub fn apply_impulse(&mut self, impulse: Vector3) {
        if self.is_static() {
            return;
        }
        self.linear_velocity += impulse * self.inv_mass;
    }

    /// Integrates accumulated forces into velocity, then clears them
    pub fn integrate_forces(&mut self, dt: f32) {
        if self.is_static() {
            return;
        }

        // F = ma, a = F/m
        let acceleration = self.accumulated_force * self.inv_mass;
        self.linear_velocity += acceleration * dt;

        if self.linear_velocity.y < -self.max_fall_speed {
            self.linear_velocity.y = -self.max_fall_speed;
        }

        self.accumulated_force = Vector3::zeros();
    }

    /// Integrates velocity into position and keeps the collider in sync
    pub fn integrate_velocity(&mut self, dt: f32) {
        if self.is_static() {
            return;
        }

        let position = self.position + self.linear_velocity * dt;
        self.stabilize();
        self.set_position(position);
    }

    /// Removes floating point jitter from the velocity
    fn stabilize(&mut self) {
        let threshold = self.rest_velocity_threshold;

        for axis in 0..3 {
            if self.linear_velocity[axis].abs() < threshold {
                self.linear_velocity[axis] = 0.0;
            }
        }

        if self.is_on_ground() {
            let horizontal = (self.linear_velocity.x.powi(2) + self.linear_velocity.z.powi(2)).sqrt();
            if horizontal < threshold * 2.0 {
                self.linear_velocity.x = 0.0;
                self.linear_velocity.z = 0.0;
            }
        }
    }

    /// Returns true if this body's collider overlaps the other's
    pub fn intersects(&self, other: &RigidBody) -> bool {
        self.collider.intersects(&other.collider)
    }

    /// Returns contact details against another body, normal pointing toward this body
    pub fn check_collision(&self, other: &RigidBody) -> Option<ContactInfo> {
        self.collider.get_collision_info(&other.collider)
    }
}
