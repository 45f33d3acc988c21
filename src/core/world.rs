use log::{debug, trace, warn};

use crate::bodies::RigidBody;
use crate::collision::{ContactInfo, ContactResponse, ContactSolver, ImpulseSolver};
use crate::core::{
    BodyEvent, BodyEventType, BodyHandle, BodyStorage, CollisionEvent, EventQueue,
    FixedStepScheduler, PhysicsObserver, SimulationConfig, Storage,
};
use crate::error::PhysicsError;
use crate::forces::{PlanetField, UniformGravity};
use crate::math::Vector3;
use crate::Result;

/// The physics world: owns every body and drives the fixed-step simulation.
///
/// The world runs in one of two gravity modes. With a planet installed,
/// bodies are pulled toward the planet center and held on its surface.
/// Without one, a uniform gravity vector applies and bodies rest on a flat
/// floor at `ground_height`. Switching modes takes effect on the next
/// sub-step with no blending.
pub struct PhysicsWorld {
    /// Dynamic bodies, in insertion order
    bodies: BodyStorage<RigidBody>,

    /// Static bodies, in insertion order
    static_bodies: BodyStorage<RigidBody>,

    /// The radial gravity source, if any
    planet: Option<PlanetField>,

    /// Gravity used when no planet is installed
    gravity: UniformGravity,

    /// Configuration for the simulation
    config: SimulationConfig,

    /// Fixed-step accumulator
    scheduler: FixedStepScheduler,

    /// Contact solver
    solver: ImpulseSolver,

    /// Queue of physics events for the current update
    events: EventQueue,

    /// Optional synchronous event listener
    observer: Option<Box<dyn PhysicsObserver>>,

    /// Body preserved by `clear`
    player: Option<BodyHandle>,

    /// Next handle to issue
    next_handle: u32,

    /// The total elapsed simulation time
    time: f32,
}

impl PhysicsWorld {
    /// Creates a new physics world with default settings
    pub fn new() -> Self {
        Self::build(SimulationConfig::default())
    }

    /// Creates a new physics world with the given configuration
    pub fn with_config(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: SimulationConfig) -> Self {
        Self {
            bodies: BodyStorage::new(),
            static_bodies: BodyStorage::new(),
            planet: None,
            gravity: UniformGravity::downward(config.gravity),
            scheduler: FixedStepScheduler::new(config.fixed_time_step(), config.max_substeps, config.max_frame_delta),
            solver: ImpulseSolver::new(config.correction_factor),
            events: EventQueue::new(),
            observer: None,
            player: None,
            next_handle: 1, // Start at 1, so 0 never names a body
            time: 0.0,
            config,
        }
    }

    /// Returns the current simulation time
    pub fn get_time(&self) -> f32 {
        self.time
    }

    /// Returns a reference to the simulation configuration
    pub fn get_config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Replaces the configuration. Pending accumulated time is dropped.
    pub fn set_config(&mut self, config: SimulationConfig) -> Result<()> {
        config.validate()?;
        self.gravity = UniformGravity::downward(config.gravity);
        self.scheduler = FixedStepScheduler::new(config.fixed_time_step(), config.max_substeps, config.max_frame_delta);
        self.solver = ImpulseSolver::new(config.correction_factor);
        self.config = config;
        Ok(())
    }

    /// Returns the time waiting in the accumulator
    pub fn get_accumulator(&self) -> f32 {
        self.scheduler.get_accumulator()
    }

    /// Sets the uniform gravity vector (unused while a planet is installed)
    pub fn set_gravity(&mut self, gravity: Vector3) {
        self.gravity.set_gravity(gravity);
    }

    /// Gets the uniform gravity vector
    pub fn get_gravity(&self) -> Vector3 {
        self.gravity.get_gravity()
    }

    /// Validates and registers a body, returning its handle
    pub fn add_body(&mut self, body: RigidBody) -> Result<BodyHandle> {
        body.validate()?;

        let handle = BodyHandle(self.next_handle);
        self.next_handle += 1;

        if body.is_static() {
            self.static_bodies.insert(handle, body);
        } else {
            self.bodies.insert(handle, body);
        }
        debug!("added {} ({} dynamic, {} static)", handle, self.bodies.len(), self.static_bodies.len());

        self.emit_body_event(handle, BodyEventType::Added);
        Ok(handle)
    }

    /// Creates a dynamic sphere with the configured default material
    pub fn spawn_sphere(&mut self, position: Vector3, radius: f32, mass: f32) -> Result<BodyHandle> {
        let body = RigidBody::new_sphere(position, radius, mass).with_material(self.config.default_material());
        self.add_body(body)
    }

    /// Creates a dynamic box with the configured default material
    pub fn spawn_box(&mut self, position: Vector3, half_extents: Vector3, mass: f32) -> Result<BodyHandle> {
        let body = RigidBody::new_box(position, half_extents, mass).with_material(self.config.default_material());
        self.add_body(body)
    }

    /// Removes a body from whichever list holds it.
    ///
    /// Removing an unknown or already removed handle does nothing.
    pub fn remove_body(&mut self, handle: BodyHandle) -> Option<RigidBody> {
        let body = self.bodies.remove(handle).or_else(|| self.static_bodies.remove(handle))?;

        if self.player == Some(handle) {
            self.player = None;
        }
        debug!("removed {}", handle);

        self.emit_body_event(handle, BodyEventType::Removed);
        Some(body)
    }

    /// Returns whether the handle names a registered body
    pub fn contains_body(&self, handle: BodyHandle) -> bool {
        self.bodies.contains(handle) || self.static_bodies.contains(handle)
    }

    /// Gets a reference to a rigid body by its handle
    pub fn get_body(&self, handle: BodyHandle) -> Result<&RigidBody> {
        match self.bodies.get(handle) {
            Some(body) => Ok(body),
            None => self.static_bodies.get_body(handle),
        }
    }

    /// Gets a mutable reference to a rigid body by its handle
    pub fn get_body_mut(&mut self, handle: BodyHandle) -> Result<&mut RigidBody> {
        match self.bodies.get_mut(handle) {
            Some(body) => Ok(body),
            None => self.static_bodies.get_body_mut(handle),
        }
    }

    /// Iterates over the dynamic bodies in insertion order
    pub fn dynamic_bodies(&self) -> impl Iterator<Item = (BodyHandle, &RigidBody)> {
        self.bodies.iter()
    }

    /// Iterates over the static bodies in insertion order
    pub fn static_bodies(&self) -> impl Iterator<Item = (BodyHandle, &RigidBody)> {
        self.static_bodies.iter()
    }

    /// Installs the radial gravity source, returning the one it replaced
    pub fn set_planet_body(&mut self, planet: PlanetField) -> Result<Option<PlanetField>> {
        planet.validate()?;

        let previous = self.planet.replace(planet);
        debug!(
            "{} planet at {:?} (radius {}, gravity {})",
            if previous.is_some() { "replaced" } else { "installed" },
            planet.get_center(),
            planet.get_radius(),
            planet.get_gravity_strength()
        );
        Ok(previous)
    }

    /// Removes the radial gravity source, switching back to flat-world mode
    pub fn remove_planet_body(&mut self) -> Option<PlanetField> {
        let previous = self.planet.take();
        if previous.is_some() {
            debug!("removed planet, back to uniform gravity");
        }
        previous
    }

    /// Returns the installed planet, if any
    pub fn get_planet_body(&self) -> Option<&PlanetField> {
        self.planet.as_ref()
    }

    /// Designates the body that survives `clear`
    pub fn set_player_body(&mut self, handle: BodyHandle) -> Result<()> {
        if !self.contains_body(handle) {
            return Err(PhysicsError::ResourceNotFound(format!("Body with handle {:?} not found", handle)));
        }
        self.player = Some(handle);
        Ok(())
    }

    /// Returns the designated player body
    pub fn get_player_body(&self) -> Option<BodyHandle> {
        self.player
    }

    /// Installs an observer notified of every event as it is produced
    pub fn set_observer(&mut self, observer: Box<dyn PhysicsObserver>) {
        self.observer = Some(observer);
    }

    /// Detaches and returns the observer
    pub fn take_observer(&mut self) -> Option<Box<dyn PhysicsObserver>> {
        self.observer.take()
    }

    /// Returns a reference to the event queue
    pub fn get_events(&self) -> &EventQueue {
        &self.events
    }

    /// Returns a mutable reference to the event queue
    pub fn get_events_mut(&mut self) -> &mut EventQueue {
        &mut self.events
    }

    /// Returns the number of bodies in the world
    pub fn body_count(&self) -> usize {
        self.bodies.len() + self.static_bodies.len()
    }

    /// Returns the number of dynamic bodies
    pub fn dynamic_body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Returns the number of static bodies
    pub fn static_body_count(&self) -> usize {
        self.static_bodies.len()
    }

    /// Advances the simulation by one rendered frame.
    ///
    /// Clears the event queue, then runs the sub-steps the accumulator
    /// allows. Returns the number of sub-steps executed.
    pub fn update(&mut self, frame_delta: f32) -> u32 {
        self.events.clear();

        let start_positions: Vec<(BodyHandle, Vector3)> =
            self.bodies.iter().map(|(handle, body)| (handle, body.get_position())).collect();

        let plan = self.scheduler.advance(frame_delta);
        let fixed_time_step = self.scheduler.get_fixed_time_step();

        for _ in 0..plan.full_steps {
            self.step(fixed_time_step);
        }

        if let Some(partial) = plan.partial_step {
            warn!(
                "frame needed more than {} sub-steps, running a partial step of {:.4}s",
                plan.full_steps, partial
            );
            self.step(partial);
        }

        trace!(
            "update covered {:.4}s in {} sub-steps",
            plan.simulated_time(fixed_time_step),
            plan.step_count()
        );

        for (handle, start) in start_positions {
            let moved = self.bodies.get(handle).map_or(false, |body| body.get_position() != start);
            if moved {
                self.emit_body_event(handle, BodyEventType::Moved);
            }
        }

        plan.step_count()
    }

    /// Runs exactly one sub-step of length `dt`, bypassing the accumulator.
    ///
    /// Events produced are appended to the queue without clearing it.
    pub fn step(&mut self, dt: f32) {
        trace!("sub-step dt={} ({} dynamic bodies)", dt, self.bodies.len());

        let was_grounded: Vec<(BodyHandle, bool)> =
            self.bodies.iter().map(|(handle, body)| (handle, body.is_on_ground())).collect();

        // 1. Emergency planet penetration correction
        if self.planet.is_some() {
            self.correct_planet_penetration();
        }

        // 2. Velocity -> position
        for (_, body) in self.bodies.iter_mut() {
            body.integrate_velocity(dt);
        }

        // 3. Gravity, then force -> velocity
        self.apply_gravity();
        for (_, body) in self.bodies.iter_mut() {
            body.integrate_forces(dt);
        }

        // 4. Planet surface interaction
        if self.planet.is_some() {
            self.resolve_planet_surface();
        }

        // 5. Pairwise collisions
        self.resolve_collisions();

        // 6. Flat-world floor
        if self.planet.is_none() {
            self.clamp_to_ground();
        }

        for (handle, grounded_before) in was_grounded {
            let on_ground = match self.bodies.get(handle) {
                Some(body) => body.is_on_ground(),
                None => continue,
            };
            if on_ground != grounded_before {
                self.emit_body_event(handle, BodyEventType::GroundChanged { on_ground });
            }
        }

        self.time += dt;
    }

    /// Destroys every body except the player, removes the planet and resets time
    pub fn clear(&mut self) {
        let player = self.player;
        self.bodies.retain(|handle, _| Some(handle) == player);
        self.static_bodies.retain(|handle, _| Some(handle) == player);

        self.planet = None;
        self.events.clear();
        self.scheduler.reset();
        self.time = 0.0;

        debug!(
            "cleared world, kept player {:?}",
            player.filter(|handle| self.contains_body(*handle))
        );
    }

    fn correct_planet_penetration(&mut self) {
        let Some(planet) = self.planet else { return };
        let mut corrected = Vec::new();

        for (handle, body) in self.bodies.iter_mut() {
            let distance = (body.get_position() - planet.get_center()).norm();
            if let Some(depth) = planet.enforce_safe_distance(body) {
                warn!(
                    "{} was {:.3} from the planet center, moved out to {:.3}",
                    handle,
                    distance,
                    (body.get_position() - planet.get_center()).norm()
                );
                corrected.push((handle, depth));
            }
        }

        for (handle, depth) in corrected {
            self.emit_body_event(handle, BodyEventType::PenetrationCorrected { depth });
        }
    }

    fn apply_gravity(&mut self) {
        match self.planet {
            Some(planet) => {
                for (_, body) in self.bodies.iter_mut() {
                    planet.apply_gravity(body);
                }
            }
            None => {
                let up = self.gravity.up();
                for (_, body) in self.bodies.iter_mut() {
                    body.set_on_ground(false);
                    body.set_surface_normal(up);
                    self.gravity.apply(body);
                }
            }
        }
    }

    fn resolve_planet_surface(&mut self) {
        let Some(planet) = self.planet else { return };
        let mut corrected = Vec::new();

        for (handle, body) in self.bodies.iter_mut() {
            let state = planet.resolve_surface(body);
            if let Some(depth) = state.corrected {
                warn!("{} sank {:.3} below the safe distance during the step", handle, depth);
                corrected.push((handle, depth));
            }
        }

        for (handle, depth) in corrected {
            self.emit_body_event(handle, BodyEventType::PenetrationCorrected { depth });
        }
    }

    fn resolve_collisions(&mut self) {
        let solver = self.solver;
        let threshold = self.config.ground_normal_threshold;
        let handles = self.bodies.handles();
        let mut collisions = Vec::new();

        // Dynamic vs dynamic
        for (i, &handle_a) in handles.iter().enumerate() {
            for &handle_b in &handles[i + 1..] {
                let (Some(a), Some(b)) = (self.bodies.get(handle_a), self.bodies.get(handle_b)) else {
                    continue;
                };
                let Some(contact) = a.check_collision(b) else { continue };
                let response = solver.resolve(a, b, &contact);
                let notify = a.generates_collision_events() || b.generates_collision_events();

                if let Some(a) = self.bodies.get_mut(handle_a) {
                    apply_response(a, response.map(|r| (r.velocity_delta_a, r.correction_a)));
                    ground_from_contact(a, contact.normal, threshold);
                }
                if let Some(b) = self.bodies.get_mut(handle_b) {
                    apply_response(b, response.map(|r| (r.velocity_delta_b, r.correction_b)));
                    ground_from_contact(b, -contact.normal, threshold);
                }

                if notify {
                    collisions.push(collision_event(handle_a, handle_b, contact, response));
                }
            }
        }

        // Dynamic vs static
        for (handle_a, a) in self.bodies.iter_mut() {
            for (handle_b, b) in self.static_bodies.iter() {
                let Some(contact) = a.check_collision(b) else { continue };
                let response = solver.resolve(a, b, &contact);
                let notify = a.generates_collision_events() || b.generates_collision_events();

                apply_response(a, response.map(|r| (r.velocity_delta_a, r.correction_a)));
                ground_from_contact(a, contact.normal, threshold);

                if notify {
                    collisions.push(collision_event(handle_a, handle_b, contact, response));
                }
            }
        }

        for event in collisions {
            if let Some(observer) = self.observer.as_mut() {
                observer.on_collision(&event);
            }
            self.events.add_collision_event(event);
        }
    }

    fn clamp_to_ground(&mut self) {
        let ground_height = self.config.ground_height;
        let tolerance = self.config.ground_snap_tolerance;

        for (_, body) in self.bodies.iter_mut() {
            let extent_below = body.get_collider().extent_below();
            let position = body.get_position();
            let bottom = position.y - extent_below;
            if bottom > ground_height + tolerance {
                continue;
            }

            if bottom < ground_height {
                body.set_position(Vector3::new(position.x, ground_height + extent_below, position.z));
            }
            let mut velocity = body.get_linear_velocity();
            if velocity.y < 0.0 {
                velocity.y = 0.0;
                body.set_linear_velocity(velocity);
            }
            body.set_on_ground(true);
        }
    }

    fn emit_body_event(&mut self, body: BodyHandle, event_type: BodyEventType) {
        let event = BodyEvent { event_type, body };
        if let Some(observer) = self.observer.as_mut() {
            observer.on_body_event(&event);
        }
        self.events.add_body_event(event);
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Adds a velocity change and positional correction to a body
fn apply_response(body: &mut RigidBody, response: Option<(Vector3, Vector3)>) {
    if let Some((velocity_delta, correction)) = response {
        body.set_linear_velocity(body.get_linear_velocity() + velocity_delta);
        body.translate(correction);
    }
}

/// Grounds a body whose contact normal (pointing toward it) aligns with its local up
fn ground_from_contact(body: &mut RigidBody, normal_toward_body: Vector3, threshold: f32) {
    if normal_toward_body.dot(&body.get_surface_normal()) > threshold {
        body.set_on_ground(true);
    }
}

fn collision_event(
    body_a: BodyHandle,
    body_b: BodyHandle,
    contact: ContactInfo,
    response: Option<ContactResponse>,
) -> CollisionEvent {
    CollisionEvent {
        body_a,
        body_b,
        contact,
        normal_impulse: response.map_or(0.0, |r| r.normal_impulse),
    }
}
