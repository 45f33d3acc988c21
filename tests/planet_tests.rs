use planet_physics::{
    PhysicsError, PhysicsWorld, PlanetConfig, PlanetField, RigidBody,
    core::BodyEventType,
    math::Vector3,
};
use approx::assert_relative_eq;

const RADIUS: f32 = 20.0;
const GRAVITY: f32 = 9.81;
const DT: f32 = 1.0 / 60.0;

fn planet() -> PlanetField {
    PlanetField::new(Vector3::zeros(), RADIUS, GRAVITY)
}

fn planet_world() -> PhysicsWorld {
    let mut world = PhysicsWorld::new();
    world.set_planet_body(planet()).unwrap();
    world
}

#[test]
fn test_planet_geometry_helpers() {
    let planet = planet();

    assert_relative_eq!(planet.min_safe_distance(), 18.0);
    assert_relative_eq!(planet.ideal_distance(0.5), 20.55, epsilon = 1e-5);

    assert_relative_eq!(planet.gravity_direction(Vector3::new(0.0, 30.0, 0.0)), Vector3::new(0.0, -1.0, 0.0));
    assert_relative_eq!(planet.gravity_direction(Vector3::new(-5.0, 0.0, 0.0)), Vector3::new(1.0, 0.0, 0.0));
    assert_eq!(planet.gravity_direction(Vector3::zeros()), Vector3::zeros());

    assert_relative_eq!(planet.surface_normal_at(Vector3::new(0.0, 0.0, 7.0)), Vector3::new(0.0, 0.0, 1.0));
    assert_eq!(planet.surface_normal_at(Vector3::zeros()), Vector3::new(0.0, 1.0, 0.0));

    let snapped = planet.project_to_surface(Vector3::new(10.0, 0.0, 0.0), 0.5);
    assert_relative_eq!(snapped, Vector3::new(20.55, 0.0, 0.0), epsilon = 1e-5);
}

#[test]
fn test_planet_validation() {
    assert!(planet().validate().is_ok());

    let flat = PlanetField::new(Vector3::zeros(), 0.0, GRAVITY);
    assert!(matches!(flat.validate(), Err(PhysicsError::InvalidParameter(_))));

    let repulsive = PlanetField::new(Vector3::zeros(), RADIUS, -1.0);
    assert!(matches!(repulsive.validate(), Err(PhysicsError::InvalidParameter(_))));

    let config = PlanetConfig { min_safe_distance_factor: 1.5, ..PlanetConfig::default() };
    let bad_factor = planet().with_config(config);
    assert!(bad_factor.validate().is_err());

    let mut world = PhysicsWorld::new();
    assert!(world.set_planet_body(flat).is_err());
    assert!(world.get_planet_body().is_none());
}

#[test]
fn test_gravity_pulls_toward_center() {
    let planet = planet();
    let mut body = RigidBody::new_sphere(Vector3::new(30.0, 0.0, 0.0), 0.5, 2.0);

    planet.apply_gravity(&mut body);
    assert_relative_eq!(body.get_accumulated_force(), Vector3::new(-2.0 * GRAVITY, 0.0, 0.0), epsilon = 1e-4);

    // Constant strength, no falloff with distance
    let mut far = RigidBody::new_sphere(Vector3::new(300.0, 0.0, 0.0), 0.5, 2.0);
    planet.apply_gravity(&mut far);
    assert_relative_eq!(far.get_accumulated_force().norm(), 2.0 * GRAVITY, epsilon = 1e-4);

    let mut floating = RigidBody::new_sphere(Vector3::new(30.0, 0.0, 0.0), 0.5, 2.0).with_gravity(false);
    planet.apply_gravity(&mut floating);
    assert_eq!(floating.get_accumulated_force(), Vector3::zeros());
}

#[test]
fn test_body_on_shell_stays_put() {
    let mut world = planet_world();
    let start = Vector3::new(0.0, 20.55, 0.0);
    let handle = world.spawn_sphere(start, 0.5, 1.0).unwrap();

    for _ in 0..100 {
        world.step(DT);
    }

    let body = world.get_body(handle).unwrap();
    let distance = body.get_position().norm();
    assert!((distance - 20.55).abs() < PlanetConfig::default().ground_threshold);
    assert!(body.is_on_ground());
    assert_relative_eq!(body.get_surface_normal(), Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-5);
}

#[test]
fn test_body_on_shell_off_axis_stays_grounded() {
    let mut world = planet_world();
    let direction = Vector3::new(1.0, -2.0, 3.0).normalize();
    let handle = world.spawn_sphere(direction * 20.55, 0.5, 1.0).unwrap();

    for _ in 0..100 {
        world.update(DT);
    }

    let body = world.get_body(handle).unwrap();
    let distance = body.get_position().norm();
    assert!((distance - 20.55).abs() < PlanetConfig::default().ground_threshold);
    assert!(body.is_on_ground());
    assert_relative_eq!(body.get_surface_normal(), direction, epsilon = 1e-3);
}

#[test]
fn test_deep_body_is_teleported_out() {
    let mut world = planet_world();
    let handle = world
        .add_body(RigidBody::new_sphere(Vector3::new(17.0, 0.0, 0.0), 0.5, 1.0).with_velocity(Vector3::new(-3.0, 0.0, 0.0)))
        .unwrap();

    assert_eq!(world.update(DT), 1);

    let body = world.get_body(handle).unwrap();
    let normal = body.get_position().normalize();
    assert!(body.get_position().norm() >= 18.0);
    assert!(body.get_linear_velocity().dot(&normal) >= 0.0);

    let corrections = world
        .get_events()
        .get_body_events_where(|kind| matches!(kind, BodyEventType::PenetrationCorrected { .. }));
    assert_eq!(corrections.len(), 1);
    assert_eq!(corrections[0].body, handle);
    match corrections[0].event_type {
        BodyEventType::PenetrationCorrected { depth } => assert_relative_eq!(depth, 1.0, epsilon = 1e-5),
        _ => unreachable!(),
    }
}

#[test]
fn test_safety_check_applies_to_floating_bodies() {
    let planet = planet();
    let mut body = RigidBody::new_box(Vector3::new(0.0, 0.0, 5.0), Vector3::new(0.5, 1.0, 0.25), 1.0).with_gravity(false);

    let depth = planet.enforce_safe_distance(&mut body);
    assert_relative_eq!(depth.unwrap(), 13.0);
    // Box radius is the largest half-extent
    assert_relative_eq!(body.get_position(), Vector3::new(0.0, 0.0, 19.0), epsilon = 1e-5);

    assert!(planet.enforce_safe_distance(&mut body).is_none());
}

#[test]
fn test_sunken_body_is_pushed_out() {
    let planet = planet();
    let mut body = RigidBody::new_sphere(Vector3::new(0.0, 19.55, 0.0), 0.5, 1.0);

    let state = planet.resolve_surface(&mut body);
    assert_relative_eq!(state.distance_error, 1.0, epsilon = 1e-4);
    assert!(!state.on_ground);
    assert!(state.corrected.is_none());
    // err * snap_force * mass along the outward normal
    assert_relative_eq!(body.get_accumulated_force(), Vector3::new(0.0, 40.0, 0.0), epsilon = 1e-2);

    let mut jumping = RigidBody::new_sphere(Vector3::new(0.0, 19.55, 0.0), 0.5, 1.0);
    jumping.link_mut().is_jumping = true;
    planet.resolve_surface(&mut jumping);
    assert_relative_eq!(jumping.get_accumulated_force(), Vector3::new(0.0, 4.0, 0.0), epsilon = 1e-2);
}

#[test]
fn test_sunken_body_rises_in_world() {
    let mut world = planet_world();
    let handle = world.spawn_sphere(Vector3::new(0.0, 0.0, -19.5), 0.5, 1.0).unwrap();

    for _ in 0..10 {
        world.step(DT);
    }

    let distance = world.get_body(handle).unwrap().get_position().norm();
    assert!(distance > 19.5);
}

#[test]
fn test_grounded_damping_and_pole_damping() {
    let planet = planet();

    let mut north = RigidBody::new_sphere(Vector3::new(0.0, 20.55, 0.0), 0.5, 1.0).with_velocity(Vector3::new(1.0, 0.0, 0.0));
    let state = planet.resolve_surface(&mut north);
    assert!(state.on_ground);
    assert_relative_eq!(north.get_linear_velocity().x, 0.98, epsilon = 1e-5);

    let mut south = RigidBody::new_sphere(Vector3::new(0.0, -20.55, 0.0), 0.5, 1.0).with_velocity(Vector3::new(1.0, 0.0, 0.0));
    planet.resolve_surface(&mut south);
    assert!(south.is_on_ground());
    assert_relative_eq!(south.get_linear_velocity().x, 0.98 * 0.9, epsilon = 1e-5);
    assert_relative_eq!(south.get_surface_normal(), Vector3::new(0.0, -1.0, 0.0), epsilon = 1e-5);
}

#[test]
fn test_grounded_body_loses_inward_velocity_only() {
    let planet = planet();
    let mut body = RigidBody::new_sphere(Vector3::new(20.55, 0.0, 0.0), 0.5, 1.0).with_velocity(Vector3::new(-2.0, 0.0, 1.0));

    planet.resolve_surface(&mut body);

    let velocity = body.get_linear_velocity();
    assert_relative_eq!(velocity.x, 0.0, epsilon = 1e-6);
    assert_relative_eq!(velocity.z, 0.98, epsilon = 1e-5);

    // Outward motion is left alone
    let mut leaving = RigidBody::new_sphere(Vector3::new(20.55, 0.0, 0.0), 0.5, 1.0).with_velocity(Vector3::new(2.0, 0.0, 0.0));
    planet.resolve_surface(&mut leaving);
    assert_relative_eq!(leaving.get_linear_velocity().x, 2.0 * 0.98, epsilon = 1e-5);
}

#[test]
fn test_floating_body_is_never_grounded() {
    let planet = planet();
    let mut body = RigidBody::new_sphere(Vector3::new(0.0, 19.55, 0.0), 0.5, 1.0).with_gravity(false);
    body.set_on_ground(true);

    let state = planet.resolve_surface(&mut body);
    assert!(!state.on_ground);
    assert!(!body.is_on_ground());
    assert_eq!(body.get_accumulated_force(), Vector3::zeros());
    // The surface normal is still published
    assert_relative_eq!(body.get_surface_normal(), Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
}

#[test]
fn test_surface_normal_reaches_entity_link() {
    let mut world = planet_world();
    let body = RigidBody::new_sphere(Vector3::new(0.0, 0.0, 20.55), 0.5, 1.0)
        .with_link(planet_physics::EntityLink::new(7));
    let handle = world.add_body(body).unwrap();

    world.update(DT);

    let link = *world.get_body(handle).unwrap().get_link().unwrap();
    assert_relative_eq!(link.surface_normal, Vector3::new(0.0, 0.0, 1.0), epsilon = 1e-5);
}

#[test]
fn test_removing_planet_restores_flat_mode() {
    // Raised so the flat-world floor does not interfere afterwards
    let mut world = PhysicsWorld::new();
    world.set_planet_body(PlanetField::new(Vector3::new(0.0, 10.0, 0.0), RADIUS, GRAVITY)).unwrap();
    let handle = world.spawn_sphere(Vector3::new(20.55, 10.0, 0.0), 0.5, 1.0).unwrap();

    world.step(DT);
    assert_relative_eq!(world.get_body(handle).unwrap().get_surface_normal(), Vector3::new(1.0, 0.0, 0.0), epsilon = 1e-5);

    let removed = world.remove_planet_body();
    assert!(removed.is_some());
    assert!(world.get_planet_body().is_none());

    world.step(DT);
    let body = world.get_body(handle).unwrap();
    assert_eq!(body.get_surface_normal(), Vector3::new(0.0, 1.0, 0.0));
    // Uniform gravity now pulls along -Y
    assert!(body.get_linear_velocity().y < 0.0);
}

#[test]
fn test_replacing_planet_returns_previous() {
    let mut world = PhysicsWorld::new();
    assert!(world.set_planet_body(planet()).unwrap().is_none());

    let bigger = PlanetField::new(Vector3::new(0.0, -100.0, 0.0), 80.0, 5.0);
    let previous = world.set_planet_body(bigger).unwrap();
    assert_eq!(previous, Some(planet()));
    assert_eq!(world.get_planet_body(), Some(&bigger));
}
