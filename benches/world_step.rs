use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use planet_physics::{math::Vector3, PhysicsWorld, PlanetField, RigidBody};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn flat_world(n: usize) -> PhysicsWorld {
    let mut world = PhysicsWorld::new();
    let mut rng = StdRng::seed_from_u64(7);

    world
        .add_body(RigidBody::new_static_box(Vector3::new(0.0, 1.5, 0.0), Vector3::new(20.0, 0.5, 20.0)))
        .expect("floor");
    for _ in 0..n {
        let position = Vector3::new(rng.gen_range(-10.0..10.0), rng.gen_range(3.0..15.0), rng.gen_range(-10.0..10.0));
        let body = if rng.gen_bool(0.5) {
            RigidBody::new_sphere(position, 0.5, 1.0)
        } else {
            RigidBody::new_box(position, Vector3::new(0.4, 0.4, 0.4), 2.0)
        };
        world.add_body(body).expect("body");
    }
    world
}

fn planet_world(n: usize) -> PhysicsWorld {
    let mut world = PhysicsWorld::new();
    let mut rng = StdRng::seed_from_u64(11);

    world.set_planet_body(PlanetField::new(Vector3::zeros(), 50.0, 9.81)).expect("planet");
    for _ in 0..n {
        let direction = Vector3::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
        let direction = direction.try_normalize(1e-3).unwrap_or_else(|| Vector3::new(0.0, 1.0, 0.0));
        world.spawn_sphere(direction * rng.gen_range(51.0..56.0), 0.5, 1.0).expect("body");
    }
    world
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("world_update");
    for &n in &[10usize, 50, 100] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("flat", n), &n, |b, &n| {
            b.iter_batched(
                || flat_world(n),
                |mut world| {
                    for _ in 0..60 {
                        black_box(world.update(1.0 / 60.0));
                    }
                },
                BatchSize::LargeInput,
            )
        });
        group.bench_with_input(BenchmarkId::new("planet", n), &n, |b, &n| {
            b.iter_batched(
                || planet_world(n),
                |mut world| {
                    for _ in 0..60 {
                        black_box(world.update(1.0 / 60.0));
                    }
                },
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_update);
criterion_main!(benches);
