use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;

use clawbie_apocalypse::core::config::SimulationConfig;
use clawbie_apocalypse::core::types::Cell;
use clawbie_apocalypse::ecs::world::World;
use clawbie_apocalypse::pathfinding::find_path;
use clawbie_apocalypse::render::camera::ViewRect;
use clawbie_apocalypse::simulation::tick::run_simulation_tick;

fn bench_world_ticks(c: &mut Criterion) {
    let mut group = c.benchmark_group("world_tick");
    group.sample_size(30);
    group.measurement_time(Duration::from_secs(10));

    // Ticks per bench iteration (override via CA_BENCH_TICKS)
    let ticks: usize = std::env::var("CA_BENCH_TICKS")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(16);

    group.bench_function(format!("default_world_{}_ticks", ticks), |b| {
        b.iter_batched(
            || World::generate(SimulationConfig::default()).expect("default world"),
            |mut world| {
                for _ in 0..ticks {
                    std::hint::black_box(run_simulation_tick(&mut world));
                }
                world
            },
            BatchSize::LargeInput,
        );
    });

    group.finish();
}

fn bench_path_queries(c: &mut Criterion) {
    let world = World::generate(SimulationConfig::default()).expect("default world");
    let mut group = c.benchmark_group("find_path");

    // Dense pursuer field in the middle of the map
    let start = Cell::new(500, 500);
    let targets: Vec<Cell> = (0..64)
        .map(|i| Cell::new(480 + (i * 7) % 41, 480 + (i * 13) % 41))
        .collect();

    group.bench_function("open_field_64_queries", |b| {
        b.iter(|| {
            for &target in &targets {
                std::hint::black_box(find_path(
                    start,
                    target,
                    world.tiles(),
                    world.danger(),
                    20,
                ));
            }
        });
    });

    group.finish();
}

fn bench_visibility(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregation");

    group.bench_function("cold_visibility_full_map", |b| {
        b.iter_batched(
            || World::generate(SimulationConfig::default()).expect("default world"),
            |mut world| {
                world.update_visibility(&ViewRect::new(0.0, 0.0, 16_000.0, 16_000.0));
                world
            },
            BatchSize::LargeInput,
        );
    });

    group.bench_function("density_grid", |b| {
        let mut world = World::generate(SimulationConfig::default()).expect("default world");
        b.iter(|| std::hint::black_box(world.density_grid()));
    });

    group.finish();
}

criterion_group!(benches, bench_world_ticks, bench_path_queries, bench_visibility);
criterion_main!(benches);
