//! Whole-tick benchmark over the default world size.

use criterion::{criterion_group, criterion_main, Criterion};
use skerry_engine::{World, WorldConfig};

fn bench_tick(c: &mut Criterion) {
    c.bench_function("world_tick_48x32", |b| {
        let mut world = World::new(WorldConfig {
            seed: 42,
            ..WorldConfig::default()
        })
        .expect("default world builds");
        b.iter(|| world.tick().expect("tick succeeds"));
    });

    c.bench_function("world_build_48x32", |b| {
        b.iter(|| {
            World::new(WorldConfig {
                seed: 42,
                ..WorldConfig::default()
            })
            .expect("default world builds")
        });
    });
}

criterion_group!(benches, bench_tick);
criterion_main!(benches);
