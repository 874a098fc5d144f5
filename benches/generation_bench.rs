use criterion::{black_box, criterion_group, criterion_main, Criterion};

use dungeon_core::difficulty::Preset;
use dungeon_core::engine::{Engine, Intent};
use dungeon_core::generation::Dungeon;
use dungeon_core::player::HeroClass;
use dungeon_core::rng::SeededRng;

fn bench_rng(c: &mut Criterion) {
    c.bench_function("rng_1000_draws", |b| {
        b.iter(|| {
            let mut rng = SeededRng::new(black_box(42));
            let mut acc = 0.0;
            for _ in 0..1000 {
                acc += rng.next_f64();
            }
            acc
        })
    });
}

fn bench_generation(c: &mut Criterion) {
    let normal = Preset::Normal.profile();
    let hard = Preset::Hard.profile();

    c.bench_function("generate_normal", |b| {
        b.iter(|| Dungeon::generate(black_box(42), black_box(&normal)))
    });

    c.bench_function("generate_hard", |b| {
        b.iter(|| Dungeon::generate(black_box(42), black_box(&hard)))
    });

    c.bench_function("generate_hard_10_levels", |b| {
        b.iter(|| {
            let mut rng = SeededRng::new(7);
            let mut profile = hard.clone();
            for level in 0..10u64 {
                black_box(Dungeon::generate(7 + level, &profile));
                profile = profile.level_up(&mut rng);
            }
        })
    });
}

fn bench_simulation(c: &mut Criterion) {
    c.bench_function("tick_hard_1000", |b| {
        b.iter(|| {
            let mut engine = Engine::with_profile(99, Preset::Hard.profile(), HeroClass::Warrior, 0);
            for tick in 1..=1000u64 {
                if tick % 4 == 0 {
                    engine.apply(Intent::Move { dx: 1, dy: 0 });
                }
                engine.tick(tick * 50);
            }
            black_box(engine.score_record())
        })
    });

    let dungeon = Dungeon::generate(42, &Preset::Hard.profile());
    c.bench_function("flood_fill", |b| {
        b.iter(|| black_box(dungeon.reachable_from(black_box(dungeon.entrance))))
    });
}

criterion_group!(benches, bench_rng, bench_generation, bench_simulation);
criterion_main!(benches);
