use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use miner_core::{Board, GameConfig, RandomMinefieldGenerator};

fn tiers() -> [(&'static str, GameConfig); 4] {
    [
        ("beginner", GameConfig::beginner()),
        ("classic", GameConfig::classic()),
        ("intermediate", GameConfig::intermediate()),
        ("expert", GameConfig::expert()),
    ]
}

fn generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for (name, config) in tiers() {
        group.bench_with_input(BenchmarkId::from_parameter(name), &config, |b, &config| {
            let mut seed = 0u64;
            b.iter(|| {
                seed = seed.wrapping_add(1);
                Board::with_generator(black_box(config), RandomMinefieldGenerator::new(seed))
            })
        });
    }
    group.finish();
}

fn flood_fill(c: &mut Criterion) {
    // one mine in the corner: building the board floods every other cell
    c.bench_function("flood_fill_255x255", |b| {
        b.iter(|| Board::from_mines(black_box((255, 255)), &[(254, 254)]))
    });
}

criterion_group!(benches, generate, flood_fill);
criterion_main!(benches);
