use criterion::{black_box, criterion_group, criterion_main, Criterion};

use weighted_sokoban::config::{Config, Strategy};
use weighted_sokoban::{LoadLevel, Solve};

// allowing unused so i can bench just one or few
// and still notice other warnings if there are any
#[allow(unused)]
fn bench_corridor(c: &mut Criterion) {
    bench_level(c, "levels/custom/01-corridor.txt", 100);
}

#[allow(unused)]
fn bench_two_weights(c: &mut Criterion) {
    // the heavy box should be pushed as little as possible
    bench_level(c, "levels/custom/02-two-weights.txt", 100);
}

#[allow(unused)]
fn bench_no_solution(c: &mut Criterion) {
    bench_level(c, "levels/custom/no-solution-corner.txt", 100);
}

fn bench_level(c: &mut Criterion, level_path: &str, samples: usize) {
    let level = level_path.load_level().unwrap();

    let mut group = c.benchmark_group(level_path);
    group.sample_size(samples);
    for &strategy in &[Strategy::SumOfMinima, Strategy::Assignment] {
        let config = Config::new(strategy);
        group.bench_function(strategy.to_string(), |b| {
            b.iter(|| level.solve(black_box(&config), black_box(false)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_corridor,
    bench_two_weights,
    //bench_no_solution,
);
criterion_main!(benches);
