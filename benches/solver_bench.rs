//! Greedy solver latency for a realistic target sheet, single and batched.
//!
//! Run with: `cargo bench --bench solver`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ef_trainer::data::GameData;
use ef_trainer::optimizer::solve_with_report;
use ef_trainer::parallel::{solve_batch, SolveRequest, WorkerPool};
use ef_trainer::training::TargetSet;

const WINGER_TARGETS: &str =
    "Speed:92:1|Acceleration:94:2|Finishing:94:3|Curl:95:4|Low Pass:92:5|Stamina:85:6";

fn bench_solver(c: &mut Criterion) {
    let data = GameData::builtin();
    let player = &data.players[0];
    let selection = player.default_selection();
    let targets: TargetSet = WINGER_TARGETS.parse().unwrap_or_default();

    let mut group = c.benchmark_group("solver");
    group.throughput(Throughput::Elements(1));
    group.bench_function("single_player", |b| {
        b.iter(|| {
            solve_with_report(
                black_box(&data),
                black_box(&player.initial_stats),
                black_box(&selection),
                black_box(&targets),
                black_box(player.total_points),
            )
        })
    });

    for size in [16usize, 128] {
        let requests: Vec<SolveRequest> = (0..size)
            .map(|i| SolveRequest {
                base: player.initial_stats.clone(),
                selection: selection.clone(),
                targets: targets.clone(),
                budget: 40 + (i as i64 % 40),
            })
            .collect();
        let pool = WorkerPool::default();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("batch", size), &requests, |b, requests| {
            b.iter(|| solve_batch(black_box(&data), black_box(requests), &pool))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_solver);
criterion_main!(benches);
