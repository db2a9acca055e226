//! Criterion benchmarks for the job-shop search engine.
//!
//! Uses a fixed synthetic instance so the numbers track algorithm overhead,
//! not instance luck.

use std::sync::Arc;
use std::time::{Duration, Instant};

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use jobshop_heur::encoding::ResourceOrder;
use jobshop_heur::instance::Instance;
use jobshop_heur::neighborhood::{Neighborhood, Nowicki};
use jobshop_heur::solvers::{GreedyConfig, GreedySolver, Priority, Solver};

/// A 6x6 instance with a deterministic pseudo-random duration pattern.
fn bench_instance() -> Arc<Instance> {
    let jobs = 6;
    let machines = 6;
    let ops: Vec<Vec<(usize, u32)>> = (0..jobs)
        .map(|job| {
            (0..machines)
                .map(|task| {
                    let machine = (job + task) % machines;
                    let duration = 1 + ((5 * job + 3 * task) % 9) as u32;
                    (machine, duration)
                })
                .collect()
        })
        .collect();
    Arc::new(Instance::new(jobs, machines, &ops))
}

fn baseline_schedule(instance: &Arc<Instance>) -> ResourceOrder {
    let solver =
        GreedySolver::new(GreedyConfig::new(Priority::EstLrpt).with_epsilon(0.0).with_seed(42));
    let schedule = solver
        .solve(instance, Instant::now() + Duration::from_secs(10))
        .expect("greedy always completes on this instance");
    ResourceOrder::from_schedule(&schedule)
}

fn bench_decode(c: &mut Criterion) {
    let instance = bench_instance();
    let order = baseline_schedule(&instance);
    c.bench_function("decode_6x6", |b| {
        b.iter(|| black_box(&order).decode().unwrap().makespan())
    });
}

fn bench_critical_path(c: &mut Criterion) {
    let instance = bench_instance();
    let schedule = baseline_schedule(&instance).decode().unwrap();
    c.bench_function("critical_path_6x6", |b| {
        b.iter(|| black_box(&schedule).critical_path().len())
    });
}

fn bench_neighborhood(c: &mut Criterion) {
    let instance = bench_instance();
    let order = baseline_schedule(&instance);
    let nowicki = Nowicki::new();
    c.bench_function("nowicki_neighbors_6x6", |b| {
        b.iter(|| nowicki.generate_neighbors(black_box(&order)).len())
    });
}

fn bench_greedy(c: &mut Criterion) {
    let instance = bench_instance();
    c.bench_function("greedy_est_lrpt_6x6", |b| {
        b.iter(|| {
            let solver = GreedySolver::new(
                GreedyConfig::new(Priority::EstLrpt).with_epsilon(0.0).with_seed(7),
            );
            solver
                .solve(black_box(&instance), Instant::now() + Duration::from_secs(10))
                .unwrap()
                .makespan()
        })
    });
}

criterion_group!(
    benches,
    bench_decode,
    bench_critical_path,
    bench_neighborhood,
    bench_greedy
);
criterion_main!(benches);
