//! Benchmarks for the seidel solver.
use std::{hint::black_box, str::FromStr};

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use seidel::{Config, System, solve, verify};

/// General benchmark template.
/// Opens a given test case from the `test_cases/` dir,
/// benchmarks solving it.
fn bench_case(c: &mut Criterion, test_case: &'static str) {
    let txt = std::fs::read_to_string(format!("test_cases/{test_case}.csv")).unwrap();
    let system = System::from_str(&txt).unwrap();
    let config = Config::default().with_tolerance_percent(1e-6);
    c.bench_function(&format!("solve_{test_case}"), |b| {
        b.iter(|| {
            let _actual = black_box(solve(&system, config).unwrap());
        });
    });
}

fn solve_three_by_three(c: &mut Criterion) {
    bench_case(c, "three_by_three");
}

fn solve_heat_rod(c: &mut Criterion) {
    bench_case(c, "heat_rod");
}

/// A tridiagonal system like the 1D Poisson equation, but strictly dominant.
fn tridiagonal(n: usize) -> System {
    let rows: Vec<Vec<f64>> = (0..n)
        .map(|i| {
            let mut row = vec![0.0; n + 1];
            row[i] = 4.0;
            if i > 0 {
                row[i - 1] = -1.0;
            }
            if i + 1 < n {
                row[i + 1] = -1.0;
            }
            row[n] = 1.0 + i as f64;
            row
        })
        .collect();
    System::from_rows(&rows).unwrap()
}

/// How does a fixed number of sweeps scale with the number of unknowns?
fn scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("fixed_iterations");
    // Tolerance is so small the solver always uses its whole budget.
    let config = Config::default()
        .with_tolerance_percent(f64::MIN_POSITIVE)
        .with_max_iterations(20);
    for n in [10, 50, 100, 200] {
        let system = tridiagonal(n);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &system, |b, system| {
            b.iter(|| black_box(solve(system, config).unwrap()));
        });
    }
    group.finish();
}

fn verification(c: &mut Criterion) {
    let system = tridiagonal(200);
    let solution = vec![1.0; 200];
    c.bench_function("verify_200", |b| {
        b.iter(|| black_box(verify(&system, &solution).unwrap()));
    });
}

criterion_group!(
    benches,
    solve_three_by_three,
    solve_heat_rod,
    scaling,
    verification
);
criterion_main!(benches);
