use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use p3m_influence::{Axis, InfluenceFunction, LocalDomain, MeshShift, Scheme, SolverConfig, Vector3};

fn config(grid: [usize; 3], brillouin: i32) -> SolverConfig {
    let shift = MeshShift::new(grid);
    let d_op = Axis::ALL.map(|axis| shift.table(axis).iter().map(|&s| f64::from(s)).collect());
    SolverConfig::new(
        grid,
        Vector3::new(10.0, 10.0, 10.0),
        0.3,
        3,
        d_op,
        LocalDomain::full(grid),
    )
    .unwrap()
    .with_brillouin(brillouin)
}

/// Full-mesh builds per scheme
fn bench_schemes(c: &mut Criterion) {
    let mut group = c.benchmark_group("scheme");
    let config = config([16, 16, 16], 1);

    for scheme in [Scheme::Ik, Scheme::Iki, Scheme::Adi] {
        group.bench_function(format!("{scheme:?}"), |b| {
            b.iter(|| InfluenceFunction::compute(black_box(&config), scheme).unwrap())
        });
    }
    group.finish();
}

/// Cost growth with the aliasing truncation radius
fn bench_truncation_radius(c: &mut Criterion) {
    let mut group = c.benchmark_group("brillouin");

    for radius in [0, 1, 2, 3] {
        let config = config([8, 8, 8], radius);
        group.bench_with_input(BenchmarkId::new("ik", radius), &config, |b, config| {
            b.iter(|| InfluenceFunction::compute(black_box(config), Scheme::Ik).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_schemes, bench_truncation_radius);
criterion_main!(benches);
