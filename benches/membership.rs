use criterion::{black_box, criterion_group, criterion_main, Criterion};
use geofence_verify::{MembershipEngine, MembershipMode, Polygon};

/// Regular n-gon centered on the origin
fn ring(n: usize) -> Vec<(f64, f64)> {
    (0..n)
        .map(|i| {
            let theta = (i as f64) * std::f64::consts::TAU / (n as f64);
            (10.0 * theta.cos(), 10.0 * theta.sin())
        })
        .collect()
}

fn benchmark_membership(c: &mut Criterion) {
    let engine = MembershipEngine::new(Polygon::new(ring(64)).unwrap());
    let points: Vec<(f64, f64)> = (0..1000)
        .map(|i| {
            let t = i as f64 / 1000.0;
            (25.0 * t - 12.5, 12.5 - 25.0 * t)
        })
        .collect();

    c.bench_function("classify_single_point", |b| {
        b.iter(|| engine.classify(black_box((3.0, 4.0))))
    });

    c.bench_function("test_membership_1000_points", |b| {
        b.iter(|| engine.test_membership(black_box(&points), MembershipMode::Inclusive))
    });
}

criterion_group!(benches, benchmark_membership);
criterion_main!(benches);
