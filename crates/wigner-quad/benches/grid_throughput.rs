use criterion::{black_box, criterion_group, criterion_main, Criterion};
use wigner_core::{Domain, IntegrationMode, PhysicsConfig};
use wigner_quad::integrate;

fn gaussian(r: f64, p: f64) -> f64 {
    (-r * r / 4.0).exp() * (-(p - 0.1).powi(2) / 0.01).exp()
}

fn grid_benchmark(c: &mut Criterion) {
    let config = PhysicsConfig::default();
    c.bench_function("integrate/grid_default_domain", |b| {
        b.iter(|| {
            integrate(|r, p| Ok(gaussian(r, p)), black_box(&config.admissible), &config)
                .expect("integral")
        });
    });

    let reference = PhysicsConfig::default().with_mode(IntegrationMode::Reference);
    let small = Domain::new(0.0, 10.0, 0.0, 0.6);
    c.bench_function("integrate/reference_small_domain", |b| {
        b.iter(|| integrate(|r, p| Ok(gaussian(r, p)), black_box(&small), &reference).expect("integral"));
    });
}

criterion_group!(benches, grid_benchmark);
criterion_main!(benches);
