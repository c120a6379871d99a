use criterion::{black_box, criterion_group, criterion_main, Criterion};
use featcov_cluster::{cluster_density, cluster_threshold, DensityParams, GraphParams};
use featcov_vecsim::IdentifiedVector;

fn random_unit_vec(dim: usize, seed: u64) -> Vec<f32> {
    let mut v = Vec::with_capacity(dim);
    let mut state = seed;
    for _ in 0..dim {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        v.push(((state >> 33) as f32) / (u32::MAX as f32) - 0.5);
    }
    normalize(&mut v);
    v
}

fn normalize(v: &mut [f32]) {
    let norm: f64 = v.iter().map(|&x| (x as f64) * (x as f64)).sum::<f64>().sqrt();
    if norm > 0.0 {
        let s = (1.0 / norm) as f32;
        for x in v.iter_mut() {
            *x *= s;
        }
    }
}

fn make_cluster(prefix: &str, centroid: &[f32], n: usize, noise: f64, base_seed: u64) -> Vec<IdentifiedVector> {
    let dim = centroid.len();
    (0..n)
        .map(|i| {
            let mut v = centroid.to_vec();
            let rvec = random_unit_vec(dim, base_seed.wrapping_add(i as u64 * 997));
            for (j, x) in v.iter_mut().enumerate() {
                *x += rvec[j] * noise as f32;
            }
            normalize(&mut v);
            IdentifiedVector::new(format!("{prefix}-{i}"), v)
        })
        .collect()
}

fn dataset(dim: usize, per_cluster: usize) -> Vec<IdentifiedVector> {
    let mut items = Vec::new();
    for (c, seed) in [10u64, 20, 30].into_iter().enumerate() {
        let centroid = random_unit_vec(dim, seed);
        items.extend(make_cluster(&format!("c{c}"), &centroid, per_cluster, 0.1, seed * 10));
    }
    items
}

fn bench_density(c: &mut Criterion) {
    let items = dataset(1536, 50);
    let params = DensityParams::default();

    c.bench_function("cluster_density_1536d_150points_3clusters", |b| {
        b.iter(|| {
            let _ = black_box(cluster_density(black_box(&items), &params));
        });
    });
}

fn bench_threshold(c: &mut Criterion) {
    let items = dataset(1536, 50);
    let params = GraphParams::new(0.85);

    c.bench_function("cluster_threshold_1536d_150points_3clusters", |b| {
        b.iter(|| {
            let _ = black_box(cluster_threshold(black_box(&items), &params));
        });
    });
}

criterion_group!(benches, bench_density, bench_threshold);
criterion_main!(benches);
