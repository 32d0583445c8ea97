use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use pose_weights as pw;
use rand::{rngs::StdRng, Rng, SeedableRng};

type Dataset = (Vec<[f64; 3]>, Vec<[f64; 2]>, [[f64; 3]; 3]);

fn generate_dataset(num_points: usize, noise_px: f64, seed: u64) -> Dataset {
    let k = [[800.0, 0.0, 640.0], [0.0, 800.0, 480.0], [0.0, 0.0, 1.0]];

    let mut rng = StdRng::seed_from_u64(seed);
    let mut world = Vec::with_capacity(num_points);
    let mut image = Vec::with_capacity(num_points);
    for _ in 0..num_points {
        // points in a 1m cube around z in [3,6]
        let p: [f64; 3] = [
            rng.random_range(-0.5..0.5),
            rng.random_range(-0.5..0.5),
            rng.random_range(3.0..6.0),
        ];
        let u = k[0][0] * p[0] / p[2] + k[0][2] + rng.random_range(-noise_px..noise_px);
        let v = k[1][1] * p[1] / p[2] + k[1][2] + rng.random_range(-noise_px..noise_px);
        world.push(p);
        image.push([u, v]);
    }
    (world, image, k)
}

fn generate_poses(num_poses: usize, seed: u64) -> Vec<[f64; 7]> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..num_poses)
        .map(|_| {
            let half: f64 = rng.random_range(-0.05..0.05);
            let (s, c) = half.sin_cos();
            [
                c,
                0.0,
                s,
                0.0,
                rng.random_range(-0.1..0.1),
                rng.random_range(-0.1..0.1),
                rng.random_range(-0.1..0.1),
            ]
        })
        .collect()
}

fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_weights");
    let (world, image, k) = generate_dataset(256, 0.5, 42);
    let params = pw::ScoringParams::default();

    for &n in &[1usize, 100, 1000, 10_000] {
        let poses = generate_poses(n, 7);
        let mut weights = vec![0.0; n];
        group.throughput(Throughput::Elements((n * world.len()) as u64));

        group.bench_with_input(BenchmarkId::new("sequential", n), &n, |b, _| {
            b.iter(|| {
                let mut batch = pw::WeightBatch::new(&mut weights, &poses, &k, &image, &world);
                pw::update_weights_sequential(&mut batch, &params).unwrap();
            });
        });

        group.bench_with_input(BenchmarkId::new("per_hypothesis", n), &n, |b, _| {
            b.iter(|| {
                let mut batch = pw::WeightBatch::new(&mut weights, &poses, &k, &image, &world);
                pw::update_weights_parallel(
                    &mut batch,
                    &params,
                    pw::ExecutionStrategy::PerHypothesis,
                )
                .unwrap();
            });
        });

        group.bench_with_input(BenchmarkId::new("split_64", n), &n, |b, _| {
            b.iter(|| {
                let mut batch = pw::WeightBatch::new(&mut weights, &poses, &k, &image, &world);
                pw::update_weights_parallel(
                    &mut batch,
                    &params,
                    pw::ExecutionStrategy::SplitCorrespondences(64),
                )
                .unwrap();
            });
        });
        std::hint::black_box(&weights);
    }
    group.finish();
}

criterion_group!(benches, bench_strategies);
criterion_main!(benches);
