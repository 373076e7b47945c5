use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use featurekit::*;
use ndarray::Array2;
use rand::prelude::*;

fn create_features(n_rows: usize, n_cols: usize) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(42);
    Array2::from_shape_fn((n_rows, n_cols), |_| rng.gen_range(-10.0..10.0))
}

fn bench_fit_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("kbins_fit_transform");
    let x = create_features(10_000, 8);

    for strategy in [BinStrategy::Uniform, BinStrategy::Quantile, BinStrategy::KMeans] {
        group.bench_with_input(
            BenchmarkId::new("strategy", strategy),
            &strategy,
            |b, &strategy| {
                b.iter(|| {
                    let config = KBinsConfig::builder()
                        .n_bins(10)
                        .strategy(strategy)
                        .encode(Encoding::Ordinal)
                        .build()
                        .unwrap();
                    let mut est = KBinsDiscretizer::new(config).unwrap();
                    est.fit_transform(black_box(&x.view())).unwrap()
                })
            },
        );
    }

    group.finish();
}

fn bench_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("kbins_encoding");
    let x = create_features(10_000, 8);

    for encode in [Encoding::Ordinal, Encoding::OneHot, Encoding::OneHotDense] {
        let config = KBinsConfig::builder().n_bins(16).encode(encode).build().unwrap();
        let mut est = KBinsDiscretizer::new(config).unwrap();
        est.fit(&x.view()).unwrap();

        group.bench_with_input(BenchmarkId::new("transform", encode), &est, |b, est| {
            b.iter(|| est.transform(black_box(&x.view())).unwrap())
        });
    }

    group.finish();
}

fn bench_kneighbors_graph(c: &mut Criterion) {
    let mut group = c.benchmark_group("kneighbors_graph");

    for n_rows in [500, 2000].iter() {
        let x = create_features(*n_rows, 4);
        for n_jobs in [1, -1] {
            let config = NeighborsConfig::builder()
                .n_neighbors(10)
                .mode(WeightMode::Distance)
                .n_jobs(n_jobs)
                .build()
                .unwrap();
            group.bench_with_input(
                BenchmarkId::new(format!("n_jobs={}", n_jobs), n_rows),
                &x,
                |b, x| b.iter(|| kneighbors_graph(black_box(x.view()).into(), &config).unwrap()),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_fit_transform, bench_encoding, bench_kneighbors_graph);
criterion_main!(benches);
