//! Common test utilities for featurekit integration tests.

#![allow(dead_code)]

use featurekit::*;
use ndarray::{array, Array2};
use rand::prelude::*;

/// The four-feature matrix used throughout the discretizer tests
pub fn reference_features() -> Array2<f64> {
    array![
        [-2.0, 1.5, -4.0, -1.0],
        [-1.0, 2.5, -3.0, -0.5],
        [0.0, 3.5, -2.0, 0.5],
        [1.0, 4.5, -1.0, 2.0]
    ]
}

/// Create uniformly distributed features in `[low, high)`
pub fn create_uniform_features(
    num_samples: usize,
    num_features: usize,
    low: f64,
    high: f64,
    seed: u64,
) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut features = Array2::zeros((num_samples, num_features));

    for i in 0..num_samples {
        for j in 0..num_features {
            features[[i, j]] = rng.gen_range(low..high);
        }
    }

    features
}

/// Create features drawn around a few well-separated centers per column
pub fn create_clustered_features(num_samples: usize, centers: &[f64], seed: u64) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut features = Array2::zeros((num_samples, 1));
    for i in 0..num_samples {
        let center = centers[i % centers.len()];
        features[[i, 0]] = center + rng.gen_range(-0.5..0.5);
    }

    features
}

/// Ordinal discretizer with the given bin count and strategy
pub fn ordinal_discretizer(n_bins: impl Into<NBins>, strategy: BinStrategy) -> KBinsDiscretizer {
    let config = KBinsConfig::builder()
        .n_bins(n_bins)
        .strategy(strategy)
        .encode(Encoding::Ordinal)
        .build()
        .unwrap();
    KBinsDiscretizer::new(config).unwrap()
}

/// Fit on a single column and return its ordinal bins
pub fn bin_column(values: &[f64], n_bins: usize, strategy: BinStrategy) -> Vec<f64> {
    let x = Array2::from_shape_vec((values.len(), 1), values.to_vec()).unwrap();
    let mut est = ordinal_discretizer(n_bins, strategy);
    est.fit_transform(&x.view()).unwrap().to_dense().column(0).to_vec()
}
