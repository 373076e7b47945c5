//! Default values and numeric tolerances for featurekit.

use crate::core::types::*;

/// Library version string.
pub const FEATUREKIT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default number of bins per feature.
pub const DEFAULT_N_BINS: BinCount = 2;

/// Smallest number of bins an active feature may request.
pub const MIN_N_BINS: BinCount = 2;

/// Default binning strategy.
pub const DEFAULT_STRATEGY: BinStrategy = BinStrategy::Uniform;

/// Default output encoding.
pub const DEFAULT_ENCODING: Encoding = Encoding::OneHot;

/// Relative tolerance added before flooring uniform bin positions.
/// Changing it moves samples that sit exactly on a bin edge.
pub const UNIFORM_BIN_RTOL: f64 = 1e-5;

/// Absolute tolerance added before flooring uniform bin positions.
pub const UNIFORM_BIN_ATOL: f64 = 1e-8;

/// Number of k-means restarts; the lowest-inertia run is kept.
pub const KMEANS_N_INIT: usize = 10;

/// Maximum Lloyd iterations per k-means run.
pub const KMEANS_MAX_ITER: usize = 300;

/// Center-shift tolerance, relative to the column variance.
pub const KMEANS_TOL: f64 = 1e-4;

/// Seed used for k-means when no random state is configured.
pub const DEFAULT_RANDOM_SEED: u64 = 0;

/// Default neighbor count for k-nearest queries.
pub const DEFAULT_N_NEIGHBORS: usize = 5;

/// Default radius for radius queries.
pub const DEFAULT_RADIUS: f64 = 1.0;

/// Default Minkowski power (Euclidean).
pub const DEFAULT_MINKOWSKI_P: f64 = 2.0;

/// Default neighbor-search worker count; -1 uses every core.
pub const DEFAULT_N_JOBS: i32 = 1;
