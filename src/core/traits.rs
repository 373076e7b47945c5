//! Collaborator traits for featurekit.
//!
//! The binning engine and the graph builder consume a handful of
//! capabilities as black boxes: a quantile estimator, a 1-D clusterer, a
//! one-hot encoder and a nearest-neighbor index. Each is expressed as a trait
//! here so alternative implementations can be plugged in; the crate ships a
//! default implementation of each.

use crate::core::error::{FeatureKitError, Result};
use crate::core::types::*;
use ndarray::{Array2, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Debug;

/// Estimates evenly spaced quantile boundaries of a single column.
pub trait QuantileEstimator: Send + Sync + Debug {
    /// Return `n_quantiles` ascending values spanning the column's range.
    fn boundaries(&self, column: &ArrayView1<'_, f64>, n_quantiles: usize) -> Result<Vec<f64>>;
}

/// Clusters a single column into `n_clusters` groups.
pub trait Clusterer1D: Send + Sync + Debug {
    /// Return the cluster centers, in no particular order.
    fn centers(
        &self,
        column: &ArrayView1<'_, f64>,
        n_clusters: usize,
        seed: u64,
    ) -> Result<Vec<f64>>;
}

/// Matrix produced by one-hot encoding.
#[derive(Debug, Clone, PartialEq)]
pub enum EncodedMatrix {
    /// Dense output
    Dense(Array2<f64>),
    /// Sparse CSR output
    Sparse(sprs::CsMat<f64>),
}

impl EncodedMatrix {
    /// Shape of the encoded matrix.
    pub fn shape(&self) -> (usize, usize) {
        match self {
            EncodedMatrix::Dense(m) => m.dim(),
            EncodedMatrix::Sparse(m) => m.shape(),
        }
    }

    /// Dense copy of the matrix.
    pub fn to_dense(&self) -> Array2<f64> {
        match self {
            EncodedMatrix::Dense(m) => m.clone(),
            EncodedMatrix::Sparse(m) => m.to_dense(),
        }
    }
}

/// One-hot encodes a block of ordinal columns.
pub trait CategoricalEncoder: Send + Sync + Debug {
    /// Encode `ordinal` (one column per entry of `cardinalities`) and append
    /// `passthrough` columns unchanged after the encoded block.
    fn encode(
        &self,
        ordinal: &ArrayView2<'_, f64>,
        cardinalities: &[BinCount],
        passthrough: Option<&ArrayView2<'_, f64>>,
        sparse: bool,
    ) -> Result<EncodedMatrix>;
}

/// Distance configuration an index was built with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricConfig {
    /// Distance metric
    pub metric: DistanceMetric,
    /// Minkowski power
    pub p: f64,
    /// Additional metric parameters, compared verbatim
    pub metric_params: Option<BTreeMap<String, f64>>,
}

impl MetricConfig {
    /// Fail with a mismatch error naming the first parameter on which
    /// `requested` disagrees with `self`.
    pub fn ensure_matches(&self, requested: &MetricConfig) -> Result<()> {
        if requested.metric != self.metric {
            return Err(FeatureKitError::parameter_mismatch(
                "metric",
                requested.metric.to_string(),
                self.metric.to_string(),
            ));
        }
        if requested.p != self.p {
            return Err(FeatureKitError::parameter_mismatch(
                "p",
                requested.p.to_string(),
                self.p.to_string(),
            ));
        }
        if requested.metric_params != self.metric_params {
            return Err(FeatureKitError::parameter_mismatch(
                "metric_params",
                format!("{:?}", requested.metric_params),
                format!("{:?}", self.metric_params),
            ));
        }
        Ok(())
    }
}

/// Neighbors of one query row, nearest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Neighborhood {
    /// Distances, ascending
    pub distances: Vec<f64>,
    /// Reference-point indices aligned with `distances`
    pub indices: Vec<SampleIndex>,
}

impl Neighborhood {
    /// Number of neighbors found.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// True when no neighbor was found.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Nearest-neighbor query primitive over a fixed reference set.
///
/// Passing `None` as the query means "query the reference set itself,
/// excluding each point from its own result". Passing the reference set
/// explicitly includes every point as its own neighbor at distance 0.
/// Results are ordered by ascending distance, ties broken by reference index.
pub trait NeighborIndex: Send + Sync + Debug {
    /// Distance configuration the index was built with.
    fn metric_config(&self) -> &MetricConfig;

    /// Number of reference points.
    fn n_samples_fit(&self) -> usize;

    /// Dimensionality of the reference points.
    fn n_features(&self) -> usize;

    /// The reference set, for querying it explicitly.
    fn reference_points(&self) -> ArrayView2<'_, f64>;

    /// The `k` nearest reference points of each query row.
    fn k_nearest(&self, query: Option<&ArrayView2<'_, f64>>, k: usize) -> Result<Vec<Neighborhood>>;

    /// All reference points within `radius` of each query row.
    fn within_radius(
        &self,
        query: Option<&ArrayView2<'_, f64>>,
        radius: f64,
    ) -> Result<Vec<Neighborhood>>;
}
