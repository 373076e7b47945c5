//! Fitted binning state.
//!
//! A fit produces one [`FittedBinning`]: per-feature offsets, bin counts and
//! bin widths, plus the partition of features into transformed and ignored
//! columns. The state is immutable once built and is shared by every later
//! `transform` / `inverse_transform` call.

use crate::core::constants::*;
use crate::core::types::*;
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Width representation of one feature's bins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BinWidth {
    /// Every bin has the same width
    Uniform(f64),
    /// Width of each bin, in edge order
    NonUniform(Vec<f64>),
}

impl BinWidth {
    /// Interior edges relative to the feature offset, `n_bins - 1` values.
    pub fn interior_edges(&self, n_bins: BinCount) -> Vec<f64> {
        match self {
            BinWidth::Uniform(width) => (1..n_bins).map(|k| width * k as f64).collect(),
            BinWidth::NonUniform(widths) => {
                let mut edges = cumulative(widths);
                edges.truncate(n_bins.saturating_sub(1));
                edges
            }
        }
    }

    /// Resolve the bin edges once for repeated lookups on one feature.
    pub fn lookup(&self, n_bins: BinCount) -> BinLookup {
        let edges = match self {
            BinWidth::Uniform(width) => LookupEdges::Uniform(*width),
            BinWidth::NonUniform(widths) => LookupEdges::Cumulative(cumulative(widths)),
        };
        BinLookup { n_bins, edges }
    }

    /// Map an offset-relative value to a bin index in `[0, n_bins - 1]`.
    ///
    /// Resolves the edges on every call; use [`lookup`](Self::lookup) when
    /// binning a whole column.
    pub fn bin_of(&self, relative: f64, n_bins: BinCount) -> usize {
        self.lookup(n_bins).bin_of(relative)
    }

    /// Offset-relative representative value (bin midpoint) of `bin`.
    pub fn midpoint(&self, bin: usize) -> f64 {
        match self {
            BinWidth::Uniform(width) => width * (bin as f64 + 0.5),
            BinWidth::NonUniform(widths) => self.lookup(widths.len()).midpoint(bin),
        }
    }
}

/// Bin lookup for one feature with its edges already accumulated.
#[derive(Debug, Clone, PartialEq)]
pub struct BinLookup {
    n_bins: BinCount,
    edges: LookupEdges,
}

#[derive(Debug, Clone, PartialEq)]
enum LookupEdges {
    Uniform(f64),
    /// Offset-relative upper edge of each bin
    Cumulative(Vec<f64>),
}

impl BinLookup {
    /// Bin index of an offset-relative value, clipped to `[0, n_bins - 1]`.
    pub fn bin_of(&self, relative: f64) -> usize {
        let raw = match &self.edges {
            LookupEdges::Uniform(width) => {
                let scaled = relative / width;
                let eps = UNIFORM_BIN_ATOL + UNIFORM_BIN_RTOL * width;
                let binned = (scaled + eps).floor();
                if binned.is_finite() {
                    binned
                } else {
                    // zero-width constant feature
                    0.0
                }
            }
            LookupEdges::Cumulative(edges) => {
                edges.partition_point(|&edge| edge <= relative) as f64
            }
        };
        clip_bin(raw, self.n_bins)
    }

    /// Offset-relative midpoint of `bin`.
    pub fn midpoint(&self, bin: usize) -> f64 {
        match &self.edges {
            LookupEdges::Uniform(width) => width * (bin as f64 + 0.5),
            LookupEdges::Cumulative(edges) => {
                let lower = if bin == 0 { 0.0 } else { edges[bin - 1] };
                (lower + edges[bin]) * 0.5
            }
        }
    }
}

/// Running sum of `widths`: the offset-relative upper edge of each bin.
fn cumulative(widths: &[f64]) -> Vec<f64> {
    widths
        .iter()
        .scan(0.0, |acc, &w| {
            *acc += w;
            Some(*acc)
        })
        .collect()
}

fn clip_bin(raw: f64, n_bins: BinCount) -> usize {
    let upper = n_bins.saturating_sub(1) as f64;
    raw.max(0.0).min(upper) as usize
}

/// Partition of the feature index space into transformed and ignored columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturePartition {
    n_features: usize,
    transformed: Vec<FeatureIndex>,
    ignored: Vec<FeatureIndex>,
}

impl FeaturePartition {
    /// Split `0..n_features` around the given ignored indices.
    pub fn new(n_features: usize, ignored: &[FeatureIndex]) -> Self {
        let mut ignored: Vec<FeatureIndex> = ignored.to_vec();
        ignored.sort_unstable();
        let transformed = (0..n_features)
            .filter(|idx| ignored.binary_search(idx).is_err())
            .collect();
        FeaturePartition {
            n_features,
            transformed,
            ignored,
        }
    }

    /// Total number of features.
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Transformed feature indices, ascending.
    pub fn transformed(&self) -> &[FeatureIndex] {
        &self.transformed
    }

    /// Ignored feature indices, ascending.
    pub fn ignored(&self) -> &[FeatureIndex] {
        &self.ignored
    }

    /// Whether `feature` is ignored.
    pub fn is_ignored(&self, feature: FeatureIndex) -> bool {
        self.ignored.binary_search(&feature).is_ok()
    }
}

/// Non-fatal condition observed while fitting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinningWarning {
    /// The feature has zero range; it is mapped entirely to bin 0
    ConstantFeature {
        /// Offending feature
        feature: FeatureIndex,
    },
}

impl std::fmt::Display for BinningWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinningWarning::ConstantFeature { feature } => write!(
                f,
                "Feature {} is constant and will be replaced with 0.",
                feature
            ),
        }
    }
}

/// State produced by fitting a discretizer.
///
/// Invariant: `offset`, `n_bins` and `bin_width` all have one entry per
/// feature; ignored features carry offset 0, zero bins and zero width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedBinning {
    pub(crate) strategy: BinStrategy,
    pub(crate) offset: Array1<f64>,
    pub(crate) n_bins: Vec<BinCount>,
    pub(crate) bin_width: Vec<BinWidth>,
    pub(crate) partition: FeaturePartition,
    pub(crate) warnings: Vec<BinningWarning>,
}

impl FittedBinning {
    /// Strategy the state was fitted with.
    pub fn strategy(&self) -> BinStrategy {
        self.strategy
    }

    /// Per-feature minimum seen during fit (0 for ignored features).
    pub fn offset(&self) -> &Array1<f64> {
        &self.offset
    }

    /// Per-feature bin count (0 for ignored, 1 for constant features).
    pub fn n_bins(&self) -> &[BinCount] {
        &self.n_bins
    }

    /// Per-feature bin widths.
    pub fn bin_width(&self) -> &[BinWidth] {
        &self.bin_width
    }

    /// Transformed/ignored feature partition.
    pub fn partition(&self) -> &FeaturePartition {
        &self.partition
    }

    /// Transformed feature indices.
    pub fn transformed_features(&self) -> &[FeatureIndex] {
        self.partition.transformed()
    }

    /// Number of features seen during fit.
    pub fn n_features(&self) -> usize {
        self.partition.n_features()
    }

    /// Warnings raised during fit.
    pub fn warnings(&self) -> &[BinningWarning] {
        &self.warnings
    }

    /// Bin edges of `feature`: `-inf`, the interior edges, `+inf`.
    /// Returns `None` for ignored or out-of-range features.
    pub fn bin_edges(&self, feature: FeatureIndex) -> Option<Vec<f64>> {
        if feature >= self.n_features() || self.partition.is_ignored(feature) {
            return None;
        }
        let n_bins = self.n_bins[feature];
        let offset = self.offset[feature];
        let mut edges = Vec::with_capacity(n_bins + 1);
        edges.push(f64::NEG_INFINITY);
        edges.extend(
            self.bin_width[feature]
                .interior_edges(n_bins)
                .into_iter()
                .map(|edge| offset + edge),
        );
        edges.push(f64::INFINITY);
        Some(edges)
    }

    /// Lookup for transformed `feature`, resolved once per column.
    pub(crate) fn feature_lookup(&self, feature: FeatureIndex) -> (f64, BinLookup) {
        (
            self.offset[feature],
            self.bin_width[feature].lookup(self.n_bins[feature]),
        )
    }
}
