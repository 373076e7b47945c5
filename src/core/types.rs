//! Core data types for featurekit.
//!
//! This module defines the index aliases and the string-backed enumerations
//! shared by the binning engine and the neighbor graph builder. Every
//! enumeration round-trips through its lowercase string form, both for
//! [`FromStr`] parsing and for serde, so configuration files are validated
//! against the same set of options as programmatic callers.

use crate::core::error::{FeatureKitError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Feature (column) index type.
pub type FeatureIndex = usize;

/// Sample (row) index type.
pub type SampleIndex = usize;

/// Number of bins assigned to a feature.
pub type BinCount = usize;

fn invalid_choice(parameter: &str, valid: &[&str], got: &str) -> FeatureKitError {
    FeatureKitError::config(format!(
        "Valid options for '{}' are ({}). Got {}='{}' instead.",
        parameter,
        valid.join(", "),
        parameter,
        got
    ))
}

/// Strategy used to place bin edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BinStrategy {
    /// All bins of a feature have identical widths
    Uniform,
    /// Edges follow the feature's quantiles, so bins hold equal sample counts
    Quantile,
    /// Edges are midpoints between sorted 1-D k-means centers
    KMeans,
}

impl BinStrategy {
    /// Accepted string forms, in the order they are reported.
    pub const VALID: [&'static str; 3] = ["uniform", "quantile", "kmeans"];

    /// True when widths are stored per bin rather than as one scalar.
    pub fn is_non_uniform(self) -> bool {
        !matches!(self, BinStrategy::Uniform)
    }
}

impl Default for BinStrategy {
    fn default() -> Self {
        BinStrategy::Uniform
    }
}

impl fmt::Display for BinStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinStrategy::Uniform => write!(f, "uniform"),
            BinStrategy::Quantile => write!(f, "quantile"),
            BinStrategy::KMeans => write!(f, "kmeans"),
        }
    }
}

impl FromStr for BinStrategy {
    type Err = FeatureKitError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "uniform" => Ok(BinStrategy::Uniform),
            "quantile" => Ok(BinStrategy::Quantile),
            "kmeans" => Ok(BinStrategy::KMeans),
            other => Err(invalid_choice("strategy", &Self::VALID, other)),
        }
    }
}

impl TryFrom<String> for BinStrategy {
    type Error = FeatureKitError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<BinStrategy> for String {
    fn from(value: BinStrategy) -> Self {
        value.to_string()
    }
}

/// Output encoding of the discretized features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Encoding {
    /// One-hot encoding returned as a sparse CSR matrix
    OneHot,
    /// One-hot encoding returned as a dense array
    OneHotDense,
    /// Bin identifiers returned as values
    Ordinal,
}

impl Encoding {
    /// Accepted string forms, in the order they are reported.
    pub const VALID: [&'static str; 3] = ["onehot", "onehot-dense", "ordinal"];

    /// True for both one-hot variants.
    pub fn is_one_hot(self) -> bool {
        !matches!(self, Encoding::Ordinal)
    }
}

impl Default for Encoding {
    fn default() -> Self {
        Encoding::OneHot
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::OneHot => write!(f, "onehot"),
            Encoding::OneHotDense => write!(f, "onehot-dense"),
            Encoding::Ordinal => write!(f, "ordinal"),
        }
    }
}

impl FromStr for Encoding {
    type Err = FeatureKitError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "onehot" => Ok(Encoding::OneHot),
            "onehot-dense" => Ok(Encoding::OneHotDense),
            "ordinal" => Ok(Encoding::Ordinal),
            other => Err(invalid_choice("encode", &Self::VALID, other)),
        }
    }
}

impl TryFrom<String> for Encoding {
    type Error = FeatureKitError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Encoding> for String {
    fn from(value: Encoding) -> Self {
        value.to_string()
    }
}

/// Edge weights stored in a neighbor graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum WeightMode {
    /// Every edge has weight 1
    Connectivity,
    /// Every edge carries the measured distance
    Distance,
}

impl WeightMode {
    /// Accepted string forms, in the order they are reported.
    pub const VALID: [&'static str; 2] = ["connectivity", "distance"];
}

impl Default for WeightMode {
    fn default() -> Self {
        WeightMode::Connectivity
    }
}

impl fmt::Display for WeightMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeightMode::Connectivity => write!(f, "connectivity"),
            WeightMode::Distance => write!(f, "distance"),
        }
    }
}

impl FromStr for WeightMode {
    type Err = FeatureKitError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "connectivity" => Ok(WeightMode::Connectivity),
            "distance" => Ok(WeightMode::Distance),
            other => Err(invalid_choice("mode", &Self::VALID, other)),
        }
    }
}

impl TryFrom<String> for WeightMode {
    type Error = FeatureKitError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<WeightMode> for String {
    fn from(value: WeightMode) -> Self {
        value.to_string()
    }
}

/// Distance metric used by a nearest-neighbor index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DistanceMetric {
    /// Minkowski distance, parameterised by the power `p`
    Minkowski,
    /// L2 distance
    Euclidean,
    /// L1 distance
    Manhattan,
    /// L-infinity distance
    Chebyshev,
}

impl DistanceMetric {
    /// Accepted string forms, in the order they are reported.
    pub const VALID: [&'static str; 4] = ["minkowski", "euclidean", "manhattan", "chebyshev"];
}

impl Default for DistanceMetric {
    fn default() -> Self {
        DistanceMetric::Minkowski
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistanceMetric::Minkowski => write!(f, "minkowski"),
            DistanceMetric::Euclidean => write!(f, "euclidean"),
            DistanceMetric::Manhattan => write!(f, "manhattan"),
            DistanceMetric::Chebyshev => write!(f, "chebyshev"),
        }
    }
}

impl FromStr for DistanceMetric {
    type Err = FeatureKitError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "minkowski" => Ok(DistanceMetric::Minkowski),
            "euclidean" | "l2" => Ok(DistanceMetric::Euclidean),
            "manhattan" | "l1" | "cityblock" => Ok(DistanceMetric::Manhattan),
            "chebyshev" => Ok(DistanceMetric::Chebyshev),
            other => Err(invalid_choice("metric", &Self::VALID, other)),
        }
    }
}

impl TryFrom<String> for DistanceMetric {
    type Error = FeatureKitError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<DistanceMetric> for String {
    fn from(value: DistanceMetric) -> Self {
        value.to_string()
    }
}
