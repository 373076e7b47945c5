//! Feature discretization (binning) for featurekit.
//!
//! [`KBinsDiscretizer`] bins continuous features into intervals. Bin edges
//! are placed by one of three strategies:
//!
//! - `uniform`: equal-width bins between the feature's minimum and maximum
//! - `quantile`: edges at evenly spaced quantiles, so bins hold equal counts
//! - `kmeans`: edges halfway between sorted 1-D k-means centers
//!
//! Binned values are returned as ordinal bin indices or one-hot encoded
//! (dense or sparse). Ignored features pass through unchanged.
//!
//! ```rust
//! use featurekit::binning::{KBinsConfig, KBinsDiscretizer};
//! use featurekit::{BinStrategy, Encoding};
//! use ndarray::array;
//!
//! let x = array![[-2.0, 1.0], [-1.0, 2.0], [0.0, 3.0], [1.0, 4.0]];
//! let config = KBinsConfig::builder()
//!     .n_bins(3)
//!     .strategy(BinStrategy::Uniform)
//!     .encode(Encoding::Ordinal)
//!     .build()?;
//! let mut est = KBinsDiscretizer::new(config)?;
//! let xt = est.fit_transform(&x.view())?;
//! assert_eq!(xt.to_dense(), array![[0.0, 0.0], [1.0, 1.0], [2.0, 2.0], [2.0, 2.0]]);
//! # Ok::<(), featurekit::FeatureKitError>(())
//! ```

pub mod config;
pub mod encoder;
pub mod kmeans;
pub mod quantile;
pub mod width;

pub use config::{KBinsConfig, KBinsConfigBuilder, NBins};
pub use encoder::OneHotEncoder;
pub use kmeans::KMeans1D;
pub use quantile::PercentileEstimator;
pub use width::{BinLookup, BinWidth, BinningWarning, FeaturePartition, FittedBinning};

use crate::core::error::{FeatureKitError, Result};
use crate::core::traits::*;
use crate::core::types::*;
use crate::core::validation::{check_array, check_n_features, ensure_2d};
use config::ResolvedBins;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, ArrayViewD, Axis};
use serde::{Deserialize, Serialize};
use sprs::CsMat;

/// Output of [`KBinsDiscretizer::transform`].
#[derive(Debug, Clone, PartialEq)]
pub enum BinnedOutput {
    /// Bin indices, ignored features unchanged in their original columns
    Ordinal(Array2<f64>),
    /// Dense one-hot encoding, ignored features stacked to the right
    Dense(Array2<f64>),
    /// Sparse CSR one-hot encoding, ignored features stacked to the right
    Sparse(CsMat<f64>),
}

impl BinnedOutput {
    /// Shape of the output matrix.
    pub fn shape(&self) -> (usize, usize) {
        match self {
            BinnedOutput::Ordinal(m) | BinnedOutput::Dense(m) => m.dim(),
            BinnedOutput::Sparse(m) => m.shape(),
        }
    }

    /// Dense copy of the output.
    pub fn to_dense(&self) -> Array2<f64> {
        match self {
            BinnedOutput::Ordinal(m) | BinnedOutput::Dense(m) => m.clone(),
            BinnedOutput::Sparse(m) => m.to_dense(),
        }
    }

    /// The ordinal matrix, if this is ordinal output.
    pub fn as_ordinal(&self) -> Option<&Array2<f64>> {
        match self {
            BinnedOutput::Ordinal(m) => Some(m),
            _ => None,
        }
    }

    /// True for sparse output.
    pub fn is_sparse(&self) -> bool {
        matches!(self, BinnedOutput::Sparse(_))
    }
}

impl From<EncodedMatrix> for BinnedOutput {
    fn from(matrix: EncodedMatrix) -> Self {
        match matrix {
            EncodedMatrix::Dense(m) => BinnedOutput::Dense(m),
            EncodedMatrix::Sparse(m) => BinnedOutput::Sparse(m),
        }
    }
}

/// Bins continuous features into intervals.
#[derive(Debug)]
pub struct KBinsDiscretizer {
    config: KBinsConfig,
    fitted: Option<FittedBinning>,
    quantiles: Box<dyn QuantileEstimator>,
    clusterer: Box<dyn Clusterer1D>,
    encoder: Box<dyn CategoricalEncoder>,
}

/// Serializable discretizer state
#[derive(Debug, Clone, Serialize, Deserialize)]
struct BinningModel {
    config: KBinsConfig,
    fitted: FittedBinning,
}

impl KBinsDiscretizer {
    /// Create an unfitted discretizer with the default collaborators.
    pub fn new(config: KBinsConfig) -> Result<Self> {
        config.validate()?;
        Ok(KBinsDiscretizer {
            config,
            fitted: None,
            quantiles: Box::new(PercentileEstimator::new()),
            clusterer: Box::new(KMeans1D::new()),
            encoder: Box::new(OneHotEncoder::new()),
        })
    }

    /// Replace the quantile estimator used by the `quantile` strategy.
    pub fn with_quantile_estimator<Q: QuantileEstimator + 'static>(mut self, quantiles: Q) -> Self {
        self.quantiles = Box::new(quantiles);
        self
    }

    /// Replace the clusterer used by the `kmeans` strategy.
    pub fn with_clusterer<C: Clusterer1D + 'static>(mut self, clusterer: C) -> Self {
        self.clusterer = Box::new(clusterer);
        self
    }

    /// Replace the one-hot encoder.
    pub fn with_encoder<E: CategoricalEncoder + 'static>(mut self, encoder: E) -> Self {
        self.encoder = Box::new(encoder);
        self
    }

    /// Configuration of this discretizer.
    pub fn config(&self) -> &KBinsConfig {
        &self.config
    }

    /// Whether `fit` has completed.
    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    /// Fitted state.
    pub fn fitted(&self) -> Result<&FittedBinning> {
        self.fitted
            .as_ref()
            .ok_or_else(|| FeatureKitError::not_fitted("KBinsDiscretizer"))
    }

    /// Fit bin edges on `x` (n_samples × n_features).
    ///
    /// On error the previously fitted state, if any, is left untouched.
    pub fn fit(&mut self, x: &ArrayView2<'_, f64>) -> Result<()> {
        check_array(x)?;
        let fitted = self.compute_fit(x)?;

        log::debug!(
            "Fitted {} strategy on {} samples: {} transformed, {} ignored features",
            fitted.strategy,
            x.nrows(),
            fitted.transformed_features().len(),
            fitted.partition().ignored().len()
        );

        self.fitted = Some(fitted);
        Ok(())
    }

    /// Fit on an array of any dimensionality; anything but 2-D is rejected.
    pub fn fit_dyn(&mut self, x: ArrayViewD<'_, f64>) -> Result<()> {
        let x = ensure_2d(x)?;
        self.fit(&x)
    }

    /// Fit on `x`, then transform it.
    pub fn fit_transform(&mut self, x: &ArrayView2<'_, f64>) -> Result<BinnedOutput> {
        self.fit(x)?;
        self.transform(x)
    }

    fn compute_fit(&self, x: &ArrayView2<'_, f64>) -> Result<FittedBinning> {
        let n_features = x.ncols();
        let strategy = self.config.strategy;
        let ResolvedBins {
            partition,
            mut n_bins,
        } = self.config.resolve(n_features)?;

        let mut offset = Array1::zeros(n_features);
        let mut bin_width = Vec::with_capacity(n_features);
        let mut warnings = Vec::new();

        for feature in 0..n_features {
            if partition.is_ignored(feature) {
                bin_width.push(zero_width(strategy, 0));
                continue;
            }

            let column = x.column(feature);
            let (min, max) = min_max(&column);
            offset[feature] = min;

            if max - min == 0.0 {
                let warning = BinningWarning::ConstantFeature { feature };
                log::warn!("{}", warning);
                warnings.push(warning);
                n_bins[feature] = 1;
                bin_width.push(zero_width(strategy, 1));
                continue;
            }

            let width = match strategy {
                BinStrategy::Uniform => BinWidth::Uniform((max - min) / n_bins[feature] as f64),
                BinStrategy::Quantile => {
                    let boundaries = self.quantiles.boundaries(&column, n_bins[feature] + 1)?;
                    BinWidth::NonUniform(differences(&boundaries))
                }
                BinStrategy::KMeans => {
                    let mut centers =
                        self.clusterer
                            .centers(&column, n_bins[feature], self.config.seed())?;
                    centers.sort_by(|a, b| a.total_cmp(b));

                    let mut boundaries = Vec::with_capacity(centers.len() + 1);
                    boundaries.push(min);
                    boundaries.extend(centers.windows(2).map(|pair| (pair[0] + pair[1]) * 0.5));
                    boundaries.push(max);
                    BinWidth::NonUniform(differences(&boundaries))
                }
            };
            log::trace!("feature {}: {} bins, widths {:?}", feature, n_bins[feature], width);
            bin_width.push(width);
        }

        Ok(FittedBinning {
            strategy,
            offset,
            n_bins,
            bin_width,
            partition,
            warnings,
        })
    }

    /// Map `x` to bins, encoded per the configured [`Encoding`].
    pub fn transform(&self, x: &ArrayView2<'_, f64>) -> Result<BinnedOutput> {
        let fitted = self.fitted()?;
        check_array(x)?;
        check_n_features(x, fitted.n_features())?;

        let mut binned = x.to_owned();
        for &feature in fitted.transformed_features() {
            let (offset, lookup) = fitted.feature_lookup(feature);
            for (out, &value) in binned.column_mut(feature).iter_mut().zip(x.column(feature)) {
                *out = lookup.bin_of(value - offset) as f64;
            }
        }

        if !self.config.encode.is_one_hot() {
            return Ok(BinnedOutput::Ordinal(binned));
        }

        let transformed = fitted.transformed_features();
        let ignored = fitted.partition().ignored();
        let ordinal = binned.select(Axis(1), transformed);
        let passthrough = if ignored.is_empty() {
            None
        } else {
            Some(x.select(Axis(1), ignored))
        };
        let cardinalities: Vec<BinCount> =
            transformed.iter().map(|&f| fitted.n_bins()[f]).collect();

        let encoded = self.encoder.encode(
            &ordinal.view(),
            &cardinalities,
            passthrough.as_ref().map(|p| p.view()).as_ref(),
            self.config.encode == Encoding::OneHot,
        )?;
        Ok(encoded.into())
    }

    /// Transform an array of any dimensionality; anything but 2-D is rejected.
    pub fn transform_dyn(&self, x: ArrayViewD<'_, f64>) -> Result<BinnedOutput> {
        let x = ensure_2d(x)?;
        self.transform(&x)
    }

    /// Map ordinal bins back to representative values (bin midpoints).
    ///
    /// The projection is lossy: every value in a bin maps to the same point.
    /// Only ordinal encoding can be inverted.
    pub fn inverse_transform(&self, xt: &ArrayView2<'_, f64>) -> Result<Array2<f64>> {
        let fitted = self.fitted()?;
        if self.config.encode.is_one_hot() {
            return Err(FeatureKitError::config(format!(
                "inverse_transform only supports 'encode = ordinal'. Got encode='{}' instead.",
                self.config.encode
            )));
        }
        check_array(xt)?;
        check_n_features(xt, fitted.n_features())?;

        let mut restored = xt.to_owned();
        for &feature in fitted.transformed_features() {
            let n_bins = fitted.n_bins()[feature];
            let (offset, lookup) = fitted.feature_lookup(feature);
            for (out, &value) in restored.column_mut(feature).iter_mut().zip(xt.column(feature)) {
                if value.fract() != 0.0 || value < 0.0 || value >= n_bins as f64 {
                    return Err(FeatureKitError::invalid_parameter(
                        format!("bin of feature {}", feature),
                        value.to_string(),
                        format!("expected an integer bin index in [0, {}]", n_bins - 1),
                    ));
                }
                *out = offset + lookup.midpoint(value as usize);
            }
        }
        Ok(restored)
    }

    /// Save the configuration and fitted state with bincode.
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let model = BinningModel {
            config: self.config.clone(),
            fitted: self.fitted()?.clone(),
        };
        let serialized = bincode::serialize(&model).map_err(|e| {
            FeatureKitError::serialization(format!("Failed to serialize binning model: {}", e))
        })?;
        std::fs::write(path, serialized)?;
        Ok(())
    }

    /// Load a discretizer written by [`save`](Self::save).
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path)?;
        let model: BinningModel = bincode::deserialize(&data).map_err(|e| {
            FeatureKitError::serialization(format!("Failed to deserialize binning model: {}", e))
        })?;
        let mut discretizer = KBinsDiscretizer::new(model.config)?;
        discretizer.fitted = Some(model.fitted);
        Ok(discretizer)
    }
}

fn zero_width(strategy: BinStrategy, n_bins: BinCount) -> BinWidth {
    if strategy.is_non_uniform() {
        BinWidth::NonUniform(vec![0.0; n_bins])
    } else {
        BinWidth::Uniform(0.0)
    }
}

fn min_max(column: &ArrayView1<'_, f64>) -> (f64, f64) {
    column
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

fn differences(boundaries: &[f64]) -> Vec<f64> {
    boundaries.windows(2).map(|pair| pair[1] - pair[0]).collect()
}
