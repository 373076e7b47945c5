//! Configuration for the binning engine.
//!
//! [`KBinsConfig`] holds the user-facing parameters. Data-independent checks
//! run in [`KBinsConfig::validate`]; checks that need the feature count
//! (ignored indices in range, per-feature bin vector length) run when the
//! discretizer is fitted, through [`KBinsConfig::resolve`].

use crate::binning::width::FeaturePartition;
use crate::config::ConfigFile;
use crate::core::constants::*;
use crate::core::error::{FeatureKitError, Result};
use crate::core::types::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Number of bins requested per feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NBins {
    /// Same count for every non-ignored feature
    Scalar(BinCount),
    /// One count per feature; entries at ignored indices are not checked
    PerFeature(Vec<BinCount>),
}

impl Default for NBins {
    fn default() -> Self {
        NBins::Scalar(DEFAULT_N_BINS)
    }
}

impl From<BinCount> for NBins {
    fn from(value: BinCount) -> Self {
        NBins::Scalar(value)
    }
}

impl From<Vec<BinCount>> for NBins {
    fn from(value: Vec<BinCount>) -> Self {
        NBins::PerFeature(value)
    }
}

/// Configuration of a [`KBinsDiscretizer`](crate::binning::KBinsDiscretizer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KBinsConfig {
    /// Number of bins per feature
    pub n_bins: NBins,
    /// Column indices left untouched by the discretizer
    pub ignored_features: Option<Vec<FeatureIndex>>,
    /// Output encoding
    pub encode: Encoding,
    /// Edge placement strategy
    pub strategy: BinStrategy,
    /// Seed for the k-means strategy
    pub random_state: Option<u64>,
}

impl Default for KBinsConfig {
    fn default() -> Self {
        KBinsConfig {
            n_bins: NBins::default(),
            ignored_features: None,
            encode: DEFAULT_ENCODING,
            strategy: DEFAULT_STRATEGY,
            random_state: None,
        }
    }
}

/// Bin counts and feature partition resolved against a concrete feature count.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ResolvedBins {
    pub(crate) partition: FeaturePartition,
    pub(crate) n_bins: Vec<BinCount>,
}

impl KBinsConfig {
    /// Create a builder starting from the defaults.
    pub fn builder() -> KBinsConfigBuilder {
        KBinsConfigBuilder::new()
    }

    /// Validate the parameters that do not depend on the data.
    pub fn validate(&self) -> Result<()> {
        if let NBins::Scalar(n) = self.n_bins {
            validate_scalar_bins(n)?;
        }
        if let Some(ignored) = &self.ignored_features {
            check_duplicates(ignored)?;
        }
        Ok(())
    }

    /// Seed handed to the clustering collaborator.
    pub fn seed(&self) -> u64 {
        self.random_state.unwrap_or(DEFAULT_RANDOM_SEED)
    }

    /// Resolve ignored indices and per-feature bin counts for `n_features`.
    pub(crate) fn resolve(&self, n_features: usize) -> Result<ResolvedBins> {
        let ignored = self.resolve_ignored(n_features)?;
        let partition = FeaturePartition::new(n_features, &ignored);
        let n_bins = self.resolve_n_bins(&partition)?;
        Ok(ResolvedBins { partition, n_bins })
    }

    fn resolve_ignored(&self, n_features: usize) -> Result<Vec<FeatureIndex>> {
        let ignored = match &self.ignored_features {
            None => return Ok(Vec::new()),
            Some(ignored) => ignored,
        };

        check_duplicates(ignored)?;

        if let Some(&bad) = ignored.iter().find(|&&idx| idx >= n_features) {
            return Err(FeatureKitError::invalid_parameter(
                "ignored_features",
                bad.to_string(),
                format!("Invalid ignored feature index, must be in [0, {})", n_features),
            ));
        }

        Ok(ignored.clone())
    }

    fn resolve_n_bins(&self, partition: &FeaturePartition) -> Result<Vec<BinCount>> {
        let n_features = partition.n_features();
        match &self.n_bins {
            NBins::Scalar(n) => {
                validate_scalar_bins(*n)?;
                Ok((0..n_features)
                    .map(|idx| if partition.is_ignored(idx) { 0 } else { *n })
                    .collect())
            }
            NBins::PerFeature(per_feature) => {
                if per_feature.len() != n_features {
                    return Err(FeatureKitError::config(format!(
                        "n_bins must be a scalar or array of shape (n_features,). \
                         Got {} entries for {} features.",
                        per_feature.len(),
                        n_features
                    )));
                }

                let violating: Vec<String> = per_feature
                    .iter()
                    .enumerate()
                    .filter(|&(idx, &n)| !partition.is_ignored(idx) && n < MIN_N_BINS)
                    .map(|(idx, _)| idx.to_string())
                    .collect();
                if !violating.is_empty() {
                    return Err(FeatureKitError::config(format!(
                        "KBinsDiscretizer received an invalid number of bins at indices {}. \
                         Number of bins must be at least {}.",
                        violating.join(", "),
                        MIN_N_BINS
                    )));
                }

                Ok(per_feature
                    .iter()
                    .enumerate()
                    .map(|(idx, &n)| if partition.is_ignored(idx) { 0 } else { n })
                    .collect())
            }
        }
    }
}

impl ConfigFile for KBinsConfig {
    fn validate(&self) -> Result<()> {
        KBinsConfig::validate(self)
    }
}

fn validate_scalar_bins(n: BinCount) -> Result<()> {
    if n < MIN_N_BINS {
        return Err(FeatureKitError::invalid_parameter(
            "n_bins",
            n.to_string(),
            format!(
                "KBinsDiscretizer received an invalid number of bins. Received {}, expected at least {}.",
                n, MIN_N_BINS
            ),
        ));
    }
    Ok(())
}

fn check_duplicates(ignored: &[FeatureIndex]) -> Result<()> {
    let unique: HashSet<_> = ignored.iter().collect();
    if unique.len() != ignored.len() {
        return Err(FeatureKitError::config(
            "Duplicate ignored column indices found.",
        ));
    }
    Ok(())
}

/// Builder for [`KBinsConfig`].
#[derive(Debug, Clone, Default)]
pub struct KBinsConfigBuilder {
    config: KBinsConfig,
}

impl KBinsConfigBuilder {
    /// Start from the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of bins (scalar or per-feature).
    pub fn n_bins<N: Into<NBins>>(mut self, n_bins: N) -> Self {
        self.config.n_bins = n_bins.into();
        self
    }

    /// Set the ignored feature indices.
    pub fn ignored_features(mut self, ignored: Vec<FeatureIndex>) -> Self {
        self.config.ignored_features = Some(ignored);
        self
    }

    /// Set the output encoding.
    pub fn encode(mut self, encode: Encoding) -> Self {
        self.config.encode = encode;
        self
    }

    /// Set the binning strategy.
    pub fn strategy(mut self, strategy: BinStrategy) -> Self {
        self.config.strategy = strategy;
        self
    }

    /// Set the k-means seed.
    pub fn random_state(mut self, seed: u64) -> Self {
        self.config.random_state = Some(seed);
        self
    }

    /// Validate and return the configuration.
    pub fn build(self) -> Result<KBinsConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = KBinsConfig::default();
        assert_eq!(config.n_bins, NBins::Scalar(2));
        assert_eq!(config.encode, Encoding::OneHot);
        assert_eq!(config.strategy, BinStrategy::Uniform);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_scalar_n_bins_too_small() {
        let err = KBinsConfig::builder().n_bins(1).build().unwrap_err();
        assert!(err.is_config_error());
        assert!(err
            .to_string()
            .contains("Received 1, expected at least 2."));
    }

    #[test]
    fn test_scalar_broadcast_skips_ignored() {
        let config = KBinsConfig::builder()
            .n_bins(3)
            .ignored_features(vec![1])
            .build()
            .unwrap();
        let resolved = config.resolve(3).unwrap();
        assert_eq!(resolved.n_bins, vec![3, 0, 3]);
        assert_eq!(resolved.partition.transformed(), &[0, 2]);
    }

    #[test]
    fn test_per_feature_wrong_length() {
        let config = KBinsConfig::builder().n_bins(vec![1, 2, 2]).build().unwrap();
        let err = config.resolve(4).unwrap_err();
        assert!(err
            .to_string()
            .contains("n_bins must be a scalar or array of shape (n_features,)."));
    }

    #[test]
    fn test_per_feature_lists_violating_indices() {
        let config = KBinsConfig::builder().n_bins(vec![1, 2, 2, 1]).build().unwrap();
        let err = config.resolve(4).unwrap_err();
        assert!(err.is_config_error());
        assert!(err
            .to_string()
            .contains("invalid number of bins at indices 0, 3."));
    }

    #[test]
    fn test_per_feature_ignored_entries_unchecked() {
        let config = KBinsConfig::builder()
            .n_bins(vec![2, 3, 0, 3])
            .ignored_features(vec![1, 2])
            .build()
            .unwrap();
        let resolved = config.resolve(4).unwrap();
        assert_eq!(resolved.n_bins, vec![2, 0, 0, 3]);
    }

    #[test]
    fn test_duplicate_ignored_features() {
        let err = KBinsConfig::builder()
            .ignored_features(vec![1, 1])
            .build()
            .unwrap_err();
        assert!(err
            .to_string()
            .contains("Duplicate ignored column indices found."));
    }

    #[test]
    fn test_out_of_range_ignored_feature() {
        let config = KBinsConfig::builder().ignored_features(vec![4]).build().unwrap();
        let err = config.resolve(4).unwrap_err();
        assert!(matches!(err, FeatureKitError::InvalidParameter { .. }));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = KBinsConfig::builder()
            .n_bins(vec![2, 3])
            .strategy(BinStrategy::Quantile)
            .encode(Encoding::Ordinal)
            .build()
            .unwrap();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed = KBinsConfig::from_str_with_format(&text, crate::config::ConfigFormat::Toml)
            .unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_json_rejects_unknown_strategy() {
        let text = r#"{ "strategy": "invalid-strategy" }"#;
        let err =
            KBinsConfig::from_str_with_format(text, crate::config::ConfigFormat::Json).unwrap_err();
        assert!(err.to_string().contains("Valid options for 'strategy'"));
    }
}
