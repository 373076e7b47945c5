//! Configuration for neighbor graph construction.

use crate::config::ConfigFile;
use crate::core::constants::*;
use crate::core::error::{FeatureKitError, Result};
use crate::core::traits::MetricConfig;
use crate::core::types::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Parameters shared by the graph builders and the neighbor transformers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NeighborsConfig {
    /// Neighbors per row for k-nearest queries
    pub n_neighbors: usize,
    /// Distance threshold for radius queries
    pub radius: f64,
    /// Edge weighting
    pub mode: WeightMode,
    /// Whether each fit point is its own neighbor; `None` picks by mode
    pub include_self: Option<bool>,
    /// Distance metric
    pub metric: DistanceMetric,
    /// Minkowski power
    pub p: f64,
    /// Additional metric parameters
    pub metric_params: Option<BTreeMap<String, f64>>,
    /// Search worker count; -1 uses every core
    pub n_jobs: i32,
}

impl Default for NeighborsConfig {
    fn default() -> Self {
        NeighborsConfig {
            n_neighbors: DEFAULT_N_NEIGHBORS,
            radius: DEFAULT_RADIUS,
            mode: WeightMode::default(),
            include_self: None,
            metric: DistanceMetric::default(),
            p: DEFAULT_MINKOWSKI_P,
            metric_params: None,
            n_jobs: DEFAULT_N_JOBS,
        }
    }
}

impl NeighborsConfig {
    /// Create a builder starting from the defaults.
    pub fn builder() -> NeighborsConfigBuilder {
        NeighborsConfigBuilder::new()
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<()> {
        validate_n_neighbors(self.n_neighbors)?;
        validate_radius(self.radius)?;

        if self.p.is_nan() || self.p < 1.0 {
            return Err(FeatureKitError::invalid_parameter(
                "p",
                self.p.to_string(),
                "p must be greater than or equal to 1",
            ));
        }

        crate::ensure!(
            self.n_jobs != 0,
            FeatureKitError::invalid_parameter(
                "n_jobs",
                "0",
                "n_jobs == 0 has no meaning; use a positive count or -1 for all cores",
            )
        );

        Ok(())
    }

    /// Distance configuration described by this config.
    pub fn metric_config(&self) -> MetricConfig {
        MetricConfig {
            metric: self.metric,
            p: self.p,
            metric_params: self.metric_params.clone(),
        }
    }

    /// Effective worker count.
    pub fn effective_n_jobs(&self) -> usize {
        resolve_n_jobs(self.n_jobs)
    }
}

impl ConfigFile for NeighborsConfig {
    fn validate(&self) -> Result<()> {
        NeighborsConfig::validate(self)
    }
}

/// Map `n_jobs` to a thread count: negative values count back from the
/// number of cores (`-1` = all of them).
pub fn resolve_n_jobs(n_jobs: i32) -> usize {
    let cpus = num_cpus::get() as i64;
    let n = if n_jobs < 0 {
        cpus + 1 + n_jobs as i64
    } else {
        n_jobs as i64
    };
    n.max(1) as usize
}

pub(crate) fn validate_n_neighbors(n_neighbors: usize) -> Result<()> {
    if n_neighbors == 0 {
        return Err(FeatureKitError::invalid_parameter(
            "n_neighbors",
            "0",
            "Expected n_neighbors > 0",
        ));
    }
    Ok(())
}

pub(crate) fn validate_radius(radius: f64) -> Result<()> {
    if !radius.is_finite() || radius < 0.0 {
        return Err(FeatureKitError::invalid_parameter(
            "radius",
            radius.to_string(),
            "radius must be a finite, non-negative number",
        ));
    }
    Ok(())
}

/// Builder for [`NeighborsConfig`].
#[derive(Debug, Clone, Default)]
pub struct NeighborsConfigBuilder {
    config: NeighborsConfig,
}

impl NeighborsConfigBuilder {
    /// Start from the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the neighbor count.
    pub fn n_neighbors(mut self, n_neighbors: usize) -> Self {
        self.config.n_neighbors = n_neighbors;
        self
    }

    /// Set the radius.
    pub fn radius(mut self, radius: f64) -> Self {
        self.config.radius = radius;
        self
    }

    /// Set the edge weighting.
    pub fn mode(mut self, mode: WeightMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Force self-inclusion on or off.
    pub fn include_self(mut self, include_self: bool) -> Self {
        self.config.include_self = Some(include_self);
        self
    }

    /// Set the metric.
    pub fn metric(mut self, metric: DistanceMetric) -> Self {
        self.config.metric = metric;
        self
    }

    /// Set the Minkowski power.
    pub fn p(mut self, p: f64) -> Self {
        self.config.p = p;
        self
    }

    /// Set extra metric parameters.
    pub fn metric_params(mut self, params: BTreeMap<String, f64>) -> Self {
        self.config.metric_params = Some(params);
        self
    }

    /// Set the worker count.
    pub fn n_jobs(mut self, n_jobs: i32) -> Self {
        self.config.n_jobs = n_jobs;
        self
    }

    /// Validate and return the configuration.
    pub fn build(self) -> Result<NeighborsConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigFormat;

    #[test]
    fn test_defaults() {
        let config = NeighborsConfig::default();
        assert_eq!(config.n_neighbors, 5);
        assert_eq!(config.mode, WeightMode::Connectivity);
        assert_eq!(config.metric, DistanceMetric::Minkowski);
        assert_eq!(config.p, 2.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_values() {
        assert!(NeighborsConfig::builder().n_neighbors(0).build().is_err());
        assert!(NeighborsConfig::builder().radius(-1.0).build().is_err());
        assert!(NeighborsConfig::builder().radius(f64::NAN).build().is_err());
        assert!(NeighborsConfig::builder().p(0.5).build().is_err());
        assert!(NeighborsConfig::builder().n_jobs(0).build().is_err());
        assert!(NeighborsConfig::builder().p(f64::INFINITY).build().is_ok());
    }

    #[test]
    fn test_resolve_n_jobs() {
        assert_eq!(resolve_n_jobs(3), 3);
        assert_eq!(resolve_n_jobs(-1), num_cpus::get());
        assert_eq!(resolve_n_jobs(-10_000), 1);
    }

    #[test]
    fn test_json_round_trip() {
        let config = NeighborsConfig::builder()
            .n_neighbors(3)
            .mode(WeightMode::Distance)
            .metric(DistanceMetric::Manhattan)
            .metric_params(BTreeMap::from([("w".to_string(), 2.0)]))
            .build()
            .unwrap();
        let text = serde_json::to_string(&config).unwrap();
        let parsed = NeighborsConfig::from_str_with_format(&text, ConfigFormat::Json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_toml_partial_config() {
        let text = "n_neighbors = 2\nmode = \"distance\"\nmetric = \"l1\"\n";
        let parsed = NeighborsConfig::from_str_with_format(text, ConfigFormat::Toml).unwrap();
        assert_eq!(parsed.n_neighbors, 2);
        assert_eq!(parsed.mode, WeightMode::Distance);
        assert_eq!(parsed.metric, DistanceMetric::Manhattan);
        assert_eq!(parsed.radius, DEFAULT_RADIUS);
    }
}
