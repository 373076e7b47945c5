//! Quantile boundary estimation.

use crate::core::error::{FeatureKitError, Result};
use crate::core::traits::QuantileEstimator;
use ndarray::ArrayView1;

/// Linear-interpolated percentiles at evenly spaced references in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PercentileEstimator;

impl PercentileEstimator {
    /// Create a new estimator.
    pub fn new() -> Self {
        PercentileEstimator
    }

    fn percentile(sorted: &[f64], reference: f64) -> f64 {
        let position = reference * (sorted.len() - 1) as f64;
        let lower = position.floor() as usize;
        let upper = (lower + 1).min(sorted.len() - 1);
        let fraction = position - lower as f64;
        sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
    }
}

impl QuantileEstimator for PercentileEstimator {
    fn boundaries(&self, column: &ArrayView1<'_, f64>, n_quantiles: usize) -> Result<Vec<f64>> {
        if n_quantiles < 2 {
            return Err(FeatureKitError::invalid_parameter(
                "n_quantiles",
                n_quantiles.to_string(),
                "must be at least 2",
            ));
        }
        if column.is_empty() {
            return Err(FeatureKitError::shape(
                "Cannot estimate quantiles of an empty column",
            ));
        }

        let mut sorted: Vec<f64> = column.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let last = (n_quantiles - 1) as f64;
        let mut boundaries: Vec<f64> = (0..n_quantiles)
            .map(|i| Self::percentile(&sorted, i as f64 / last))
            .collect();

        // interpolation error must not break monotonicity
        for i in 1..boundaries.len() {
            if boundaries[i] < boundaries[i - 1] {
                boundaries[i] = boundaries[i - 1];
            }
        }

        log::trace!("quantile boundaries: {:?}", boundaries);
        Ok(boundaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_boundaries_span_range() {
        let column = array![1.0, -2.0, 0.0, -1.0];
        let boundaries = PercentileEstimator::new()
            .boundaries(&column.view(), 4)
            .unwrap();
        assert_eq!(boundaries, vec![-2.0, -1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_boundaries_interpolate() {
        let column = array![0.0, 1.0, 2.0, 3.0, 9.0, 10.0];
        let boundaries = PercentileEstimator::new()
            .boundaries(&column.view(), 4)
            .unwrap();
        assert_eq!(boundaries.len(), 4);
        assert_abs_diff_eq!(boundaries[0], 0.0);
        assert_abs_diff_eq!(boundaries[1], 5.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(boundaries[2], 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(boundaries[3], 10.0);
    }

    #[test]
    fn test_rejects_degenerate_requests() {
        let column = array![1.0, 2.0];
        assert!(PercentileEstimator::new().boundaries(&column.view(), 1).is_err());
        let empty = ndarray::Array1::<f64>::zeros(0);
        assert!(PercentileEstimator::new().boundaries(&empty.view(), 3).is_err());
    }
}
