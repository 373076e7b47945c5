//! Distance functions.

use crate::core::traits::MetricConfig;
use crate::core::types::DistanceMetric;
use ndarray::ArrayView1;

/// Distance between two points under `config`.
///
/// `p` is only consulted for the Minkowski metric; `p = inf` reduces to
/// Chebyshev, `p = 1` to Manhattan and `p = 2` to Euclidean.
pub fn distance(config: &MetricConfig, a: &ArrayView1<'_, f64>, b: &ArrayView1<'_, f64>) -> f64 {
    let diffs = a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs());
    match config.metric {
        DistanceMetric::Euclidean => diffs.map(|d| d * d).sum::<f64>().sqrt(),
        DistanceMetric::Manhattan => diffs.sum(),
        DistanceMetric::Chebyshev => diffs.fold(0.0, f64::max),
        DistanceMetric::Minkowski => minkowski(diffs, config.p),
    }
}

fn minkowski<I: Iterator<Item = f64>>(diffs: I, p: f64) -> f64 {
    if p.is_infinite() {
        diffs.fold(0.0, f64::max)
    } else if p == 1.0 {
        diffs.sum()
    } else if p == 2.0 {
        diffs.map(|d| d * d).sum::<f64>().sqrt()
    } else {
        diffs.map(|d| d.powf(p)).sum::<f64>().powf(1.0 / p)
    }
}
