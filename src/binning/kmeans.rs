//! One-dimensional k-means used to place cluster-derived bin edges.

use crate::core::constants::*;
use crate::core::error::{FeatureKitError, Result};
use crate::core::traits::Clusterer1D;
use ndarray::ArrayView1;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Lloyd's k-means on a single column with k-means++ seeding and restarts.
#[derive(Debug, Clone)]
pub struct KMeans1D {
    n_init: usize,
    max_iter: usize,
    tol: f64,
}

impl Default for KMeans1D {
    fn default() -> Self {
        KMeans1D {
            n_init: KMEANS_N_INIT,
            max_iter: KMEANS_MAX_ITER,
            tol: KMEANS_TOL,
        }
    }
}

/// Outcome of one k-means run.
#[derive(Debug, Clone)]
struct Run {
    centers: Vec<f64>,
    inertia: f64,
}

impl KMeans1D {
    /// Create a clusterer with the default restart and iteration budget.
    pub fn new() -> Self {
        Self::default()
    }

    fn seed_centers(values: &[f64], k: usize, rng: &mut StdRng) -> Vec<f64> {
        let n = values.len();
        let mut centers = Vec::with_capacity(k);
        centers.push(values[rng.gen_range(0..n)]);

        while centers.len() < k {
            let dists: Vec<f64> = values
                .iter()
                .map(|&v| {
                    centers
                        .iter()
                        .map(|&c| (v - c) * (v - c))
                        .fold(f64::MAX, f64::min)
                })
                .collect();
            let total: f64 = dists.iter().sum();
            if total <= 0.0 {
                centers.push(values[rng.gen_range(0..n)]);
                continue;
            }

            let target = rng.gen::<f64>() * total;
            let mut cumulative = 0.0;
            let mut chosen = n - 1;
            for (i, &d) in dists.iter().enumerate() {
                cumulative += d;
                if cumulative >= target {
                    chosen = i;
                    break;
                }
            }
            centers.push(values[chosen]);
        }

        centers
    }

    fn nearest(centers: &[f64], value: f64) -> (usize, f64) {
        let mut best = 0;
        let mut best_dist = f64::MAX;
        for (c, &center) in centers.iter().enumerate() {
            let d = (value - center) * (value - center);
            if d < best_dist {
                best_dist = d;
                best = c;
            }
        }
        (best, best_dist)
    }

    fn run(&self, values: &[f64], k: usize, tol: f64, rng: &mut StdRng) -> Run {
        let mut centers = Self::seed_centers(values, k, rng);
        let mut labels = vec![0usize; values.len()];

        for iteration in 0..self.max_iter {
            for (label, &v) in labels.iter_mut().zip(values) {
                *label = Self::nearest(&centers, v).0;
            }

            let mut sums = vec![0.0; k];
            let mut counts = vec![0usize; k];
            for (&label, &v) in labels.iter().zip(values) {
                sums[label] += v;
                counts[label] += 1;
            }

            let mut new_centers: Vec<f64> = (0..k)
                .map(|c| {
                    if counts[c] > 0 {
                        sums[c] / counts[c] as f64
                    } else {
                        centers[c]
                    }
                })
                .collect();

            // Relocate empty clusters onto the points farthest from their center.
            for c in (0..k).filter(|&c| counts[c] == 0) {
                let farthest = values
                    .iter()
                    .enumerate()
                    .map(|(i, &v)| (i, (v - new_centers[labels[i]]).abs()))
                    .max_by(|a, b| a.1.total_cmp(&b.1))
                    .map(|(i, _)| i);
                if let Some(i) = farthest {
                    new_centers[c] = values[i];
                    labels[i] = c;
                }
            }

            let shift: f64 = centers
                .iter()
                .zip(&new_centers)
                .map(|(a, b)| (a - b) * (a - b))
                .sum();
            centers = new_centers;

            if shift <= tol {
                log::trace!("k-means converged after {} iterations", iteration + 1);
                break;
            }
        }

        let inertia = values.iter().map(|&v| Self::nearest(&centers, v).1).sum();
        Run { centers, inertia }
    }
}

impl Clusterer1D for KMeans1D {
    fn centers(&self, column: &ArrayView1<'_, f64>, n_clusters: usize, seed: u64) -> Result<Vec<f64>> {
        let values: Vec<f64> = column.to_vec();
        if n_clusters == 0 {
            return Err(FeatureKitError::invalid_parameter(
                "n_clusters",
                "0",
                "must be at least 1",
            ));
        }
        if values.len() < n_clusters {
            return Err(FeatureKitError::invalid_parameter(
                "n_clusters",
                n_clusters.to_string(),
                format!(
                    "n_samples={} should be >= n_clusters={}",
                    values.len(),
                    n_clusters
                ),
            ));
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
        let tol = variance * self.tol;

        let mut rng = StdRng::seed_from_u64(seed);
        let mut best: Option<Run> = None;
        for _ in 0..self.n_init {
            let run = self.run(&values, n_clusters, tol, &mut rng);
            let better = best.as_ref().map_or(true, |b| run.inertia < b.inertia);
            if better {
                best = Some(run);
            }
        }

        best.map(|run| run.centers)
            .ok_or_else(|| FeatureKitError::internal("k-means produced no run"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn sorted(mut centers: Vec<f64>) -> Vec<f64> {
        centers.sort_by(|a, b| a.total_cmp(b));
        centers
    }

    #[test]
    fn test_separated_clusters() {
        let column = array![0.0, 0.1, 0.2, 5.0, 5.1, 5.2, 10.0, 10.1, 10.2];
        let centers = sorted(KMeans1D::new().centers(&column.view(), 3, 0).unwrap());
        assert_abs_diff_eq!(centers[0], 0.1, epsilon = 1e-9);
        assert_abs_diff_eq!(centers[1], 5.1, epsilon = 1e-9);
        assert_abs_diff_eq!(centers[2], 10.1, epsilon = 1e-9);
    }

    #[test]
    fn test_two_clusters() {
        let column = array![0.0, 1.0, 2.0, 3.0, 9.0, 10.0];
        let centers = sorted(KMeans1D::new().centers(&column.view(), 2, 7).unwrap());
        assert_abs_diff_eq!(centers[0], 1.5, epsilon = 1e-9);
        assert_abs_diff_eq!(centers[1], 9.5, epsilon = 1e-9);
    }

    #[test]
    fn test_same_seed_is_reproducible() {
        let column = array![0.3, 1.7, 2.2, 4.9, 5.5, 8.1, 9.4, 9.9];
        let a = KMeans1D::new().centers(&column.view(), 3, 42).unwrap();
        let b = KMeans1D::new().centers(&column.view(), 3, 42).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_too_few_samples() {
        let column = array![1.0, 2.0];
        let err = KMeans1D::new().centers(&column.view(), 3, 0).unwrap_err();
        assert!(err.to_string().contains("n_samples=2 should be >= n_clusters=3"));
    }
}
