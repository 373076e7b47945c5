//! Exhaustive nearest-neighbor search.

use crate::core::error::{FeatureKitError, Result};
use crate::core::traits::{MetricConfig, NeighborIndex, Neighborhood};
use crate::core::types::SampleIndex;
use crate::core::validation::{check_array, check_n_features};
use crate::neighbors::config::{validate_n_neighbors, validate_radius, NeighborsConfig};
use crate::neighbors::metric::distance;
use ndarray::{Array2, ArrayView2};
use rayon::prelude::*;
use std::cmp::Ordering;

/// Brute-force index: every query row is compared against every reference
/// point. Query rows are distributed over a dedicated rayon pool.
#[derive(Debug)]
pub struct BruteForceIndex {
    points: Array2<f64>,
    metric: MetricConfig,
    thread_pool: rayon::ThreadPool,
}

impl BruteForceIndex {
    /// Index `points` under `metric`, searching with `n_jobs` threads.
    pub fn build(points: &ArrayView2<'_, f64>, metric: MetricConfig, n_jobs: usize) -> Result<Self> {
        check_array(points)?;
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(n_jobs.max(1))
            .build()
            .map_err(|e| FeatureKitError::internal(format!("Failed to create thread pool: {}", e)))?;

        log::debug!(
            "Built brute-force index over {} points ({} features, metric {}, {} threads)",
            points.nrows(),
            points.ncols(),
            metric.metric,
            thread_pool.current_num_threads()
        );

        Ok(BruteForceIndex {
            points: points.to_owned(),
            metric,
            thread_pool,
        })
    }

    /// Index `points` with the metric and worker count of `config`.
    pub fn from_config(points: &ArrayView2<'_, f64>, config: &NeighborsConfig) -> Result<Self> {
        config.validate()?;
        Self::build(points, config.metric_config(), config.effective_n_jobs())
    }

    /// Sorted candidates of every query row, handed to `select` per row.
    fn search<F>(&self, query: Option<&ArrayView2<'_, f64>>, select: F) -> Result<Vec<Neighborhood>>
    where
        F: Fn(Vec<(f64, SampleIndex)>) -> Vec<(f64, SampleIndex)> + Sync,
    {
        let exclude_self = query.is_none();
        let queries = match query {
            Some(q) => {
                check_array(q)?;
                check_n_features(q, self.n_features())?;
                q.view()
            }
            None => self.points.view(),
        };

        let results = self.thread_pool.install(|| {
            (0..queries.nrows())
                .into_par_iter()
                .map(|i| {
                    let row = queries.row(i);
                    let candidates: Vec<(f64, SampleIndex)> = self
                        .points
                        .rows()
                        .into_iter()
                        .enumerate()
                        .filter(|&(j, _)| !(exclude_self && i == j))
                        .map(|(j, point)| (distance(&self.metric, &row, &point), j))
                        .collect();

                    let (distances, indices) = select(candidates).into_iter().unzip();
                    Neighborhood { distances, indices }
                })
                .collect()
        });
        Ok(results)
    }
}

fn by_distance_then_index(a: &(f64, SampleIndex), b: &(f64, SampleIndex)) -> Ordering {
    a.0.total_cmp(&b.0).then(a.1.cmp(&b.1))
}

impl NeighborIndex for BruteForceIndex {
    fn metric_config(&self) -> &MetricConfig {
        &self.metric
    }

    fn n_samples_fit(&self) -> usize {
        self.points.nrows()
    }

    fn n_features(&self) -> usize {
        self.points.ncols()
    }

    fn reference_points(&self) -> ArrayView2<'_, f64> {
        self.points.view()
    }

    fn k_nearest(&self, query: Option<&ArrayView2<'_, f64>>, k: usize) -> Result<Vec<Neighborhood>> {
        validate_n_neighbors(k)?;
        let n_candidates = match query {
            Some(_) => self.n_samples_fit(),
            None => self.n_samples_fit() - 1,
        };
        if k > n_candidates {
            return Err(FeatureKitError::invalid_parameter(
                "n_neighbors",
                k.to_string(),
                format!(
                    "Expected n_neighbors <= n_samples, but n_samples = {}, n_neighbors = {}",
                    n_candidates, k
                ),
            ));
        }

        self.search(query, |mut candidates| {
            if k < candidates.len() {
                candidates.select_nth_unstable_by(k - 1, by_distance_then_index);
                candidates.truncate(k);
            }
            candidates.sort_unstable_by(by_distance_then_index);
            candidates
        })
    }

    fn within_radius(
        &self,
        query: Option<&ArrayView2<'_, f64>>,
        radius: f64,
    ) -> Result<Vec<Neighborhood>> {
        validate_radius(radius)?;
        self.search(query, |mut candidates| {
            candidates.retain(|&(d, _)| d <= radius);
            candidates.sort_unstable_by(by_distance_then_index);
            candidates
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::DistanceMetric;
    use ndarray::{array, s};

    fn index(points: &Array2<f64>, n_jobs: usize) -> BruteForceIndex {
        let metric = MetricConfig {
            metric: DistanceMetric::Euclidean,
            p: 2.0,
            metric_params: None,
        };
        BruteForceIndex::build(&points.view(), metric, n_jobs).unwrap()
    }

    #[test]
    fn test_k_nearest_excludes_self_without_query() {
        let points = array![[0.0], [3.0], [1.0]];
        let idx = index(&points, 1);
        let result = idx.k_nearest(None, 1).unwrap();
        assert_eq!(result[0].indices, vec![2]);
        assert_eq!(result[1].indices, vec![2]);
        assert_eq!(result[2].indices, vec![0]);
        assert_eq!(result[1].distances, vec![2.0]);
    }

    #[test]
    fn test_explicit_query_includes_self() {
        let points = array![[0.0], [3.0], [1.0]];
        let idx = index(&points, 2);
        let result = idx.k_nearest(Some(&points.view()), 2).unwrap();
        assert_eq!(result[0].indices, vec![0, 2]);
        assert_eq!(result[0].distances, vec![0.0, 1.0]);
        assert_eq!(result[1].indices, vec![1, 2]);
    }

    #[test]
    fn test_ties_broken_by_index() {
        let points = array![[0.0], [-1.0], [1.0], [5.0]];
        let idx = index(&points, 1);
        let result = idx.k_nearest(None, 2).unwrap();
        assert_eq!(result[0].indices, vec![1, 2]);
    }

    #[test]
    fn test_k_too_large() {
        let points = array![[0.0], [3.0], [1.0]];
        let idx = index(&points, 1);
        assert!(idx.k_nearest(Some(&points.view()), 3).is_ok());
        let err = idx.k_nearest(None, 3).unwrap_err();
        assert!(err.to_string().contains("n_samples = 2, n_neighbors = 3"));
    }

    #[test]
    fn test_within_radius_variable_counts() {
        let points = array![[0.0], [3.0], [1.0]];
        let idx = index(&points, 1);
        let result = idx.within_radius(Some(&points.view()), 1.5).unwrap();
        assert_eq!(result[0].indices, vec![0, 2]);
        assert_eq!(result[1].indices, vec![1]);
        assert_eq!(result[2].indices, vec![2, 0]);

        let empty = idx.within_radius(None, 0.5).unwrap();
        assert!(empty.iter().all(|n| n.is_empty()));
    }

    #[test]
    fn test_query_with_sliced_view() {
        let points = array![[0.0], [3.0], [1.0], [7.0]];
        let idx = index(&points, 2);
        let result = {
            let tail = points.slice(s![2.., ..]);
            idx.k_nearest(Some(&tail), 2).unwrap()
        };
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].indices, vec![2, 0]);
        assert_eq!(result[1].indices, vec![3, 1]);
    }

    #[test]
    fn test_query_feature_mismatch() {
        let points = array![[0.0, 1.0], [1.0, 0.0]];
        let idx = index(&points, 1);
        let query = array![[0.0]];
        assert!(idx.k_nearest(Some(&query.view()), 1).is_err());
    }
}
