//! Property tests for the discretizer and the graph builders.

use featurekit::*;
use ndarray::Array2;
use proptest::prelude::*;

fn column_matrix(values: &[f64]) -> Array2<f64> {
    Array2::from_shape_vec((values.len(), 1), values.to_vec()).unwrap()
}

fn range_of(values: &[f64]) -> f64 {
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    max - min
}

proptest! {
    #[test]
    fn transform_stays_within_bins(
        values in prop::collection::vec(-100.0f64..100.0, 8..40),
        queries in prop::collection::vec(-1000.0f64..1000.0, 1..20),
        n_bins in 2usize..8,
        strategy in prop::sample::select(vec![
            BinStrategy::Uniform,
            BinStrategy::Quantile,
            BinStrategy::KMeans,
        ]),
    ) {
        let config = KBinsConfig::builder()
            .n_bins(n_bins)
            .strategy(strategy)
            .encode(Encoding::Ordinal)
            .random_state(7)
            .build()
            .unwrap();
        let mut est = KBinsDiscretizer::new(config).unwrap();
        est.fit(&column_matrix(&values).view()).unwrap();
        let fitted_bins = est.fitted().unwrap().n_bins()[0];

        let xt = est.transform(&column_matrix(&queries).view()).unwrap().to_dense();
        for &bin in xt.iter() {
            prop_assert!(bin >= 0.0);
            prop_assert!(bin <= (fitted_bins - 1) as f64);
            prop_assert_eq!(bin.fract(), 0.0);
        }
    }

    #[test]
    fn uniform_round_trip_reproduces_bins(
        values in prop::collection::vec(-100.0f64..100.0, 2..40),
        n_bins in 2usize..10,
    ) {
        prop_assume!(range_of(&values) > 1e-3);

        let config = KBinsConfig::builder()
            .n_bins(n_bins)
            .encode(Encoding::Ordinal)
            .build()
            .unwrap();
        let mut est = KBinsDiscretizer::new(config).unwrap();
        let x = column_matrix(&values);
        let xt = est.fit_transform(&x.view()).unwrap().to_dense();
        let restored = est.inverse_transform(&xt.view()).unwrap();
        let again = est.transform(&restored.view()).unwrap().to_dense();
        prop_assert_eq!(again, xt);
    }

    #[test]
    fn knn_rows_have_exactly_k_entries(
        values in prop::collection::vec(-50.0f64..50.0, 4..30),
        k in 1usize..4,
        include_self in any::<bool>(),
    ) {
        let config = NeighborsConfig::builder()
            .n_neighbors(k)
            .mode(WeightMode::Distance)
            .include_self(include_self)
            .build()
            .unwrap();
        let x = column_matrix(&values);
        let graph = kneighbors_graph(x.view().into(), &config).unwrap();

        prop_assert_eq!(graph.shape(), (values.len(), values.len()));
        for i in 0..values.len() {
            let (cols, data) = graph.row(i);
            prop_assert_eq!(cols.len(), k);
            prop_assert!(data.windows(2).all(|w| w[0] <= w[1]));
            if !include_self {
                prop_assert!(!cols.contains(&i));
            }
        }
    }

    #[test]
    fn radius_rows_respect_threshold(
        values in prop::collection::vec(-10.0f64..10.0, 2..30),
        radius in 0.0f64..5.0,
    ) {
        let config = NeighborsConfig::builder()
            .radius(radius)
            .mode(WeightMode::Distance)
            .metric(DistanceMetric::Manhattan)
            .build()
            .unwrap();
        let x = column_matrix(&values);
        let graph = radius_neighbors_graph(x.view().into(), &config).unwrap();

        for i in 0..values.len() {
            let (cols, data) = graph.row(i);
            prop_assert!(data.iter().all(|&d| d <= radius));
            let expected = (0..values.len())
                .filter(|&j| j != i && (values[i] - values[j]).abs() <= radius)
                .count();
            prop_assert_eq!(cols.len(), expected);
        }
    }
}
