//! One-hot encoding of binned features.

use crate::core::error::{FeatureKitError, Result};
use crate::core::traits::{CategoricalEncoder, EncodedMatrix};
use crate::core::types::BinCount;
use ndarray::{Array2, ArrayView2};
use sprs::{CsMat, TriMat};

/// Expands each ordinal column into a block of indicator columns.
///
/// Column `j` with cardinality `c_j` occupies `c_j` consecutive output
/// columns; pass-through columns follow all encoded blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct OneHotEncoder;

impl OneHotEncoder {
    /// Create a new encoder.
    pub fn new() -> Self {
        OneHotEncoder
    }

    fn category(value: f64, cardinality: BinCount, column: usize) -> Result<usize> {
        if value.fract() != 0.0 || value < 0.0 || value >= cardinality as f64 {
            return Err(FeatureKitError::invalid_parameter(
                format!("column {}", column),
                value.to_string(),
                format!("expected an integer category in [0, {})", cardinality),
            ));
        }
        Ok(value as usize)
    }

    fn block_starts(cardinalities: &[BinCount]) -> Vec<usize> {
        cardinalities
            .iter()
            .scan(0usize, |start, &c| {
                let current = *start;
                *start += c;
                Some(current)
            })
            .collect()
    }
}

impl CategoricalEncoder for OneHotEncoder {
    fn encode(
        &self,
        ordinal: &ArrayView2<'_, f64>,
        cardinalities: &[BinCount],
        passthrough: Option<&ArrayView2<'_, f64>>,
        sparse: bool,
    ) -> Result<EncodedMatrix> {
        if ordinal.ncols() != cardinalities.len() {
            return Err(FeatureKitError::dimension_mismatch(
                format!("{} ordinal columns", cardinalities.len()),
                format!("{} ordinal columns", ordinal.ncols()),
            ));
        }
        if let Some(extra) = passthrough {
            if extra.nrows() != ordinal.nrows() {
                return Err(FeatureKitError::dimension_mismatch(
                    format!("{} rows", ordinal.nrows()),
                    format!("{} pass-through rows", extra.nrows()),
                ));
            }
        }

        let n_rows = ordinal.nrows();
        let encoded_width: usize = cardinalities.iter().sum();
        let extra_width = passthrough.map_or(0, |p| p.ncols());
        let shape = (n_rows, encoded_width + extra_width);
        let starts = Self::block_starts(cardinalities);

        if sparse {
            let mut triplets = TriMat::new(shape);
            for (row, values) in ordinal.rows().into_iter().enumerate() {
                for (col, &value) in values.iter().enumerate() {
                    let category = Self::category(value, cardinalities[col], col)?;
                    triplets.add_triplet(row, starts[col] + category, 1.0);
                }
                if let Some(extra) = passthrough {
                    for (col, &value) in extra.row(row).iter().enumerate() {
                        if value != 0.0 {
                            triplets.add_triplet(row, encoded_width + col, value);
                        }
                    }
                }
            }
            let matrix: CsMat<f64> = triplets.to_csr();
            Ok(EncodedMatrix::Sparse(matrix))
        } else {
            let mut dense = Array2::zeros(shape);
            for (row, values) in ordinal.rows().into_iter().enumerate() {
                for (col, &value) in values.iter().enumerate() {
                    let category = Self::category(value, cardinalities[col], col)?;
                    dense[[row, starts[col] + category]] = 1.0;
                }
                if let Some(extra) = passthrough {
                    for (col, &value) in extra.row(row).iter().enumerate() {
                        dense[[row, encoded_width + col]] = value;
                    }
                }
            }
            Ok(EncodedMatrix::Dense(dense))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_dense_blocks() {
        let ordinal = array![[0.0, 2.0], [1.0, 0.0]];
        let encoded = OneHotEncoder::new()
            .encode(&ordinal.view(), &[2, 3], None, false)
            .unwrap();
        assert_eq!(
            encoded,
            EncodedMatrix::Dense(array![[1.0, 0.0, 0.0, 0.0, 1.0], [0.0, 1.0, 1.0, 0.0, 0.0]])
        );
    }

    #[test]
    fn test_passthrough_appended() {
        let ordinal = array![[1.0], [0.0]];
        let extra = array![[7.5], [0.0]];
        let dense = OneHotEncoder::new()
            .encode(&ordinal.view(), &[2], Some(&extra.view()), false)
            .unwrap();
        assert_eq!(dense.to_dense(), array![[0.0, 1.0, 7.5], [1.0, 0.0, 0.0]]);

        let sparse = OneHotEncoder::new()
            .encode(&ordinal.view(), &[2], Some(&extra.view()), true)
            .unwrap();
        assert_eq!(sparse.shape(), (2, 3));
        assert_eq!(sparse.to_dense(), dense.to_dense());
        match sparse {
            EncodedMatrix::Sparse(m) => assert_eq!(m.nnz(), 3),
            EncodedMatrix::Dense(_) => panic!("expected sparse output"),
        }
    }

    #[test]
    fn test_out_of_range_category() {
        let ordinal = array![[3.0]];
        let err = OneHotEncoder::new()
            .encode(&ordinal.view(), &[3], None, false)
            .unwrap_err();
        assert!(err.is_config_error());
    }
}
