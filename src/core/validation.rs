//! Input array checks shared by the estimators.

use crate::core::error::{FeatureKitError, Result};
use ndarray::{ArrayView2, ArrayViewD, Ix2};

/// Require a non-empty sample matrix with only finite values.
pub fn check_array(x: &ArrayView2<'_, f64>) -> Result<()> {
    let (n_samples, n_features) = x.dim();
    if n_samples == 0 {
        return Err(FeatureKitError::shape(format!(
            "Found array with 0 sample(s) (shape=({}, {})) while a minimum of 1 is required",
            n_samples, n_features
        )));
    }
    if n_features == 0 {
        return Err(FeatureKitError::shape(format!(
            "Found array with 0 feature(s) (shape=({}, {})) while a minimum of 1 is required",
            n_samples, n_features
        )));
    }
    if let Some(((row, col), value)) = x.indexed_iter().find(|(_, v)| !v.is_finite()) {
        return Err(FeatureKitError::numerical(format!(
            "Input contains non-finite value {} at ({}, {})",
            value, row, col
        )));
    }
    Ok(())
}

/// View a dynamic-dimension array as a 2-D sample matrix.
pub fn ensure_2d<'a>(x: ArrayViewD<'a, f64>) -> Result<ArrayView2<'a, f64>> {
    let ndim = x.ndim();
    x.into_dimensionality::<Ix2>().map_err(|_| {
        FeatureKitError::shape(format!(
            "Expected 2D array, got {}D array instead. Reshape your data to \
             (n_samples, n_features) first",
            ndim
        ))
    })
}

/// Require `x` to have the feature count seen during fit.
pub fn check_n_features(x: &ArrayView2<'_, f64>, expected: usize) -> Result<()> {
    if x.ncols() != expected {
        return Err(FeatureKitError::dimension_mismatch(
            format!("{} features", expected),
            format!("{} features", x.ncols()),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array1, Array2};

    #[test]
    fn test_check_array_rejects_empty_and_non_finite() {
        let empty = Array2::<f64>::zeros((0, 3));
        assert!(check_array(&empty.view()).unwrap_err().is_shape_error());

        let nan = array![[1.0, f64::NAN]];
        let err = check_array(&nan.view()).unwrap_err();
        assert_eq!(err.category(), "numerical");

        let ok = array![[1.0, 2.0], [3.0, 4.0]];
        assert!(check_array(&ok.view()).is_ok());
    }

    #[test]
    fn test_ensure_2d_rejects_1d() {
        let x = Array1::from_vec(vec![0.0, 1.0, 2.0, 3.0]).into_dyn();
        let err = ensure_2d(x.view()).unwrap_err();
        assert!(err.is_shape_error());
        assert!(err.to_string().contains("got 1D array"));

        let x = Array2::<f64>::zeros((4, 1)).into_dyn();
        assert_eq!(ensure_2d(x.view()).unwrap().dim(), (4, 1));
    }

    #[test]
    fn test_check_n_features() {
        let x = Array2::<f64>::zeros((5, 5));
        let err = check_n_features(&x.view(), 4).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Dimension mismatch: expected 4 features, got 5 features"
        );
    }
}
