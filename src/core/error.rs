//! Error handling and error types for featurekit.
//!
//! Every fallible operation in the crate returns [`Result`], whose error type
//! [`FeatureKitError`] groups failures into two families: configuration
//! errors (bad parameters, mismatched metric settings, unsupported modes) and
//! shape errors (wrong dimensionality, feature-count mismatches). Both are
//! raised synchronously, before any fitted state is touched.

use std::io;
use thiserror::Error;

/// Main error type for the featurekit library.
#[derive(Error, Debug)]
pub enum FeatureKitError {
    /// Configuration and validation errors
    #[error("Configuration error: {message}")]
    Config {
        /// What is wrong with the configuration
        message: String,
    },

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}, {reason}")]
    InvalidParameter {
        /// Parameter name
        parameter: String,
        /// Offending value
        value: String,
        /// Constraint the value violates
        reason: String,
    },

    /// A requested parameter disagrees with the one a pre-built index uses
    #[error("Got {requested} for {parameter}, while the index has {actual} for the same parameter")]
    ParameterMismatch {
        /// Parameter name
        parameter: String,
        /// Value the caller asked for
        requested: String,
        /// Value the index was built with
        actual: String,
    },

    /// Operation requires a fitted component
    #[error("{component} is not fitted yet; call fit before using it")]
    NotFitted {
        /// Name of the unfitted component
        component: String,
    },

    /// Wrong dimensionality or empty input
    #[error("Shape error: {message}")]
    Shape {
        /// Description of the bad shape
        message: String,
    },

    /// Feature-count mismatch between fit and a later call
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Shape seen during fit
        expected: String,
        /// Shape of the current input
        actual: String,
    },

    /// Numerical computation errors (NaN, infinity)
    #[error("Numerical error: {message}")]
    Numerical {
        /// Description of the bad values
        message: String,
    },

    /// Fitted state serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization {
        /// Underlying failure
        message: String,
    },

    /// File I/O errors
    #[error("I/O error: {source}")]
    IO {
        /// Underlying I/O error
        #[from]
        source: io::Error,
    },

    /// JSON serialization errors
    #[error("JSON error: {source}")]
    Json {
        /// Underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Bincode serialization errors
    #[error("Bincode error: {source}")]
    Bincode {
        /// Underlying bincode error
        #[from]
        source: bincode::Error,
    },

    /// Internal library errors (should not occur in normal usage)
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the failure
        message: String,
    },
}

/// Type alias for Results using FeatureKitError
pub type Result<T> = std::result::Result<T, FeatureKitError>;

impl FeatureKitError {
    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        FeatureKitError::Config {
            message: message.into(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter<P, V, R>(parameter: P, value: V, reason: R) -> Self
    where
        P: Into<String>,
        V: Into<String>,
        R: Into<String>,
    {
        FeatureKitError::InvalidParameter {
            parameter: parameter.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a parameter mismatch error
    pub fn parameter_mismatch<P, Q, A>(parameter: P, requested: Q, actual: A) -> Self
    where
        P: Into<String>,
        Q: Into<String>,
        A: Into<String>,
    {
        FeatureKitError::ParameterMismatch {
            parameter: parameter.into(),
            requested: requested.into(),
            actual: actual.into(),
        }
    }

    /// Create a not-fitted error
    pub fn not_fitted<S: Into<String>>(component: S) -> Self {
        FeatureKitError::NotFitted {
            component: component.into(),
        }
    }

    /// Create a shape error
    pub fn shape<S: Into<String>>(message: S) -> Self {
        FeatureKitError::Shape {
            message: message.into(),
        }
    }

    /// Create a dimension mismatch error
    pub fn dimension_mismatch<E, A>(expected: E, actual: A) -> Self
    where
        E: Into<String>,
        A: Into<String>,
    {
        FeatureKitError::DimensionMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a numerical error
    pub fn numerical<S: Into<String>>(message: S) -> Self {
        FeatureKitError::Numerical {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization<S: Into<String>>(message: S) -> Self {
        FeatureKitError::Serialization {
            message: message.into(),
        }
    }

    /// Create an internal error (should be used sparingly)
    pub fn internal<S: Into<String>>(message: S) -> Self {
        FeatureKitError::Internal {
            message: message.into(),
        }
    }

    /// True for the configuration family: invalid enum values, bad bin
    /// counts, bad ignored indices, metric mismatches, unsupported modes.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            FeatureKitError::Config { .. }
                | FeatureKitError::InvalidParameter { .. }
                | FeatureKitError::ParameterMismatch { .. }
                | FeatureKitError::NotFitted { .. }
        )
    }

    /// True for the shape family: wrong dimensionality or feature count.
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            FeatureKitError::Shape { .. } | FeatureKitError::DimensionMismatch { .. }
        )
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            FeatureKitError::Config { .. } => "config",
            FeatureKitError::InvalidParameter { .. } => "invalid_parameter",
            FeatureKitError::ParameterMismatch { .. } => "parameter_mismatch",
            FeatureKitError::NotFitted { .. } => "not_fitted",
            FeatureKitError::Shape { .. } => "shape",
            FeatureKitError::DimensionMismatch { .. } => "dimension_mismatch",
            FeatureKitError::Numerical { .. } => "numerical",
            FeatureKitError::Serialization { .. } => "serialization",
            FeatureKitError::IO { .. } => "io",
            FeatureKitError::Json { .. } => "json",
            FeatureKitError::Bincode { .. } => "bincode",
            FeatureKitError::Internal { .. } => "internal",
        }
    }
}

// Convenience macros for error creation

/// Build a [`FeatureKitError::Config`] from a message or format string.
#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::core::error::FeatureKitError::config($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::core::error::FeatureKitError::config(format!($fmt, $($arg)*))
    };
}

/// Build a [`FeatureKitError::Shape`] from a message or format string.
#[macro_export]
macro_rules! shape_error {
    ($msg:expr) => {
        $crate::core::error::FeatureKitError::shape($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::core::error::FeatureKitError::shape(format!($fmt, $($arg)*))
    };
}

/// Return early with the given error when the condition is false.
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !($cond) {
            return Err($err.into());
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_families() {
        let err = FeatureKitError::config("bad encode");
        assert_eq!(err.category(), "config");
        assert!(err.is_config_error());
        assert!(!err.is_shape_error());

        let err = FeatureKitError::dimension_mismatch("4 features", "5 features");
        assert_eq!(err.category(), "dimension_mismatch");
        assert!(err.is_shape_error());
        assert!(!err.is_config_error());
    }

    #[test]
    fn test_error_macros() {
        let err = config_error!("test error");
        assert!(matches!(err, FeatureKitError::Config { .. }));

        let err = shape_error!("expected 2-D input, got {}-D", 1);
        assert!(matches!(err, FeatureKitError::Shape { .. }));
        assert!(err.to_string().contains("got 1-D"));
    }

    #[test]
    fn test_parameter_mismatch_display() {
        let err = FeatureKitError::parameter_mismatch("p", "1", "2");
        let msg = err.to_string();
        assert!(msg.contains("Got 1 for p"));
        assert!(msg.contains("has 2"));
        assert!(err.is_config_error());
    }

    #[test]
    fn test_invalid_parameter_display() {
        let err = FeatureKitError::invalid_parameter("n_bins", "1", "expected at least 2");
        assert_eq!(
            err.to_string(),
            "Invalid parameter: n_bins = 1, expected at least 2"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: FeatureKitError = io_err.into();
        assert!(matches!(err, FeatureKitError::IO { .. }));
        assert_eq!(err.category(), "io");
    }
}
