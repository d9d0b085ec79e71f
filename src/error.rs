//! Error types for training and data preparation.

use thiserror::Error;

/// Result type alias for the numeric core.
pub type Result<T> = std::result::Result<T, RegressionError>;

/// Numeric conditions that would otherwise leak NaN or infinity into a run.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Degeneracy {
    /// Standard deviation of a feature column is zero, so scaling divides by zero.
    #[error("feature column {column} has zero variance")]
    ZeroVariance { column: usize },

    /// Sigmoid output hit exactly 0 or 1 while the opposing label term is non-zero.
    #[error("prediction for row {row} saturated, log loss is undefined")]
    SaturatedPrediction { row: usize },

    /// Parameters or cost stopped being finite, usually a learning rate that is too large.
    #[error("parameters diverged at iteration {iteration}")]
    NonFinite { iteration: usize },

    /// Closed-form solve could not decompose the design matrix.
    #[error("design matrix could not be decomposed")]
    SingularSystem,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegressionError {
    /// Row, parameter or label lengths disagree.
    #[error("dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("numeric degeneracy: {0}")]
    NumericDegeneracy(#[from] Degeneracy),

    #[error("invalid hyperparameter: {0}")]
    InvalidHyperparameter(String),

    /// Logistic labels must be exactly 0 or 1.
    #[error("label {value} at row {row} is neither 0 nor 1")]
    InvalidLabel { row: usize, value: f64 },

    #[error("dataset has no rows")]
    EmptyDataset,
}

impl RegressionError {
    pub(crate) fn check_len(context: &'static str, expected: usize, actual: usize) -> Result<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(RegressionError::DimensionMismatch {
                context,
                expected,
                actual,
            })
        }
    }
}

/// Failures while reading and shaping a dataset from disk.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("dataset {0} contains no records")]
    Empty(String),

    #[error(transparent)]
    Regression(#[from] RegressionError),
}
