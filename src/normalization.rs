//! Mean normalization of feature columns.
//!
//! Statistics are fitted once on a reference matrix (the training split) and
//! then applied unchanged to every other matrix that is fed to the trained
//! model. Column 0 is the bias and is never touched.
//!
//! A column with zero standard deviation cannot be scaled; fitting reports it
//! as [`Degeneracy::ZeroVariance`] with the column index in the full matrix.

use ndarray::{s, Array1, Array2, Axis};

use crate::error::{Degeneracy, RegressionError, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Normalization {
    mean: Array1<f64>,
    std: Array1<f64>,
}

impl Normalization {
    pub fn fit(x: &Array2<f64>) -> Result<Self> {
        if x.nrows() == 0 {
            return Err(RegressionError::EmptyDataset);
        }
        if x.ncols() == 0 {
            return Err(RegressionError::DimensionMismatch {
                context: "bias column",
                expected: 1,
                actual: 0,
            });
        }

        let features = x.slice(s![.., 1..]);

        let mean = features
            .mean_axis(Axis(0))
            .ok_or(RegressionError::EmptyDataset)?;
        let std = features.std_axis(Axis(0), 0.);

        if let Some(column) = std.iter().position(|&s| s == 0.) {
            return Err(Degeneracy::ZeroVariance { column: column + 1 }.into());
        }

        Ok(Self { mean, std })
    }

    /// Fits on `x` and normalizes it in one go.
    pub fn fit_apply(x: &Array2<f64>) -> Result<(Array2<f64>, Self)> {
        let normalization = Self::fit(x)?;
        let normalized = normalization.apply(x)?;

        Ok((normalized, normalization))
    }

    pub fn apply(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        self.check_width(x)?;

        let mut normalized = x.clone();
        let mut features = normalized.slice_mut(s![.., 1..]);
        features -= &self.mean;
        features /= &self.std;

        Ok(normalized)
    }

    /// Undoes [`Normalization::apply`]: `x * std + mean` on every non-bias column.
    pub fn restore(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        self.check_width(x)?;

        let mut restored = x.clone();
        let mut features = restored.slice_mut(s![.., 1..]);
        features *= &self.std;
        features += &self.mean;

        Ok(restored)
    }

    pub fn mean(&self) -> &Array1<f64> {
        &self.mean
    }

    pub fn std(&self) -> &Array1<f64> {
        &self.std
    }

    fn check_width(&self, x: &Array2<f64>) -> Result<()> {
        RegressionError::check_len("normalized matrix columns", self.mean.len() + 1, x.ncols())
    }
}
