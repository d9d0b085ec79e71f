//! Hypothesis and cost functions, paired per model variant.
//!
//! [`Regression::Linear`] predicts `x · θ` and is scored with half mean squared
//! error; [`Regression::Logistic`] predicts `sigmoid(x · θ)` and is scored with
//! log loss.

use ndarray::{Array1, Array2, ArrayView1};

use crate::error::{Degeneracy, RegressionError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regression {
    Linear,
    Logistic,
}

pub fn sigmoid(z: f64) -> f64 {
    1. / (1. + (-z).exp())
}

impl Regression {
    fn link(self, z: f64) -> f64 {
        match self {
            Regression::Linear => z,
            Regression::Logistic => sigmoid(z),
        }
    }

    /// Prediction for a single feature row.
    pub fn hypothesis_row(self, row: ArrayView1<f64>, theta: &Array1<f64>) -> Result<f64> {
        RegressionError::check_len("feature row vs parameters", theta.len(), row.len())?;

        Ok(self.link(row.dot(theta)))
    }

    /// Predictions for every row of `x`.
    pub fn hypothesis(self, x: &Array2<f64>, theta: &Array1<f64>) -> Result<Array1<f64>> {
        RegressionError::check_len("feature columns vs parameters", theta.len(), x.ncols())?;

        Ok(x.dot(theta).mapv(|z| self.link(z)))
    }

    pub fn cost(self, x: &Array2<f64>, y: &Array1<f64>, theta: &Array1<f64>) -> Result<f64> {
        RegressionError::check_len("labels vs rows", x.nrows(), y.len())?;

        let m = x.nrows();
        if m == 0 {
            return Err(RegressionError::EmptyDataset);
        }

        let predictions = self.hypothesis(x, theta)?;

        match self {
            Regression::Linear => {
                let sum: f64 = predictions
                    .iter()
                    .zip(y.iter())
                    .map(|(h, y)| (h - y).powi(2))
                    .sum();

                Ok(sum / (2. * m as f64))
            }
            Regression::Logistic => {
                let mut sum = 0.;

                for (row, (&h, &y)) in predictions.iter().zip(y.iter()).enumerate() {
                    if y != 0. {
                        if h <= 0. {
                            return Err(Degeneracy::SaturatedPrediction { row }.into());
                        }
                        sum -= y * h.ln();
                    }
                    if y != 1. {
                        if h >= 1. {
                            return Err(Degeneracy::SaturatedPrediction { row }.into());
                        }
                        sum -= (1. - y) * (1. - h).ln();
                    }
                }

                Ok(sum / m as f64)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn linear_bias_only_predicts_bias() {
        let x = array![[1., 2., -3.], [1., 10., 0.5], [1., -7., 4.]];
        let theta = array![2.5, 0., 0.];

        let predictions = Regression::Linear.hypothesis(&x, &theta).unwrap();

        for p in predictions.iter() {
            assert_eq!(*p, 2.5);
        }
    }

    #[test]
    fn sigmoid_stays_inside_open_interval() {
        for i in -300..=300 {
            let z = i as f64 * 0.1;
            let s = sigmoid(z);
            assert!(s > 0. && s < 1., "sigmoid({z}) = {s}");
        }
        assert_eq!(sigmoid(0.), 0.5);
    }

    #[test]
    fn logistic_hypothesis_is_probability() {
        let x = array![[1., -4.], [1., 0.], [1., 4.]];
        let theta = array![0.3, 1.7];

        let predictions = Regression::Logistic.hypothesis(&x, &theta).unwrap();

        assert!(predictions.iter().all(|&p| p > 0. && p < 1.));
        assert!(predictions[0] < predictions[1] && predictions[1] < predictions[2]);
    }

    #[test]
    fn row_width_must_match_parameters() {
        let x = array![[1., 2.], [1., 3.]];
        let theta = array![0., 0., 0.];

        let err = Regression::Linear.hypothesis(&x, &theta).unwrap_err();
        assert!(matches!(
            err,
            RegressionError::DimensionMismatch {
                expected: 3,
                actual: 2,
                ..
            }
        ));

        let err = Regression::Logistic
            .hypothesis_row(x.row(0), &theta)
            .unwrap_err();
        assert!(matches!(err, RegressionError::DimensionMismatch { .. }));
    }

    #[test]
    fn single_row_matches_link_of_dot_product() {
        let x = array![[1., 2., -1.], [1., -3., 0.5]];
        let theta = array![0.5, 1.5, 2.];

        // rows dot theta: 0.5 + 3 - 2 = 1.5 and 0.5 - 4.5 + 1 = -3
        for (i, z) in [(0, 1.5), (1, -3.)] {
            let linear = Regression::Linear.hypothesis_row(x.row(i), &theta).unwrap();
            assert!((linear - z).abs() < 1e-12, "{linear} != {z}");

            let logistic = Regression::Logistic
                .hypothesis_row(x.row(i), &theta)
                .unwrap();
            assert!((logistic - sigmoid(z)).abs() < 1e-12, "{logistic}");
        }

        let all = Regression::Logistic.hypothesis(&x, &theta).unwrap();
        assert_eq!(
            all[1],
            Regression::Logistic.hypothesis_row(x.row(1), &theta).unwrap()
        );
    }

    #[test]
    fn squared_error_cost() {
        let x = array![[1., 1.], [1., 2.]];
        let y = array![1., 4.];
        let theta = array![0., 1.];

        // residuals 0 and -2 -> 4 / (2 * 2)
        let cost = Regression::Linear.cost(&x, &y, &theta).unwrap();
        assert!((cost - 1.).abs() < 1e-12);
    }

    #[test]
    fn log_loss_at_zero_parameters_is_ln_two() {
        let x = array![[1., 3.], [1., -1.], [1., 8.]];
        let y = array![1., 0., 1.];
        let theta = array![0., 0.];

        let cost = Regression::Logistic.cost(&x, &y, &theta).unwrap();
        assert!((cost - std::f64::consts::LN_2).abs() < 1e-12);
    }

    #[test]
    fn saturated_prediction_is_reported() {
        let x = array![[1., 0.], [1., 1000.]];
        let y = array![1., 0.];
        let theta = array![0., 1.];

        let err = Regression::Logistic.cost(&x, &y, &theta).unwrap_err();
        assert_eq!(
            err,
            RegressionError::NumericDegeneracy(Degeneracy::SaturatedPrediction { row: 1 })
        );
    }

    #[test]
    fn saturated_prediction_matching_label_is_fine() {
        let x = array![[1., 1000.]];
        let y = array![1.];
        let theta = array![0., 1.];

        let cost = Regression::Logistic.cost(&x, &y, &theta).unwrap();
        assert!(cost.is_finite());
        assert!(cost >= 0.);
    }

    #[test]
    fn label_count_must_match_rows() {
        let x = array![[1., 1.], [1., 2.], [1., 3.]];
        let y = array![1., 2.];
        let theta = array![0., 0.];

        for model in [Regression::Linear, Regression::Logistic] {
            let err = model.cost(&x, &y, &theta).unwrap_err();
            assert_eq!(
                err,
                RegressionError::DimensionMismatch {
                    context: "labels vs rows",
                    expected: 3,
                    actual: 2,
                }
            );
        }
    }
}
