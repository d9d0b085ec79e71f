//! Batch gradient descent shared by linear and logistic regression.

use ndarray::{Array1, Array2};
use tracing::{debug, info, warn};

use crate::error::{Degeneracy, RegressionError, Result};
use crate::hypothesis::Regression;

/// How often the running cost is logged at debug level.
const LOG_EVERY: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct GradientDescent {
    learning_rate: f64,
    max_iter: usize,
    tolerance: Option<f64>,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct Training {
    pub theta: Array1<f64>,
    /// Cost after each update, one entry per iteration that ran.
    pub cost_history: Vec<f64>,
    /// Iteration at which the tolerance check stopped the run, if it did.
    pub converged_at: Option<usize>,
}

impl Training {
    pub fn final_cost(&self) -> Option<f64> {
        self.cost_history.last().copied()
    }
}

impl GradientDescent {
    /// Fixed-budget descent: exactly `max_iter` updates with step `learning_rate`.
    pub fn new(learning_rate: f64, max_iter: usize) -> Result<Self> {
        if !(learning_rate.is_finite() && learning_rate > 0.) {
            return Err(RegressionError::InvalidHyperparameter(format!(
                "learning rate must be positive and finite, got {learning_rate}"
            )));
        }

        Ok(Self {
            learning_rate,
            max_iter,
            tolerance: None,
        })
    }

    /// Stop early once the cost changes by less than `tolerance` between iterations.
    pub fn with_tolerance(mut self, tolerance: f64) -> Result<Self> {
        if !(tolerance.is_finite() && tolerance > 0.) {
            return Err(RegressionError::InvalidHyperparameter(format!(
                "tolerance must be positive and finite, got {tolerance}"
            )));
        }

        self.tolerance = Some(tolerance);
        Ok(self)
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn max_iter(&self) -> usize {
        self.max_iter
    }

    pub fn tolerance(&self) -> Option<f64> {
        self.tolerance
    }

    pub fn train(
        &self,
        model: Regression,
        x: &Array2<f64>,
        y: &Array1<f64>,
        theta: Array1<f64>,
    ) -> Result<Training> {
        let m = x.nrows();

        RegressionError::check_len("labels vs rows", m, y.len())?;
        RegressionError::check_len("parameters vs feature columns", x.ncols(), theta.len())?;
        if m == 0 {
            return Err(RegressionError::EmptyDataset);
        }
        if model == Regression::Logistic {
            if let Some((row, &value)) = y
                .iter()
                .enumerate()
                .find(|(_, v)| **v != 0. && **v != 1.)
            {
                return Err(RegressionError::InvalidLabel { row, value });
            }
        }

        let step = self.learning_rate / m as f64;

        let mut theta = theta;
        let mut cost_history = Vec::with_capacity(self.max_iter);
        let mut converged_at = None;

        for iteration in 0..self.max_iter {
            let predictions = model.hypothesis(x, &theta)?;
            let residual = predictions - y;
            let gradient = x.t().dot(&residual);

            theta.scaled_add(-step, &gradient);

            if theta.iter().any(|t| !t.is_finite()) {
                return Err(Degeneracy::NonFinite { iteration }.into());
            }

            let cost = model.cost(x, y, &theta)?;
            if !cost.is_finite() {
                return Err(Degeneracy::NonFinite { iteration }.into());
            }

            if iteration % LOG_EVERY == 0 {
                debug!(iteration, cost, "gradient descent step");
            }

            let previous = cost_history.last().copied();
            cost_history.push(cost);

            if let Some(previous) = previous {
                if cost > previous {
                    warn!(iteration, previous, cost, "cost increased, learning rate may be too large");
                }

                if let Some(tolerance) = self.tolerance {
                    if (previous - cost).abs() < tolerance {
                        converged_at = Some(iteration);
                        break;
                    }
                }
            }
        }

        info!(
            ?model,
            iterations = cost_history.len(),
            final_cost = cost_history.last().copied(),
            "training finished"
        );

        Ok(Training {
            theta,
            cost_history,
            converged_at,
        })
    }
}
