pub mod config;
pub mod dataset;
pub mod error;
pub mod evaluation;
pub mod gradient_descent;
pub mod hypothesis;
pub mod log_reg;
pub mod normalization;
pub mod plots;
pub mod reg_lin;

pub use error::{DatasetError, Degeneracy, RegressionError};
pub use gradient_descent::{GradientDescent, Training};
pub use hypothesis::Regression;
pub use normalization::Normalization;
