//! Thresholding and scoring of trained models.

use ndarray::Array1;

use crate::error::{RegressionError, Result};

pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// 1 when `probability` is strictly above `threshold`, otherwise 0.
pub fn classify(probability: f64, threshold: f64) -> u8 {
    if probability > threshold {
        1
    } else {
        0
    }
}

pub fn classify_all(probabilities: &Array1<f64>, threshold: f64) -> Result<Vec<u8>> {
    if !(0. ..=1.).contains(&threshold) {
        return Err(RegressionError::InvalidHyperparameter(format!(
            "threshold must lie in [0, 1], got {threshold}"
        )));
    }

    Ok(probabilities
        .iter()
        .map(|&p| classify(p, threshold))
        .collect())
}

/// Converts 0/1 float labels to classes, anything above 0.5 counting as 1.
pub fn labels_to_classes(labels: &Array1<f64>) -> Vec<u8> {
    labels
        .iter()
        .map(|&l| classify(l, DEFAULT_THRESHOLD))
        .collect()
}

pub fn mean_squared_error(predictions: &Array1<f64>, targets: &Array1<f64>) -> Result<f64> {
    RegressionError::check_len("predictions vs targets", targets.len(), predictions.len())?;
    if targets.is_empty() {
        return Err(RegressionError::EmptyDataset);
    }

    let sum: f64 = predictions
        .iter()
        .zip(targets.iter())
        .map(|(p, t)| (p - t).powi(2))
        .sum();

    Ok(sum / targets.len() as f64)
}

/// Coefficient of determination; NaN or `-inf` when the targets are constant.
pub fn r_squared(predictions: &Array1<f64>, targets: &Array1<f64>) -> Result<f64> {
    let mse = mean_squared_error(predictions, targets)?;
    let mean = targets.mean().ok_or(RegressionError::EmptyDataset)?;
    let variance = targets.mapv(|t| (t - mean).powi(2)).mean().unwrap_or(0.);

    Ok(1. - mse / variance)
}

pub fn accuracy(expected: &[u8], predicted: &[u8]) -> Result<f64> {
    RegressionError::check_len("predicted vs expected classes", expected.len(), predicted.len())?;
    if expected.is_empty() {
        return Err(RegressionError::EmptyDataset);
    }

    let correct = expected
        .iter()
        .zip(predicted.iter())
        .filter(|(e, p)| e == p)
        .count();

    Ok(correct as f64 / expected.len() as f64)
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ConfusionMatrix {
    pub true_positive: usize,
    pub false_positive: usize,
    pub true_negative: usize,
    pub false_negative: usize,
}

impl ConfusionMatrix {
    pub fn new(expected: &[u8], predicted: &[u8]) -> Result<Self> {
        RegressionError::check_len("predicted vs expected classes", expected.len(), predicted.len())?;

        let mut matrix = Self::default();
        for (&e, &p) in expected.iter().zip(predicted.iter()) {
            match (e != 0, p != 0) {
                (true, true) => matrix.true_positive += 1,
                (false, true) => matrix.false_positive += 1,
                (false, false) => matrix.true_negative += 1,
                (true, false) => matrix.false_negative += 1,
            }
        }

        Ok(matrix)
    }

    pub fn total(&self) -> usize {
        self.true_positive + self.false_positive + self.true_negative + self.false_negative
    }

    pub fn precision(&self) -> Option<f64> {
        let predicted_positive = self.true_positive + self.false_positive;
        (predicted_positive > 0).then(|| self.true_positive as f64 / predicted_positive as f64)
    }

    pub fn recall(&self) -> Option<f64> {
        let actual_positive = self.true_positive + self.false_negative;
        (actual_positive > 0).then(|| self.true_positive as f64 / actual_positive as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn threshold_is_strict() {
        assert_eq!(classify(0.5, DEFAULT_THRESHOLD), 0);
        assert_eq!(classify(0.500001, DEFAULT_THRESHOLD), 1);
        assert_eq!(classify(0.2, 0.1), 1);
        assert_eq!(classify(0.9, 0.95), 0);
    }

    #[test]
    fn classify_all_rejects_out_of_range_threshold() {
        let p = array![0.1, 0.9];
        assert_eq!(classify_all(&p, 0.5).unwrap(), vec![0, 1]);
        assert!(matches!(
            classify_all(&p, 1.5),
            Err(RegressionError::InvalidHyperparameter(_))
        ));
    }

    #[test]
    fn regression_metrics() {
        let targets = array![1., 2., 3., 4.];
        let perfect = targets.clone();
        let off = array![2., 3., 4., 5.];

        assert_eq!(mean_squared_error(&perfect, &targets).unwrap(), 0.);
        assert_eq!(r_squared(&perfect, &targets).unwrap(), 1.);
        assert_eq!(mean_squared_error(&off, &targets).unwrap(), 1.);
        // variance of targets is 1.25
        assert!((r_squared(&off, &targets).unwrap() - 0.2).abs() < 1e-12);

        assert!(matches!(
            mean_squared_error(&array![1.], &targets),
            Err(RegressionError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn confusion_counts() {
        let expected = [1, 1, 0, 0, 1, 0];
        let predicted = [1, 0, 0, 1, 1, 0];

        let matrix = ConfusionMatrix::new(&expected, &predicted).unwrap();
        assert_eq!(
            matrix,
            ConfusionMatrix {
                true_positive: 2,
                false_positive: 1,
                true_negative: 2,
                false_negative: 1,
            }
        );
        assert_eq!(matrix.total(), 6);
        assert_eq!(matrix.precision(), Some(2. / 3.));
        assert_eq!(matrix.recall(), Some(2. / 3.));
        assert!((accuracy(&expected, &predicted).unwrap() - 4. / 6.).abs() < 1e-12);
    }

    #[test]
    fn precision_undefined_without_positive_predictions() {
        let matrix = ConfusionMatrix::new(&[1, 0], &[0, 0]).unwrap();
        assert_eq!(matrix.precision(), None);
        assert_eq!(matrix.recall(), Some(0.));
    }
}
