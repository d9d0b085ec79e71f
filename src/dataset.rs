//! Table glue: bias column, one-hot encoding, imputation and the seeded split.

use itertools::Itertools;
use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::{RegressionError, Result};

/// Prepends the constant-1 bias column.
pub fn with_bias(features: &Array2<f64>) -> Array2<f64> {
    Array2::from_shape_fn((features.nrows(), features.ncols() + 1), |(i, j)| {
        if j == 0 {
            1.
        } else {
            features[[i, j - 1]]
        }
    })
}

/// Expands a categorical column into one indicator column per distinct level.
///
/// Levels are returned sorted; column `k` of the matrix is 1 where the row
/// holds `levels[k]`.
pub fn one_hot<T>(column: &[T]) -> (Vec<T>, Array2<f64>)
where
    T: Ord + Clone,
{
    let levels: Vec<T> = column.iter().cloned().sorted().dedup().collect();

    let mut encoded = Array2::zeros((column.len(), levels.len()));
    for (row, value) in column.iter().enumerate() {
        if let Ok(k) = levels.binary_search(value) {
            encoded[[row, k]] = 1.;
        }
    }

    (levels, encoded)
}

pub fn impute(column: &[Option<f64>], fill: f64) -> Vec<f64> {
    column.iter().map(|v| v.unwrap_or(fill)).collect()
}

/// Seeded shuffle followed by a contiguous `train_fraction` prefix / suffix cut.
pub fn split<T: Clone>(rows: &[T], seed: u64, train_fraction: f64) -> Result<(Vec<T>, Vec<T>)> {
    let order = shuffled_indices(rows.len(), seed);
    let cut = train_len(rows.len(), train_fraction)?;

    let (train, test) = order.split_at(cut);

    Ok((
        train.iter().map(|&i| rows[i].clone()).collect(),
        test.iter().map(|&i| rows[i].clone()).collect(),
    ))
}

#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    pub x_train: Array2<f64>,
    pub y_train: Array1<f64>,
    pub x_test: Array2<f64>,
    pub y_test: Array1<f64>,
}

/// Same split as [`split`] applied to aligned features and labels.
pub fn train_test_split(
    x: &Array2<f64>,
    y: &Array1<f64>,
    seed: u64,
    train_fraction: f64,
) -> Result<Split> {
    RegressionError::check_len("labels vs rows", x.nrows(), y.len())?;

    let order = shuffled_indices(x.nrows(), seed);
    let cut = train_len(x.nrows(), train_fraction)?;
    let (train, test) = order.split_at(cut);

    Ok(Split {
        x_train: x.select(Axis(0), train),
        y_train: y.select(Axis(0), train),
        x_test: x.select(Axis(0), test),
        y_test: y.select(Axis(0), test),
    })
}

fn shuffled_indices(len: usize, seed: u64) -> Vec<usize> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut order: Vec<usize> = (0..len).collect();
    order.shuffle(&mut rng);

    order
}

fn train_len(len: usize, train_fraction: f64) -> Result<usize> {
    if !(train_fraction > 0. && train_fraction < 1.) {
        return Err(RegressionError::InvalidHyperparameter(format!(
            "train fraction must lie in (0, 1), got {train_fraction}"
        )));
    }

    Ok((len as f64 * train_fraction).floor() as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn bias_column_is_prepended() {
        let features = array![[2., 3.], [4., 5.]];
        assert_eq!(with_bias(&features), array![[1., 2., 3.], [1., 4., 5.]]);
    }

    #[test]
    fn one_hot_sorted_levels() {
        let column = ["Ideal", "Good", "Ideal", "Fair"];

        let (levels, encoded) = one_hot(&column);

        assert_eq!(levels, vec!["Fair", "Good", "Ideal"]);
        assert_eq!(
            encoded,
            array![[0., 0., 1.], [0., 1., 0.], [0., 0., 1.], [1., 0., 0.]]
        );
        assert!(encoded.rows().into_iter().all(|r| r.sum() == 1.));
    }

    #[test]
    fn impute_fills_missing_only() {
        let column = [Some(3.), None, Some(10.), None];
        assert_eq!(impute(&column, 1.), vec![3., 1., 10., 1.]);
    }

    #[test]
    fn split_is_seeded_and_complete() {
        let rows: Vec<u32> = (0..10).collect();

        let (train, test) = split(&rows, 42, 0.8).unwrap();
        let (train_again, test_again) = split(&rows, 42, 0.8).unwrap();

        assert_eq!(train.len(), 8);
        assert_eq!(test.len(), 2);
        assert_eq!(train, train_again);
        assert_eq!(test, test_again);

        let mut all: Vec<u32> = train.into_iter().chain(test).collect();
        all.sort();
        assert_eq!(all, rows);
    }

    #[test]
    fn split_rounds_train_size_down() {
        let rows: Vec<u32> = (0..7).collect();
        let (train, test) = split(&rows, 1, 0.8).unwrap();
        assert_eq!((train.len(), test.len()), (5, 2));
    }

    #[test]
    fn split_rejects_bad_fraction() {
        let rows = [1, 2, 3];
        for fraction in [0., 1., -0.5, 1.5, f64::NAN] {
            assert!(matches!(
                split(&rows, 0, fraction),
                Err(RegressionError::InvalidHyperparameter(_))
            ));
        }
    }

    #[test]
    fn matrix_split_keeps_rows_aligned() {
        let x = array![[1., 0.], [1., 1.], [1., 2.], [1., 3.], [1., 4.]];
        let y = array![0., 10., 20., 30., 40.];

        let split = train_test_split(&x, &y, 7, 0.6).unwrap();

        assert_eq!(split.x_train.nrows(), 3);
        assert_eq!(split.x_test.nrows(), 2);
        for (row, label) in split
            .x_train
            .rows()
            .into_iter()
            .chain(split.x_test.rows())
            .zip(split.y_train.iter().chain(split.y_test.iter()))
        {
            assert_eq!(row[1] * 10., *label);
        }
    }

    #[test]
    fn matrix_split_checks_labels() {
        let x = array![[1., 0.], [1., 1.]];
        let y = array![0.];
        assert!(matches!(
            train_test_split(&x, &y, 0, 0.5),
            Err(RegressionError::DimensionMismatch { .. })
        ));
    }
}
