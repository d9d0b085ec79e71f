//! Diamond price regression: record loading, feature encoding and the
//! closed-form baseline the gradient-descent fit is compared against.

use std::io::Read;
use std::path::Path;

use nalgebra::{DMatrix, DVector};
use ndarray::{concatenate, Array1, Array2, Axis};

use crate::dataset::{one_hot, with_bias};
use crate::error::{DatasetError, Degeneracy, RegressionError, Result};

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct Diamond {
    pub carat: f64,
    pub cut: String,
    pub color: String,
    pub clarity: String,
    pub depth: f64,
    pub table: f64,
    pub price: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

const NUMERIC_COLUMNS: [&str; 6] = ["carat", "depth", "table", "x", "y", "z"];

/// Reads a headed diamonds CSV; columns not named in [`Diamond`] are ignored.
pub fn read_diamonds<R: Read>(reader: R) -> std::result::Result<Vec<Diamond>, DatasetError> {
    let records: Vec<Diamond> = csv::Reader::from_reader(reader)
        .deserialize()
        .collect::<std::result::Result<_, _>>()?;

    if records.is_empty() {
        return Err(DatasetError::Empty("diamonds".to_string()));
    }

    Ok(records)
}

pub fn load_diamonds<P: AsRef<Path>>(path: P) -> std::result::Result<Vec<Diamond>, DatasetError> {
    read_diamonds(std::fs::File::open(path)?)
}

#[derive(Debug, Clone)]
pub struct DiamondFeatures {
    /// Bias column followed by the numeric columns and the one-hot blocks.
    pub x: Array2<f64>,
    pub price: Array1<f64>,
    /// Names of the columns of `x` after the bias.
    pub columns: Vec<String>,
}

fn encoded_block(
    name: &str,
    values: Vec<&str>,
    columns: &mut Vec<String>,
) -> Array2<f64> {
    let (levels, encoded) = one_hot(&values);
    columns.extend(levels.iter().map(|level| format!("{name}_{level}")));

    encoded
}

pub fn diamond_features(diamonds: &[Diamond]) -> std::result::Result<DiamondFeatures, DatasetError> {
    let numeric: Vec<f64> = diamonds
        .iter()
        .flat_map(|d| [d.carat, d.depth, d.table, d.x, d.y, d.z])
        .collect();
    let numeric = Array2::from_shape_vec((diamonds.len(), NUMERIC_COLUMNS.len()), numeric)?;

    let mut columns: Vec<String> = NUMERIC_COLUMNS.iter().map(|c| c.to_string()).collect();

    let cut = encoded_block("cut", diamonds.iter().map(|d| d.cut.as_str()).collect(), &mut columns);
    let color = encoded_block("color", diamonds.iter().map(|d| d.color.as_str()).collect(), &mut columns);
    let clarity = encoded_block(
        "clarity",
        diamonds.iter().map(|d| d.clarity.as_str()).collect(),
        &mut columns,
    );

    let features = concatenate(
        Axis(1),
        &[numeric.view(), cut.view(), color.view(), clarity.view()],
    )?;

    Ok(DiamondFeatures {
        x: with_bias(&features),
        price: diamonds.iter().map(|d| d.price).collect(),
        columns,
    })
}

/// Least-squares parameters `pinv(XᵀX) · Xᵀy`.
///
/// The pseudo-inverse keeps this defined when one-hot blocks make the columns
/// collinear with the bias; the minimum-norm solution is returned then.
pub fn normal_equations(x: &Array2<f64>, y: &Array1<f64>) -> Result<Array1<f64>> {
    RegressionError::check_len("labels vs rows", x.nrows(), y.len())?;
    if x.nrows() == 0 {
        return Err(RegressionError::EmptyDataset);
    }

    let n = x.ncols();
    let xtx = x.t().dot(x);
    let xty = x.t().dot(y);

    let xtx = DMatrix::from_row_slice(n, n, &xtx.iter().copied().collect::<Vec<_>>());
    let xty = DVector::from_iterator(n, xty.iter().copied());

    let eps = xtx.amax() * 1e-10;
    let pinv = xtx
        .pseudo_inverse(eps)
        .map_err(|_| Degeneracy::SingularSystem)?;
    let theta = pinv * xty;

    if theta.iter().any(|t| !t.is_finite()) {
        return Err(Degeneracy::SingularSystem.into());
    }

    Ok(theta.iter().copied().collect())
}
