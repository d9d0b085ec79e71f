//! Breast-cancer diagnosis data in the raw Wisconsin format (no header,
//! `?` for a missing bare-nuclei count, class 2 = benign, 4 = malignant).

use std::io::Read;
use std::path::Path;

use itertools::izip;
use ndarray::{Array1, Array2};
use serde::de::{self, Deserialize, Deserializer, Unexpected};

use crate::dataset::{impute, with_bias};
use crate::error::DatasetError;

/// Most frequent bare-nuclei count in the dataset.
pub const BARE_NUCLEI_MODE: f64 = 1.;

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct Biopsy {
    pub id: u64,
    pub clump_thickness: f64,
    pub cell_size_uniformity: f64,
    pub cell_shape_uniformity: f64,
    pub marginal_adhesion: f64,
    pub epithelial_cell_size: f64,

    #[serde(deserialize_with = "csv::invalid_option")]
    pub bare_nuclei: Option<f64>,

    pub bland_chromatin: f64,
    pub normal_nucleoli: f64,
    pub mitoses: f64,

    #[serde(rename = "class", deserialize_with = "malignant_from_class")]
    pub malignant: bool,
}

fn malignant_from_class<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match u8::deserialize(deserializer)? {
        2 => Ok(false),
        4 => Ok(true),
        other => Err(de::Error::invalid_value(
            Unexpected::Unsigned(other as u64),
            &"2 (benign) or 4 (malignant)",
        )),
    }
}

pub const FEATURE_COLUMNS: [&str; 9] = [
    "clump_thickness",
    "cell_size_uniformity",
    "cell_shape_uniformity",
    "marginal_adhesion",
    "epithelial_cell_size",
    "bare_nuclei",
    "bland_chromatin",
    "normal_nucleoli",
    "mitoses",
];

pub fn read_biopsies<R: Read>(reader: R) -> Result<Vec<Biopsy>, DatasetError> {
    let records: Vec<Biopsy> = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(reader)
        .deserialize()
        .collect::<Result<_, _>>()?;

    if records.is_empty() {
        return Err(DatasetError::Empty("breast cancer".to_string()));
    }

    Ok(records)
}

pub fn load_biopsies<P: AsRef<Path>>(path: P) -> Result<Vec<Biopsy>, DatasetError> {
    read_biopsies(std::fs::File::open(path)?)
}

#[derive(Debug, Clone)]
pub struct CancerFeatures {
    /// Bias column followed by [`FEATURE_COLUMNS`].
    pub x: Array2<f64>,
    /// 1 for malignant, 0 for benign.
    pub diagnosis: Array1<f64>,
    pub imputed: usize,
}

/// Drops the id, fills missing bare-nuclei counts with `bare_nuclei_fill`.
pub fn cancer_features(
    biopsies: &[Biopsy],
    bare_nuclei_fill: f64,
) -> Result<CancerFeatures, DatasetError> {
    let bare_nuclei_raw: Vec<Option<f64>> = biopsies.iter().map(|b| b.bare_nuclei).collect();
    let imputed = bare_nuclei_raw.iter().filter(|v| v.is_none()).count();
    let bare_nuclei = impute(&bare_nuclei_raw, bare_nuclei_fill);

    let values: Vec<f64> = izip!(biopsies, bare_nuclei)
        .flat_map(|(b, bare_nuclei)| {
            [
                b.clump_thickness,
                b.cell_size_uniformity,
                b.cell_shape_uniformity,
                b.marginal_adhesion,
                b.epithelial_cell_size,
                bare_nuclei,
                b.bland_chromatin,
                b.normal_nucleoli,
                b.mitoses,
            ]
        })
        .collect();

    let features = Array2::from_shape_vec((biopsies.len(), FEATURE_COLUMNS.len()), values)?;

    Ok(CancerFeatures {
        x: with_bias(&features),
        diagnosis: biopsies
            .iter()
            .map(|b| if b.malignant { 1. } else { 0. })
            .collect(),
        imputed,
    })
}
