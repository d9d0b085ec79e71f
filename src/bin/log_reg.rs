use std::path::Path;

use clap::Parser;
use ndarray::Array1;
use plotters::prelude::*;
use tracing::info;

use regresja_fuw::config::{init_tracing, TrainingArgs};
use regresja_fuw::dataset::train_test_split;
use regresja_fuw::evaluation::{
    accuracy, classify_all, labels_to_classes, ConfusionMatrix, DEFAULT_THRESHOLD,
};
use regresja_fuw::log_reg::{cancer_features, load_biopsies, BARE_NUCLEI_MODE};
use regresja_fuw::plots::{plot_confusion_matrix, plot_log_scale_data};
use regresja_fuw::{Normalization, Regression};

#[derive(Parser, Debug)]
#[command(author, version, about = "Breast cancer diagnosis by logistic regression", long_about = None)]
pub struct Args {
    #[arg(long, default_value = "data/breast-cancer-wisconsin.data")]
    pub data_path: String,

    #[arg(long, default_value = "plots/log_reg_cancer.svg")]
    pub plot_path: String,

    /// Value used for missing bare-nuclei counts.
    #[arg(long, default_value_t = BARE_NUCLEI_MODE)]
    pub bare_nuclei_fill: f64,

    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: f64,

    #[command(flatten)]
    pub training: TrainingArgs,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args = Args::parse();

    let biopsies = load_biopsies(&args.data_path)?;
    let features = cancer_features(&biopsies, args.bare_nuclei_fill)?;
    info!(
        records = biopsies.len(),
        imputed = features.imputed,
        fill = args.bare_nuclei_fill,
        "loaded biopsies"
    );

    let split = train_test_split(
        &features.x,
        &features.diagnosis,
        args.training.seed,
        args.training.train_fraction,
    )?;

    // test rows are scaled with the training statistics
    let (x_train, normalization) = Normalization::fit_apply(&split.x_train)?;
    let x_test = normalization.apply(&split.x_test)?;

    let gd = args.training.gradient_descent()?;
    let training = gd.train(
        Regression::Logistic,
        &x_train,
        &split.y_train,
        Array1::zeros(x_train.ncols()),
    )?;

    let probabilities = Regression::Logistic.hypothesis(&x_test, &training.theta)?;
    let predicted = classify_all(&probabilities, args.threshold)?;
    let expected = labels_to_classes(&split.y_test);

    let matrix = ConfusionMatrix::new(&expected, &predicted)?;

    println!("fitted parameters: {:.3}", training.theta);
    println!(
        "test accuracy: {:.3} ({} rows)",
        accuracy(&expected, &predicted)?,
        matrix.total()
    );
    println!(
        "precision: {}, recall: {}",
        matrix
            .precision()
            .map_or("n/a".to_string(), |p| format!("{p:.3}")),
        matrix
            .recall()
            .map_or("n/a".to_string(), |r| format!("{r:.3}"))
    );
    println!("{matrix:?}");

    if let Some(parent) = Path::new(&args.plot_path).parent() {
        std::fs::create_dir_all(parent)?;
    }

    let drawing_area = SVGBackend::new(&args.plot_path, (1600, 800)).into_drawing_area();
    let (left, right) = drawing_area.split_horizontally(800);

    plot_log_scale_data(&training.cost_history, "log loss", &left)?;
    plot_confusion_matrix(
        &matrix,
        &|class| match class {
            0 => "benign".to_string(),
            _ => "malignant".to_string(),
        },
        "test set diagnoses",
        &right,
    )?;

    drawing_area.present()?;
    info!(path = %args.plot_path, "saved plots");

    Ok(())
}
