use std::path::Path;

use clap::Parser;
use ndarray::Array1;
use plotters::prelude::*;
use tracing::info;

use regresja_fuw::config::{init_tracing, TrainingArgs};
use regresja_fuw::dataset::train_test_split;
use regresja_fuw::evaluation::{mean_squared_error, r_squared};
use regresja_fuw::plots::{plot_log_scale_data, plot_predictions};
use regresja_fuw::reg_lin::{diamond_features, load_diamonds, normal_equations};
use regresja_fuw::{Normalization, Regression};

#[derive(Parser, Debug)]
#[command(author, version, about = "Diamond price regression by gradient descent", long_about = None)]
pub struct Args {
    #[arg(long, default_value = "data/diamonds.csv")]
    pub data_path: String,

    #[arg(long, default_value = "plots/reg_lin_diamonds.svg")]
    pub plot_path: String,

    #[command(flatten)]
    pub training: TrainingArgs,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args = Args::parse();

    let diamonds = load_diamonds(&args.data_path)?;
    info!(records = diamonds.len(), path = %args.data_path, "loaded diamonds");

    let features = diamond_features(&diamonds)?;

    let split = train_test_split(
        &features.x,
        &features.price,
        args.training.seed,
        args.training.train_fraction,
    )?;

    let (x_train, normalization) = Normalization::fit_apply(&split.x_train)?;
    let x_test = normalization.apply(&split.x_test)?;

    let gd = args.training.gradient_descent()?;
    let training = gd.train(
        Regression::Linear,
        &x_train,
        &split.y_train,
        Array1::zeros(x_train.ncols()),
    )?;

    let predictions = Regression::Linear.hypothesis(&x_test, &training.theta)?;
    let mse = mean_squared_error(&predictions, &split.y_test)?;
    let r2 = r_squared(&predictions, &split.y_test)?;

    let baseline = normal_equations(&x_train, &split.y_train)?;
    let baseline_predictions = Regression::Linear.hypothesis(&x_test, &baseline)?;
    let baseline_mse = mean_squared_error(&baseline_predictions, &split.y_test)?;

    println!("fitted parameters:");
    for (name, theta) in std::iter::once("bias")
        .chain(features.columns.iter().map(String::as_str))
        .zip(training.theta.iter())
    {
        println!("  {name:>16}: {theta:.3}");
    }
    println!(
        "test MSE: {mse:.1}, RMSE: {:.1}, R²: {r2:.4} (normal equations RMSE: {:.1})",
        mse.sqrt(),
        baseline_mse.sqrt()
    );

    if let Some(parent) = Path::new(&args.plot_path).parent() {
        std::fs::create_dir_all(parent)?;
    }

    let drawing_area = SVGBackend::new(&args.plot_path, (1600, 800)).into_drawing_area();
    let (left, right) = drawing_area.split_horizontally(800);

    plot_log_scale_data(&training.cost_history, "cost", &left)?;
    plot_predictions(
        &split.y_test.to_vec(),
        &predictions.to_vec(),
        "test set price",
        &right,
    )?;

    drawing_area.present()?;
    info!(path = %args.plot_path, "saved plots");

    Ok(())
}
