use clap::Parser;
use ndarray::{Array1, Array2};
use plotters::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal, Uniform};
use tracing::info;

use regresja_fuw::config::init_tracing;
use regresja_fuw::dataset::with_bias;
use regresja_fuw::evaluation::{accuracy, classify_all, labels_to_classes, DEFAULT_THRESHOLD};
use regresja_fuw::plots::plot_log_scale_data;
use regresja_fuw::reg_lin::normal_equations;
use regresja_fuw::{GradientDescent, Regression};

/// Both regressions on generated data, as a sanity check of the trainer.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long, default_value_t = 200)]
    samples: usize,

    #[arg(long, default_value_t = 7)]
    seed: u64,

    #[arg(long, default_value = "plots/synthetic_costs.svg")]
    plot_path: String,
}

/// `y = theta0 + theta1 * x` plus gaussian noise, x uniform on [-1, 1).
fn linear_dataset(
    rng: &mut StdRng,
    samples: usize,
    theta: [f64; 2],
) -> Result<(Array2<f64>, Array1<f64>), Box<dyn std::error::Error>> {
    let uniform = Uniform::new(-1., 1.);
    let noise = Normal::new(0., 0.1)?;

    let x: Vec<f64> = uniform.sample_iter(&mut *rng).take(samples).collect();
    let y: Array1<f64> = x
        .iter()
        .map(|&x| theta[0] + theta[1] * x + noise.sample(rng))
        .collect();

    let x = Array2::from_shape_vec((samples, 1), x)?;

    Ok((with_bias(&x), y))
}

/// Two gaussian clusters centered at -1 (label 0) and 1 (label 1).
fn two_clusters(
    rng: &mut StdRng,
    samples: usize,
) -> Result<(Array2<f64>, Array1<f64>), Box<dyn std::error::Error>> {
    let negative = Normal::new(-1., 0.5)?;
    let positive = Normal::new(1., 0.5)?;

    let (x, y): (Vec<f64>, Vec<f64>) = (0..samples)
        .map(|i| {
            if i % 2 == 0 {
                (negative.sample(rng), 0.)
            } else {
                (positive.sample(rng), 1.)
            }
        })
        .unzip();

    let x = Array2::from_shape_vec((samples, 1), x)?;

    Ok((with_bias(&x), Array1::from(y)))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args = Args::parse();
    let mut rng = StdRng::seed_from_u64(args.seed);

    let gd = GradientDescent::new(0.1, 500)?;

    let (x, y) = linear_dataset(&mut rng, args.samples, [2., -3.])?;
    let linear = gd.train(Regression::Linear, &x, &y, Array1::zeros(2))?;
    let exact = normal_equations(&x, &y)?;

    println!("linear: gradient descent {:.3}, normal equations {:.3}", linear.theta, exact);

    let (x, y) = two_clusters(&mut rng, args.samples)?;
    let logistic = gd.train(Regression::Logistic, &x, &y, Array1::zeros(2))?;

    let probabilities = Regression::Logistic.hypothesis(&x, &logistic.theta)?;
    let predicted = classify_all(&probabilities, DEFAULT_THRESHOLD)?;
    let train_accuracy = accuracy(&labels_to_classes(&y), &predicted)?;

    println!(
        "logistic: parameters {:.3}, training accuracy {train_accuracy:.3}",
        logistic.theta
    );

    if let Some(parent) = std::path::Path::new(&args.plot_path).parent() {
        std::fs::create_dir_all(parent)?;
    }

    let drawing_area = SVGBackend::new(&args.plot_path, (1600, 800)).into_drawing_area();
    let (left, right) = drawing_area.split_horizontally(800);

    plot_log_scale_data(&linear.cost_history, "squared error", &left)?;
    plot_log_scale_data(&logistic.cost_history, "log loss", &right)?;

    drawing_area.present()?;
    info!(path = %args.plot_path, "saved plots");

    Ok(())
}
