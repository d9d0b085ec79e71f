use clap::Args;

use crate::error::Result;
use crate::gradient_descent::GradientDescent;

/// Hyperparameters shared by the training binaries.
#[derive(Args, Debug, Clone)]
pub struct TrainingArgs {
    #[arg(long, default_value_t = 0.01)]
    pub learning_rate: f64,

    #[arg(long, default_value_t = 1000)]
    pub iterations: usize,

    /// Stop once the cost changes by less than this between iterations.
    #[arg(long)]
    pub tolerance: Option<f64>,

    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    #[arg(long, default_value_t = 0.8)]
    pub train_fraction: f64,
}

/// Installs the fmt subscriber; `RUST_LOG` overrides the default `info` level.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();
}

impl TrainingArgs {
    pub fn gradient_descent(&self) -> Result<GradientDescent> {
        let gd = GradientDescent::new(self.learning_rate, self.iterations)?;

        match self.tolerance {
            Some(tolerance) => gd.with_tolerance(tolerance),
            None => Ok(gd),
        }
    }
}
