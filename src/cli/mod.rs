//! Command-line parsing for the linear-regression fitter.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! math/fitting code. Paths and the seed can also come from the environment
//! (or a `.env` file), which is handy for repeated runs on the same dataset.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::ScalerKind;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "lr", version, about = "Linear regression: normal equations vs mini-batch gradient descent")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit both solutions on CSV train/dev files, report losses, and optionally export.
    Fit(FitArgs),
    /// Fit both solutions on a seeded synthetic dataset.
    Demo(DemoArgs),
}

/// Gradient-descent hyperparameters shared by every subcommand.
#[derive(Debug, Args, Clone)]
pub struct TrainArgs {
    /// Learning rate.
    #[arg(long, default_value_t = 2e-4)]
    pub lr: f64,

    /// Regularization coefficient C (used by both solutions; 0 disables).
    #[arg(short = 'c', long = "c", default_value_t = 1e-7)]
    pub c: f64,

    /// Mini-batch size (rows sampled with replacement per step).
    #[arg(long, default_value_t = 64)]
    pub batch_size: usize,

    /// Maximum number of gradient steps.
    #[arg(long, default_value_t = 6_000_000)]
    pub max_steps: usize,

    /// Evaluate train/dev loss every N steps.
    #[arg(long, default_value_t = 10_000)]
    pub eval_steps: usize,

    /// Early-stopping window (number of checkpoints).
    #[arg(long, default_value_t = 10)]
    pub window: usize,

    /// Early-stopping threshold on the training-loss range within the window.
    #[arg(long, default_value_t = 9e-6)]
    pub min_diff: f64,

    /// Random seed for batch sampling.
    #[arg(long, env = "LR_SEED", default_value_t = 42)]
    pub seed: u64,

    /// Initialize weights to zeros instead of ones.
    #[arg(long)]
    pub zero_init: bool,
}

/// Options for fitting CSV data.
#[derive(Debug, Args, Clone)]
pub struct FitArgs {
    /// Training CSV (features..., target).
    #[arg(long, env = "LR_TRAIN_CSV", value_name = "CSV")]
    pub train: PathBuf,

    /// Dev CSV (features..., target).
    #[arg(long, env = "LR_DEV_CSV", value_name = "CSV")]
    pub dev: PathBuf,

    /// Optional test CSV (features only) to predict with the gradient-descent weights.
    #[arg(long, env = "LR_TEST_CSV", value_name = "CSV")]
    pub test: Option<PathBuf>,

    /// Feature scaling fitted on the training file.
    #[arg(long, value_enum, default_value_t = ScalerKind::Standard)]
    pub scaler: ScalerKind,

    /// Where to write test predictions (requires --test).
    #[arg(long, default_value = "pred.csv")]
    pub predictions: PathBuf,

    /// Write the analytical weights to this CSV.
    #[arg(long)]
    pub weights: Option<PathBuf>,

    /// Write a JSON summary of the run.
    #[arg(long = "report-json")]
    pub report_json: Option<PathBuf>,

    #[command(flatten)]
    pub train_args: TrainArgs,
}

/// Options for the synthetic demo.
#[derive(Debug, Args, Clone)]
pub struct DemoArgs {
    /// Number of generated rows (train + dev).
    #[arg(long, default_value_t = 500)]
    pub rows: usize,

    /// Fraction of rows held out as the dev split.
    #[arg(long, default_value_t = 0.2)]
    pub dev_fraction: f64,

    /// Intercept of the generating model.
    #[arg(long, default_value_t = 5.0)]
    pub bias: f64,

    /// Coefficients of the generating model (one per raw feature).
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, default_values_t = vec![2.0, -1.0])]
    pub coefs: Vec<f64>,

    /// Standard deviation of the Gaussian target noise.
    #[arg(long, default_value_t = 0.1)]
    pub noise: f64,

    /// Seed for data generation.
    #[arg(long, default_value_t = 7)]
    pub data_seed: u64,

    /// Write a JSON summary of the run.
    #[arg(long = "report-json")]
    pub report_json: Option<PathBuf>,

    #[command(flatten)]
    pub train_args: TrainArgs,
}
