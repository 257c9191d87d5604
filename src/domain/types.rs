//! Shared domain types.
//!
//! These types are kept lightweight and serializable so they can be:
//!
//! - built from CLI flags
//! - passed through the training core
//! - summarized in the JSON run report

use std::path::PathBuf;

use clap::ValueEnum;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::error::FitError;

/// A feature matrix paired with its row-aligned target vector.
///
/// The row invariant is checked once at construction so the training loop never
/// has to re-validate it.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    features: DMatrix<f64>,
    targets: DVector<f64>,
}

impl Dataset {
    pub fn new(features: DMatrix<f64>, targets: DVector<f64>) -> Result<Self, FitError> {
        if features.nrows() != targets.len() {
            return Err(FitError::shape("targets", features.nrows(), targets.len()));
        }
        Ok(Self { features, targets })
    }

    pub fn features(&self) -> &DMatrix<f64> {
        &self.features
    }

    pub fn targets(&self) -> &DVector<f64> {
        &self.targets
    }

    /// Number of rows (examples).
    pub fn len(&self) -> usize {
        self.features.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of feature columns (including the bias column when present).
    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }
}

/// Feature normalization strategy.
///
/// Statistics are always computed on the training split and reused for every
/// other split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ScalerKind {
    /// Standard score: `(x - mean) / (std + ε)`.
    Standard,
    /// Min-max: `(x - min) / (max - min + ε)`.
    MinMax,
    /// Leave raw features untouched.
    None,
}

/// Initial weight vector for gradient descent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightInit {
    Ones,
    Zeros,
    Constant(f64),
    /// Explicit coefficients; the length must equal the feature count.
    Fixed(Vec<f64>),
}

impl WeightInit {
    pub fn build(&self, n: usize) -> Result<DVector<f64>, FitError> {
        match self {
            WeightInit::Ones => Ok(DVector::from_element(n, 1.0)),
            WeightInit::Zeros => Ok(DVector::zeros(n)),
            WeightInit::Constant(v) => Ok(DVector::from_element(n, *v)),
            WeightInit::Fixed(values) => {
                if values.len() != n {
                    return Err(FitError::shape("initial weights", n, values.len()));
                }
                Ok(DVector::from_column_slice(values))
            }
        }
    }
}

/// Gradient-descent hyperparameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    /// Learning rate.
    pub lr: f64,
    /// Regularization coefficient (`0` disables the penalty).
    pub c: f64,
    pub batch_size: usize,
    pub max_steps: usize,
    /// Evaluate (and check for convergence) every this many steps.
    pub eval_steps: usize,
    /// Early-stopping window length (number of checkpoints).
    pub window: usize,
    /// Early-stopping plateau threshold on the training loss range.
    pub min_diff: f64,
    /// Seed for the batch sampler.
    pub seed: u64,
    pub init: WeightInit,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            lr: 2e-4,
            c: 1e-7,
            batch_size: 64,
            max_steps: 6_000_000,
            eval_steps: 10_000,
            window: 10,
            min_diff: 9e-6,
            seed: 42,
            init: WeightInit::Ones,
        }
    }
}

impl TrainConfig {
    /// Reject configurations that would silently produce nonsense.
    pub fn validate(&self) -> Result<(), FitError> {
        if self.batch_size == 0 {
            return Err(FitError::hyperparameter("batch size must be > 0"));
        }
        if self.eval_steps == 0 {
            return Err(FitError::hyperparameter("eval steps must be > 0"));
        }
        if self.window == 0 {
            return Err(FitError::hyperparameter("early-stopping window must be > 0"));
        }
        if !(self.lr.is_finite() && self.lr >= 0.0) {
            return Err(FitError::hyperparameter(format!(
                "learning rate must be finite and >= 0, got {}",
                self.lr
            )));
        }
        if !(self.c.is_finite() && self.c >= 0.0) {
            return Err(FitError::hyperparameter(format!(
                "regularization coefficient must be finite and >= 0, got {}",
                self.c
            )));
        }
        if !(self.min_diff.is_finite() && self.min_diff >= 0.0) {
            return Err(FitError::hyperparameter(format!(
                "min_diff must be finite and >= 0, got {}",
                self.min_diff
            )));
        }
        Ok(())
    }
}

/// Train/dev losses at one evaluation point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub step: usize,
    pub train_loss: f64,
    pub dev_loss: f64,
}

/// How a gradient-descent run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrainOutcome {
    /// The early-stopping monitor reported a plateau.
    Converged,
    /// `max_steps` ran out first.
    Exhausted,
    /// The cancellation flag was raised between steps.
    Cancelled,
}

impl TrainOutcome {
    pub fn display_name(self) -> &'static str {
        match self {
            TrainOutcome::Converged => "converged (early stop)",
            TrainOutcome::Exhausted => "step budget exhausted",
            TrainOutcome::Cancelled => "cancelled",
        }
    }
}

/// Progress events emitted by the trainer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrainEvent {
    Checkpoint(Checkpoint),
    Finished { outcome: TrainOutcome, step: usize },
}

/// Result of a gradient-descent run.
#[derive(Debug, Clone)]
pub struct TrainReport {
    pub weights: DVector<f64>,
    pub outcome: TrainOutcome,
    /// Number of weight updates performed.
    pub steps: usize,
    /// Every checkpoint, starting with step 0.
    pub checkpoints: Vec<Checkpoint>,
}

/// Train and dev MSE for one weight vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitLosses {
    pub train: f64,
    pub dev: f64,
}

/// Where the `fit` subcommand reads and writes.
#[derive(Debug, Clone)]
pub struct RunPaths {
    pub train_csv: PathBuf,
    pub dev_csv: PathBuf,
    pub test_csv: Option<PathBuf>,
    pub predictions: Option<PathBuf>,
    pub weights: Option<PathBuf>,
    pub report_json: Option<PathBuf>,
}

/// Settings for the synthetic `demo` subcommand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticConfig {
    pub rows: usize,
    pub bias: f64,
    /// One coefficient per raw feature.
    pub coefs: Vec<f64>,
    /// Standard deviation of the Gaussian target noise.
    pub noise: f64,
    /// Raw features are drawn uniformly from `[-feature_range, feature_range]`.
    pub feature_range: f64,
    pub seed: u64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            rows: 500,
            bias: 5.0,
            coefs: vec![2.0, -1.0],
            noise: 0.1,
            feature_range: 1.0,
            seed: 42,
        }
    }
}
