//! Reporting utilities: run summaries and formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays free of printing
//! - output changes are localized

pub mod format;

pub use format::*;

use serde::Serialize;

use crate::domain::{Checkpoint, SplitLosses, TrainConfig, TrainOutcome, TrainReport};

/// Everything a `fit`/`demo` run reports, in serializable form.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub n_train: usize,
    pub n_dev: usize,
    pub n_features: usize,
    pub config: TrainConfig,
    pub analytical: SolutionSummary,
    pub gradient_descent: SolutionSummary,
    pub outcome: TrainOutcome,
    pub steps: usize,
    pub checkpoints: Vec<Checkpoint>,
}

/// Weights and split losses for one estimation path.
#[derive(Debug, Clone, Serialize)]
pub struct SolutionSummary {
    pub weights: Vec<f64>,
    pub losses: SplitLosses,
}

impl SolutionSummary {
    pub fn new(weights: &nalgebra::DVector<f64>, losses: SplitLosses) -> Self {
        Self {
            weights: weights.iter().copied().collect(),
            losses,
        }
    }
}

impl RunSummary {
    pub fn from_parts(
        n_train: usize,
        n_dev: usize,
        config: &TrainConfig,
        analytical: SolutionSummary,
        gradient_descent: SolutionSummary,
        report: &TrainReport,
    ) -> Self {
        Self {
            n_train,
            n_dev,
            n_features: analytical.weights.len(),
            config: config.clone(),
            analytical,
            gradient_descent,
            outcome: report.outcome,
            steps: report.steps,
            checkpoints: report.checkpoints.clone(),
        }
    }
}
