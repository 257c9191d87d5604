//! Shared "fit pipeline" logic used by both the `fit` and `demo` subcommands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! analytical solve -> gradient descent -> evaluation of both on train/dev
//!
//! The front-ends then only differ in where the data comes from and what gets exported.

use nalgebra::DVector;

use crate::domain::{Dataset, TrainConfig, TrainEvent, TrainOutcome, TrainReport};
use crate::error::AppError;
use crate::fit::{GradientDescent, TrainObserver, evaluate_pair};
use crate::math::solve;
use crate::report::{RunSummary, SolutionSummary};

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub analytical: DVector<f64>,
    pub report: TrainReport,
    pub summary: RunSummary,
}

/// Logs trainer events through the `log` facade.
#[derive(Debug, Default)]
pub struct LogObserver;

impl TrainObserver for LogObserver {
    fn on_event(&mut self, event: &TrainEvent) {
        match event {
            TrainEvent::Checkpoint(cp) => {
                if !(cp.train_loss.is_finite() && cp.dev_loss.is_finite()) {
                    log::warn!(
                        "step {}: non-finite loss (train={}, dev={}); learning rate is likely too large",
                        cp.step,
                        cp.train_loss,
                        cp.dev_loss
                    );
                } else {
                    log::info!("step {} \t dev loss: {} \t train loss: {}", cp.step, cp.dev_loss, cp.train_loss);
                }
            }
            TrainEvent::Finished { outcome, step } => match outcome {
                TrainOutcome::Converged => log::info!("stopping early at step {step}"),
                TrainOutcome::Exhausted => log::info!("step budget exhausted at step {step}"),
                TrainOutcome::Cancelled => log::warn!("training cancelled at step {step}"),
            },
        }
    }
}

/// Fit both solutions on `train`, score them on `train` and `dev`.
pub fn run_fit(train: &Dataset, dev: &Dataset, config: &TrainConfig) -> Result<RunOutput, AppError> {
    run_fit_with_observer(train, dev, config, &mut LogObserver)
}

/// Same as [`run_fit`] with a caller-supplied progress observer.
pub fn run_fit_with_observer(
    train: &Dataset,
    dev: &Dataset,
    config: &TrainConfig,
    observer: &mut dyn TrainObserver,
) -> Result<RunOutput, AppError> {
    // 1) Closed form.
    log::info!("solving normal equations ({} rows, {} features)", train.len(), train.n_features());
    let analytical = solve(train.features(), train.targets(), config.c)?;
    let analytical_losses = evaluate_pair(train, dev, &analytical)?;
    log::info!(
        "analytical solution \t train loss: {}, dev loss: {}",
        analytical_losses.train,
        analytical_losses.dev
    );

    // 2) Gradient descent.
    log::info!("training with mini-batch gradient descent");
    let trainer = GradientDescent::new(config.clone())?;
    let report = trainer.train(train, dev, observer)?;
    let gd_losses = evaluate_pair(train, dev, &report.weights)?;
    log::info!(
        "gradient descent solution \t train loss: {}, dev loss: {}",
        gd_losses.train,
        gd_losses.dev
    );

    let summary = RunSummary::from_parts(
        train.len(),
        dev.len(),
        config,
        SolutionSummary::new(&analytical, analytical_losses),
        SolutionSummary::new(&report.weights, gd_losses),
        &report,
    );

    Ok(RunOutput {
        analytical,
        report,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{generate_linear, split_tail};
    use crate::domain::SyntheticConfig;
    use crate::fit::Silent;

    #[test]
    fn both_paths_agree_on_synthetic_data() {
        let data = generate_linear(&SyntheticConfig {
            rows: 200,
            noise: 0.05,
            ..SyntheticConfig::default()
        })
        .unwrap();
        let (train, dev) = split_tail(&data, 0.25).unwrap();
        let config = TrainConfig {
            lr: 0.05,
            c: 0.0,
            batch_size: 32,
            max_steps: 20_000,
            eval_steps: 100,
            min_diff: 1e-4,
            ..TrainConfig::default()
        };

        let out = run_fit_with_observer(&train, &dev, &config, &mut Silent).unwrap();
        let a = &out.summary.analytical.losses;
        let g = &out.summary.gradient_descent.losses;
        assert!(a.train <= g.train + 1e-12);
        assert!((g.dev - a.dev).abs() < 0.01, "gd={} analytical={}", g.dev, a.dev);
        assert_eq!(out.summary.n_train, 150);
        assert_eq!(out.summary.n_dev, 50);
    }

    #[test]
    fn invalid_hyperparameters_surface_as_app_error() {
        let data = generate_linear(&SyntheticConfig::default()).unwrap();
        let config = TrainConfig {
            batch_size: 0,
            ..TrainConfig::default()
        };
        let err = run_fit_with_observer(&data, &data, &config, &mut Silent).unwrap_err();
        assert_eq!(err.exit_code(), 5);
    }
}
