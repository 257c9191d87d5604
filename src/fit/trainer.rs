//! Mini-batch gradient descent with periodic evaluation and early stopping.
//!
//! A run moves through `Start -> Running -> {Converged, Exhausted, Cancelled}`:
//!
//! - step 0 evaluates the initial weights (reported, not fed to the monitor)
//! - every step samples a batch, computes the regularized gradient on it, and
//!   applies `w <- w - lr * g`
//! - every `eval_steps` steps the full train/dev MSE is computed, reported, and
//!   the train MSE is fed to a run-scoped [`EarlyStopping`] monitor
//!
//! The trainer performs no I/O itself. Progress is pushed to a [`TrainObserver`].

use std::sync::atomic::{AtomicBool, Ordering};

use nalgebra::DVector;

use crate::domain::{Checkpoint, Dataset, TrainConfig, TrainEvent, TrainOutcome, TrainReport};
use crate::error::FitError;
use crate::fit::early_stop::EarlyStopping;
use crate::fit::evaluate::evaluate_split;
use crate::fit::sampler::BatchSampler;
use crate::math::gradient;

/// Receives trainer progress events.
pub trait TrainObserver {
    fn on_event(&mut self, event: &TrainEvent);
}

impl<F: FnMut(&TrainEvent)> TrainObserver for F {
    fn on_event(&mut self, event: &TrainEvent) {
        self(event)
    }
}

/// Observer that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl TrainObserver for Silent {
    fn on_event(&mut self, _event: &TrainEvent) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Start,
    Running,
    Done(TrainOutcome),
}

#[derive(Debug, Clone)]
pub struct GradientDescent {
    config: TrainConfig,
}

impl GradientDescent {
    /// Build a trainer, rejecting invalid hyperparameters up front.
    pub fn new(config: TrainConfig) -> Result<Self, FitError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &TrainConfig {
        &self.config
    }

    /// Run to convergence or until `max_steps` is exhausted.
    pub fn train(
        &self,
        train: &Dataset,
        dev: &Dataset,
        observer: &mut dyn TrainObserver,
    ) -> Result<TrainReport, FitError> {
        let never = AtomicBool::new(false);
        self.train_until(train, dev, observer, &never)
    }

    /// Like [`GradientDescent::train`], but stops between steps once `cancel` is set.
    pub fn train_until(
        &self,
        train: &Dataset,
        dev: &Dataset,
        observer: &mut dyn TrainObserver,
        cancel: &AtomicBool,
    ) -> Result<TrainReport, FitError> {
        let cfg = &self.config;
        if train.is_empty() {
            return Err(FitError::EmptyDataset("training split has no rows"));
        }
        let n = train.n_features();
        if dev.n_features() != n {
            return Err(FitError::shape("dev features", n, dev.n_features()));
        }

        let mut weights = cfg.init.build(n)?;
        let mut sampler = BatchSampler::new(cfg.batch_size, cfg.seed);
        let mut monitor = EarlyStopping::new(cfg.window, cfg.min_diff);
        let mut checkpoints = Vec::new();
        let mut phase = Phase::Start;
        let mut step = 0;

        let outcome = loop {
            phase = match phase {
                Phase::Start => {
                    let cp = checkpoint(0, train, dev, &weights)?;
                    checkpoints.push(cp);
                    observer.on_event(&TrainEvent::Checkpoint(cp));
                    Phase::Running
                }
                Phase::Running if step >= cfg.max_steps => Phase::Done(TrainOutcome::Exhausted),
                Phase::Running if cancel.load(Ordering::Relaxed) => Phase::Done(TrainOutcome::Cancelled),
                Phase::Running => {
                    step += 1;
                    let (bx, by) = sampler.sample(train.features(), train.targets())?;
                    let grad = gradient(&bx, &weights, &by, cfg.c)?;
                    weights.axpy(-cfg.lr, &grad, 1.0);

                    if step % cfg.eval_steps == 0 {
                        let cp = checkpoint(step, train, dev, &weights)?;
                        checkpoints.push(cp);
                        observer.on_event(&TrainEvent::Checkpoint(cp));
                        if monitor.observe(cp.train_loss) {
                            Phase::Done(TrainOutcome::Converged)
                        } else {
                            Phase::Running
                        }
                    } else {
                        Phase::Running
                    }
                }
                Phase::Done(outcome) => Phase::Done(outcome),
            };
            if let Phase::Done(outcome) = phase {
                break outcome;
            }
        };
        observer.on_event(&TrainEvent::Finished { outcome, step });

        Ok(TrainReport {
            weights,
            outcome,
            steps: step,
            checkpoints,
        })
    }
}

fn checkpoint(step: usize, train: &Dataset, dev: &Dataset, weights: &DVector<f64>) -> Result<Checkpoint, FitError> {
    Ok(Checkpoint {
        step,
        train_loss: evaluate_split(train, weights)?,
        dev_loss: evaluate_split(dev, weights)?,
    })
}
