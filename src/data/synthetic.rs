//! Synthetic linear datasets for the `demo` subcommand and tests.
//!
//! Rows are generated as:
//!
//! ```text
//! x_j ~ U(-range, range)
//! y   = bias + Σ coef_j x_j + ε,   ε ~ N(0, noise²)
//! ```
//!
//! The returned feature matrix already carries the bias column, so it can be fed
//! straight to the solver and the trainer.

use nalgebra::{DMatrix, DVector};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{Dataset, SyntheticConfig};
use crate::error::FitError;
use crate::io::ingest::with_bias;

/// Generate a seeded synthetic dataset.
pub fn generate_linear(config: &SyntheticConfig) -> Result<Dataset, FitError> {
    if config.rows == 0 {
        return Err(FitError::EmptyDataset("synthetic row count must be > 0"));
    }
    if !(config.feature_range.is_finite() && config.feature_range > 0.0) {
        return Err(FitError::hyperparameter(format!(
            "feature range must be finite and > 0, got {}",
            config.feature_range
        )));
    }
    let normal = Normal::new(0.0, config.noise)
        .map_err(|e| FitError::hyperparameter(format!("noise distribution error: {e}")))?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let n_raw = config.coefs.len();
    let range = config.feature_range;

    let raw = DMatrix::from_fn(config.rows, n_raw, |_, _| rng.gen_range(-range..=range));
    let targets = DVector::from_fn(config.rows, |i, _| {
        let signal: f64 = config
            .coefs
            .iter()
            .enumerate()
            .map(|(j, coef)| coef * raw[(i, j)])
            .sum();
        config.bias + signal + normal.sample(&mut rng)
    });

    Dataset::new(with_bias(raw), targets)
}

/// Split off the last `dev_fraction` of rows as a held-out set.
pub fn split_tail(data: &Dataset, dev_fraction: f64) -> Result<(Dataset, Dataset), FitError> {
    if !(dev_fraction.is_finite() && dev_fraction > 0.0 && dev_fraction < 1.0) {
        return Err(FitError::hyperparameter(format!(
            "dev fraction must be in (0, 1), got {dev_fraction}"
        )));
    }
    let m = data.len();
    let n_dev = ((m as f64) * dev_fraction).round() as usize;
    let n_train = m.saturating_sub(n_dev);
    if n_train == 0 || n_dev == 0 {
        return Err(FitError::EmptyDataset("split leaves an empty train or dev set"));
    }

    let train = Dataset::new(
        data.features().rows(0, n_train).into_owned(),
        data.targets().rows(0, n_train).into_owned(),
    )?;
    let dev = Dataset::new(
        data.features().rows(n_train, n_dev).into_owned(),
        data.targets().rows(n_train, n_dev).into_owned(),
    )?;
    Ok((train, dev))
}
