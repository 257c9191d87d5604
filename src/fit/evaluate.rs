//! Scoring learned weights against a split.

use nalgebra::{DMatrix, DVector};

use crate::domain::{Dataset, SplitLosses};
use crate::error::FitError;
use crate::math::mse;

/// `X·w`.
pub fn predict(features: &DMatrix<f64>, weights: &DVector<f64>) -> Result<DVector<f64>, FitError> {
    if features.ncols() != weights.len() {
        return Err(FitError::shape("weights", features.ncols(), weights.len()));
    }
    Ok(features * weights)
}

/// Plain MSE of `X·w` against `targets` (no regularization term).
pub fn evaluate(features: &DMatrix<f64>, weights: &DVector<f64>, targets: &DVector<f64>) -> Result<f64, FitError> {
    let predictions = predict(features, weights)?;
    mse(&predictions, targets)
}

pub fn evaluate_split(split: &Dataset, weights: &DVector<f64>) -> Result<f64, FitError> {
    evaluate(split.features(), weights, split.targets())
}

/// Train and dev MSE for one weight vector.
pub fn evaluate_pair(train: &Dataset, dev: &Dataset, weights: &DVector<f64>) -> Result<SplitLosses, FitError> {
    Ok(SplitLosses {
        train: evaluate_split(train, weights)?,
        dev: evaluate_split(dev, weights)?,
    })
}
