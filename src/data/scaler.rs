//! Feature scaling.
//!
//! A `Scaler` is fitted once on the raw training features and then applied,
//! unchanged, to every split. Statistics are immutable after fitting.
//!
//! - `Standard`: `(x - mean) / (std + ε)` with the population standard deviation
//! - `MinMax`: `(x - min) / (max - min + ε)`
//! - `Identity`: no-op
//!
//! `ε` keeps constant columns finite: they map to `0` instead of `NaN`.

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::domain::ScalerKind;
use crate::error::FitError;

/// Denominator guard for constant columns.
pub const SCALE_EPS: f64 = 1e-21;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Scaler {
    Standard { mean: Vec<f64>, std_dev: Vec<f64> },
    MinMax { min: Vec<f64>, max: Vec<f64> },
    Identity { n_features: usize },
}

impl Scaler {
    /// Compute column statistics from raw training features.
    pub fn fit(kind: ScalerKind, raw: &DMatrix<f64>) -> Result<Self, FitError> {
        if kind != ScalerKind::None && raw.nrows() == 0 {
            return Err(FitError::EmptyDataset("cannot fit a scaler on zero rows"));
        }

        let scaler = match kind {
            ScalerKind::Standard => {
                let m = raw.nrows() as f64;
                let mean: Vec<f64> = raw.column_iter().map(|c| c.sum() / m).collect();
                let std_dev = raw
                    .column_iter()
                    .zip(mean.iter())
                    .map(|(c, mu)| (c.iter().map(|v| (v - mu) * (v - mu)).sum::<f64>() / m).sqrt())
                    .collect();
                Scaler::Standard { mean, std_dev }
            }
            ScalerKind::MinMax => Scaler::MinMax {
                min: raw.column_iter().map(|c| c.min()).collect(),
                max: raw.column_iter().map(|c| c.max()).collect(),
            },
            ScalerKind::None => Scaler::Identity {
                n_features: raw.ncols(),
            },
        };
        Ok(scaler)
    }

    pub fn kind(&self) -> ScalerKind {
        match self {
            Scaler::Standard { .. } => ScalerKind::Standard,
            Scaler::MinMax { .. } => ScalerKind::MinMax,
            Scaler::Identity { .. } => ScalerKind::None,
        }
    }

    /// Number of raw feature columns the scaler was fitted on.
    pub fn n_features(&self) -> usize {
        match self {
            Scaler::Standard { mean, .. } => mean.len(),
            Scaler::MinMax { min, .. } => min.len(),
            Scaler::Identity { n_features } => *n_features,
        }
    }

    /// Transform a raw feature matrix with the fitted statistics.
    pub fn apply(&self, raw: &DMatrix<f64>) -> Result<DMatrix<f64>, FitError> {
        if raw.ncols() != self.n_features() {
            return Err(FitError::shape("scaled features", self.n_features(), raw.ncols()));
        }

        let (offset, scale): (Vec<f64>, Vec<f64>) = match self {
            Scaler::Standard { mean, std_dev } => (
                mean.clone(),
                std_dev.iter().map(|s| s + SCALE_EPS).collect(),
            ),
            Scaler::MinMax { min, max } => (
                min.clone(),
                min.iter().zip(max.iter()).map(|(lo, hi)| hi - lo + SCALE_EPS).collect(),
            ),
            Scaler::Identity { .. } => return Ok(raw.clone()),
        };

        let mut out = raw.clone();
        for (j, mut col) in out.column_iter_mut().enumerate() {
            col.apply(|v| *v = (*v - offset[j]) / scale[j]);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> DMatrix<f64> {
        DMatrix::from_row_slice(4, 2, &[1.0, 10.0, 2.0, 10.0, 3.0, 10.0, 4.0, 10.0])
    }

    #[test]
    fn standard_scaling_centers_and_scales() {
        let scaler = Scaler::fit(ScalerKind::Standard, &raw()).unwrap();
        let scaled = scaler.apply(&raw()).unwrap();
        let col = scaled.column(0);
        assert!(col.sum().abs() < 1e-12);
        let var = col.iter().map(|v| v * v).sum::<f64>() / 4.0;
        assert!((var - 1.0).abs() < 1e-12);
        // Constant column maps to zero instead of NaN.
        assert!(scaled.column(1).iter().all(|v| *v == 0.0));
    }

    #[test]
    fn min_max_maps_training_range_to_unit_interval() {
        let scaler = Scaler::fit(ScalerKind::MinMax, &raw()).unwrap();
        let scaled = scaler.apply(&raw()).unwrap();
        assert!((scaled[(0, 0)] - 0.0).abs() < 1e-12);
        assert!((scaled[(3, 0)] - 1.0).abs() < 1e-12);
        assert!((scaled[(1, 0)] - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn statistics_come_from_the_fitted_split_only() {
        let scaler = Scaler::fit(ScalerKind::MinMax, &raw()).unwrap();
        let other = DMatrix::from_row_slice(1, 2, &[7.0, 10.0]);
        let scaled = scaler.apply(&other).unwrap();
        // (7 - 1) / (4 - 1) = 2, outside the unit interval on purpose.
        assert!((scaled[(0, 0)] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn identity_leaves_values_untouched() {
        let scaler = Scaler::fit(ScalerKind::None, &raw()).unwrap();
        assert_eq!(scaler.apply(&raw()).unwrap(), raw());
        assert_eq!(scaler.kind(), ScalerKind::None);
    }

    #[test]
    fn apply_checks_column_count() {
        let scaler = Scaler::fit(ScalerKind::Standard, &raw()).unwrap();
        let wrong = DMatrix::from_element(2, 3, 1.0);
        assert!(matches!(scaler.apply(&wrong), Err(FitError::ShapeMismatch { .. })));
    }

    #[test]
    fn fitting_on_empty_data_fails() {
        let empty = DMatrix::<f64>::zeros(0, 2);
        assert!(matches!(
            Scaler::fit(ScalerKind::Standard, &empty),
            Err(FitError::EmptyDataset(_))
        ));
    }
}
