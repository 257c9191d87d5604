//! Closed-form ridge solution via the regularized normal equations.
//!
//! ```text
//! (XᵀX + C·I) w = Xᵀy
//! ```
//!
//! Implementation choices:
//! - The system matrix is symmetric positive semi-definite, and strictly positive
//!   definite whenever `C > 0` or `X` has full column rank. Cholesky is tried first.
//! - If Cholesky fails (or yields non-finite coefficients) we fall back to LU with
//!   partial pivoting, which also handles indefinite round-off cases.
//! - No explicit inverse is ever formed.

use nalgebra::{DMatrix, DVector};

use crate::error::FitError;

/// Solve the regularized normal equations for the weight vector.
pub fn solve(features: &DMatrix<f64>, targets: &DVector<f64>, c: f64) -> Result<DVector<f64>, FitError> {
    if !(c.is_finite() && c >= 0.0) {
        return Err(FitError::hyperparameter(format!(
            "regularization coefficient must be finite and >= 0, got {c}"
        )));
    }
    if features.nrows() != targets.len() {
        return Err(FitError::shape("targets", features.nrows(), targets.len()));
    }

    let n = features.ncols();
    let mut gram = features.tr_mul(features);
    for i in 0..n {
        gram[(i, i)] += c;
    }
    let rhs = features.tr_mul(targets);

    if let Some(chol) = gram.clone().cholesky() {
        let w = chol.solve(&rhs);
        if all_finite(&w) {
            return Ok(w);
        }
    }
    log::debug!("cholesky failed on {n}x{n} normal equations, falling back to LU");

    match gram.lu().solve(&rhs) {
        Some(w) if all_finite(&w) => Ok(w),
        _ => Err(FitError::SingularMatrix),
    }
}

fn all_finite(v: &DVector<f64>) -> bool {
    v.iter().all(|x| x.is_finite())
}
