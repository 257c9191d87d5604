//! Squared-error loss, L2 penalty, and their analytic gradient.
//!
//! The regularized objective minimized by gradient descent is:
//!
//! ```text
//! L(w) = (1/m) ‖Xw - y‖² + C ‖w‖
//! ```
//!
//! and its gradient is:
//!
//! ```text
//! ∇L(w) = (2/m) Xᵀ(Xw - y) + C w / ‖w‖
//! ```
//!
//! `m` is the row count of the `X` passed in, which during training is the
//! batch size, not the size of the full training split.
//!
//! The penalty is the (non-squared) Euclidean norm and the bias coefficient is
//! penalized like every other weight. At `w = 0` the norm is not differentiable
//! and the zero subgradient is used.

use nalgebra::{DMatrix, DVector};

use crate::error::FitError;

/// Mean squared error over all entries.
///
/// Returns `0.0` for empty inputs.
pub fn mse(predictions: &DVector<f64>, targets: &DVector<f64>) -> Result<f64, FitError> {
    if predictions.len() != targets.len() {
        return Err(FitError::shape("predictions", targets.len(), predictions.len()));
    }
    if targets.is_empty() {
        return Ok(0.0);
    }
    let sse = predictions
        .iter()
        .zip(targets.iter())
        .map(|(p, t)| (p - t) * (p - t))
        .sum::<f64>();
    Ok(sse / targets.len() as f64)
}

/// Euclidean norm of the weight vector.
pub fn l2_penalty(weights: &DVector<f64>) -> f64 {
    weights.norm()
}

/// `mse(X·w, y) + C * ‖w‖`.
pub fn regularized_loss(
    features: &DMatrix<f64>,
    weights: &DVector<f64>,
    targets: &DVector<f64>,
    c: f64,
) -> Result<f64, FitError> {
    check_shapes(features, weights, targets)?;
    let predictions = features * weights;
    Ok(mse(&predictions, targets)? + c * l2_penalty(weights))
}

/// Gradient of `C * ‖w‖` with respect to `w`.
pub fn regularization_gradient(weights: &DVector<f64>, c: f64) -> DVector<f64> {
    let norm = weights.norm();
    if c == 0.0 || norm == 0.0 {
        return DVector::zeros(weights.len());
    }
    weights * (c / norm)
}

/// Gradient of [`regularized_loss`] with respect to `weights`.
pub fn gradient(
    features: &DMatrix<f64>,
    weights: &DVector<f64>,
    targets: &DVector<f64>,
    c: f64,
) -> Result<DVector<f64>, FitError> {
    check_shapes(features, weights, targets)?;
    let m = features.nrows();
    if m == 0 {
        return Err(FitError::EmptyDataset("gradient batch has no rows"));
    }

    let residual = features * weights - targets;
    let mut grad = features.tr_mul(&residual);
    grad *= 2.0 / m as f64;
    grad += regularization_gradient(weights, c);
    Ok(grad)
}

pub(crate) fn check_shapes(
    features: &DMatrix<f64>,
    weights: &DVector<f64>,
    targets: &DVector<f64>,
) -> Result<(), FitError> {
    if features.ncols() != weights.len() {
        return Err(FitError::shape("weights", features.ncols(), weights.len()));
    }
    if features.nrows() != targets.len() {
        return Err(FitError::shape("targets", features.nrows(), targets.len()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_problem(rng: &mut StdRng, m: usize, n: usize) -> (DMatrix<f64>, DVector<f64>, DVector<f64>) {
        let x = DMatrix::from_fn(m, n, |_, _| rng.gen_range(-1.0..1.0));
        let w = DVector::from_fn(n, |_, _| rng.gen_range(-2.0..2.0));
        let y = DVector::from_fn(m, |_, _| rng.gen_range(-3.0..3.0));
        (x, w, y)
    }

    fn finite_difference(
        x: &DMatrix<f64>,
        w: &DVector<f64>,
        y: &DVector<f64>,
        c: f64,
    ) -> DVector<f64> {
        let h = 1e-6;
        DVector::from_fn(w.len(), |j, _| {
            let mut plus = w.clone();
            let mut minus = w.clone();
            plus[j] += h;
            minus[j] -= h;
            let lp = regularized_loss(x, &plus, y, c).unwrap();
            let lm = regularized_loss(x, &minus, y, c).unwrap();
            (lp - lm) / (2.0 * h)
        })
    }

    #[test]
    fn mse_is_zero_only_for_identical_vectors() {
        let t = DVector::from_row_slice(&[1.0, -2.0, 3.5]);
        assert_eq!(mse(&t, &t).unwrap(), 0.0);

        let p = DVector::from_row_slice(&[1.0, -2.0, 3.0]);
        let loss = mse(&p, &t).unwrap();
        assert!(loss > 0.0);
        assert!((loss - 0.25 / 3.0).abs() < 1e-15);
    }

    #[test]
    fn mse_is_non_negative() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let p = DVector::from_fn(5, |_, _| rng.gen_range(-10.0..10.0));
            let t = DVector::from_fn(5, |_, _| rng.gen_range(-10.0..10.0));
            assert!(mse(&p, &t).unwrap() >= 0.0);
        }
    }

    #[test]
    fn mse_rejects_length_mismatch() {
        let p = DVector::from_element(3, 0.0);
        let t = DVector::from_element(4, 0.0);
        assert!(matches!(mse(&p, &t), Err(FitError::ShapeMismatch { .. })));
    }

    #[test]
    fn l2_penalty_is_euclidean_norm() {
        let w = DVector::from_row_slice(&[3.0, 4.0]);
        assert!((l2_penalty(&w) - 5.0).abs() < 1e-15);
    }

    #[test]
    fn regularized_loss_adds_scaled_norm() {
        let x = DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 0.0, 1.0]);
        let w = DVector::from_row_slice(&[3.0, 4.0]);
        let y = DVector::from_row_slice(&[3.0, 4.0]);
        let loss = regularized_loss(&x, &w, &y, 0.5).unwrap();
        assert!((loss - 2.5).abs() < 1e-12);
    }

    #[test]
    fn gradient_matches_finite_differences_without_penalty() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..10 {
            let (x, w, y) = random_problem(&mut rng, 6, 3);
            let analytic = gradient(&x, &w, &y, 0.0).unwrap();
            let numeric = finite_difference(&x, &w, &y, 0.0);
            for j in 0..w.len() {
                assert!(
                    (analytic[j] - numeric[j]).abs() < 1e-4,
                    "coordinate {j}: analytic={} numeric={}",
                    analytic[j],
                    numeric[j]
                );
            }
        }
    }

    #[test]
    fn gradient_matches_finite_differences_with_penalty() {
        let mut rng = StdRng::seed_from_u64(12);
        for _ in 0..10 {
            let (x, w, y) = random_problem(&mut rng, 5, 4);
            let analytic = gradient(&x, &w, &y, 0.3).unwrap();
            let numeric = finite_difference(&x, &w, &y, 0.3);
            for j in 0..w.len() {
                assert!((analytic[j] - numeric[j]).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn gradient_scales_by_batch_rows() {
        // Duplicating every row leaves the mean-based gradient unchanged.
        let x = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 1.0, -1.0]);
        let y = DVector::from_row_slice(&[1.0, 0.0]);
        let w = DVector::from_row_slice(&[0.5, 0.5]);
        let x2 = DMatrix::from_row_slice(4, 2, &[1.0, 2.0, 1.0, -1.0, 1.0, 2.0, 1.0, -1.0]);
        let y2 = DVector::from_row_slice(&[1.0, 0.0, 1.0, 0.0]);

        let g1 = gradient(&x, &w, &y, 0.0).unwrap();
        let g2 = gradient(&x2, &w, &y2, 0.0).unwrap();
        assert!((g1 - g2).norm() < 1e-12);
    }

    #[test]
    fn regularization_gradient_is_zero_at_origin() {
        let w = DVector::zeros(3);
        assert_eq!(regularization_gradient(&w, 1.0), DVector::zeros(3));
    }

    #[test]
    fn gradient_rejects_bad_shapes() {
        let x = DMatrix::from_element(3, 2, 1.0);
        let y = DVector::from_element(3, 1.0);
        let w = DVector::from_element(3, 1.0);
        assert!(matches!(
            gradient(&x, &w, &y, 0.0),
            Err(FitError::ShapeMismatch { what: "weights", .. })
        ));

        let empty = DMatrix::<f64>::zeros(0, 2);
        let w = DVector::from_element(2, 1.0);
        assert!(matches!(
            gradient(&empty, &w, &DVector::zeros(0), 0.0),
            Err(FitError::EmptyDataset(_))
        ));
    }
}
