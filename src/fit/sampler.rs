//! Mini-batch sampling with replacement.
//!
//! Each call draws `batch_size` row indices uniformly from `[0, m)`. Draws are
//! independent across calls: there is no epoch or exhaustion bookkeeping, so a
//! row may appear several times in one batch and `batch_size` may exceed `m`.

use nalgebra::{DMatrix, DVector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::FitError;

/// Draw one batch of aligned feature/target rows.
pub fn sample_batch<R: Rng + ?Sized>(
    rng: &mut R,
    features: &DMatrix<f64>,
    targets: &DVector<f64>,
    batch_size: usize,
) -> Result<(DMatrix<f64>, DVector<f64>), FitError> {
    let m = features.nrows();
    if m != targets.len() {
        return Err(FitError::shape("targets", m, targets.len()));
    }
    if m == 0 && batch_size > 0 {
        return Err(FitError::EmptyDataset("cannot sample a batch from zero rows"));
    }

    let indices: Vec<usize> = (0..batch_size).map(|_| rng.gen_range(0..m)).collect();
    Ok((features.select_rows(&indices), targets.select_rows(&indices)))
}

/// Seeded sampler owned by one training run.
#[derive(Debug, Clone)]
pub struct BatchSampler {
    rng: StdRng,
    batch_size: usize,
}

impl BatchSampler {
    pub fn new(batch_size: usize, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            batch_size,
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn sample(
        &mut self,
        features: &DMatrix<f64>,
        targets: &DVector<f64>,
    ) -> Result<(DMatrix<f64>, DVector<f64>), FitError> {
        sample_batch(&mut self.rng, features, targets, self.batch_size)
    }
}
