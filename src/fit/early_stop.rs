//! Trailing-window plateau detection on the training loss.
//!
//! The monitor keeps the last `window` losses and reports convergence once the
//! window is full and `max - min < min_diff`. It does not track a best-seen loss
//! or a patience counter. A fresh instance is built for every training run.

use std::collections::VecDeque;

pub const DEFAULT_WINDOW: usize = 10;
pub const DEFAULT_MIN_DIFF: f64 = 9e-6;

#[derive(Debug, Clone)]
pub struct EarlyStopping {
    window: usize,
    min_diff: f64,
    losses: VecDeque<f64>,
}

impl Default for EarlyStopping {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW, DEFAULT_MIN_DIFF)
    }
}

impl EarlyStopping {
    pub fn new(window: usize, min_diff: f64) -> Self {
        let window = window.max(1);
        Self {
            window,
            min_diff,
            losses: VecDeque::with_capacity(window + 1),
        }
    }

    /// Record a training loss and report whether training has plateaued.
    pub fn observe(&mut self, loss: f64) -> bool {
        self.losses.push_back(loss);
        if self.losses.len() > self.window {
            self.losses.pop_front();
        }
        if !self.is_full() {
            return false;
        }
        // NaN compares false, so a diverged run never reports convergence.
        self.range().is_some_and(|r| r < self.min_diff)
    }

    /// `max - min` over the current window, `None` while empty.
    pub fn range(&self) -> Option<f64> {
        if self.losses.is_empty() {
            return None;
        }
        let (lo, hi) = self
            .losses
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        if self.losses.iter().any(|v| v.is_nan()) {
            return Some(f64::NAN);
        }
        Some(hi - lo)
    }

    pub fn len(&self) -> usize {
        self.losses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.losses.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.losses.len() >= self.window
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn min_diff(&self) -> f64 {
        self.min_diff
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_losses_converge_on_kth_call() {
        let mut monitor = EarlyStopping::default();
        for i in 1..DEFAULT_WINDOW {
            assert!(!monitor.observe(0.5), "call {i} should not converge");
        }
        assert!(monitor.observe(0.5));
        // Still converged while values stay inside the band.
        for _ in 0..5 {
            assert!(monitor.observe(0.5 + 1e-7));
        }
    }

    #[test]
    fn wide_range_does_not_converge() {
        let mut monitor = EarlyStopping::new(4, 1e-3);
        let losses = [1.0, 0.9995, 0.999, 0.998];
        let results: Vec<bool> = losses.iter().map(|&l| monitor.observe(l)).collect();
        assert_eq!(results, vec![false, false, false, false]);
    }

    #[test]
    fn window_evicts_oldest_value() {
        let mut monitor = EarlyStopping::new(3, 1e-3);
        assert!(!monitor.observe(10.0));
        assert!(!monitor.observe(1.0));
        assert!(!monitor.observe(1.0));
        assert_eq!(monitor.len(), 3);
        // 10.0 falls out of the window here.
        assert!(monitor.observe(1.0));
        assert_eq!(monitor.len(), 3);
        assert_eq!(monitor.range(), Some(0.0));
    }

    #[test]
    fn nan_losses_never_converge() {
        let mut monitor = EarlyStopping::new(2, 1.0);
        assert!(!monitor.observe(f64::NAN));
        assert!(!monitor.observe(f64::NAN));
        assert!(!monitor.observe(1.0));
    }

    #[test]
    fn fresh_monitor_starts_empty() {
        let mut first = EarlyStopping::new(2, 1.0);
        first.observe(1.0);
        first.observe(1.0);
        let second = EarlyStopping::new(2, 1.0);
        assert!(second.is_empty());
        assert!(second.range().is_none());
    }
}
