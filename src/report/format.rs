//! Terminal formatting for run summaries.

use crate::report::{RunSummary, SolutionSummary};

/// Format the full run summary (dataset sizes, hyperparameters, both solutions).
pub fn format_run_summary(summary: &RunSummary) -> String {
    let mut out = String::new();
    let cfg = &summary.config;

    out.push_str("=== lr - Linear Regression Fit ===\n");
    out.push_str(&format!(
        "Data: train={} | dev={} | features={} (incl. bias)\n",
        summary.n_train, summary.n_dev, summary.n_features
    ));
    out.push_str(&format!(
        "GD: lr={} | C={} | batch={} | max_steps={} | eval_every={}\n",
        cfg.lr, cfg.c, cfg.batch_size, cfg.max_steps, cfg.eval_steps
    ));
    out.push_str(&format!(
        "Early stop: window={} | min_diff={:e}\n",
        cfg.window, cfg.min_diff
    ));

    out.push_str("\nSolutions:\n");
    out.push_str(&format!("  {:<18} {:>16} {:>16}\n", "method", "train MSE", "dev MSE"));
    out.push_str(&format_solution_row("analytical", &summary.analytical));
    out.push_str(&format_solution_row("gradient descent", &summary.gradient_descent));

    out.push_str(&format!(
        "\nGradient descent: {} after {} steps ({} checkpoints)\n",
        summary.outcome.display_name(),
        summary.steps,
        summary.checkpoints.len()
    ));

    let gap = summary.gradient_descent.losses.dev - summary.analytical.losses.dev;
    out.push_str(&format!("Dev MSE gap (GD - analytical): {gap:+.6}\n"));

    out.push_str("\nWeights (bias first):\n");
    out.push_str(&format!("  {:>4} {:>14} {:>14}\n", "idx", "analytical", "gd"));
    for (i, (a, g)) in summary
        .analytical
        .weights
        .iter()
        .zip(summary.gradient_descent.weights.iter())
        .enumerate()
    {
        out.push_str(&format!("  {i:>4} {a:>14.6} {g:>14.6}\n"));
    }

    out
}

fn format_solution_row(label: &str, solution: &SolutionSummary) -> String {
    format!(
        "  {:<18} {:>16.6} {:>16.6}\n",
        label, solution.losses.train, solution.losses.dev
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Checkpoint, SplitLosses, TrainConfig, TrainOutcome, TrainReport};
    use nalgebra::DVector;

    #[test]
    fn summary_mentions_both_methods_and_outcome() {
        let weights = DVector::from_row_slice(&[5.0, 2.0, -1.0]);
        let report = TrainReport {
            weights: weights.clone(),
            outcome: TrainOutcome::Converged,
            steps: 1200,
            checkpoints: vec![Checkpoint {
                step: 0,
                train_loss: 1.0,
                dev_loss: 1.5,
            }],
        };
        let losses = SplitLosses { train: 0.01, dev: 0.02 };
        let summary = RunSummary::from_parts(
            80,
            20,
            &TrainConfig::default(),
            SolutionSummary::new(&weights, losses),
            SolutionSummary::new(&weights, losses),
            &report,
        );

        let text = format_run_summary(&summary);
        assert!(text.contains("analytical"));
        assert!(text.contains("gradient descent"));
        assert!(text.contains("converged (early stop) after 1200 steps"));
        assert!(text.contains("train=80 | dev=20 | features=3"));
        assert!(text.contains("+0.000000"));
    }
}
