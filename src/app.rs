//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and initializes logging
//! - parses CLI arguments
//! - loads CSV splits (or generates synthetic data)
//! - runs both solvers and prints the comparison
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, DemoArgs, FitArgs, TrainArgs};
use crate::data::{generate_linear, split_tail};
use crate::domain::{Dataset, RunPaths, SyntheticConfig, TrainConfig, WeightInit};
use crate::error::AppError;
use crate::fit::predict;
use crate::io::ingest::{FeatureRole, load_features, load_targets};

pub mod pipeline;

/// Entry point for the `lr` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_logging();

    let cli = crate::cli::Cli::parse();
    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Demo(args) => handle_demo(args),
    }
}

fn init_logging() {
    // `try_init` so repeated calls (e.g. from tests) do not panic.
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = train_config_from_args(&args.train_args);
    let paths = run_paths_from_args(&args);

    log::info!("reading training data from '{}'", paths.train_csv.display());
    let (train_x, scaler) = load_features(&paths.train_csv, FeatureRole::Train, args.scaler, None)?;
    let (target_name, train_y) = load_targets(&paths.train_csv)?;
    let train = Dataset::new(train_x, train_y)?;

    log::info!("reading dev data from '{}'", paths.dev_csv.display());
    let (dev_x, _) = load_features(&paths.dev_csv, FeatureRole::Eval, args.scaler, Some(&scaler))?;
    let (_, dev_y) = load_targets(&paths.dev_csv)?;
    let dev = Dataset::new(dev_x, dev_y)?;

    let run = pipeline::run_fit(&train, &dev, &config)?;
    println!("{}", crate::report::format_run_summary(&run.summary));

    if let Some(test_csv) = &paths.test_csv {
        let (test_x, _) = load_features(test_csv, FeatureRole::Test, args.scaler, Some(&scaler))?;
        let predictions = predict(&test_x, &run.report.weights)?;
        if let Some(path) = &paths.predictions {
            crate::io::export::write_predictions_csv(path, &target_name, &predictions)?;
            log::info!("wrote {} predictions to '{}'", predictions.len(), path.display());
        }
    }
    if let Some(path) = &paths.weights {
        crate::io::export::write_weights_csv(path, &run.analytical)?;
        log::info!("wrote analytical weights to '{}'", path.display());
    }
    if let Some(path) = &paths.report_json {
        crate::io::export::write_report_json(path, &run.summary)?;
    }

    Ok(())
}

fn handle_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = train_config_from_args(&args.train_args);
    let synthetic = SyntheticConfig {
        rows: args.rows,
        bias: args.bias,
        coefs: args.coefs.clone(),
        noise: args.noise,
        seed: args.data_seed,
        ..SyntheticConfig::default()
    };

    let data = generate_linear(&synthetic)?;
    let (train, dev) = split_tail(&data, args.dev_fraction)?;
    log::info!(
        "generated {} synthetic rows (bias={}, coefs={:?}, noise={})",
        data.len(),
        synthetic.bias,
        synthetic.coefs,
        synthetic.noise
    );

    let run = pipeline::run_fit(&train, &dev, &config)?;
    println!("{}", crate::report::format_run_summary(&run.summary));

    if let Some(path) = &args.report_json {
        crate::io::export::write_report_json(path, &run.summary)?;
    }
    Ok(())
}

pub fn train_config_from_args(args: &TrainArgs) -> TrainConfig {
    TrainConfig {
        lr: args.lr,
        c: args.c,
        batch_size: args.batch_size,
        max_steps: args.max_steps,
        eval_steps: args.eval_steps,
        window: args.window,
        min_diff: args.min_diff,
        seed: args.seed,
        init: if args.zero_init {
            WeightInit::Zeros
        } else {
            WeightInit::Ones
        },
    }
}

pub fn run_paths_from_args(args: &FitArgs) -> RunPaths {
    RunPaths {
        train_csv: args.train.clone(),
        dev_csv: args.dev.clone(),
        test_csv: args.test.clone(),
        predictions: args.test.as_ref().map(|_| args.predictions.clone()),
        weights: args.weights.clone(),
        report_json: args.report_json.clone(),
    }
}
