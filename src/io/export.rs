//! Export predictions, weights, and run summaries.
//!
//! The outputs are meant to be easy to consume in spreadsheets or downstream scripts:
//! - predictions: `instance_id,<target>` with 0-based ids
//! - weights: one coefficient per line, bias first, no header
//! - run report: pretty JSON of the metrics printed to the terminal

use std::fs::File;
use std::path::Path;

use nalgebra::DVector;
use serde::Serialize;

use crate::error::AppError;

/// Write predictions with a parallel 0-based instance id column.
pub fn write_predictions_csv(path: &Path, target_name: &str, predictions: &DVector<f64>) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(2, format!("Failed to create predictions CSV '{}': {e}", path.display())))?;

    writer
        .write_record(["instance_id", target_name])
        .map_err(|e| AppError::new(2, format!("Failed to write predictions CSV header: {e}")))?;
    for (id, value) in predictions.iter().enumerate() {
        writer
            .write_record([id.to_string(), format!("{value:.6}")])
            .map_err(|e| AppError::new(2, format!("Failed to write predictions CSV row: {e}")))?;
    }
    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush predictions CSV: {e}")))?;
    Ok(())
}

/// Write the fitted coefficients, one per line.
pub fn write_weights_csv(path: &Path, weights: &DVector<f64>) -> Result<(), AppError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| AppError::new(2, format!("Failed to create weights CSV '{}': {e}", path.display())))?;

    for w in weights.iter() {
        writer
            .write_record([format!("{w:.6}")])
            .map_err(|e| AppError::new(2, format!("Failed to write weights CSV row: {e}")))?;
    }
    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush weights CSV: {e}")))?;
    Ok(())
}

/// Write any serializable summary as pretty JSON.
pub fn write_report_json<T: Serialize>(path: &Path, report: &T) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create report JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, report)
        .map_err(|e| AppError::new(2, format!("Failed to write report JSON: {e}")))
}
