//! CSV ingest.
//!
//! Turns a numeric CSV with a header row into matrices the core can consume.
//!
//! Conventions:
//! - Training and dev files carry the target in the **last** column.
//! - Test files carry features only.
//! - Feature matrices handed to the core always get a leading bias column of ones.
//! - Scaling statistics are fitted on the training file and reused for every other file.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use nalgebra::{DMatrix, DVector};

use crate::data::scaler::Scaler;
use crate::domain::ScalerKind;
use crate::error::AppError;

/// A fully numeric CSV table.
#[derive(Debug, Clone)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub values: DMatrix<f64>,
}

/// Which file a feature matrix is being loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureRole {
    /// Training file: drop the target column and fit the scaler.
    Train,
    /// Held-out file with targets: drop the target column, reuse the scaler.
    Eval,
    /// Unlabelled file: keep every column, reuse the scaler.
    Test,
}

/// Read a numeric CSV file.
pub fn read_table(path: &Path) -> Result<CsvTable, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;
    parse_table(file, &path.display().to_string())
}

/// Parse numeric CSV from any reader. `source` is only used in error messages.
pub fn parse_table<R: Read>(reader: R, source: &str) -> Result<CsvTable, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers of '{source}': {e}")))?
        .iter()
        .map(str::to_string)
        .collect();
    if headers.is_empty() {
        return Err(AppError::new(2, format!("CSV '{source}' has no columns.")));
    }

    let mut data = Vec::new();
    let mut rows = 0usize;
    for (idx, result) in reader.records().enumerate() {
        // +2: records start after the header and CSV lines are 1-based.
        let line = idx + 2;
        let record = result
            .map_err(|e| AppError::new(2, format!("CSV parse error in '{source}' line {line}: {e}")))?;
        for (col, field) in record.iter().enumerate() {
            let value = field.parse::<f64>().map_err(|_| {
                AppError::new(
                    2,
                    format!(
                        "Non-numeric value '{field}' in '{source}' line {line}, column '{}'.",
                        headers[col]
                    ),
                )
            })?;
            data.push(value);
        }
        rows += 1;
    }

    Ok(CsvTable {
        values: DMatrix::from_row_slice(rows, headers.len(), &data),
        headers,
    })
}

/// Prepend a constant-one bias column.
pub fn with_bias(features: DMatrix<f64>) -> DMatrix<f64> {
    features.insert_column(0, 1.0)
}

/// Load, scale, and bias-augment the feature columns of a CSV file.
///
/// For [`FeatureRole::Train`] the scaler is fitted with `kind` and returned;
/// for the other roles `scaler` must hold the training scaler.
pub fn load_features(
    path: &Path,
    role: FeatureRole,
    kind: ScalerKind,
    scaler: Option<&Scaler>,
) -> Result<(DMatrix<f64>, Scaler), AppError> {
    let table = read_table(path)?;
    let raw = match role {
        FeatureRole::Train | FeatureRole::Eval => {
            if table.headers.len() < 2 {
                return Err(AppError::new(
                    2,
                    format!("CSV '{}' needs at least one feature column and a target column.", path.display()),
                ));
            }
            table.values.columns(0, table.headers.len() - 1).into_owned()
        }
        FeatureRole::Test => table.values,
    };

    let scaler = match (role, scaler) {
        (FeatureRole::Train, _) => Scaler::fit(kind, &raw)?,
        (_, Some(s)) => s.clone(),
        (_, None) => {
            return Err(AppError::new(
                2,
                format!("No fitted scaler available for '{}'.", path.display()),
            ));
        }
    };

    let scaled = scaler.apply(&raw)?;
    log::debug!(
        "loaded {} rows x {} features from '{}'",
        scaled.nrows(),
        scaled.ncols(),
        path.display()
    );
    Ok((with_bias(scaled), scaler))
}

/// Load the target column (last column) and its header name.
pub fn load_targets(path: &Path) -> Result<(String, DVector<f64>), AppError> {
    let table = read_table(path)?;
    let last = table.headers.len() - 1;
    let name = table.headers[last].clone();
    Ok((name, table.values.column(last).into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TRAIN: &str = "a,b,target\n1,10,3\n2,20,5\n3,30,7\n";

    fn write_csv(dir: &tempfile::TempDir, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = File::create(&path).unwrap();
        f.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn parses_numeric_table() {
        let table = parse_table(TRAIN.as_bytes(), "inline").unwrap();
        assert_eq!(table.headers, vec!["a", "b", "target"]);
        assert_eq!(table.values.shape(), (3, 3));
        assert_eq!(table.values[(2, 1)], 30.0);
    }

    #[test]
    fn reports_non_numeric_cells_with_location() {
        let err = parse_table("a,b\n1,x\n".as_bytes(), "inline").unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("line 2"));
        assert!(err.to_string().contains("'b'"));
    }

    #[test]
    fn train_features_drop_target_and_gain_bias() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "train.csv", TRAIN);
        let (x, scaler) = load_features(&path, FeatureRole::Train, ScalerKind::None, None).unwrap();
        assert_eq!(x.shape(), (3, 3));
        assert!(x.column(0).iter().all(|v| *v == 1.0));
        assert_eq!(x[(1, 1)], 2.0);
        assert_eq!(x[(1, 2)], 20.0);
        assert_eq!(scaler.n_features(), 2);
    }

    #[test]
    fn test_files_reuse_training_scaler() {
        let dir = tempfile::tempdir().unwrap();
        let train = write_csv(&dir, "train.csv", TRAIN);
        let test = write_csv(&dir, "test.csv", "a,b\n2,20\n");
        let (_, scaler) = load_features(&train, FeatureRole::Train, ScalerKind::Standard, None).unwrap();
        let (x, _) = load_features(&test, FeatureRole::Test, ScalerKind::Standard, Some(&scaler)).unwrap();
        // Row equals the training mean, so both scaled features are zero.
        assert_eq!(x.shape(), (1, 3));
        assert!(x[(0, 1)].abs() < 1e-12);
        assert!(x[(0, 2)].abs() < 1e-12);
    }

    #[test]
    fn eval_without_scaler_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "dev.csv", TRAIN);
        let err = load_features(&path, FeatureRole::Eval, ScalerKind::Standard, None).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn targets_come_from_last_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "train.csv", TRAIN);
        let (name, y) = load_targets(&path).unwrap();
        assert_eq!(name, "target");
        assert_eq!(y.as_slice(), &[3.0, 5.0, 7.0]);
    }

    #[test]
    fn missing_file_is_an_input_error() {
        let err = read_table(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
