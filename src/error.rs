//! Error types.
//!
//! - `FitError` is returned by the numeric core (`math`, `fit`, `data`).
//! - `AppError` is what the binary reports: a message plus a process exit code.

use thiserror::Error;

/// Failures of the estimation core.
///
/// All of these are structural (bad inputs or configuration), so nothing in the
/// crate retries on them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FitError {
    /// Row/column counts disagree between features, targets, or weights.
    #[error("shape mismatch for {what}: expected {expected}, got {got}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    /// `XᵀX + C·I` could not be solved.
    #[error("normal-equations matrix is singular; increase the regularization coefficient")]
    SingularMatrix,

    #[error("invalid hyperparameter: {0}")]
    InvalidHyperparameter(String),

    /// An operation needs at least one row.
    #[error("empty dataset: {0}")]
    EmptyDataset(&'static str),
}

impl FitError {
    pub(crate) fn shape(what: &'static str, expected: usize, got: usize) -> Self {
        FitError::ShapeMismatch {
            what,
            expected,
            got,
        }
    }

    pub(crate) fn hyperparameter(message: impl Into<String>) -> Self {
        FitError::InvalidHyperparameter(message.into())
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<FitError> for AppError {
    fn from(err: FitError) -> Self {
        let exit_code = match err {
            FitError::ShapeMismatch { .. } | FitError::EmptyDataset(_) => 3,
            FitError::SingularMatrix => 4,
            FitError::InvalidHyperparameter(_) => 5,
        };
        AppError::new(exit_code, err.to_string())
    }
}
