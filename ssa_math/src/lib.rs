//! # SSA Math
//!
//! Numeric building blocks for singular spectrum analysis.
//! Trajectory and lag-covariance matrices are smartcore [`DenseMatrix`] values,
//! decomposed with smartcore's symmetric eigen-solver; this crate adds the
//! embedding and recurrence routines an SSA forecaster is assembled from.

use smartcore::error::Failed;
use thiserror::Error;

pub mod eigen;
pub mod embedding;
pub mod recurrence;

pub use eigen::{symmetric_eigen, SymmetricEigen};
pub use recurrence::LinearRecurrence;
pub use smartcore::linalg::basic::matrix::DenseMatrix;

/// Errors that can occur in SSA calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

impl From<Failed> for MathError {
    fn from(err: Failed) -> Self {
        MathError::CalculationError(err.to_string())
    }
}

/// Result type for SSA math operations
pub type Result<T> = std::result::Result<T, MathError>;
