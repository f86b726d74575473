//! Error types for the price_forecast crate

use thiserror::Error;

/// Custom error types for the price_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Error related to data content
    #[error("Data error: {0}")]
    DataError(String),

    /// A field that should hold a number did not parse
    #[error("Parse error on line {line}: column '{column}' has invalid value '{value}'")]
    ParseError {
        line: u64,
        column: String,
        value: String,
    },

    /// A data row is shorter than the fixed schema
    #[error("Parse error on line {line}: expected at least {expected} fields, found {found}")]
    MissingFields {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// Model hyperparameters that cannot work with the given data
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Error related to result validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error from the SSA numeric core
    #[error("Math error: {0}")]
    MathError(#[from] ssa_math::MathError),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from the CSV reader
    #[error("CSV error: {0}")]
    CsvError(String),

    /// Error from JSON (de)serialization
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<csv::Error> for ForecastError {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            if let csv::ErrorKind::Io(io_err) = err.into_kind() {
                return ForecastError::IoError(io_err);
            }
            return ForecastError::CsvError("I/O failure while reading CSV".to_string());
        }
        ForecastError::CsvError(err.to_string())
    }
}

impl From<serde_json::Error> for ForecastError {
    fn from(err: serde_json::Error) -> Self {
        ForecastError::SerializationError(err.to_string())
    }
}
