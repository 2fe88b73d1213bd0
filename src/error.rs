//! Error types for training and classification.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("malformed row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },
    #[error("{context} dataset has no instances")]
    EmptyDataset { context: &'static str },
    #[error("dimension mismatch{}: expected {expected} attributes, found {found}", at_row(.row))]
    DimensionMismatch {
        row: Option<usize>,
        expected: usize,
        found: usize,
    },
    #[error("insufficient data: {0}")]
    InsufficientData(String),
    #[error("invalid parameter {0}")]
    InvalidParameter(String),
}

fn at_row(row: &Option<usize>) -> String {
    match row {
        Some(row) => format!(" at row {}", row),
        None => String::new(),
    }
}

impl Error {
    /// Attaches a source row to a dimension mismatch raised without one.
    pub(crate) fn at(self, source_row: usize) -> Self {
        match self {
            Error::DimensionMismatch {
                row: None,
                expected,
                found,
            } => Error::DimensionMismatch {
                row: Some(source_row),
                expected,
                found,
            },
            other => other,
        }
    }
}
