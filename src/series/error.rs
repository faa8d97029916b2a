use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),

    #[error("Unexpected null in column '{column}' at row {row}")]
    UnexpectedNull { column: String, row: usize },

    #[error("Column '{column}' holds an invalid date '{value}'")]
    InvalidDate { column: String, value: String },
}
