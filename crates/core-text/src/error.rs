use thiserror::Error;

/// Result alias for buffer addressing operations.
pub type TextResult<T> = Result<T, TextError>;

/// Addressing failures. Raised before any mutation happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextError {
    #[error("row {row} is out of range (buffer has {rows} rows)")]
    RowOutOfRange { row: usize, rows: usize },

    #[error("column {col} is out of range for row {row} (length {len})")]
    ColumnOutOfRange { row: usize, col: usize, len: usize },

    #[error("column range {from}..{to} is invalid for row {row}")]
    InvalidRange { row: usize, from: usize, to: usize },
}
