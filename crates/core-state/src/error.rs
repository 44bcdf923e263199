use core_text::{Position, TextError};
use thiserror::Error;

pub type EditResult<T> = Result<T, EditError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error(transparent)]
    Text(#[from] TextError),

    /// A history record no longer matches the buffer it is replayed against.
    #[error("history record at {}:{} does not match the buffer", .at.row, .at.col)]
    StaleRecord { at: Position },
}
