//! Row-oriented text buffer with derived render and highlight caches.
//!
//! The buffer owns an ordered `Vec<Row>`. Every row keeps its raw text, a
//! tab-expanded `render` string, a per-display-column highlight array and the
//! multi-line comment continuation flag. All derived state is regenerated
//! whole whenever a row's raw text changes; highlighting then walks forward
//! only as far as the comment continuation state actually changes.
//!
//! Addressing is checked: every row/column argument outside the buffer is
//! reported as a [`TextError`] and leaves the buffer untouched.

pub mod buffer;
pub mod error;
pub mod row;
pub mod search;
pub mod syntax;

pub use buffer::TextBuffer;
pub use error::{TextError, TextResult};
pub use row::{Row, TAB_STOP};
pub use search::{SearchDirection, SearchHit};
pub use syntax::{HLDB, Highlight, SyntaxFlags, SyntaxMode, is_separator};

/// A position inside a buffer expressed as (row index, raw char column).
///
/// Ordering is row-major, which is exactly the order used to normalize
/// selections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
    pub fn origin() -> Self {
        Self { row: 0, col: 0 }
    }
}
