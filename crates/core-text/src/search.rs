//! Cyclic incremental search over rendered rows.

use tracing::trace;

use crate::Position;
use crate::buffer::TextBuffer;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchDirection {
    #[default]
    Forward,
    Backward,
}

/// A hit: the row, its raw column, and the display span of the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchHit {
    pub position: Position,
    pub rx: usize,
    pub width: usize,
}

impl TextBuffer {
    /// Search rows' rendered text for `query`, one row at a time, starting
    /// just after `last_match` in `direction` and wrapping at either end.
    /// Without a previous match the scan starts at row 0 going forward. Every
    /// row is visited at most once; the first occurrence in a row wins.
    pub fn find(
        &self,
        query: &str,
        last_match: Option<usize>,
        direction: SearchDirection,
    ) -> Option<SearchHit> {
        let rows = self.row_count();
        if query.is_empty() || rows == 0 {
            return None;
        }
        let (mut current, direction) = match last_match {
            Some(row) if row < rows => (row, direction),
            _ => (rows - 1, SearchDirection::Forward),
        };
        for _ in 0..rows {
            current = match direction {
                SearchDirection::Forward => (current + 1) % rows,
                SearchDirection::Backward => current.checked_sub(1).unwrap_or(rows - 1),
            };
            let row = &self.rows()[current];
            if let Some(byte) = row.render().find(query) {
                let rx = row.render()[..byte].chars().count();
                let hit = SearchHit {
                    position: Position::new(current, row.rx_to_cx(rx)),
                    rx,
                    width: query.chars().count(),
                };
                trace!(target: "text.search", row = current, rx, "find_hit");
                return Some(hit);
            }
        }
        None
    }
}
