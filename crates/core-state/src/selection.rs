//! Two-anchor selection model.
//!
//! `start` is where the selection began and `end` follows the cursor, so the
//! anchors are unordered. Consumers that need an ordered span call
//! [`Selection::normalized`], which returns a sorted copy and never rewrites
//! the anchors.

use std::ops::Range;

use core_text::{Position, Row, TextBuffer};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub start: Position,
    pub end: Position,
    active: bool,
}

impl Selection {
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Anchor a new selection at `at` unless one is already active.
    pub fn begin(&mut self, at: Position) {
        if !self.active {
            self.start = at;
            self.end = at;
            self.active = true;
        }
    }

    pub fn extend_to(&mut self, at: Position) {
        self.end = at;
    }

    pub fn set(&mut self, start: Position, end: Position) {
        self.start = start;
        self.end = end;
        self.active = true;
    }

    pub fn clear(&mut self) {
        self.active = false;
    }

    /// Ordered `(start, end)` copy of an active selection.
    pub fn normalized(&self) -> Option<(Position, Position)> {
        self.active
            .then(|| (self.start.min(self.end), self.start.max(self.end)))
    }

    /// Ordered span clamped onto real buffer text. An anchor on the virtual
    /// row past the end means the end of the last row; a column past the end
    /// of its row means the end of that row.
    pub fn resolved(&self, buffer: &TextBuffer) -> Option<(Position, Position)> {
        let (start, end) = self.normalized()?;
        let last = buffer.row_count().checked_sub(1)?;
        let clamp = |p: Position| {
            let row = p.row.min(last);
            let len = buffer.row(row).map_or(0, Row::len);
            if p.row > last {
                Position::new(row, len)
            } else {
                Position::new(row, p.col.min(len))
            }
        };
        Some((clamp(start), clamp(end)))
    }

    /// Raw columns of `row` covered by the selection.
    pub fn row_span(&self, row: usize, row_len: usize) -> Option<Range<usize>> {
        let (start, end) = self.normalized()?;
        if row < start.row || row > end.row {
            return None;
        }
        let from = if row == start.row { start.col.min(row_len) } else { 0 };
        let to = if row == end.row { end.col.min(row_len) } else { row_len };
        Some(from..to.max(from))
    }

    /// Display columns of `row` covered by the selection, for the renderer.
    pub fn display_span(&self, row: &Row) -> Option<Range<usize>> {
        let span = self.row_span(row.idx(), row.len())?;
        Some(row.cx_to_rx(span.start)..row.cx_to_rx(span.end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_orders_without_touching_anchors() {
        let mut sel = Selection::default();
        sel.set(Position::new(2, 1), Position::new(0, 4));
        assert_eq!(sel.normalized(), Some((Position::new(0, 4), Position::new(2, 1))));
        assert_eq!(sel.start, Position::new(2, 1));
        assert_eq!(sel.end, Position::new(0, 4));
    }

    #[test]
    fn inactive_selection_covers_nothing() {
        let mut sel = Selection::default();
        sel.set(Position::new(0, 0), Position::new(0, 3));
        sel.clear();
        assert_eq!(sel.normalized(), None);
        assert_eq!(sel.row_span(0, 5), None);
    }

    #[test]
    fn begin_keeps_an_existing_anchor() {
        let mut sel = Selection::default();
        sel.begin(Position::new(1, 1));
        sel.extend_to(Position::new(1, 4));
        sel.begin(Position::new(3, 0));
        assert_eq!(sel.start, Position::new(1, 1));
    }

    #[test]
    fn row_spans_across_rows() {
        let mut sel = Selection::default();
        sel.set(Position::new(0, 3), Position::new(2, 2));
        assert_eq!(sel.row_span(0, 5), Some(3..5));
        assert_eq!(sel.row_span(1, 7), Some(0..7));
        assert_eq!(sel.row_span(2, 5), Some(0..2));
        assert_eq!(sel.row_span(3, 5), None);
    }

    #[test]
    fn display_span_expands_tabs() {
        let buf = TextBuffer::from_lines(["\tab"]);
        let mut sel = Selection::default();
        sel.set(Position::new(0, 0), Position::new(0, 2));
        assert_eq!(sel.display_span(buf.row(0).unwrap()), Some(0..5));
    }

    #[test]
    fn virtual_row_anchor_resolves_to_end_of_buffer() {
        let buf = TextBuffer::from_lines(["ab", "cde"]);
        let mut sel = Selection::default();
        sel.set(Position::new(0, 1), Position::new(2, 0));
        assert_eq!(sel.resolved(&buf), Some((Position::new(0, 1), Position::new(1, 3))));
        assert_eq!(sel.resolved(&TextBuffer::new()), None);
    }
}
