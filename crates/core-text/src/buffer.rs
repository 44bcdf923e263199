//! Ordered row container and checked mutation primitives.
//!
//! Every primitive validates its addressing first and returns
//! [`TextError`] without touching the buffer when the row or column is out of
//! range. After a row's raw text changes its render cache is rebuilt and the
//! row is re-highlighted; highlighting then continues downward only while the
//! multi-line comment state at the end of a row actually changes.

use tracing::{debug, trace};

use crate::error::{TextError, TextResult};
use crate::row::Row;
use crate::syntax::{self, Highlight, SyntaxMode};

#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    rows: Vec<Row>,
    syntax: Option<&'static SyntaxMode>,
    dirty: u64,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a buffer from raw file content. Lines are split on `\n` with
    /// trailing `\n`/`\r` stripped; a final terminator does not produce an
    /// extra empty row. Invalid UTF-8 is replaced.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let text = String::from_utf8_lossy(bytes);
        Self::from_lines(
            text.split_inclusive('\n')
                .map(|line| line.trim_end_matches(['\n', '\r'])),
        )
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows: Vec<Row> = lines
            .into_iter()
            .enumerate()
            .map(|(idx, line)| Row::new(idx, line))
            .collect();
        let mut buffer = Self {
            rows,
            syntax: None,
            dirty: 0,
        };
        buffer.rehighlight_all();
        debug!(target: "text.buffer", rows = buffer.rows.len(), "buffer_loaded");
        buffer
    }

    /// Serialize rows, each followed by `\n`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let total: usize = self.rows.iter().map(|r| r.chars.len() + 1).sum();
        let mut out = Vec::with_capacity(total);
        for row in &self.rows {
            out.extend_from_slice(row.chars.as_bytes());
            out.push(b'\n');
        }
        out
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, at: usize) -> Option<&Row> {
        self.rows.get(at)
    }

    /// Raw text of every row, top to bottom.
    pub fn lines(&self) -> Vec<&str> {
        self.rows.iter().map(Row::chars).collect()
    }

    pub fn row_text(&self, at: usize) -> TextResult<&str> {
        self.checked_row(at).map(Row::chars)
    }

    /// Raw length of row `at` in chars.
    pub fn row_len(&self, at: usize) -> TextResult<usize> {
        self.checked_row(at).map(Row::len)
    }

    // ------------------------------------------------------------------
    // Dirty tracking
    // ------------------------------------------------------------------

    pub fn dirty(&self) -> u64 {
        self.dirty
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty > 0
    }

    /// Count one user-facing edit. History replay and loading never call this.
    pub fn mark_dirty(&mut self) {
        self.dirty += 1;
    }

    pub fn reset_dirty(&mut self) {
        self.dirty = 0;
    }

    // ------------------------------------------------------------------
    // Syntax
    // ------------------------------------------------------------------

    pub fn syntax(&self) -> Option<&'static SyntaxMode> {
        self.syntax
    }

    /// Choose the syntax mode for `filename` and re-highlight every row.
    pub fn select_syntax(&mut self, filename: &str) -> Option<&'static SyntaxMode> {
        let mode = SyntaxMode::for_filename(filename);
        self.set_syntax(mode);
        mode
    }

    pub fn set_syntax(&mut self, mode: Option<&'static SyntaxMode>) {
        self.syntax = mode;
        debug!(target: "text.syntax", file_type = mode.map(|m| m.file_type), "syntax_selected");
        self.rehighlight_all();
    }

    // ------------------------------------------------------------------
    // Row-level primitives
    // ------------------------------------------------------------------

    /// Insert a new row at `at` (`0..=row_count`). Rows at or after `at` are
    /// renumbered.
    pub fn insert_row(&mut self, at: usize, text: &str) -> TextResult<()> {
        if at > self.rows.len() {
            return Err(TextError::RowOutOfRange {
                row: at,
                rows: self.rows.len(),
            });
        }
        let mut row = Row::new(at, text);
        // Seed with the state the displaced row inherited so the cascade
        // continues exactly when the rows below see a different input.
        row.hl_open_comment = at > 0 && self.rows[at - 1].hl_open_comment;
        self.rows.insert(at, row);
        self.renumber_from(at + 1);
        self.rehighlight_from(at);
        trace!(target: "text.buffer", at, rows = self.rows.len(), "insert_row");
        Ok(())
    }

    /// Remove row `at`, returning its raw text. Following rows are renumbered.
    /// Highlighting is recomputed only when the row that moves up inherited a
    /// different comment state from the removed row than it now inherits.
    pub fn delete_row(&mut self, at: usize) -> TextResult<String> {
        self.checked_row(at)?;
        let row = self.rows.remove(at);
        self.renumber_from(at);
        let inherited = at > 0 && self.rows[at - 1].hl_open_comment;
        if at < self.rows.len() && inherited != row.hl_open_comment {
            self.rehighlight_from(at);
        }
        trace!(target: "text.buffer", at, rows = self.rows.len(), "delete_row");
        Ok(row.chars)
    }

    pub fn row_insert_char(&mut self, row: usize, at: usize, ch: char) -> TextResult<()> {
        self.checked_col(row, at)?;
        self.rows[row].insert_char(at, ch);
        self.rehighlight_from(row);
        Ok(())
    }

    /// Remove the char at raw column `at` (`0..len`).
    pub fn row_delete_char(&mut self, row: usize, at: usize) -> TextResult<char> {
        let len = self.checked_row(row)?.len();
        if at >= len {
            return Err(TextError::ColumnOutOfRange { row, col: at, len });
        }
        let ch = self.rows[row].remove_char(at);
        self.rehighlight_from(row);
        Ok(ch)
    }

    pub fn row_append_text(&mut self, row: usize, text: &str) -> TextResult<()> {
        self.checked_row(row)?;
        self.rows[row].push_str(text);
        self.rehighlight_from(row);
        Ok(())
    }

    pub fn row_insert_text(&mut self, row: usize, at: usize, text: &str) -> TextResult<()> {
        self.checked_col(row, at)?;
        self.rows[row].insert_str(at, text);
        self.rehighlight_from(row);
        Ok(())
    }

    /// Truncate row `row` at raw column `at`, returning the removed tail.
    pub fn row_split_off(&mut self, row: usize, at: usize) -> TextResult<String> {
        self.checked_col(row, at)?;
        let tail = self.rows[row].split_off(at);
        self.rehighlight_from(row);
        Ok(tail)
    }

    /// Remove raw columns `from..to` of `row`, returning them.
    pub fn row_delete_range(&mut self, row: usize, from: usize, to: usize) -> TextResult<String> {
        self.checked_col(row, to)?;
        if from > to {
            return Err(TextError::InvalidRange { row, from, to });
        }
        let removed = self.rows[row].drain(from, to);
        self.rehighlight_from(row);
        Ok(removed)
    }

    /// Split `row` at `at`: the tail becomes a new row directly below.
    pub fn split_row(&mut self, row: usize, at: usize) -> TextResult<()> {
        let tail = self.row_split_off(row, at)?;
        self.insert_row(row + 1, &tail)
    }

    /// Append row `row + 1` onto `row` and remove it.
    pub fn join_rows(&mut self, row: usize) -> TextResult<()> {
        self.checked_row(row + 1)?;
        let next = self.rows[row + 1].chars.clone();
        self.row_append_text(row, &next)?;
        self.delete_row(row + 1)?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Highlight overlay (search matches)
    // ------------------------------------------------------------------

    /// Overlay [`Highlight::Match`] over `len` display columns starting at
    /// `rx`, returning the previous classification so it can be restored.
    pub fn overlay_match(&mut self, row: usize, rx: usize, len: usize) -> TextResult<Vec<Highlight>> {
        self.checked_row(row)?;
        let hl = &mut self.rows[row].hl;
        let saved = hl.clone();
        let start = rx.min(hl.len());
        let end = rx.saturating_add(len).min(hl.len());
        hl[start..end].fill(Highlight::Match);
        Ok(saved)
    }

    /// Restore a classification saved by [`TextBuffer::overlay_match`]. A
    /// saved array that no longer fits the row is discarded and the row is
    /// re-highlighted instead.
    pub fn restore_highlight(&mut self, row: usize, saved: Vec<Highlight>) -> TextResult<()> {
        self.checked_row(row)?;
        if saved.len() == self.rows[row].hl.len() {
            self.rows[row].hl = saved;
        } else {
            self.rehighlight_from(row);
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn checked_row(&self, at: usize) -> TextResult<&Row> {
        self.rows.get(at).ok_or(TextError::RowOutOfRange {
            row: at,
            rows: self.rows.len(),
        })
    }

    /// Validate an insertion column (`0..=len`).
    fn checked_col(&self, row: usize, col: usize) -> TextResult<()> {
        let len = self.checked_row(row)?.len();
        if col > len {
            return Err(TextError::ColumnOutOfRange { row, col, len });
        }
        Ok(())
    }

    fn renumber_from(&mut self, start: usize) {
        for (idx, row) in self.rows.iter_mut().enumerate().skip(start) {
            row.idx = idx;
        }
    }

    fn rehighlight_all(&mut self) {
        let mut open = false;
        for row in &mut self.rows {
            open = Self::highlight_row(self.syntax, row, open);
        }
    }

    /// Re-highlight `start`, then each following row while the comment state
    /// left at a row's end differs from what that row had stored. Returns the
    /// number of rows classified.
    fn rehighlight_from(&mut self, start: usize) -> usize {
        let syntax = self.syntax;
        let mut at = start;
        let mut touched = 0usize;
        while at < self.rows.len() {
            let inherited = at > 0 && self.rows[at - 1].hl_open_comment;
            let row = &mut self.rows[at];
            let before = row.hl_open_comment;
            let after = Self::highlight_row(syntax, row, inherited);
            touched += 1;
            if before == after {
                break;
            }
            at += 1;
        }
        if touched > 1 {
            trace!(target: "text.syntax", start, touched, "highlight_cascade");
        }
        touched
    }

    /// Classify one row and store its terminal comment state, which is returned.
    fn highlight_row(syntax: Option<&SyntaxMode>, row: &mut Row, inherited: bool) -> bool {
        let open = match syntax {
            Some(mode) => {
                let (hl, open) = syntax::scan(&row.render, mode, inherited);
                row.hl = hl;
                open
            }
            None => {
                row.hl.clear();
                row.hl.resize(row.render_size, Highlight::Normal);
                false
            }
        };
        row.hl_open_comment = open;
        open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn c_buffer(lines: &[&str]) -> TextBuffer {
        let mut b = TextBuffer::from_lines(lines.iter().copied());
        b.set_syntax(SyntaxMode::by_name("c"));
        b
    }

    #[test]
    fn load_strips_terminators() {
        let b = TextBuffer::from_bytes(b"one\r\ntwo\n\nthree");
        assert_eq!(b.lines(), vec!["one", "two", "", "three"]);
        let b = TextBuffer::from_bytes(b"only\n");
        assert_eq!(b.lines(), vec!["only"]);
        assert!(TextBuffer::from_bytes(b"").is_empty());
    }

    #[test]
    fn save_terminates_every_row() {
        let b = TextBuffer::from_lines(["a", "", "b"]);
        assert_eq!(b.to_bytes(), b"a\n\nb\n".to_vec());
    }

    #[test]
    fn insert_and_delete_renumber_rows() {
        let mut b = TextBuffer::from_lines(["a", "b", "c"]);
        b.insert_row(1, "x").unwrap();
        assert_eq!(b.lines(), vec!["a", "x", "b", "c"]);
        assert!(b.rows().iter().enumerate().all(|(i, r)| r.idx() == i));
        assert_eq!(b.delete_row(0).unwrap(), "a");
        assert!(b.rows().iter().enumerate().all(|(i, r)| r.idx() == i));
        b.insert_row(3, "end").unwrap();
        assert_eq!(b.lines(), vec!["x", "b", "c", "end"]);
    }

    #[test]
    fn out_of_range_addressing_is_reported_and_harmless() {
        let mut b = TextBuffer::from_lines(["ab"]);
        assert_eq!(
            b.insert_row(3, "x"),
            Err(TextError::RowOutOfRange { row: 3, rows: 1 })
        );
        assert_eq!(
            b.row_insert_char(0, 3, 'z'),
            Err(TextError::ColumnOutOfRange { row: 0, col: 3, len: 2 })
        );
        assert!(b.row_delete_char(0, 2).is_err());
        assert!(b.delete_row(1).is_err());
        assert!(b.row_delete_range(0, 2, 1).is_err());
        assert_eq!(b.lines(), vec!["ab"]);
    }

    #[test]
    fn split_and_join_are_inverse() {
        let mut b = TextBuffer::from_lines(["hello world"]);
        b.split_row(0, 5).unwrap();
        assert_eq!(b.lines(), vec!["hello", " world"]);
        b.join_rows(0).unwrap();
        assert_eq!(b.lines(), vec!["hello world"]);
    }

    #[test]
    fn char_edits_rehighlight_the_row() {
        let mut b = c_buffer(&["in x;"]);
        assert_eq!(b.row(0).unwrap().highlight()[0], Highlight::Normal);
        b.row_insert_char(0, 2, 't').unwrap();
        assert_eq!(&b.row(0).unwrap().highlight()[..3], &[Highlight::Keyword2; 3]);
    }

    #[test]
    fn opening_comment_cascades_down_and_closing_retracts() {
        let mut b = c_buffer(&["a", "b", "c */ d", "e"]);
        b.row_insert_text(0, 0, "/*").unwrap();
        assert!(b.rows()[..2].iter().all(Row::has_open_comment));
        assert!(!b.rows()[2].has_open_comment());
        assert_eq!(b.rows()[3].highlight(), &[Highlight::Normal]);
        assert_eq!(b.rows()[1].highlight(), &[Highlight::Comment]);

        b.row_delete_range(0, 0, 2).unwrap();
        assert!(b.rows().iter().all(|r| !r.has_open_comment()));
        assert_eq!(b.rows()[1].highlight(), &[Highlight::Normal]);
    }

    #[test]
    fn cascade_work_is_linear_and_stops_early() {
        let n = 5_000;
        let mut b = c_buffer(&vec!["x"; n]);
        b.rows[0].insert_str(0, "/*");
        assert_eq!(b.rehighlight_from(0), n);
        assert!(b.rows().iter().all(Row::has_open_comment));

        // Still open at the end of row 0: nothing below needs work.
        b.rows[0].push_str("y");
        assert_eq!(b.rehighlight_from(0), 1);
    }

    #[test]
    fn deleting_the_closing_row_reopens_the_comment_below() {
        let mut b = c_buffer(&["/* a", "b */", "c"]);
        assert!(!b.rows()[2].has_open_comment());
        b.delete_row(1).unwrap();
        assert!(b.rows()[1].has_open_comment());
        assert_eq!(b.rows()[1].highlight(), &[Highlight::Comment]);
    }

    #[test]
    fn inserting_a_closing_row_ends_the_comment_below() {
        let mut b = c_buffer(&["/* a", "b"]);
        assert!(b.rows()[1].has_open_comment());
        b.insert_row(1, "*/").unwrap();
        assert!(!b.rows()[1].has_open_comment());
        assert!(!b.rows()[2].has_open_comment());
        assert_eq!(b.rows()[2].highlight(), &[Highlight::Normal]);
    }

    #[test]
    fn no_syntax_means_plain_text() {
        let b = TextBuffer::from_lines(["int x; // c"]);
        assert!(b.rows()[0].highlight().iter().all(|h| *h == Highlight::Normal));
    }

    #[test]
    fn overlay_restores_exactly() {
        let mut b = c_buffer(&["int abc;"]);
        let before = b.rows()[0].highlight().to_vec();
        let saved = b.overlay_match(0, 4, 3).unwrap();
        assert_eq!(&b.rows()[0].highlight()[4..7], &[Highlight::Match; 3]);
        b.restore_highlight(0, saved).unwrap();
        assert_eq!(b.rows()[0].highlight(), before.as_slice());
        assert_eq!(b.dirty(), 0);
    }
}
