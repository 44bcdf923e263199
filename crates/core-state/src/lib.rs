//! Editor session state: the buffer plus everything that moves around it.
//!
//! [`EditorState`] is an explicit session object passed by `&mut` into every
//! operation. It owns the [`TextBuffer`], the cursor (raw coordinates plus the
//! derived display column), the viewport offsets, the selection, the undo log,
//! an optional find session and the current status message.
//!
//! Every user-facing edit runs the same sequence: build an [`UndoRecord`],
//! apply it to the buffer (which regenerates render and highlight caches for
//! the touched rows), push it onto the log, count one dirty edit, then settle
//! the cursor and clear the selection. Undo and redo replay records through the
//! same path without recording and without touching the dirty counter.
//!
//! The cursor may sit on the virtual row one past the last row (column 0);
//! typing there materializes a new row.

use std::ops::Range;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use core_text::{Highlight, Position, TextBuffer, is_separator};
use tracing::{debug, trace};

pub mod error;
pub mod search;
pub mod selection;
pub mod status;
pub mod undo;

pub use error::{EditError, EditResult};
pub use search::{FindSession, FindStep};
pub use selection::Selection;
pub use status::{StatusKind, StatusMessage};
pub use undo::{EditKind, HistoryOutcome, UNDO_HISTORY_MAX, UndoLog, UndoRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Motions that start or extend a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectMotion {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    WordLeft,
    WordRight,
}

/// Visible window onto the buffer, in rows and display columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub row_offset: usize,
    pub col_offset: usize,
    pub text_rows: usize,
    pub text_cols: usize,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            row_offset: 0,
            col_offset: 0,
            text_rows: 22,
            text_cols: 80,
        }
    }
}

/// What a renderer needs for one visible row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView<'a> {
    pub index: usize,
    pub render: &'a str,
    pub hl: &'a [Highlight],
    /// Selected display columns on this row.
    pub selection: Option<Range<usize>>,
}

#[derive(Debug, Clone)]
pub struct EditorState {
    buffer: TextBuffer,
    cursor: Position,
    rx: usize,
    viewport: Viewport,
    selection: Selection,
    undo: UndoLog,
    find: Option<FindSession>,
    status: Option<StatusMessage>,
    file_name: Option<PathBuf>,
}

impl EditorState {
    pub fn new(buffer: TextBuffer) -> Self {
        Self::with_undo_capacity(buffer, UNDO_HISTORY_MAX)
    }

    pub fn with_undo_capacity(buffer: TextBuffer, capacity: usize) -> Self {
        Self {
            buffer,
            cursor: Position::origin(),
            rx: 0,
            viewport: Viewport::default(),
            selection: Selection::default(),
            undo: UndoLog::new(capacity),
            find: None,
            status: None,
            file_name: None,
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }
    pub fn cursor(&self) -> Position {
        self.cursor
    }
    /// Display column of the cursor as of the last [`EditorState::scroll`].
    pub fn rx(&self) -> usize {
        self.rx
    }
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
    pub fn selection(&self) -> &Selection {
        &self.selection
    }
    pub fn undo_log(&self) -> &UndoLog {
        &self.undo
    }
    pub fn undo_depth(&self) -> usize {
        self.undo.undo_depth()
    }
    pub fn redo_depth(&self) -> usize {
        self.undo.redo_depth()
    }
    pub fn is_dirty(&self) -> bool {
        self.buffer.is_dirty()
    }
    pub fn file_name(&self) -> Option<&Path> {
        self.file_name.as_deref()
    }

    pub fn set_file_name(&mut self, path: impl Into<PathBuf>) {
        self.file_name = Some(path.into());
    }

    /// Choose the syntax mode from the file name, or disable highlighting.
    pub fn apply_syntax(&mut self, enabled: bool) {
        let name = self
            .file_name
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned());
        match name {
            Some(name) if enabled => {
                self.buffer.select_syntax(&name);
            }
            _ => self.buffer.set_syntax(None),
        }
    }

    /// Called after a successful save.
    pub fn mark_saved(&mut self, bytes: usize) {
        self.buffer.reset_dirty();
        self.set_status(StatusKind::Saved { bytes });
    }

    /// Move the cursor, clamping it onto the buffer (the virtual row allowed).
    pub fn set_cursor(&mut self, at: Position) {
        let row = at.row.min(self.buffer.row_count());
        self.cursor = Position::new(row, at.col.min(self.row_len_or_zero(row)));
        self.scroll();
    }

    // ------------------------------------------------------------------
    // Status
    // ------------------------------------------------------------------

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn set_status(&mut self, kind: StatusKind) {
        trace!(target: "state.status", status = %kind, "status_set");
        self.status = Some(StatusMessage::new(kind));
    }

    /// Drop the status message once it is older than `timeout`. Returns true
    /// when a message expired.
    pub fn tick_status(&mut self, timeout: Duration, now: Instant) -> bool {
        if let Some(msg) = &self.status
            && msg.is_expired(timeout, now)
        {
            self.status = None;
            return true;
        }
        false
    }

    // ------------------------------------------------------------------
    // Edits
    // ------------------------------------------------------------------

    /// Type `ch` at the cursor, replacing an active selection first.
    pub fn insert_char(&mut self, ch: char) -> EditResult<()> {
        self.delete_selection()?;
        let at = self.cursor;
        let opened_row = at.row == self.buffer.row_count();
        self.commit(UndoRecord::new(at, at, EditKind::InsertChar { ch, opened_row }))
    }

    /// Split the row at the cursor, replacing an active selection first.
    pub fn insert_newline(&mut self) -> EditResult<()> {
        self.delete_selection()?;
        let at = self.cursor;
        self.commit(UndoRecord::new(at, at, EditKind::InsertNewline))
    }

    /// Backspace. With an active selection only the selection is removed.
    /// Returns false when there was nothing to delete.
    pub fn delete_backward(&mut self) -> EditResult<bool> {
        if self.selection.is_active() {
            return self.delete_selection();
        }
        let cur = self.cursor;
        if cur.row >= self.buffer.row_count() || (cur.row == 0 && cur.col == 0) {
            return Ok(false);
        }
        let record = if cur.col > 0 {
            let at = Position::new(cur.row, cur.col - 1);
            let ch = self.char_at(at)?;
            UndoRecord::new(at, cur, EditKind::DeleteChar { ch })
        } else {
            let above = self.buffer.row_len(cur.row - 1)?;
            UndoRecord::new(Position::new(cur.row - 1, above), cur, EditKind::DeleteNewline)
        };
        self.commit(record)?;
        Ok(true)
    }

    /// Delete the char under the cursor, or join the next row when the cursor
    /// is at the end of its row. With an active selection only the selection
    /// is removed.
    pub fn delete_forward(&mut self) -> EditResult<bool> {
        if self.selection.is_active() {
            return self.delete_selection();
        }
        let cur = self.cursor;
        if cur.row >= self.buffer.row_count() {
            return Ok(false);
        }
        let len = self.buffer.row_len(cur.row)?;
        let record = if cur.col < len {
            let ch = self.char_at(cur)?;
            UndoRecord::new(cur, cur, EditKind::DeleteChar { ch })
        } else if cur.row + 1 < self.buffer.row_count() {
            UndoRecord::new(cur, cur, EditKind::DeleteNewline)
        } else {
            return Ok(false);
        };
        self.commit(record)?;
        Ok(true)
    }

    /// Remove the selected text as one undoable edit and leave the cursor at
    /// its start. An empty selection is simply cleared. Returns whether text
    /// was removed.
    pub fn delete_selection(&mut self) -> EditResult<bool> {
        let Some((start, end)) = self.selection.resolved(&self.buffer) else {
            self.selection.clear();
            return Ok(false);
        };
        if start == end {
            self.selection.clear();
            return Ok(false);
        }
        let fragments = undo::selected_fragments(&self.buffer, start, end)?;
        let rows = fragments.len();
        self.commit(UndoRecord::new(
            start,
            self.cursor,
            EditKind::DeleteSelection { end, fragments },
        ))?;
        debug!(target: "state.edit", rows, "selection_deleted");
        Ok(true)
    }

    fn commit(&mut self, record: UndoRecord) -> EditResult<()> {
        self.end_find();
        self.cursor = record.apply(&mut self.buffer)?;
        debug!(
            target: "state.edit",
            kind = record.label(),
            row = record.at.row,
            col = record.at.col,
            "edit_applied"
        );
        self.undo.push(record);
        self.buffer.mark_dirty();
        self.selection.clear();
        self.scroll();
        Ok(())
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    pub fn undo(&mut self) -> EditResult<HistoryOutcome> {
        self.end_find();
        self.selection.clear();
        let outcome = self.undo.undo(&mut self.buffer, &mut self.cursor)?;
        self.set_status(match outcome {
            HistoryOutcome::Applied => StatusKind::Undo,
            HistoryOutcome::Empty => StatusKind::NothingToUndo,
        });
        self.scroll();
        Ok(outcome)
    }

    pub fn redo(&mut self) -> EditResult<HistoryOutcome> {
        self.end_find();
        self.selection.clear();
        let outcome = self.undo.redo(&mut self.buffer, &mut self.cursor)?;
        self.set_status(match outcome {
            HistoryOutcome::Applied => StatusKind::Redo,
            HistoryOutcome::Empty => StatusKind::NothingToRedo,
        });
        self.scroll();
        Ok(outcome)
    }

    // ------------------------------------------------------------------
    // Motions
    // ------------------------------------------------------------------

    /// Arrow-key motion. Left wraps to the end of the previous row, right
    /// wraps to the start of the next; the column is clamped afterwards.
    pub fn move_cursor(&mut self, dir: Direction) {
        let rows = self.buffer.row_count();
        let Position { mut row, mut col } = self.cursor;
        let len = (row < rows).then(|| self.row_len_or_zero(row));
        match dir {
            Direction::Left => {
                if col != 0 {
                    col -= 1;
                } else if row > 0 {
                    row -= 1;
                    col = self.row_len_or_zero(row);
                }
            }
            Direction::Right => match len {
                Some(len) if col < len => col += 1,
                Some(len) if col == len => {
                    row += 1;
                    col = 0;
                }
                _ => {}
            },
            Direction::Up => row = row.saturating_sub(1),
            Direction::Down => {
                if row < rows {
                    row += 1;
                }
            }
        }
        self.cursor = Position::new(row, col.min(self.row_len_or_zero(row)));
        self.scroll();
    }

    /// Word-wise motion over separator boundaries. Up and down are ignored.
    pub fn move_word(&mut self, dir: Direction) {
        let rows = self.buffer.row_count();
        let Position { mut row, mut col } = self.cursor;
        match dir {
            Direction::Left => {
                if col == 0 {
                    if row > 0 {
                        row -= 1;
                        col = self.row_len_or_zero(row);
                    }
                } else if let Some(r) = self.buffer.row(row) {
                    let chars: Vec<char> = r.chars().chars().collect();
                    col = col.min(chars.len()).saturating_sub(1);
                    while col > 0 && chars.get(col).is_some_and(|c| is_separator(*c)) {
                        col -= 1;
                    }
                    while col > 0 && !is_separator(chars[col - 1]) {
                        col -= 1;
                    }
                }
            }
            Direction::Right => {
                if let Some(r) = self.buffer.row(row) {
                    let chars: Vec<char> = r.chars().chars().collect();
                    if col >= chars.len() {
                        if row + 1 < rows {
                            row += 1;
                            col = 0;
                        }
                    } else {
                        while col < chars.len() && !is_separator(chars[col]) {
                            col += 1;
                        }
                        while col < chars.len() && is_separator(chars[col]) {
                            col += 1;
                        }
                    }
                }
            }
            Direction::Up | Direction::Down => {}
        }
        self.cursor = Position::new(row, col);
        self.scroll();
    }

    pub fn line_start(&mut self) {
        self.cursor.col = 0;
        self.scroll();
    }

    pub fn line_end(&mut self) {
        self.cursor.col = self.row_len_or_zero(self.cursor.row);
        self.scroll();
    }

    /// Page up/down by the viewport height. Left and right are ignored.
    pub fn page(&mut self, dir: Direction) {
        let step = match dir {
            Direction::Up => {
                self.cursor.row = self.viewport.row_offset;
                Direction::Up
            }
            Direction::Down => {
                let bottom = (self.viewport.row_offset + self.viewport.text_rows).saturating_sub(1);
                self.cursor.row = bottom.min(self.buffer.row_count());
                Direction::Down
            }
            Direction::Left | Direction::Right => return,
        };
        for _ in 0..self.viewport.text_rows {
            self.move_cursor(step);
        }
        self.scroll();
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Anchor a selection at the cursor if none is active, move the cursor,
    /// and extend the selection to it.
    pub fn select(&mut self, motion: SelectMotion) {
        self.selection.begin(self.cursor);
        match motion {
            SelectMotion::Left => self.move_cursor(Direction::Left),
            SelectMotion::Right => self.move_cursor(Direction::Right),
            SelectMotion::Up => self.move_cursor(Direction::Up),
            SelectMotion::Down => self.move_cursor(Direction::Down),
            SelectMotion::LineStart => self.line_start(),
            SelectMotion::LineEnd => self.line_end(),
            SelectMotion::WordLeft => self.move_word(Direction::Left),
            SelectMotion::WordRight => self.move_word(Direction::Right),
        }
        self.selection.extend_to(self.cursor);
    }

    /// Select the whole buffer. No-op on an empty buffer.
    pub fn select_all(&mut self) {
        let rows = self.buffer.row_count();
        if rows == 0 {
            return;
        }
        let last = rows - 1;
        self.selection
            .set(Position::origin(), Position::new(last, self.row_len_or_zero(last)));
    }

    pub fn set_selection(&mut self, start: Position, end: Position) {
        self.selection.set(start, end);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // ------------------------------------------------------------------
    // Viewport
    // ------------------------------------------------------------------

    pub fn set_viewport_size(&mut self, text_rows: usize, text_cols: usize) {
        self.viewport.text_rows = text_rows.max(1);
        self.viewport.text_cols = text_cols.max(1);
        self.scroll();
    }

    /// Recompute the display column and shift the viewport so the cursor is
    /// visible.
    pub fn scroll(&mut self) {
        self.rx = self
            .buffer
            .row(self.cursor.row)
            .map_or(0, |row| row.cx_to_rx(self.cursor.col));
        let vp = &mut self.viewport;
        if self.cursor.row < vp.row_offset {
            vp.row_offset = self.cursor.row;
        }
        if self.cursor.row >= vp.row_offset + vp.text_rows {
            vp.row_offset = self.cursor.row + 1 - vp.text_rows;
        }
        if self.rx < vp.col_offset {
            vp.col_offset = self.rx;
        }
        if self.rx >= vp.col_offset + vp.text_cols {
            vp.col_offset = self.rx + 1 - vp.text_cols;
        }
    }

    /// Cursor position relative to the top-left of the viewport.
    pub fn cursor_screen(&self) -> (usize, usize) {
        (
            self.cursor.row - self.viewport.row_offset.min(self.cursor.row),
            self.rx - self.viewport.col_offset.min(self.rx),
        )
    }

    /// Rows inside the viewport with their render text, highlight classes and
    /// selected display span.
    pub fn visible_rows(&self) -> Vec<RowView<'_>> {
        let rows = self.buffer.rows();
        let from = self.viewport.row_offset.min(rows.len());
        let to = (from + self.viewport.text_rows).min(rows.len());
        rows[from..to]
            .iter()
            .map(|row| RowView {
                index: row.idx(),
                render: row.render(),
                hl: row.highlight(),
                selection: self.selection.display_span(row),
            })
            .collect()
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn row_len_or_zero(&self, row: usize) -> usize {
        self.buffer.row(row).map_or(0, |r| r.len())
    }

    fn char_at(&self, at: Position) -> EditResult<char> {
        self.buffer
            .row(at.row)
            .and_then(|row| row.char_at(at.col))
            .ok_or(EditError::StaleRecord { at })
    }
}
