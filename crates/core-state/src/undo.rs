//! Linear, capacity-bounded undo/redo log.
//!
//! Each user-facing edit is described by one [`UndoRecord`] which knows how to
//! apply itself forward and how to revert itself against a [`TextBuffer`].
//! Editing code builds the record, applies it, and pushes it; undo and redo
//! replay the same record through the same buffer primitives, so history
//! replay can never drift from the original edit.
//!
//! The log keeps `applied` records at the front (the undo side) and the rest
//! after them (the redo side). Pushing discards the redo side first, so the
//! history never branches. Exceeding the capacity evicts the oldest records.

use std::collections::VecDeque;

use core_text::{Position, TextBuffer};
use tracing::trace;

use crate::error::{EditError, EditResult};

/// Default maximum number of records retained.
pub const UNDO_HISTORY_MAX: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditKind {
    /// `opened_row` is set when the char was typed on the virtual row past the
    /// end of the buffer, which first materialized an empty row.
    InsertChar { ch: char, opened_row: bool },
    DeleteChar { ch: char },
    /// Split at `at`, or append an empty row when `at` is the virtual row.
    InsertNewline,
    /// Join row `at.row + 1` onto row `at.row`, whose length is `at.col`.
    DeleteNewline,
    /// Remove `at..end`. One fragment per spanned row: the first and last are
    /// partial, the middle ones whole.
    DeleteSelection { end: Position, fragments: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoRecord {
    /// Where the change happened.
    pub at: Position,
    /// Cursor before the edit; restored by undo.
    pub before: Position,
    pub kind: EditKind,
}

/// Result of an undo/redo request. Running out of history is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryOutcome {
    Applied,
    Empty,
}

impl UndoRecord {
    pub fn new(at: Position, before: Position, kind: EditKind) -> Self {
        Self { at, before, kind }
    }

    /// Short name used in logs.
    pub fn label(&self) -> &'static str {
        match self.kind {
            EditKind::InsertChar { .. } => "insert_char",
            EditKind::DeleteChar { .. } => "delete_char",
            EditKind::InsertNewline => "insert_newline",
            EditKind::DeleteNewline => "delete_newline",
            EditKind::DeleteSelection { .. } => "delete_selection",
        }
    }

    /// Cursor position after the edit has been applied.
    pub fn after(&self) -> Position {
        let at = self.at;
        match self.kind {
            EditKind::InsertChar { .. } => Position::new(at.row, at.col + 1),
            EditKind::InsertNewline => Position::new(at.row + 1, 0),
            EditKind::DeleteChar { .. }
            | EditKind::DeleteNewline
            | EditKind::DeleteSelection { .. } => at,
        }
    }

    /// Perform the edit. Every precondition is checked before the buffer is
    /// touched; on error the buffer is unchanged.
    pub fn apply(&self, buffer: &mut TextBuffer) -> EditResult<Position> {
        let at = self.at;
        match &self.kind {
            EditKind::InsertChar { ch, opened_row } => {
                if *opened_row {
                    self.ensure(at.row == buffer.row_count() && at.col == 0)?;
                    buffer.insert_row(at.row, "")?;
                } else {
                    self.ensure(buffer.row_len(at.row)? >= at.col)?;
                }
                buffer.row_insert_char(at.row, at.col, *ch)?;
            }
            EditKind::DeleteChar { ch } => {
                self.expect_char(buffer, at, *ch)?;
                buffer.row_delete_char(at.row, at.col)?;
            }
            EditKind::InsertNewline => {
                if at.row == buffer.row_count() {
                    self.ensure(at.col == 0)?;
                    buffer.insert_row(at.row, "")?;
                } else {
                    buffer.split_row(at.row, at.col)?;
                }
            }
            EditKind::DeleteNewline => {
                self.ensure(at.row + 1 < buffer.row_count())?;
                self.ensure(buffer.row_len(at.row)? == at.col)?;
                buffer.join_rows(at.row)?;
            }
            EditKind::DeleteSelection { end, fragments } => {
                self.ensure(selected_fragments(buffer, at, *end)? == *fragments)?;
                remove_span(buffer, at, *end)?;
            }
        }
        Ok(self.after())
    }

    /// Undo the edit, restoring the buffer content from before [`apply`].
    ///
    /// [`apply`]: UndoRecord::apply
    pub fn revert(&self, buffer: &mut TextBuffer) -> EditResult<()> {
        let at = self.at;
        match &self.kind {
            EditKind::InsertChar { ch, opened_row } => {
                self.expect_char(buffer, at, *ch)?;
                if *opened_row {
                    self.ensure(at.row + 1 == buffer.row_count() && buffer.row_len(at.row)? == 1)?;
                    buffer.delete_row(at.row)?;
                } else {
                    buffer.row_delete_char(at.row, at.col)?;
                }
            }
            EditKind::DeleteChar { ch } => {
                buffer.row_insert_char(at.row, at.col, *ch)?;
            }
            EditKind::InsertNewline => {
                if at.row + 1 < buffer.row_count() {
                    self.ensure(buffer.row_len(at.row)? == at.col)?;
                    buffer.join_rows(at.row)?;
                } else {
                    self.ensure(at.col == 0 && buffer.row_len(at.row)? == 0)?;
                    buffer.delete_row(at.row)?;
                }
            }
            EditKind::DeleteNewline => {
                buffer.split_row(at.row, at.col)?;
            }
            EditKind::DeleteSelection { end, fragments } => {
                self.ensure(end.row.checked_sub(at.row).map(|span| span + 1) == Some(fragments.len()))?;
                self.ensure(buffer.row_len(at.row)? >= at.col)?;
                restore_span(buffer, at, fragments)?;
            }
        }
        Ok(())
    }

    fn ensure(&self, ok: bool) -> EditResult<()> {
        if ok {
            Ok(())
        } else {
            Err(EditError::StaleRecord { at: self.at })
        }
    }

    fn expect_char(&self, buffer: &TextBuffer, at: Position, ch: char) -> EditResult<()> {
        let found = buffer.row(at.row).and_then(|row| row.char_at(at.col));
        self.ensure(found == Some(ch))
    }
}

/// Text covered by `start..end`, one fragment per row.
pub fn selected_fragments(
    buffer: &TextBuffer,
    start: Position,
    end: Position,
) -> EditResult<Vec<String>> {
    if end < start {
        return Err(EditError::StaleRecord { at: start });
    }
    if start.row == end.row {
        let text = buffer.row_text(start.row)?;
        return Ok(vec![char_slice(text, start.col, Some(end.col), start)?]);
    }
    let mut fragments = Vec::with_capacity(end.row - start.row + 1);
    fragments.push(char_slice(buffer.row_text(start.row)?, start.col, None, start)?);
    for row in start.row + 1..end.row {
        fragments.push(buffer.row_text(row)?.to_string());
    }
    fragments.push(char_slice(buffer.row_text(end.row)?, 0, Some(end.col), end)?);
    Ok(fragments)
}

fn char_slice(text: &str, from: usize, to: Option<usize>, at: Position) -> EditResult<String> {
    let len = text.chars().count();
    let to = to.unwrap_or(len);
    if from > to || to > len {
        return Err(EditError::StaleRecord { at });
    }
    Ok(text.chars().skip(from).take(to - from).collect())
}

/// Remove `start..end`, leaving the cursor row holding the prefix of the start
/// row joined with the suffix of the end row.
fn remove_span(buffer: &mut TextBuffer, start: Position, end: Position) -> EditResult<()> {
    if start.row == end.row {
        buffer.row_delete_range(start.row, start.col, end.col)?;
        return Ok(());
    }
    let tail = char_slice(buffer.row_text(end.row)?, end.col, None, end)?;
    for _ in start.row + 1..=end.row {
        buffer.delete_row(start.row + 1)?;
    }
    buffer.row_split_off(start.row, start.col)?;
    buffer.row_append_text(start.row, &tail)?;
    Ok(())
}

fn restore_span(buffer: &mut TextBuffer, start: Position, fragments: &[String]) -> EditResult<()> {
    match fragments {
        [] => Err(EditError::StaleRecord { at: start }),
        [only] => {
            buffer.row_insert_text(start.row, start.col, only)?;
            Ok(())
        }
        [first, middle @ .., last] => {
            let tail = buffer.row_split_off(start.row, start.col)?;
            buffer.row_append_text(start.row, first)?;
            for (offset, text) in middle.iter().enumerate() {
                buffer.insert_row(start.row + 1 + offset, text)?;
            }
            let mut closing = last.clone();
            closing.push_str(&tail);
            buffer.insert_row(start.row + fragments.len() - 1, &closing)?;
            Ok(())
        }
    }
}

#[derive(Debug, Clone)]
pub struct UndoLog {
    records: VecDeque<UndoRecord>,
    applied: usize,
    capacity: usize,
}

impl Default for UndoLog {
    fn default() -> Self {
        Self::new(UNDO_HISTORY_MAX)
    }
}

impl UndoLog {
    /// A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        Self {
            records: VecDeque::new(),
            applied: 0,
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
    pub fn undo_depth(&self) -> usize {
        self.applied
    }
    pub fn redo_depth(&self) -> usize {
        self.records.len() - self.applied
    }
    pub fn len(&self) -> usize {
        self.records.len()
    }
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Most recently applied record, if any.
    pub fn current(&self) -> Option<&UndoRecord> {
        self.applied.checked_sub(1).and_then(|i| self.records.get(i))
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.applied = 0;
    }

    /// Append a record for an edit that has just been applied.
    pub fn push(&mut self, record: UndoRecord) {
        let dropped = self.records.len() - self.applied;
        self.records.truncate(self.applied);
        if dropped > 0 {
            trace!(target: "state.undo", dropped, "redo_truncated_on_new_edit");
        }
        let label = record.label();
        self.records.push_back(record);
        self.applied += 1;
        while self.records.len() > self.capacity {
            self.records.pop_front();
            self.applied -= 1;
            trace!(target: "state.undo", capacity = self.capacity, "undo_log_evicted_oldest");
        }
        trace!(target: "state.undo", kind = label, undo_depth = self.undo_depth(), redo_depth = self.redo_depth(), "push_record");
    }

    /// Revert the current record and step back. The cursor is restored to the
    /// record's pre-edit position. On error neither the log nor the cursor move.
    pub fn undo(&mut self, buffer: &mut TextBuffer, cursor: &mut Position) -> EditResult<HistoryOutcome> {
        let Some(record) = self.current() else {
            trace!(target: "state.undo", "undo_empty");
            return Ok(HistoryOutcome::Empty);
        };
        record.revert(buffer)?;
        *cursor = record.before;
        trace!(target: "state.undo", kind = record.label(), undo_depth = self.applied - 1, "undo_applied");
        self.applied -= 1;
        Ok(HistoryOutcome::Applied)
    }

    /// Re-apply the record after the current one (the head when nothing is
    /// applied). The cursor moves to the post-edit position.
    pub fn redo(&mut self, buffer: &mut TextBuffer, cursor: &mut Position) -> EditResult<HistoryOutcome> {
        let Some(record) = self.records.get(self.applied) else {
            trace!(target: "state.undo", "redo_empty");
            return Ok(HistoryOutcome::Empty);
        };
        *cursor = record.apply(buffer)?;
        trace!(target: "state.undo", kind = record.label(), undo_depth = self.applied + 1, "redo_applied");
        self.applied += 1;
        Ok(HistoryOutcome::Applied)
    }
}
