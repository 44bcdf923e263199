//! Incremental find session layered over [`TextBuffer::find`].
//!
//! [`TextBuffer::find`]: core_text::TextBuffer::find

use core_text::{Highlight, Position, SearchDirection};
use tracing::{debug, trace};

use crate::EditorState;
use crate::status::StatusKind;

/// One keystroke's worth of progress in a find prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindStep {
    /// The query text changed; search again from the top.
    Edit,
    Next,
    Previous,
    /// Leave the prompt keeping the cursor on the match.
    Accept,
    /// Leave the prompt restoring the cursor and viewport.
    Cancel,
}

#[derive(Debug, Clone)]
pub struct FindSession {
    last_match: Option<usize>,
    direction: SearchDirection,
    overlay: Option<(usize, Vec<Highlight>)>,
    saved_cursor: Position,
    saved_offsets: (usize, usize),
}

impl FindSession {
    pub fn last_match(&self) -> Option<usize> {
        self.last_match
    }
}

impl EditorState {
    pub fn find_session(&self) -> Option<&FindSession> {
        self.find.as_ref()
    }

    /// Advance the find session, starting one if none is running. Returns the
    /// match the cursor now sits on, if any.
    pub fn find_step(&mut self, query: &str, step: FindStep) -> Option<Position> {
        let mut session = self.find.take().unwrap_or_else(|| FindSession {
            last_match: None,
            direction: SearchDirection::Forward,
            overlay: None,
            saved_cursor: self.cursor,
            saved_offsets: (self.viewport.row_offset, self.viewport.col_offset),
        });
        self.restore_overlay(&mut session);

        match step {
            FindStep::Accept => {
                debug!(target: "state.find", row = self.cursor.row, "find_accept");
                return None;
            }
            FindStep::Cancel => {
                self.cursor = session.saved_cursor;
                (self.viewport.row_offset, self.viewport.col_offset) = session.saved_offsets;
                self.scroll();
                debug!(target: "state.find", "find_cancel");
                return None;
            }
            FindStep::Next => session.direction = SearchDirection::Forward,
            FindStep::Previous => session.direction = SearchDirection::Backward,
            FindStep::Edit => {
                session.last_match = None;
                session.direction = SearchDirection::Forward;
            }
        }
        if session.last_match.is_none() {
            session.direction = SearchDirection::Forward;
        }

        let hit = self
            .buffer
            .find(query, session.last_match, session.direction);
        let found = match hit {
            Some(hit) => {
                session.last_match = Some(hit.position.row);
                self.cursor = hit.position;
                // Scrolling from past the end brings the match row to the top.
                self.viewport.row_offset = self.buffer.row_count();
                if let Ok(saved) = self.buffer.overlay_match(hit.position.row, hit.rx, hit.width) {
                    session.overlay = Some((hit.position.row, saved));
                }
                trace!(target: "state.find", row = hit.position.row, col = hit.position.col, "find_hit");
                Some(hit.position)
            }
            None => {
                self.set_status(StatusKind::NoMatch {
                    query: query.to_string(),
                });
                None
            }
        };
        self.find = Some(session);
        self.scroll();
        found
    }

    /// End any running find session, keeping the cursor where it is.
    pub fn end_find(&mut self) {
        if let Some(mut session) = self.find.take() {
            self.restore_overlay(&mut session);
        }
    }

    fn restore_overlay(&mut self, session: &mut FindSession) {
        if let Some((row, saved)) = session.overlay.take()
            && self.buffer.restore_highlight(row, saved).is_err()
        {
            trace!(target: "state.find", row, "find_overlay_row_gone");
        }
    }
}
