//! Dispatcher applying `Action` to mutable editor state.
//!
//! Sub-modules:
//! * `motion` - cursor movement and selection growth
//! * `edit`   - text mutation (insert/delete/newline)
//! * `undo`   - undo / redo
//! * `file`   - save
//!
//! Quit and find are small enough to live here. Any action other than `Find`
//! ends a running find session, and any action other than `Quit` re-arms the
//! quit guard.

use crate::Action;
use core_config::Config;
use core_state::{EditError, EditorState, StatusKind};

mod edit;
mod file;
mod motion;
mod undo;

/// Result of dispatching a single `Action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    /// Something visible changed and the screen should be redrawn.
    pub dirty: bool,
    pub quit: bool,
}

impl DispatchResult {
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            quit: false,
        }
    }
    pub fn clean() -> Self {
        Self {
            dirty: false,
            quit: false,
        }
    }
    pub fn quit() -> Self {
        Self {
            dirty: true,
            quit: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuitVerdict {
    Granted,
    /// Unsaved changes; this many more presses are still required.
    Refused { presses_left: u32 },
}

/// Counts consecutive quit presses against unsaved changes.
#[derive(Debug, Clone, Default)]
pub struct QuitGuard {
    refusals: u32,
}

impl QuitGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one quit press. A clean buffer always quits; a dirty one
    /// needs `quit_times` refused presses first.
    pub fn press(&mut self, dirty: bool, quit_times: u32) -> QuitVerdict {
        if dirty && self.refusals < quit_times {
            let presses_left = quit_times - self.refusals;
            self.refusals += 1;
            QuitVerdict::Refused { presses_left }
        } else {
            QuitVerdict::Granted
        }
    }

    pub fn reset(&mut self) {
        self.refusals = 0;
    }

    pub fn refusals(&self) -> u32 {
        self.refusals
    }
}

/// Apply an action to editor state. Returns `DispatchResult` describing whether
/// a render is needed (`dirty`) or the editor should exit (`quit`).
pub fn dispatch(
    action: Action,
    state: &mut EditorState,
    guard: &mut QuitGuard,
    config: &Config,
) -> DispatchResult {
    tracing::trace!(target: "actions.dispatch", action = action.name(), "dispatch");

    if !matches!(action, Action::Quit) {
        guard.reset();
    }
    if !matches!(action, Action::Find { .. }) {
        state.end_find();
    }

    match action {
        Action::InsertChar(_)
        | Action::Newline
        | Action::DeleteBackward
        | Action::DeleteForward => edit::handle_edit(&action, state),
        Action::Move(_)
        | Action::MoveWord(_)
        | Action::LineStart
        | Action::LineEnd
        | Action::Page(_)
        | Action::Select(_)
        | Action::SelectAll
        | Action::ClearSelection => motion::handle_motion(&action, state),
        Action::Undo => undo::handle_undo(state),
        Action::Redo => undo::handle_redo(state),
        Action::Find { query, step } => {
            let hit = state.find_step(&query, step);
            tracing::trace!(target: "actions.dispatch", op = "find", ?step, found = hit.is_some(), "find");
            DispatchResult::dirty()
        }
        Action::Save => file::handle_save(state),
        Action::Quit => handle_quit(state, guard, config),
    }
}

/// Surface a failed edit or history replay on the status line. The buffer is
/// unchanged since records are checked before they mutate anything.
pub(crate) fn report_failure(state: &mut EditorState, op: &'static str, err: &EditError) -> DispatchResult {
    tracing::error!(target: "actions.dispatch", op, error = %err, "edit_failed");
    state.set_status(StatusKind::EditFailed {
        reason: err.to_string(),
    });
    DispatchResult::dirty()
}

fn handle_quit(state: &mut EditorState, guard: &mut QuitGuard, config: &Config) -> DispatchResult {
    match guard.press(state.is_dirty(), config.quit_times()) {
        QuitVerdict::Granted => {
            tracing::info!(target: "actions.dispatch", dirty = state.is_dirty(), "quit");
            DispatchResult::quit()
        }
        QuitVerdict::Refused { presses_left } => {
            tracing::debug!(target: "actions.dispatch", presses_left, "quit_refused");
            state.set_status(StatusKind::UnsavedChanges { presses_left });
            DispatchResult::dirty()
        }
    }
}
