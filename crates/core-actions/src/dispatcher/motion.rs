//! Motion sub-dispatch (cursor movement and selection growth).
//!
//! Plain motions drop the selection before moving; `Select` motions anchor
//! one at the cursor if needed and drag its end along.

use super::DispatchResult;
use crate::Action;
use core_state::EditorState;

pub(crate) fn handle_motion(action: &Action, state: &mut EditorState) -> DispatchResult {
    let before = state.cursor();
    let had_selection = state.selection().is_active();
    match action {
        Action::Select(motion) => state.select(*motion),
        Action::SelectAll => state.select_all(),
        Action::ClearSelection => state.clear_selection(),
        plain => {
            state.clear_selection();
            match plain {
                Action::Move(dir) => state.move_cursor(*dir),
                Action::MoveWord(dir) => state.move_word(*dir),
                Action::LineStart => state.line_start(),
                Action::LineEnd => state.line_end(),
                Action::Page(dir) => state.page(*dir),
                _ => {}
            }
        }
    }
    let after = state.cursor();
    tracing::trace!(
        target: "actions.dispatch",
        op = action.name(),
        line = before.row,
        col = before.col,
        to_line = after.row,
        to_col = after.col,
        "motion"
    );
    if before != after || had_selection || state.selection().is_active() {
        DispatchResult::dirty()
    } else {
        DispatchResult::clean()
    }
}
