//! Text edit action handling (insert/backspace/delete/newline).
//!
//! `EditorState` owns the record-apply-push sequence; this layer only picks
//! the operation and turns its outcome into a `DispatchResult`.

use super::DispatchResult;
use crate::Action;
use core_state::{EditResult, EditorState};

pub(crate) fn handle_edit(action: &Action, state: &mut EditorState) -> DispatchResult {
    let before = state.cursor();
    let outcome: EditResult<bool> = match action {
        Action::InsertChar(ch) => state.insert_char(*ch).map(|()| true),
        Action::Newline => state.insert_newline().map(|()| true),
        Action::DeleteBackward => state.delete_backward(),
        Action::DeleteForward => state.delete_forward(),
        _ => Ok(false),
    };
    match outcome {
        Ok(changed) => {
            let after = state.cursor();
            tracing::trace!(
                target: "actions.dispatch",
                op = action.name(),
                changed,
                line = before.row,
                col = before.col,
                to_line = after.row,
                to_col = after.col,
                "edit"
            );
            if changed {
                DispatchResult::dirty()
            } else {
                DispatchResult::clean()
            }
        }
        Err(e) => super::report_failure(state, action.name(), &e),
    }
}
