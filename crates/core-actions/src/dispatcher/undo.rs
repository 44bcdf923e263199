//! Undo / Redo handling.
//!
//! Both directions report through the status line; an empty side is not an
//! error and still asks for a redraw so the message shows.

use super::DispatchResult;
use core_state::{EditResult, EditorState, HistoryOutcome};

pub(crate) fn handle_undo(state: &mut EditorState) -> DispatchResult {
    let outcome = state.undo();
    report("undo", outcome, state)
}

pub(crate) fn handle_redo(state: &mut EditorState) -> DispatchResult {
    let outcome = state.redo();
    report("redo", outcome, state)
}

fn report(op: &'static str, outcome: EditResult<HistoryOutcome>, state: &mut EditorState) -> DispatchResult {
    match outcome {
        Ok(outcome) => {
            tracing::trace!(
                target: "actions.dispatch",
                op,
                applied = (outcome == HistoryOutcome::Applied),
                undo_depth = state.undo_depth(),
                redo_depth = state.redo_depth(),
                "history"
            );
            DispatchResult::dirty()
        }
        Err(e) => super::report_failure(state, op, &e),
    }
}
