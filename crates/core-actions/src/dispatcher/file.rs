//! Save handling.

use super::DispatchResult;
use crate::io_ops::{self, WriteFileResult};
use core_state::{EditorState, StatusKind};

pub(crate) fn handle_save(state: &mut EditorState) -> DispatchResult {
    match io_ops::write_file(state, None) {
        Ok(WriteFileResult::Written { bytes, .. }) => {
            tracing::debug!(target: "actions.dispatch", op = "save", bytes, "save");
        }
        Ok(WriteFileResult::NoFilename) => {
            tracing::debug!(target: "actions.dispatch", op = "save", "save_aborted");
            state.set_status(StatusKind::SaveAborted);
        }
        Err(e) => {
            state.set_status(StatusKind::SaveFailed {
                reason: e.io_error().to_string(),
            });
        }
    }
    DispatchResult::dirty()
}
