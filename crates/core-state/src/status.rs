//! Structured status-bar messages.

use std::fmt;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusKind {
    Help,
    Undo,
    Redo,
    NothingToUndo,
    NothingToRedo,
    Saved { bytes: usize },
    SaveFailed { reason: String },
    SaveAborted,
    UnsavedChanges { presses_left: u32 },
    NoMatch { query: String },
    EditFailed { reason: String },
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusKind::Help => {
                f.write_str("HELP: Ctrl-S Save | Ctrl-X Quit | Ctrl-F Find | Ctrl-Z Undo | Ctrl-Y Redo")
            }
            StatusKind::Undo => f.write_str("Undo"),
            StatusKind::Redo => f.write_str("Redo"),
            StatusKind::NothingToUndo => f.write_str("Nothing to undo"),
            StatusKind::NothingToRedo => f.write_str("Nothing to redo"),
            StatusKind::Saved { bytes } => write!(f, "{bytes} bytes written to disk"),
            StatusKind::SaveFailed { reason } => write!(f, "Can't save! I/O error: {reason}"),
            StatusKind::SaveAborted => f.write_str("Save aborted"),
            StatusKind::UnsavedChanges { presses_left } => write!(
                f,
                "WARNING! File has unsaved changes. Press Ctrl-X {presses_left} more times to quit."
            ),
            StatusKind::NoMatch { query } => write!(f, "No match for '{query}'"),
            StatusKind::EditFailed { reason } => write!(f, "Edit failed: {reason}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub set_at: Instant,
}

impl StatusMessage {
    pub fn new(kind: StatusKind) -> Self {
        Self {
            kind,
            set_at: Instant::now(),
        }
    }

    pub fn is_expired(&self, timeout: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.set_at) >= timeout
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}
