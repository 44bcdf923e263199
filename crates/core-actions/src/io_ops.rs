//! File IO helpers.
//!
//! Synchronous and whole-file: a load reads every byte up front and a save
//! writes the serialized buffer in one call. Status messages for failed saves
//! are set by the dispatcher; a successful save clears the dirty counter here.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use core_config::Config;
use core_state::EditorState;
use core_text::TextBuffer;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl IoError {
    pub fn path(&self) -> &Path {
        match self {
            IoError::Read { path, .. } | IoError::Write { path, .. } => path,
        }
    }

    pub fn io_error(&self) -> &io::Error {
        match self {
            IoError::Read { source, .. } | IoError::Write { source, .. } => source,
        }
    }
}

/// Result of a write attempt that did not fail at the OS level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteFileResult {
    Written { path: PathBuf, bytes: usize },
    NoFilename,
}

/// Open `path` into a fresh session sized and highlighted per `config`. A
/// missing file yields an empty buffer that will be created on first save.
pub fn open_file(path: &Path, config: &Config) -> Result<EditorState, IoError> {
    let buffer = match fs::read(path) {
        Ok(bytes) => {
            tracing::info!(target: "io", path = %path.display(), bytes = bytes.len(), "file_opened");
            TextBuffer::from_bytes(&bytes)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(target: "io", path = %path.display(), "file_missing_new_buffer");
            TextBuffer::new()
        }
        Err(source) => {
            tracing::error!(target: "io", path = %path.display(), error = %source, "file_open_error");
            return Err(IoError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    let mut state = EditorState::with_undo_capacity(buffer, config.effective_undo_capacity());
    state.set_file_name(path);
    state.apply_syntax(config.syntax_enabled());
    Ok(state)
}

/// Serialize the buffer out to its file name (or `target`). The buffer is
/// untouched on failure; on success the dirty counter is reset and the
/// `Saved` status is set.
pub fn write_file(state: &mut EditorState, target: Option<&Path>) -> Result<WriteFileResult, IoError> {
    let path = match target.or(state.file_name()) {
        Some(p) => p.to_path_buf(),
        None => return Ok(WriteFileResult::NoFilename),
    };
    let content = state.buffer().to_bytes();
    if let Err(source) = fs::write(&path, &content) {
        tracing::error!(target: "io", path = %path.display(), error = %source, "file_write_error");
        return Err(IoError::Write { path, source });
    }
    let bytes = content.len();
    tracing::info!(target: "io", path = %path.display(), bytes, "file_written");
    state.mark_saved(bytes);
    Ok(WriteFileResult::Written { path, bytes })
}
