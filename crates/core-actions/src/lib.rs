//! Editor commands: the closed [`Action`] set, key translation, dispatch onto
//! [`core_state::EditorState`], file I/O, and the line-oriented edit script
//! used for headless replay.

pub mod dispatcher;
pub mod io_ops;
pub mod key_translator;
pub mod script;

pub use core_state::{Direction, FindStep, SelectMotion};
pub use dispatcher::{DispatchResult, QuitGuard, QuitVerdict, dispatch};
pub use io_ops::{IoError, WriteFileResult, open_file, write_file};
pub use key_translator::{find_prompt_step, translate_key};
pub use script::{ScriptError, ScriptParser, parse_script};

/// Everything a key press (or a script line) can ask the editor to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    InsertChar(char),
    Newline,
    DeleteBackward,
    DeleteForward,
    Move(Direction),
    MoveWord(Direction),
    LineStart,
    LineEnd,
    Page(Direction),
    Select(SelectMotion),
    SelectAll,
    ClearSelection,
    Undo,
    Redo,
    Find { query: String, step: FindStep },
    Save,
    Quit,
}

impl Action {
    /// Short stable name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Action::InsertChar(_) => "insert_char",
            Action::Newline => "newline",
            Action::DeleteBackward => "delete_backward",
            Action::DeleteForward => "delete_forward",
            Action::Move(_) => "move",
            Action::MoveWord(_) => "move_word",
            Action::LineStart => "line_start",
            Action::LineEnd => "line_end",
            Action::Page(_) => "page",
            Action::Select(_) => "select",
            Action::SelectAll => "select_all",
            Action::ClearSelection => "clear_selection",
            Action::Undo => "undo",
            Action::Redo => "redo",
            Action::Find { .. } => "find",
            Action::Save => "save",
            Action::Quit => "quit",
        }
    }
}
