//! Line-oriented edit scripts for headless replay.
//!
//! One command per line, `#` starts a comment line, blank lines are skipped.
//! Most commands take an optional repeat count (`backspace 3`).
//!
//! ```text
//! type int x;       # literal text; \t, \n and \\ are escapes
//! newline
//! select-left 2
//! undo
//! find x            # starts a search; find-next / find-prev reuse the query
//! save
//! ```
//!
//! Parsing is pure: the parser only remembers the last find query so step
//! commands can carry it.

use crate::{Action, Direction, FindStep, SelectMotion};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("line {line}: unknown command `{command}`")]
    UnknownCommand { line: usize, command: String },
    #[error("line {line}: invalid repeat count `{value}`")]
    InvalidCount { line: usize, value: String },
    #[error("line {line}: `{command}` needs an argument")]
    MissingArgument { line: usize, command: String },
}

#[derive(Debug, Default)]
pub struct ScriptParser {
    last_query: Option<String>,
}

impl ScriptParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse one script line (`line` is 1-based, for error reports).
    pub fn parse_line(&mut self, line: usize, raw: &str) -> Result<Vec<Action>, ScriptError> {
        let body = raw.trim_end_matches(['\r', '\n']).trim_start();
        if body.trim_end().is_empty() || body.starts_with('#') {
            return Ok(Vec::new());
        }
        if let Some(text) = body.strip_prefix("type ") {
            return Ok(unescape(text));
        }
        if let Some(query) = body.strip_prefix("find ") {
            self.last_query = Some(query.to_string());
            return Ok(vec![Action::Find {
                query: query.to_string(),
                step: FindStep::Edit,
            }]);
        }

        let mut parts = body.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let count = match parts.next() {
            None => 1,
            Some(value) => match value.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ScriptError::InvalidCount {
                        line,
                        value: value.to_string(),
                    });
                }
            },
        };
        if parts.next().is_some() {
            return Err(ScriptError::UnknownCommand {
                line,
                command: body.trim_end().to_string(),
            });
        }

        let action = match name {
            "type" | "find" => {
                return Err(ScriptError::MissingArgument {
                    line,
                    command: name.to_string(),
                });
            }
            "find-next" | "find-prev" | "find-accept" | "find-cancel" => {
                let Some(query) = self.last_query.clone() else {
                    return Err(ScriptError::MissingArgument {
                        line,
                        command: "find".to_string(),
                    });
                };
                let step = match name {
                    "find-next" => FindStep::Next,
                    "find-prev" => FindStep::Previous,
                    "find-accept" => FindStep::Accept,
                    _ => FindStep::Cancel,
                };
                Action::Find { query, step }
            }
            other => simple_command(other).ok_or_else(|| ScriptError::UnknownCommand {
                line,
                command: other.to_string(),
            })?,
        };
        Ok(vec![action; count])
    }
}

fn simple_command(name: &str) -> Option<Action> {
    let action = match name {
        "newline" => Action::Newline,
        "backspace" => Action::DeleteBackward,
        "delete" => Action::DeleteForward,
        "left" => Action::Move(Direction::Left),
        "right" => Action::Move(Direction::Right),
        "up" => Action::Move(Direction::Up),
        "down" => Action::Move(Direction::Down),
        "word-left" => Action::MoveWord(Direction::Left),
        "word-right" => Action::MoveWord(Direction::Right),
        "home" => Action::LineStart,
        "end" => Action::LineEnd,
        "page-up" => Action::Page(Direction::Up),
        "page-down" => Action::Page(Direction::Down),
        "select-left" => Action::Select(SelectMotion::Left),
        "select-right" => Action::Select(SelectMotion::Right),
        "select-up" => Action::Select(SelectMotion::Up),
        "select-down" => Action::Select(SelectMotion::Down),
        "select-home" => Action::Select(SelectMotion::LineStart),
        "select-end" => Action::Select(SelectMotion::LineEnd),
        "select-word-left" => Action::Select(SelectMotion::WordLeft),
        "select-word-right" => Action::Select(SelectMotion::WordRight),
        "select-all" => Action::SelectAll,
        "clear-selection" | "esc" => Action::ClearSelection,
        "undo" => Action::Undo,
        "redo" => Action::Redo,
        "save" => Action::Save,
        "quit" => Action::Quit,
        _ => return None,
    };
    Some(action)
}

fn unescape(text: &str) -> Vec<Action> {
    let mut out = Vec::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(Action::InsertChar(c));
            continue;
        }
        match chars.next() {
            Some('t') => out.push(Action::InsertChar('\t')),
            Some('n') => out.push(Action::Newline),
            Some(other) => out.push(Action::InsertChar(other)),
            None => out.push(Action::InsertChar('\\')),
        }
    }
    out
}

/// Parse a whole script into the flat action sequence it replays.
pub fn parse_script(src: &str) -> Result<Vec<Action>, ScriptError> {
    let mut parser = ScriptParser::new();
    let mut actions = Vec::new();
    for (idx, line) in src.lines().enumerate() {
        actions.extend(parser.parse_line(idx + 1, line)?);
    }
    Ok(actions)
}
