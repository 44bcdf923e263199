//! Key -> Action translation.
//!
//! Stateless: every binding is a single chord. Ctrl-F is not bound here; the
//! front end owns the find prompt and feeds prompt keys through
//! [`find_prompt_step`].

use crate::{Action, Direction, FindStep, SelectMotion};
use core_events::{KeyCode, KeyEvent, KeyModifiers};

pub fn translate_key(key: &KeyEvent) -> Option<Action> {
    let ctrl = key.mods.contains(KeyModifiers::CTRL);
    let shift = key.mods.contains(KeyModifiers::SHIFT);
    let alt = key.mods.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Char(c) if ctrl => ctrl_chord(c),
        KeyCode::Char(_) if alt => None,
        KeyCode::Char(c) => Some(Action::InsertChar(c)),
        KeyCode::Tab => Some(Action::InsertChar('\t')),
        KeyCode::Enter => Some(Action::Newline),
        KeyCode::Backspace => Some(Action::DeleteBackward),
        KeyCode::Delete => Some(Action::DeleteForward),
        KeyCode::Esc => Some(Action::ClearSelection),
        KeyCode::PageUp => Some(Action::Page(Direction::Up)),
        KeyCode::PageDown => Some(Action::Page(Direction::Down)),
        KeyCode::Home if shift => Some(Action::Select(SelectMotion::LineStart)),
        KeyCode::End if shift => Some(Action::Select(SelectMotion::LineEnd)),
        KeyCode::Home => Some(Action::LineStart),
        KeyCode::End => Some(Action::LineEnd),
        KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down => {
            Some(arrow(key.code, ctrl, shift, alt))
        }
    }
}

fn ctrl_chord(c: char) -> Option<Action> {
    match c.to_ascii_lowercase() {
        'x' | 'q' => Some(Action::Quit),
        's' => Some(Action::Save),
        'z' => Some(Action::Undo),
        'y' => Some(Action::Redo),
        'a' => Some(Action::SelectAll),
        'l' => Some(Action::ClearSelection),
        'h' => Some(Action::DeleteBackward),
        _ => None,
    }
}

fn arrow(code: KeyCode, ctrl: bool, shift: bool, alt: bool) -> Action {
    let dir = match code {
        KeyCode::Left => Direction::Left,
        KeyCode::Right => Direction::Right,
        KeyCode::Up => Direction::Up,
        _ => Direction::Down,
    };
    let horizontal = matches!(dir, Direction::Left | Direction::Right);
    match (ctrl, shift) {
        (true, true) if horizontal => Action::Select(if dir == Direction::Left {
            SelectMotion::WordLeft
        } else {
            SelectMotion::WordRight
        }),
        (_, true) => Action::Select(select_step(dir)),
        (true, false) if horizontal => {
            if dir == Direction::Left {
                Action::LineStart
            } else {
                Action::LineEnd
            }
        }
        _ if alt && horizontal => Action::MoveWord(dir),
        _ => Action::Move(dir),
    }
}

fn select_step(dir: Direction) -> SelectMotion {
    match dir {
        Direction::Left => SelectMotion::Left,
        Direction::Right => SelectMotion::Right,
        Direction::Up => SelectMotion::Up,
        Direction::Down => SelectMotion::Down,
    }
}

/// Classify a key pressed while the find prompt is open. Arrows step through
/// matches, Enter keeps the match, Esc restores the cursor, anything else
/// edits the query and restarts the search.
pub fn find_prompt_step(key: &KeyEvent) -> FindStep {
    match key.code {
        KeyCode::Right | KeyCode::Down => FindStep::Next,
        KeyCode::Left | KeyCode::Up => FindStep::Previous,
        KeyCode::Enter => FindStep::Accept,
        KeyCode::Esc => FindStep::Cancel,
        _ => FindStep::Edit,
    }
}
