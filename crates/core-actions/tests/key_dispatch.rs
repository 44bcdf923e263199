mod common;
use common::*;

use core_events::{KeyCode, KeyEvent, KeyModifiers};
use core_state::StatusKind;
use core_text::Position;
use pretty_assertions::assert_eq;

fn plain(c: KeyCode) -> KeyEvent {
    KeyEvent::plain(c)
}

#[test]
fn typing_then_two_undos_empties_the_row() {
    let mut h = Harness::new(&[""]);
    h.keys(&[plain(KeyCode::Char('a')), plain(KeyCode::Char('b'))]);
    assert_eq!(h.lines(), vec!["ab"]);
    h.keys(&[KeyEvent::ctrl('z'), KeyEvent::ctrl('z')]);
    assert_eq!(h.lines(), vec![""]);
    assert_eq!(h.state.cursor(), Position::new(0, 0));
    h.key(KeyEvent::ctrl('z'));
    assert_eq!(
        h.state.status().map(|s| s.kind.clone()),
        Some(StatusKind::NothingToUndo)
    );
    h.key(KeyEvent::ctrl('y'));
    assert_eq!(h.lines(), vec!["a"]);
}

#[test]
fn shift_arrows_select_and_backspace_removes_selection() {
    let mut h = Harness::new(&["hello", "world"]);
    h.state.set_cursor(Position::new(1, 2));
    h.keys(&[KeyEvent::shift(KeyCode::Up), KeyEvent::shift(KeyCode::Right)]);
    assert_eq!(h.state.cursor(), Position::new(0, 3));
    h.key(plain(KeyCode::Backspace));
    assert_eq!(h.lines(), vec!["helrld"]);
    assert_eq!(h.state.cursor(), Position::new(0, 3));
    assert!(!h.state.selection().is_active());
    h.key(KeyEvent::ctrl('z'));
    assert_eq!(h.lines(), vec!["hello", "world"]);
}

#[test]
fn typing_over_a_selection_replaces_it() {
    let mut h = Harness::new(&["abcdef"]);
    h.state.set_cursor(Position::new(0, 1));
    let word_right = KeyEvent::new(KeyCode::Right, KeyModifiers::CTRL | KeyModifiers::SHIFT);
    h.key(word_right);
    h.key(plain(KeyCode::Char('X')));
    assert_eq!(h.lines(), vec!["aX"]);
    assert_eq!(h.state.undo_depth(), 2);
}

#[test]
fn plain_motion_and_escape_clear_the_selection() {
    let mut h = Harness::new(&["abc"]);
    h.key(KeyEvent::shift(KeyCode::Right));
    assert!(h.state.selection().is_active());
    h.key(plain(KeyCode::Right));
    assert!(!h.state.selection().is_active());
    assert_eq!(h.state.cursor(), Position::new(0, 2));

    h.key(KeyEvent::shift(KeyCode::Home));
    assert!(h.state.selection().is_active());
    h.key(plain(KeyCode::Esc));
    assert!(!h.state.selection().is_active());
    assert_eq!(h.lines(), vec!["abc"]);
}

#[test]
fn select_all_then_delete_leaves_one_empty_row() {
    let mut h = Harness::new(&["one", "two", "three"]);
    h.key(KeyEvent::ctrl('a'));
    h.key(plain(KeyCode::Delete));
    assert_eq!(h.lines(), vec![""]);
    assert_eq!(h.state.undo_depth(), 1);
    h.key(KeyEvent::ctrl('z'));
    assert_eq!(h.lines(), vec!["one", "two", "three"]);
}

#[test]
fn ctrl_arrows_jump_to_line_ends() {
    let mut h = Harness::new(&["some text"]);
    h.key(KeyEvent::new(KeyCode::Right, KeyModifiers::CTRL));
    assert_eq!(h.state.cursor(), Position::new(0, 9));
    h.key(KeyEvent::new(KeyCode::Left, KeyModifiers::CTRL));
    assert_eq!(h.state.cursor(), Position::new(0, 0));
}

#[test]
fn noop_delete_needs_no_redraw() {
    let mut h = Harness::new(&["x"]);
    let res = h.key(plain(KeyCode::Backspace));
    assert!(!res.dirty);
    assert_eq!(h.state.undo_depth(), 0);
}
