use core_state::{EditorState, FindStep, StatusKind};
use core_text::{Highlight, Position, TextBuffer};

fn state() -> EditorState {
    let mut st = EditorState::new(TextBuffer::from_lines(["alpha", "beta", "alphabet"]));
    st.set_cursor(Position::new(1, 2));
    st
}

fn matched(st: &EditorState, row: usize) -> usize {
    st.buffer().rows()[row]
        .highlight()
        .iter()
        .filter(|h| **h == Highlight::Match)
        .count()
}

#[test]
fn steps_cycle_through_matches() {
    let mut st = state();
    assert_eq!(st.find_step("alpha", FindStep::Edit), Some(Position::new(0, 0)));
    assert_eq!(matched(&st, 0), 5);
    assert_eq!(st.find_step("alpha", FindStep::Next), Some(Position::new(2, 0)));
    assert_eq!(matched(&st, 0), 0, "previous overlay restored");
    assert_eq!(matched(&st, 2), 5);
    assert_eq!(st.find_step("alpha", FindStep::Next), Some(Position::new(0, 0)));
    assert_eq!(st.find_step("alpha", FindStep::Previous), Some(Position::new(2, 0)));
}

#[test]
fn accept_keeps_cursor_and_clears_overlay() {
    let mut st = state();
    st.find_step("bet", FindStep::Edit);
    assert_eq!(st.cursor(), Position::new(1, 0));
    st.find_step("bet", FindStep::Accept);
    assert!(st.find_session().is_none());
    assert_eq!(st.cursor(), Position::new(1, 0));
    assert_eq!(matched(&st, 1), 0);
    assert!(!st.is_dirty());
    assert_eq!(st.undo_depth(), 0);
}

#[test]
fn cancel_restores_cursor_and_viewport() {
    let lines: Vec<String> = (0..100).map(|i| format!("line {i}")).collect();
    let mut st = EditorState::new(TextBuffer::from_lines(lines));
    st.set_viewport_size(10, 40);
    st.set_cursor(Position::new(3, 2));
    let viewport = st.viewport();

    assert_eq!(st.find_step("line 77", FindStep::Edit), Some(Position::new(77, 0)));
    assert_eq!(st.viewport().row_offset, 77);
    st.find_step("line 77", FindStep::Cancel);
    assert_eq!(st.cursor(), Position::new(3, 2));
    assert_eq!(st.viewport(), viewport);
    assert_eq!(matched(&st, 77), 0);
}

#[test]
fn editing_ends_the_session() {
    let mut st = state();
    st.find_step("beta", FindStep::Edit);
    st.insert_char('X').unwrap();
    assert!(st.find_session().is_none());
    assert_eq!(st.buffer().lines()[1], "Xbeta");
    assert_eq!(matched(&st, 1), 0);
}

#[test]
fn miss_reports_status() {
    let mut st = state();
    assert_eq!(st.find_step("zeta", FindStep::Edit), None);
    assert_eq!(
        st.status().map(|s| s.kind.clone()),
        Some(StatusKind::NoMatch { query: "zeta".into() })
    );
    assert_eq!(st.cursor(), Position::new(1, 2));
}
