use core_state::EditorState;
use core_text::{Highlight, Position, TextBuffer};

fn c_state(lines: &[&str]) -> EditorState {
    let mut st = EditorState::new(TextBuffer::from_lines(lines.iter().copied()));
    st.set_file_name("test.c");
    st.apply_syntax(true);
    st
}

fn all_comment(st: &EditorState, row: usize) -> bool {
    st.buffer().rows()[row]
        .highlight()
        .iter()
        .all(|h| *h == Highlight::Comment)
}

#[test]
fn typing_a_comment_opener_and_undoing_it() {
    let mut st = c_state(&["x", "int y;", "z"]);
    st.insert_char('/').unwrap();
    st.insert_char('*').unwrap();
    assert!(all_comment(&st, 1));
    assert!(st.buffer().rows().iter().all(|r| r.has_open_comment()));

    st.undo().unwrap();
    st.undo().unwrap();
    assert!(st.buffer().rows().iter().all(|r| !r.has_open_comment()));
    assert_eq!(st.buffer().rows()[1].highlight()[0], Highlight::Keyword2);
}

#[test]
fn deleting_a_selection_that_held_the_closer_reopens_below() {
    let mut st = c_state(&["/* a", "b */", "c", "d"]);
    st.set_selection(Position::new(0, 4), Position::new(1, 4));
    st.delete_selection().unwrap();
    assert_eq!(st.buffer().lines(), vec!["/* a", "c", "d"]);
    assert!(all_comment(&st, 1));
    assert!(all_comment(&st, 2));

    st.undo().unwrap();
    assert!(!st.buffer().rows()[2].has_open_comment());
    assert_eq!(st.buffer().rows()[2].highlight(), &[Highlight::Normal]);
}

#[test]
fn joining_rows_recomputes_following_state() {
    let mut st = c_state(&["\"x", "/* y", "z"]);
    assert!(st.buffer().rows()[2].has_open_comment());
    st.set_cursor(Position::new(1, 0));
    st.delete_backward().unwrap();
    assert_eq!(st.buffer().lines(), vec!["\"x/* y", "z"]);
    assert!(!st.buffer().rows()[0].has_open_comment());
    assert!(!st.buffer().rows()[1].has_open_comment());
}
