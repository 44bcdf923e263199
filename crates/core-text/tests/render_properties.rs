//! Property tests for tab expansion and raw/display column conversion.

use core_text::{TAB_STOP, TextBuffer};
use proptest::prelude::*;

fn line() -> impl Strategy<Value = String> {
    proptest::collection::vec(prop_oneof![Just('\t'), Just('a'), Just(' '), Just('é'), Just('x')], 0..40)
        .prop_map(|chars| chars.into_iter().collect())
}

/// One char-level edit; the index is reduced modulo the row length.
#[derive(Debug, Clone)]
enum RowEdit {
    Insert(usize, char),
    Delete(usize),
}

fn row_edit() -> impl Strategy<Value = RowEdit> {
    prop_oneof![
        (any::<usize>(), prop_oneof![Just('\t'), Just('a'), Just(' '), Just('é')])
            .prop_map(|(at, ch)| RowEdit::Insert(at, ch)),
        any::<usize>().prop_map(RowEdit::Delete),
    ]
}

proptest! {
    // The render invariants hold after every step of an edit sequence, not
    // just for freshly built rows.
    #[test]
    fn render_tracks_char_edits(start in line(), edits in proptest::collection::vec(row_edit(), 0..60)) {
        let mut b = TextBuffer::from_lines([start]);
        for edit in edits {
            let len = b.row_len(0).unwrap();
            match edit {
                RowEdit::Insert(at, ch) => b.row_insert_char(0, at % (len + 1), ch).unwrap(),
                RowEdit::Delete(at) if len > 0 => {
                    b.row_delete_char(0, at % len).unwrap();
                }
                RowEdit::Delete(_) => {}
            }
            let row = b.row(0).unwrap();
            let text = b.row_text(0).unwrap();
            prop_assert!(row.render_len() >= row.len());
            prop_assert_eq!(row.render_len() == row.len(), !text.contains('\t'));
            prop_assert_eq!(row.highlight().len(), row.render_len());
            prop_assert_eq!(row.cx_to_rx(row.len()), row.render_len());
        }
    }

    // Render is at least as long as the raw text; equal exactly when no tabs.
    #[test]
    fn render_never_shrinks(text in line()) {
        let b = TextBuffer::from_lines([text.clone()]);
        let row = b.row(0).unwrap();
        prop_assert!(row.render_len() >= row.len());
        prop_assert_eq!(row.render_len() == row.len(), !text.contains('\t'));
        prop_assert_eq!(row.highlight().len(), row.render_len());
    }

    // Every tab ends on a tab stop.
    #[test]
    fn tabs_end_on_stops(text in line()) {
        let b = TextBuffer::from_lines([text.clone()]);
        let row = b.row(0).unwrap();
        for (cx, ch) in text.chars().enumerate() {
            if ch == '\t' {
                prop_assert_eq!(row.cx_to_rx(cx + 1) % TAB_STOP, 0);
            }
        }
    }

    #[test]
    fn cx_to_rx_is_monotonic(text in line()) {
        let b = TextBuffer::from_lines([text]);
        let row = b.row(0).unwrap();
        for cx in 0..row.len() {
            prop_assert!(row.cx_to_rx(cx) < row.cx_to_rx(cx + 1));
        }
        prop_assert_eq!(row.cx_to_rx(row.len()), row.render_len());
    }

    #[test]
    fn rx_to_cx_recovers_cx(text in line()) {
        let b = TextBuffer::from_lines([text]);
        let row = b.row(0).unwrap();
        for cx in 0..=row.len() {
            prop_assert_eq!(row.rx_to_cx(row.cx_to_rx(cx)), cx);
        }
    }
}
