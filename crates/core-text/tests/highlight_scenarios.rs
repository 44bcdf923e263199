use core_text::{Highlight, SyntaxMode, TextBuffer};
use pretty_assertions::assert_eq;

fn c_file(lines: &[&str]) -> TextBuffer {
    let mut b = TextBuffer::from_lines(lines.iter().copied());
    assert!(b.select_syntax("main.c").is_some());
    b
}

#[test]
fn int_declaration() {
    let b = c_file(&["int x;"]);
    let row = b.row(0).unwrap();
    assert_eq!(row.render(), "int x;");
    assert_eq!(
        row.highlight(),
        &[
            Highlight::Keyword2,
            Highlight::Keyword2,
            Highlight::Keyword2,
            Highlight::Normal,
            Highlight::Normal,
            Highlight::Normal,
        ]
    );
    assert!(!row.has_open_comment());
}

#[test]
fn unterminated_comment_reaches_every_row() {
    let n = 20_000;
    let mut b = c_file(&vec!["int y = 2;"; n]);
    b.row_insert_text(0, 0, "/* ").unwrap();
    assert!(b.rows().iter().all(|r| r.has_open_comment()));
    assert!(
        b.rows()
            .iter()
            .all(|r| r.highlight().iter().all(|h| *h == Highlight::Comment))
    );

    b.row_append_text(n / 2, " */").unwrap();
    assert!(!b.rows()[n / 2].has_open_comment());
    assert!(b.rows()[n / 2 + 1..].iter().all(|r| !r.has_open_comment()));
    assert_eq!(b.rows()[n - 1].highlight()[0], Highlight::Keyword2);
}

#[test]
fn deleting_a_row_inside_a_comment_keeps_neighbours() {
    let mut b = c_file(&["/* start", "middle", "end */", "int z;"]);
    assert_eq!(b.delete_row(1).unwrap(), "middle");
    assert_eq!(b.lines(), vec!["/* start", "end */", "int z;"]);
    assert!(b.rows()[0].has_open_comment());
    assert!(!b.rows()[1].has_open_comment());
    assert_eq!(b.rows()[2].highlight()[0], Highlight::Keyword2);
}

#[test]
fn rust_and_python_modes() {
    let mut b = TextBuffer::from_lines(["let n: u32 = 7; // seven"]);
    b.select_syntax("lib.rs");
    let hl = b.row(0).unwrap().highlight();
    assert_eq!(&hl[..3], &[Highlight::Keyword1; 3]);
    assert_eq!(&hl[7..10], &[Highlight::Keyword2; 3]);
    assert_eq!(hl[13], Highlight::Number);
    assert_eq!(hl[16], Highlight::Comment);

    let mut b = TextBuffer::from_lines(["def f(): # x"]);
    b.set_syntax(SyntaxMode::by_name("python"));
    let hl = b.row(0).unwrap().highlight();
    assert_eq!(&hl[..3], &[Highlight::Keyword1; 3]);
    assert_eq!(hl[9], Highlight::Comment);
}

#[test]
fn disabling_syntax_clears_classes() {
    let mut b = c_file(&["/* x", "int y;"]);
    b.set_syntax(None);
    assert!(b.rows().iter().all(|r| !r.has_open_comment()));
    assert!(
        b.rows()
            .iter()
            .all(|r| r.highlight().iter().all(|h| *h == Highlight::Normal))
    );
}
