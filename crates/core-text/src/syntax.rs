//! Lexical syntax highlighting.
//!
//! A [`SyntaxMode`] is a static description of one language: file match
//! patterns, keywords, comment markers and feature flags. [`scan`] classifies
//! one rendered row given the comment state inherited from the row above and
//! returns the state to hand to the row below. Propagation across rows lives
//! in [`crate::TextBuffer`].

use bitflags::bitflags;

/// Per-display-column classification handed to the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Highlight {
    #[default]
    Normal,
    Comment,
    Keyword1,
    Keyword2,
    String,
    Number,
    /// Transient search match overlay; never produced by [`scan`].
    Match,
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SyntaxFlags: u8 {
        const NUMBERS = 1 << 0;
        const STRINGS = 1 << 1;
    }
}

/// Static language descriptor.
///
/// Keywords ending in `|` are "type" keywords and classify as
/// [`Highlight::Keyword2`]; the marker itself is not part of the keyword.
#[derive(Debug, PartialEq, Eq)]
pub struct SyntaxMode {
    pub file_type: &'static str,
    /// Entries starting with `.` match the filename extension; others match
    /// anywhere in the filename.
    pub file_match: &'static [&'static str],
    pub keywords: &'static [&'static str],
    pub single_line_comment: Option<&'static str>,
    pub multi_line_comment: Option<(&'static str, &'static str)>,
    pub flags: SyntaxFlags,
}

const C_KEYWORDS: &[&str] = &[
    "switch", "if", "while", "for", "break", "continue", "return", "else", "struct", "union",
    "typedef", "static", "enum", "class", "case", "int|", "long|", "double|", "float|", "char|",
    "unsigned|", "signed|", "void|", "short|", "auto|", "const|", "extern|", "register|",
    "volatile|",
];

const RUST_KEYWORDS: &[&str] = &[
    "as", "break", "const", "continue", "crate", "else", "enum", "extern", "fn", "for", "if",
    "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return", "self",
    "static", "struct", "super", "trait", "type", "unsafe", "use", "where", "while", "i8|", "i16|",
    "i32|", "i64|", "i128|", "isize|", "u8|", "u16|", "u32|", "u64|", "u128|", "usize|", "f32|",
    "f64|", "bool|", "char|", "str|", "String|", "Self|", "Option|", "Result|", "Vec|", "Box|",
];

const PYTHON_KEYWORDS: &[&str] = &[
    "and", "as", "assert", "break", "class", "continue", "def", "del", "elif", "else", "except",
    "finally", "for", "from", "global", "if", "import", "in", "is", "lambda", "nonlocal", "not",
    "or", "pass", "raise", "return", "try", "while", "with", "yield", "None|", "True|", "False|",
    "int|", "float|", "str|", "bool|", "list|", "dict|", "tuple|", "set|", "bytes|",
];

const C_LIKE: SyntaxFlags = SyntaxFlags::NUMBERS.union(SyntaxFlags::STRINGS);

/// Built-in highlight database, searched in order.
pub static HLDB: &[SyntaxMode] = &[
    SyntaxMode {
        file_type: "c",
        file_match: &[".c", ".h", ".cpp"],
        keywords: C_KEYWORDS,
        single_line_comment: Some("//"),
        multi_line_comment: Some(("/*", "*/")),
        flags: C_LIKE,
    },
    SyntaxMode {
        file_type: "rust",
        file_match: &[".rs"],
        keywords: RUST_KEYWORDS,
        single_line_comment: Some("//"),
        multi_line_comment: Some(("/*", "*/")),
        flags: C_LIKE,
    },
    SyntaxMode {
        file_type: "python",
        file_match: &[".py"],
        keywords: PYTHON_KEYWORDS,
        single_line_comment: Some("#"),
        multi_line_comment: None,
        flags: C_LIKE,
    },
];

impl SyntaxMode {
    /// Pick the first database entry whose patterns match `filename`.
    pub fn for_filename(filename: &str) -> Option<&'static SyntaxMode> {
        let ext = filename.rfind('.').map(|dot| &filename[dot..]);
        HLDB.iter().find(|mode| {
            mode.file_match.iter().any(|pattern| {
                if pattern.starts_with('.') {
                    ext == Some(*pattern)
                } else {
                    filename.contains(pattern)
                }
            })
        })
    }

    /// Look a mode up by its file type name (e.g. `"c"`).
    pub fn by_name(file_type: &str) -> Option<&'static SyntaxMode> {
        HLDB.iter().find(|mode| mode.file_type == file_type)
    }
}

/// Word boundary test shared by the highlighter and word-wise motions.
pub fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == '\0' || ",.()+-/*=~%<>[];".contains(c)
}

/// Classify one rendered row.
///
/// `open_comment` is the continuation state inherited from the previous row.
/// Returns the highlight array (one entry per char of `render`) and whether a
/// multi-line comment is still open at the end of the row.
pub fn scan(render: &str, syntax: &SyntaxMode, open_comment: bool) -> (Vec<Highlight>, bool) {
    let text: Vec<char> = render.chars().collect();
    let mut hl = vec![Highlight::Normal; text.len()];

    let single = syntax.single_line_comment.filter(|m| !m.is_empty());
    let multi = syntax
        .multi_line_comment
        .filter(|(start, end)| !start.is_empty() && !end.is_empty());

    let mut prev_sep = true;
    let mut in_string: Option<char> = None;
    let mut in_comment = open_comment;
    let mut i = 0;

    while i < text.len() {
        let c = text[i];
        let prev_hl = if i > 0 { hl[i - 1] } else { Highlight::Normal };

        if let Some(marker) = single
            && in_string.is_none()
            && !in_comment
            && matches_at(&text, i, marker)
        {
            hl[i..].fill(Highlight::Comment);
            break;
        }

        if let Some((start, end)) = multi
            && in_string.is_none()
        {
            if in_comment {
                hl[i] = Highlight::Comment;
                if matches_at(&text, i, end) {
                    let len = end.chars().count();
                    hl[i..i + len].fill(Highlight::Comment);
                    i += len;
                    in_comment = false;
                    prev_sep = true;
                } else {
                    i += 1;
                }
                continue;
            } else if matches_at(&text, i, start) {
                let len = start.chars().count();
                hl[i..i + len].fill(Highlight::Comment);
                i += len;
                in_comment = true;
                continue;
            }
        }

        if syntax.flags.contains(SyntaxFlags::STRINGS) {
            if let Some(quote) = in_string {
                hl[i] = Highlight::String;
                if c == '\\' && i + 1 < text.len() {
                    hl[i + 1] = Highlight::String;
                    i += 2;
                    continue;
                }
                if c == quote {
                    in_string = None;
                }
                i += 1;
                prev_sep = true;
                continue;
            } else if c == '"' || c == '\'' {
                in_string = Some(c);
                hl[i] = Highlight::String;
                i += 1;
                continue;
            }
        }

        if syntax.flags.contains(SyntaxFlags::NUMBERS)
            && ((c.is_ascii_digit() && (prev_sep || prev_hl == Highlight::Number))
                || (c == '.' && prev_hl == Highlight::Number))
        {
            hl[i] = Highlight::Number;
            i += 1;
            prev_sep = false;
            continue;
        }

        if prev_sep && let Some((len, class)) = match_keyword(&text, i, syntax.keywords) {
            hl[i..i + len].fill(class);
            i += len;
            prev_sep = false;
            continue;
        }

        prev_sep = is_separator(c);
        i += 1;
    }

    (hl, in_comment)
}

fn matches_at(text: &[char], at: usize, pattern: &str) -> bool {
    !pattern.is_empty()
        && pattern
            .chars()
            .enumerate()
            .all(|(offset, pc)| text.get(at + offset) == Some(&pc))
}

/// Longest keyword starting at `at` and followed by a separator (or the end
/// of the row).
fn match_keyword(text: &[char], at: usize, keywords: &[&str]) -> Option<(usize, Highlight)> {
    keywords
        .iter()
        .filter_map(|entry| {
            let (word, class) = match entry.strip_suffix('|') {
                Some(word) => (word, Highlight::Keyword2),
                None => (*entry, Highlight::Keyword1),
            };
            let len = word.chars().count();
            let boundary = text.get(at + len).is_none_or(|c| is_separator(*c));
            (matches_at(text, at, word) && boundary).then_some((len, class))
        })
        .max_by_key(|(len, _)| *len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use Highlight::*;

    fn c_mode() -> &'static SyntaxMode {
        SyntaxMode::by_name("c").expect("c mode present")
    }

    #[test]
    fn type_keyword_is_keyword2() {
        let (hl, open) = scan("int x;", c_mode(), false);
        assert_eq!(hl, vec![Keyword2, Keyword2, Keyword2, Normal, Normal, Normal]);
        assert!(!open);
    }

    #[test]
    fn keyword_needs_trailing_separator() {
        let (hl, _) = scan("interval", c_mode(), false);
        assert!(hl.iter().all(|h| *h == Normal));
        let (hl, _) = scan("if(x)", c_mode(), false);
        assert_eq!(&hl[..2], &[Keyword1, Keyword1]);
    }

    #[test]
    fn keyword_at_end_of_row_matches() {
        let (hl, _) = scan("return", c_mode(), false);
        assert!(hl.iter().all(|h| *h == Keyword1));
    }

    #[test]
    fn single_line_comment_runs_to_end() {
        let (hl, open) = scan("x = 1; // note", c_mode(), false);
        assert_eq!(&hl[7..], &[Comment; 7]);
        assert_eq!(hl[4], Number);
        assert!(!open);
    }

    #[test]
    fn multi_line_comment_opens_and_closes() {
        let (hl, open) = scan("a /* b", c_mode(), false);
        assert!(open);
        assert_eq!(&hl[2..], &[Comment; 4]);

        let (hl, open) = scan("b */ if", c_mode(), true);
        assert!(!open);
        assert_eq!(&hl[..4], &[Comment; 4]);
        assert_eq!(&hl[5..], &[Keyword1, Keyword1]);
    }

    #[test]
    fn comment_markers_inside_strings_are_text() {
        let (hl, open) = scan("\"/* //\" 1", c_mode(), false);
        assert!(!open);
        assert_eq!(&hl[..7], &[String; 7]);
        assert_eq!(hl[8], Number);
    }

    #[test]
    fn escaped_quote_does_not_close_string() {
        let (hl, _) = scan(r#"'\'' x"#, c_mode(), false);
        assert_eq!(&hl[..4], &[String; 4]);
        assert_eq!(hl[5], Normal);
    }

    #[test]
    fn numbers_need_separator_before() {
        let (hl, _) = scan("x1 3.14", c_mode(), false);
        assert_eq!(hl[1], Normal);
        assert_eq!(&hl[3..], &[Number; 4]);
    }

    #[test]
    fn filename_selects_mode() {
        assert_eq!(SyntaxMode::for_filename("main.c").map(|m| m.file_type), Some("c"));
        assert_eq!(SyntaxMode::for_filename("lib.rs").map(|m| m.file_type), Some("rust"));
        assert_eq!(SyntaxMode::for_filename("notes.txt"), None);
        assert_eq!(SyntaxMode::for_filename("Makefile"), None);
    }

    #[test]
    fn separators() {
        for c in [' ', '\t', '\0', ',', ';', '(', ']', '%'] {
            assert!(is_separator(c), "{c:?} should separate");
        }
        for c in ['a', '_', '1', '"', '{'] {
            assert!(!is_separator(c), "{c:?} should not separate");
        }
    }
}
