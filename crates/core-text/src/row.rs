//! A single buffer row and its tab-expansion render cache.
//!
//! Raw columns (`cx`) index chars of [`Row::chars`]; display columns (`rx`)
//! index chars of [`Row::render`]. Each raw char occupies one display column
//! except a tab, which advances to the next multiple of [`TAB_STOP`].

use crate::syntax::Highlight;

/// Display width of a tab stop.
pub const TAB_STOP: usize = 4;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub(crate) idx: usize,
    pub(crate) chars: String,
    /// Raw length in chars (cached; `chars.chars().count()`).
    pub(crate) size: usize,
    pub(crate) render: String,
    pub(crate) render_size: usize,
    pub(crate) hl: Vec<Highlight>,
    pub(crate) hl_open_comment: bool,
}

impl Row {
    /// Build a row and its render cache. Highlighting is left to the buffer,
    /// which knows the previous row's comment state.
    pub(crate) fn new(idx: usize, text: impl Into<String>) -> Self {
        let mut row = Self {
            idx,
            chars: text.into(),
            ..Self::default()
        };
        row.update_render();
        row
    }

    /// Position of this row in its buffer.
    pub fn idx(&self) -> usize {
        self.idx
    }

    /// Raw text.
    pub fn chars(&self) -> &str {
        &self.chars
    }

    /// Tab-expanded display text.
    pub fn render(&self) -> &str {
        &self.render
    }

    /// Highlight classes, one per display column of [`Row::render`].
    pub fn highlight(&self) -> &[Highlight] {
        &self.hl
    }

    /// True when a multi-line comment is still open at the end of this row.
    pub fn has_open_comment(&self) -> bool {
        self.hl_open_comment
    }

    /// Raw length in chars.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Display length in columns.
    pub fn render_len(&self) -> usize {
        self.render_size
    }

    pub fn char_at(&self, cx: usize) -> Option<char> {
        self.chars.chars().nth(cx)
    }

    /// Display column of raw column `cx`. Columns past the end saturate at the
    /// row's display length.
    pub fn cx_to_rx(&self, cx: usize) -> usize {
        let mut rx = 0;
        for ch in self.chars.chars().take(cx) {
            if ch == '\t' {
                rx += (TAB_STOP - 1) - (rx % TAB_STOP);
            }
            rx += 1;
        }
        rx
    }

    /// First raw column whose cumulative display width exceeds `rx`, or the
    /// raw length when `rx` lies beyond the rendered row.
    pub fn rx_to_cx(&self, rx: usize) -> usize {
        let mut cur_rx = 0;
        for (cx, ch) in self.chars.chars().enumerate() {
            if ch == '\t' {
                cur_rx += (TAB_STOP - 1) - (cur_rx % TAB_STOP);
            }
            cur_rx += 1;
            if cur_rx > rx {
                return cx;
            }
        }
        self.size
    }

    /// Byte offset of raw column `cx`; `cx == len()` maps to the end.
    pub(crate) fn byte_offset(&self, cx: usize) -> usize {
        self.chars
            .char_indices()
            .nth(cx)
            .map_or(self.chars.len(), |(byte, _)| byte)
    }

    pub(crate) fn insert_char(&mut self, cx: usize, ch: char) {
        let at = self.byte_offset(cx);
        self.chars.insert(at, ch);
        self.update_render();
    }

    pub(crate) fn insert_str(&mut self, cx: usize, text: &str) {
        let at = self.byte_offset(cx);
        self.chars.insert_str(at, text);
        self.update_render();
    }

    pub(crate) fn remove_char(&mut self, cx: usize) -> char {
        let at = self.byte_offset(cx);
        let ch = self.chars.remove(at);
        self.update_render();
        ch
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        self.chars.push_str(text);
        self.update_render();
    }

    pub(crate) fn split_off(&mut self, cx: usize) -> String {
        let at = self.byte_offset(cx);
        let tail = self.chars.split_off(at);
        self.update_render();
        tail
    }

    pub(crate) fn drain(&mut self, from: usize, to: usize) -> String {
        let start = self.byte_offset(from);
        let end = self.byte_offset(to);
        let removed: String = self.chars.drain(start..end).collect();
        self.update_render();
        removed
    }

    /// Regenerate the render cache from `chars`. The highlight array is
    /// resized to match but not reclassified.
    pub(crate) fn update_render(&mut self) {
        let mut render = String::with_capacity(self.chars.len());
        let mut width = 0;
        let mut size = 0;
        for ch in self.chars.chars() {
            size += 1;
            if ch == '\t' {
                render.push(' ');
                width += 1;
                while width % TAB_STOP != 0 {
                    render.push(' ');
                    width += 1;
                }
            } else {
                render.push(ch);
                width += 1;
            }
        }
        self.size = size;
        self.render = render;
        self.render_size = width;
        self.hl.resize(width, Highlight::Normal);
    }
}
