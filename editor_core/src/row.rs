//! A single line of text with its rendered form and highlighting.

use crate::syntax::{highlight_line, render_chars, Highlight, SyntaxDescriptor};

/// One line of the document.
///
/// `render` and `highlight` are derived from `chars` and are kept current by
/// every mutation that goes through [`crate::TextBuffer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub(crate) index: usize,
    pub(crate) chars: Vec<char>,
    pub(crate) render: Vec<char>,
    pub(crate) highlight: Vec<Highlight>,
    pub(crate) open_comment: bool,
}

impl Row {
    pub(crate) fn new(index: usize, text: &str) -> Self {
        Self {
            index,
            chars: text.chars().collect(),
            render: Vec::new(),
            highlight: Vec::new(),
            open_comment: false,
        }
    }

    /// Position of this row in the document.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Raw characters, tabs included.
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Characters as displayed, with tabs expanded.
    pub fn render(&self) -> &[char] {
        &self.render
    }

    /// One highlight class per render character.
    pub fn highlight(&self) -> &[Highlight] {
        &self.highlight
    }

    /// Whether a multi-line comment is still open at the end of this row.
    pub fn open_comment(&self) -> bool {
        self.open_comment
    }

    /// Raw characters as a string.
    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    /// Converts a character-space column to a render-space column.
    pub fn cx_to_rx(&self, cx: usize, tab_stop: usize) -> usize {
        let tab_stop = tab_stop.max(1);
        let mut rx = 0;
        for &c in self.chars.iter().take(cx) {
            if c == '\t' {
                rx += (tab_stop - 1) - (rx % tab_stop);
            }
            rx += 1;
        }
        rx
    }

    /// Converts a render-space column back to a character-space column.
    pub fn rx_to_cx(&self, rx: usize, tab_stop: usize) -> usize {
        let tab_stop = tab_stop.max(1);
        let mut cur_rx = 0;
        for (cx, &c) in self.chars.iter().enumerate() {
            if c == '\t' {
                cur_rx += (tab_stop - 1) - (cur_rx % tab_stop);
            }
            cur_rx += 1;
            if cur_rx > rx {
                return cx;
            }
        }
        self.chars.len()
    }

    /// Rebuilds `render` from `chars`.
    pub(crate) fn update_render(&mut self, tab_stop: usize) {
        self.render = render_chars(&self.chars, tab_stop);
    }

    /// Rescans `highlight` with the state left by the previous row.
    /// Returns true if this row's own open-comment state changed.
    pub(crate) fn update_highlight(
        &mut self,
        prev_open_comment: bool,
        syntax: Option<&SyntaxDescriptor>,
    ) -> bool {
        let result = highlight_line(&self.render, prev_open_comment, syntax);
        self.highlight = result.highlight;
        let changed = self.open_comment != result.open_comment;
        self.open_comment = result.open_comment;
        changed
    }

    /// Replaces the highlight array wholesale, e.g. to undo a search overlay.
    /// Ignored if the length no longer matches the render.
    pub(crate) fn restore_highlight(&mut self, highlight: Vec<Highlight>) {
        if highlight.len() == self.render.len() {
            self.highlight = highlight;
        }
    }

    /// Marks `len` render characters from `at` with `class`.
    pub(crate) fn overlay(&mut self, at: usize, len: usize, class: Highlight) {
        let end = (at + len).min(self.highlight.len());
        if at < end {
            self.highlight[at..end].fill(class);
        }
    }
}
