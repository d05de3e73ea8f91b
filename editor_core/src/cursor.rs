//! Cursor movement in character space.

use crate::buffer::TextBuffer;

/// The cursor position in character space.
///
/// `cy` may equal the row count, which places the cursor on the virtual
/// empty line after the last row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Column, in characters.
    pub cx: usize,
    /// Row index.
    pub cy: usize,
}

impl Cursor {
    /// Creates a cursor at the start of the buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cursor at the given position.
    pub fn at(cx: usize, cy: usize) -> Self {
        Self { cx, cy }
    }

    fn row_len(buffer: &TextBuffer, cy: usize) -> usize {
        buffer.row(cy).map_or(0, |row| row.len())
    }

    /// Moves left one character, wrapping to the end of the previous line.
    pub fn move_left(&mut self, buffer: &TextBuffer) {
        if self.cx > 0 {
            self.cx -= 1;
        } else if self.cy > 0 {
            self.cy -= 1;
            self.cx = Self::row_len(buffer, self.cy);
        }
        self.clamp(buffer);
    }

    /// Moves right one character, wrapping to the start of the next line.
    pub fn move_right(&mut self, buffer: &TextBuffer) {
        if let Some(row) = buffer.row(self.cy) {
            if self.cx < row.len() {
                self.cx += 1;
            } else {
                self.cy += 1;
                self.cx = 0;
            }
        }
        self.clamp(buffer);
    }

    /// Moves up one line.
    pub fn move_up(&mut self, buffer: &TextBuffer) {
        self.cy = self.cy.saturating_sub(1);
        self.clamp(buffer);
    }

    /// Moves down one line, at most onto the line after the last row.
    pub fn move_down(&mut self, buffer: &TextBuffer) {
        if self.cy < buffer.len() {
            self.cy += 1;
        }
        self.clamp(buffer);
    }

    /// Moves to the start of the current line.
    pub fn move_to_line_start(&mut self) {
        self.cx = 0;
    }

    /// Moves to the end of the current line.
    pub fn move_to_line_end(&mut self, buffer: &TextBuffer) {
        if let Some(row) = buffer.row(self.cy) {
            self.cx = row.len();
        }
    }

    /// Keeps `cx` within the current row.
    pub fn clamp(&mut self, buffer: &TextBuffer) {
        self.cy = self.cy.min(buffer.len());
        self.cx = self.cx.min(Self::row_len(buffer, self.cy));
    }
}
