//! Frame composition into terminal escape sequences.
//!
//! A frame is built in memory and written with a single call so the
//! terminal never shows a half-drawn screen.

use std::io::{self, Write};
use termpad_core::{Editor, Highlight, Theme};

/// Composes frames for the editor.
pub struct Renderer {
    /// Colors for highlight classes.
    pub theme: Theme,
    /// Frame being composed.
    buffer: Vec<u8>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

impl Renderer {
    /// Creates a new renderer.
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            buffer: Vec::new(),
        }
    }

    /// Composes a full frame. Call [`Editor::scroll`] first.
    pub fn render(&mut self, editor: &Editor, message: Option<&str>) -> &[u8] {
        self.buffer.clear();
        self.buffer.extend_from_slice(b"\x1b[?25l\x1b[H");

        self.draw_rows(editor);
        self.draw_status_bar(editor);
        self.draw_message_bar(editor, message);

        let cursor = editor.cursor();
        let y = cursor.cy.saturating_sub(editor.row_offset()) + 1;
        let x = editor.rx().saturating_sub(editor.col_offset()) + 1;
        self.push(&format!("\x1b[{};{}H", y, x));
        self.buffer.extend_from_slice(b"\x1b[?25h");
        &self.buffer
    }

    /// Composes a frame and writes it out.
    pub fn refresh<W: Write>(
        &mut self,
        editor: &Editor,
        message: Option<&str>,
        output: &mut W,
    ) -> io::Result<()> {
        let frame = self.render(editor, message);
        output.write_all(frame)?;
        output.flush()
    }

    fn push(&mut self, s: &str) {
        self.buffer.extend_from_slice(s.as_bytes());
    }

    fn push_char(&mut self, c: char) {
        let mut utf8 = [0u8; 4];
        self.buffer
            .extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
    }

    fn draw_rows(&mut self, editor: &Editor) {
        let buffer = editor.buffer();
        let cols = editor.screen_cols();

        for y in 0..editor.screen_rows() {
            let file_row = y + editor.row_offset();
            match buffer.row(file_row) {
                Some(row) => {
                    let start = editor.col_offset().min(row.render().len());
                    let end = (start + cols).min(row.render().len());
                    self.draw_line(&row.render()[start..end], &row.highlight()[start..end]);
                }
                None if buffer.is_empty() && y == editor.screen_rows() / 3 => {
                    self.draw_welcome(cols);
                }
                None => self.buffer.push(b'~'),
            }
            self.buffer.extend_from_slice(b"\x1b[K\r\n");
        }
    }

    fn draw_welcome(&mut self, cols: usize) {
        let welcome = format!("Termpad editor -- version {}", env!("CARGO_PKG_VERSION"));
        let welcome: String = welcome.chars().take(cols).collect();
        let mut padding = (cols - welcome.len()) / 2;
        if padding > 0 {
            self.buffer.push(b'~');
            padding -= 1;
        }
        self.buffer.extend(std::iter::repeat(b' ').take(padding));
        self.push(&welcome);
    }

    /// Draws one visible row slice, switching color only when the class
    /// changes.
    fn draw_line(&mut self, render: &[char], highlight: &[Highlight]) {
        let mut current: Option<u8> = None;

        for (&c, &hl) in render.iter().zip(highlight) {
            if c.is_control() {
                let code = c as u32;
                let symbol = if code <= 26 {
                    char::from(b'@' + code as u8)
                } else {
                    '?'
                };
                self.push("\x1b[7m");
                self.push_char(symbol);
                self.push("\x1b[m");
                if let Some(color) = current {
                    self.push(&format!("\x1b[{}m", color));
                }
            } else if hl == Highlight::Normal {
                if current.take().is_some() {
                    self.push("\x1b[39m");
                }
                self.push_char(c);
            } else {
                let color = self.theme.color(hl);
                if current != Some(color) {
                    current = Some(color);
                    self.push(&format!("\x1b[{}m", color));
                }
                self.push_char(c);
            }
        }
        self.push("\x1b[39m");
    }

    fn draw_status_bar(&mut self, editor: &Editor) {
        let cols = editor.screen_cols();
        let lines = editor.buffer().len();
        let name = editor
            .file_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "[No Name]".to_string());
        let name: String = name.chars().take(20).collect();
        let modified = if editor.is_modified() { "(modified)" } else { "" };

        let left = format!("{} - {} lines {}", name, lines, modified);
        let right = format!(
            "{} | {}/{}",
            editor.syntax().map_or("no ft", |s| s.filetype),
            editor.cursor().cy + 1,
            lines
        );

        self.push("\x1b[7m");
        let left: String = left.chars().take(cols).collect();
        let mut len = left.chars().count();
        self.push(&left);
        let right_len = right.chars().count();
        while len < cols {
            if cols - len == right_len {
                self.push(&right);
                break;
            }
            self.buffer.push(b' ');
            len += 1;
        }
        self.push("\x1b[m\r\n");
    }

    fn draw_message_bar(&mut self, editor: &Editor, message: Option<&str>) {
        self.push("\x1b[K");
        if let Some(message) = message {
            let message: String = message.chars().take(editor.screen_cols()).collect();
            self.push(&message);
        }
    }
}
