//! Main editor logic.

use crate::buffer::TextBuffer;
use crate::config::Config;
use crate::cursor::Cursor;
use crate::error::{Error, Result};
use crate::input::Key;
use crate::search::Search;
use crate::syntax::{self, SyntaxDescriptor};
use std::io;
use std::path::{Path, PathBuf};

/// Cursor and scroll state, captured so an interactive search can be undone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub cursor: Cursor,
    pub row_offset: usize,
    pub col_offset: usize,
}

/// The editing session: one buffer plus everything needed to view it.
#[derive(Debug, Clone)]
pub struct Editor {
    /// The text buffer.
    buffer: TextBuffer,
    /// The cursor, in character space.
    cursor: Cursor,
    /// Cursor column in render space, derived by [`Editor::scroll`].
    rx: usize,
    /// First visible row.
    row_offset: usize,
    /// First visible render column.
    col_offset: usize,
    /// Number of text rows on screen.
    screen_rows: usize,
    /// Number of columns on screen.
    screen_cols: usize,
    /// Current file path, if any.
    file_path: Option<PathBuf>,
    config: Config,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Editor {
    /// Creates a new empty editor.
    pub fn new(config: Config) -> Self {
        Self {
            buffer: TextBuffer::with_tab_stop(config.tab_stop),
            cursor: Cursor::new(),
            rx: 0,
            row_offset: 0,
            col_offset: 0,
            screen_rows: 24,
            screen_cols: 80,
            file_path: None,
            config,
        }
    }

    /// Opens a file in the editor.
    pub fn open_file<P: AsRef<Path>>(&mut self, path: P) -> io::Result<()> {
        let path = path.as_ref();
        self.buffer = TextBuffer::from_file(path, self.config.tab_stop)?;
        self.cursor = Cursor::new();
        self.rx = 0;
        self.row_offset = 0;
        self.col_offset = 0;
        self.file_path = Some(path.to_path_buf());
        self.select_syntax();

        log::info!("Opened {} ({} lines)", path.display(), self.buffer.len());
        Ok(())
    }

    /// Saves the buffer to the current file path.
    /// Returns the number of bytes written.
    pub fn save(&mut self) -> Result<usize> {
        let path = self.file_path.as_ref().ok_or(Error::NoFileName)?;
        let written = self.buffer.save_to_file(path)?;
        self.buffer.mark_clean();
        log::info!("Wrote {} bytes to {}", written, path.display());
        Ok(written)
    }

    /// Sets a new file path, picks a syntax for it and saves.
    pub fn save_as<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        self.set_file_path(path);
        self.save()
    }

    /// Associates the buffer with `path` and picks a syntax for it.
    pub fn set_file_path<P: AsRef<Path>>(&mut self, path: P) {
        self.file_path = Some(path.as_ref().to_path_buf());
        self.select_syntax();
    }

    /// Returns the current file path.
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Picks the syntax descriptor matching the file name, if any, and
    /// rehighlights the buffer.
    pub fn select_syntax(&mut self) {
        let syntax = self
            .file_path
            .as_ref()
            .and_then(|path| syntax::detect(&path.to_string_lossy()));
        log::debug!("Syntax: {}", syntax.map_or("none", |s| s.filetype));
        self.buffer.set_syntax(syntax);
    }

    pub fn syntax(&self) -> Option<&'static SyntaxDescriptor> {
        self.buffer.syntax()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns whether the buffer has unsaved changes.
    pub fn is_modified(&self) -> bool {
        self.buffer.is_dirty()
    }

    /// Returns a reference to the buffer.
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
        self.cursor.clamp(&self.buffer);
    }

    /// Cursor column in render space as of the last [`Editor::scroll`].
    pub fn rx(&self) -> usize {
        self.rx
    }

    pub fn row_offset(&self) -> usize {
        self.row_offset
    }

    pub fn col_offset(&self) -> usize {
        self.col_offset
    }

    /// Sets the size of the text area.
    pub fn set_screen_size(&mut self, rows: usize, cols: usize) {
        self.screen_rows = rows.max(1);
        self.screen_cols = cols.max(1);
    }

    pub fn screen_rows(&self) -> usize {
        self.screen_rows
    }

    pub fn screen_cols(&self) -> usize {
        self.screen_cols
    }

    pub fn view_state(&self) -> ViewState {
        ViewState {
            cursor: self.cursor,
            row_offset: self.row_offset,
            col_offset: self.col_offset,
        }
    }

    pub fn restore_view_state(&mut self, state: ViewState) {
        self.set_cursor(state.cursor);
        self.row_offset = state.row_offset;
        self.col_offset = state.col_offset;
    }

    /// Derives `rx` and adjusts the scroll offsets so the cursor is visible.
    pub fn scroll(&mut self) {
        self.rx = self
            .buffer
            .row(self.cursor.cy)
            .map_or(0, |row| row.cx_to_rx(self.cursor.cx, self.buffer.tab_stop()));

        let cy = self.cursor.cy;
        if cy < self.row_offset {
            self.row_offset = cy;
        }
        if cy >= self.row_offset + self.screen_rows {
            self.row_offset = cy + 1 - self.screen_rows;
        }

        if self.rx < self.col_offset {
            self.col_offset = self.rx;
        }
        if self.rx >= self.col_offset + self.screen_cols {
            self.col_offset = self.rx + 1 - self.screen_cols;
        }
    }

    // ==================== Text Editing ====================

    /// Inserts a character at the cursor position.
    pub fn insert_char(&mut self, ch: char) {
        if self.cursor.cy == self.buffer.len() {
            self.buffer.insert_row(self.buffer.len(), "");
        }
        self.buffer.insert_char(self.cursor.cy, self.cursor.cx, ch);
        self.cursor.cx += 1;
    }

    /// Splits the line at the cursor.
    pub fn insert_newline(&mut self) {
        self.buffer.split_row(self.cursor.cy, self.cursor.cx);
        self.cursor.cy += 1;
        self.cursor.cx = 0;
    }

    /// Deletes the character before the cursor (backspace), joining with the
    /// previous line at column zero.
    pub fn delete_backward(&mut self) {
        let Cursor { cx, cy } = self.cursor;
        if cy >= self.buffer.len() || (cx == 0 && cy == 0) {
            return;
        }

        if cx > 0 {
            self.buffer.delete_char(cy, cx - 1);
            self.cursor.cx -= 1;
        } else if let Some(at) = self.buffer.join_row(cy - 1) {
            self.cursor.cy -= 1;
            self.cursor.cx = at;
        }
    }

    /// Deletes the character under the cursor (delete key).
    pub fn delete_forward(&mut self) {
        self.cursor.move_right(&self.buffer);
        self.delete_backward();
    }

    // ==================== Cursor Movement ====================

    /// Moves the cursor for an arrow key. Other keys are ignored.
    pub fn move_cursor(&mut self, key: Key) {
        match key {
            Key::ArrowLeft => self.cursor.move_left(&self.buffer),
            Key::ArrowRight => self.cursor.move_right(&self.buffer),
            Key::ArrowUp => self.cursor.move_up(&self.buffer),
            Key::ArrowDown => self.cursor.move_down(&self.buffer),
            _ => {}
        }
    }

    pub fn move_to_line_start(&mut self) {
        self.cursor.move_to_line_start();
    }

    pub fn move_to_line_end(&mut self) {
        self.cursor.move_to_line_end(&self.buffer);
    }

    /// Jumps to the top of the screen, then up one screenful.
    pub fn move_page_up(&mut self) {
        self.cursor.cy = self.row_offset;
        for _ in 0..self.screen_rows {
            self.cursor.move_up(&self.buffer);
        }
    }

    /// Jumps to the bottom of the screen, then down one screenful.
    pub fn move_page_down(&mut self) {
        self.cursor.cy = (self.row_offset + self.screen_rows - 1).min(self.buffer.len());
        for _ in 0..self.screen_rows {
            self.cursor.move_down(&self.buffer);
        }
    }

    // ==================== Search ====================

    /// Runs one incremental search step and moves the cursor to the match.
    pub fn find_step(&mut self, search: &mut Search, query: &str, key: Key) {
        if let Some(found) = search.update(&mut self.buffer, query, key) {
            self.cursor = Cursor::at(found.cx, found.row);
            // Scrolling back from past the end puts the match on the top line.
            self.row_offset = self.buffer.len();
        }
    }

    /// Removes any search highlight left on the buffer.
    pub fn end_search(&mut self, search: &mut Search) {
        search.restore_highlight(&mut self.buffer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::Highlight;
    use std::fs;

    fn editor_with(text: &str) -> Editor {
        let mut editor = Editor::default();
        for (i, line) in text.split('\n').enumerate() {
            editor.buffer.insert_row(i, line);
        }
        editor.buffer.mark_clean();
        editor
    }

    fn lines(editor: &Editor) -> Vec<String> {
        editor.buffer().rows().iter().map(|r| r.text()).collect()
    }

    #[test]
    fn test_insert_into_empty_buffer() {
        let mut editor = Editor::default();
        editor.insert_char('h');
        editor.insert_char('i');
        assert_eq!(lines(&editor), ["hi"]);
        assert_eq!(editor.cursor(), Cursor::at(2, 0));
        assert!(editor.is_modified());
    }

    #[test]
    fn test_newline_and_backspace_join() {
        let mut editor = editor_with("hello world");
        editor.set_cursor(Cursor::at(5, 0));
        editor.insert_newline();
        assert_eq!(lines(&editor), ["hello", " world"]);
        assert_eq!(editor.cursor(), Cursor::at(0, 1));

        editor.delete_backward();
        assert_eq!(lines(&editor), ["hello world"]);
        assert_eq!(editor.cursor(), Cursor::at(5, 0));
    }

    #[test]
    fn test_newline_at_line_start() {
        let mut editor = editor_with("abc");
        editor.insert_newline();
        assert_eq!(lines(&editor), ["", "abc"]);
        assert_eq!(editor.cursor(), Cursor::at(0, 1));
    }

    #[test]
    fn test_backspace_at_origin_is_noop() {
        let mut editor = editor_with("abc");
        editor.delete_backward();
        assert_eq!(lines(&editor), ["abc"]);
        assert!(!editor.is_modified());
    }

    #[test]
    fn test_delete_forward() {
        let mut editor = editor_with("ab\ncd");
        editor.set_cursor(Cursor::at(2, 0));
        editor.delete_forward();
        assert_eq!(lines(&editor), ["abcd"]);
        assert_eq!(editor.cursor(), Cursor::at(2, 0));
    }

    #[test]
    fn test_scroll_keeps_cursor_visible() {
        let text: Vec<String> = (0..50).map(|i| format!("line {}", i)).collect();
        let mut editor = editor_with(&text.join("\n"));
        editor.set_screen_size(10, 20);

        editor.set_cursor(Cursor::at(0, 30));
        editor.scroll();
        assert_eq!(editor.row_offset(), 21);

        editor.set_cursor(Cursor::at(0, 5));
        editor.scroll();
        assert_eq!(editor.row_offset(), 5);
    }

    #[test]
    fn test_horizontal_scroll_uses_render_column() {
        let mut editor = editor_with("\t\t\tx");
        editor.set_screen_size(10, 10);
        editor.set_cursor(Cursor::at(3, 0));
        editor.scroll();
        assert_eq!(editor.rx(), 24);
        assert_eq!(editor.col_offset(), 15);

        editor.move_to_line_start();
        editor.scroll();
        assert_eq!(editor.col_offset(), 0);
    }

    #[test]
    fn test_page_down_and_up() {
        let text: Vec<String> = (0..100).map(|i| i.to_string()).collect();
        let mut editor = editor_with(&text.join("\n"));
        editor.set_screen_size(10, 80);

        editor.move_page_down();
        assert_eq!(editor.cursor().cy, 19);
        editor.scroll();

        editor.move_page_up();
        assert_eq!(editor.cursor().cy, 0);
    }

    #[test]
    fn test_find_step_moves_cursor_and_cancel_restores() {
        let mut editor = editor_with("foo\nbar foo\nbaz");
        let saved = editor.view_state();
        let mut search = Search::new();

        editor.find_step(&mut search, "foo", Key::Char('o'));
        editor.find_step(&mut search, "foo", Key::ArrowDown);
        assert_eq!(editor.cursor(), Cursor::at(4, 1));
        assert_eq!(editor.row_offset(), 3);
        assert_eq!(editor.buffer().row(1).unwrap().highlight()[4], Highlight::Match);

        editor.find_step(&mut search, "foo", Key::Escape);
        editor.restore_view_state(saved);
        assert_eq!(editor.cursor(), Cursor::at(0, 0));
        assert_eq!(editor.row_offset(), 0);
        assert_eq!(editor.buffer().row(1).unwrap().highlight()[4], Highlight::Normal);
    }

    #[test]
    fn test_open_and_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("main.c");
        fs::write(&path, "a\r\nb\n").unwrap();

        let mut editor = Editor::default();
        editor.open_file(&path).unwrap();
        assert_eq!(lines(&editor), ["a", "b"]);
        assert_eq!(editor.syntax().map(|s| s.filetype), Some("c"));
        assert!(!editor.is_modified());

        editor.insert_char('x');
        assert!(editor.is_modified());
        assert_eq!(editor.save().unwrap(), 5);
        assert!(!editor.is_modified());
        assert_eq!(fs::read_to_string(&path).unwrap(), "xa\nb\n");
    }

    #[test]
    fn test_save_without_name() {
        let mut editor = editor_with("a");
        assert!(matches!(editor.save(), Err(Error::NoFileName)));
    }

    #[test]
    fn test_failed_save_keeps_dirty() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor_with("a");
        editor.insert_char('b');
        let dirty = editor.buffer().dirty();

        // A directory cannot be opened for writing.
        let result = editor.save_as(dir.path());
        assert!(matches!(result, Err(Error::Io(_))));
        assert_eq!(editor.buffer().dirty(), dirty);
    }

    #[test]
    fn test_save_as_selects_syntax() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor_with("int x;");
        editor.save_as(dir.path().join("x.c")).unwrap();
        assert_eq!(editor.syntax().map(|s| s.filetype), Some("c"));
        assert_eq!(editor.buffer().row(0).unwrap().highlight()[0], Highlight::Keyword2);
    }
}
