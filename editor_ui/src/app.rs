//! Main editor application running in the terminal.

use crate::error::Result;
use crate::input::{execute_command, map_key, EditorCommand};
use crate::notifications::NotificationManager;
use crate::renderer::Renderer;
use crate::terminal::{self, RawModeGuard};
use std::io::{self, Read, Write};
use std::path::Path;
use termpad_core::{Config, Editor, Key, KeyReader, Search};

/// Message shown at startup.
pub const HELP_MESSAGE: &str = "HELP: Ctrl-S = save | Ctrl-Q = quit | Ctrl-F = find";

/// Rows taken by the status bar and the message bar.
const BAR_ROWS: usize = 2;

const CTRL_H: Key = Key::ctrl('h');

/// The main editor application.
pub struct EditorApp<R, W> {
    /// The editing session.
    pub editor: Editor,
    /// Status message shown under the status bar.
    pub status: NotificationManager,
    renderer: Renderer,
    input: KeyReader<R>,
    output: W,
    /// Remaining Ctrl-Q presses before quitting with unsaved changes.
    quit_times: u32,
}

impl<R: Read, W: Write> EditorApp<R, W> {
    /// Creates a new editor application.
    pub fn new(editor: Editor, input: R, output: W) -> Self {
        let status = NotificationManager::new(editor.config().message_timeout);
        let quit_times = editor.config().quit_times;
        Self {
            editor,
            status,
            renderer: Renderer::default(),
            input: KeyReader::new(input),
            output,
            quit_times,
        }
    }

    /// Queries the terminal size and sizes the text area to fit above the
    /// two bars.
    pub fn detect_window_size(&mut self) -> Result<()> {
        let (rows, cols) = terminal::window_size(&mut self.input, &mut self.output)?;
        log::debug!("Window size {}x{}", cols, rows);
        self.set_window_size(rows, cols);
        Ok(())
    }

    pub fn set_window_size(&mut self, rows: usize, cols: usize) {
        self.editor.set_screen_size(rows.saturating_sub(BAR_ROWS), cols);
    }

    /// Returns the visible status message.
    pub fn status_message(&self) -> Option<&str> {
        self.status.visible()
    }

    /// Scrolls and redraws the whole screen.
    pub fn refresh_screen(&mut self) -> Result<()> {
        self.editor.scroll();
        self.renderer
            .refresh(&self.editor, self.status.visible(), &mut self.output)?;
        Ok(())
    }

    /// Runs until the user quits.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.refresh_screen()?;
            if self.process_key()? {
                break;
            }
        }
        terminal::clear_screen(&mut self.output)?;
        log::info!("Editor exited");
        Ok(())
    }

    /// Waits for one key and handles it. Returns true when the editor should
    /// quit.
    pub fn process_key(&mut self) -> Result<bool> {
        let key = self.input.read_key()?;
        self.handle_key(key)
    }

    /// Handles one key. Returns true when the editor should quit.
    pub fn handle_key(&mut self, key: Key) -> Result<bool> {
        let Some(command) = map_key(key) else {
            self.quit_times = self.editor.config().quit_times;
            return Ok(false);
        };

        match command {
            EditorCommand::Quit => {
                if self.editor.is_modified() && self.quit_times > 0 {
                    self.status.error(format!(
                        "WARNING!!! File has unsaved changes. Press Ctrl-Q {} more times to quit.",
                        self.quit_times
                    ));
                    self.quit_times -= 1;
                    return Ok(false);
                }
                return Ok(true);
            }
            EditorCommand::Save => self.save()?,
            EditorCommand::Find => self.find()?,
            command => {
                execute_command(&mut self.editor, command);
            }
        }

        self.quit_times = self.editor.config().quit_times;
        Ok(false)
    }

    /// Reads a line of input on the message bar.
    ///
    /// `template` is shown with `{}` replaced by the input so far. The
    /// callback runs after every key with the current input and that key.
    /// Returns `None` if the user pressed Escape.
    pub fn prompt<F>(&mut self, template: &str, mut callback: F) -> Result<Option<String>>
    where
        F: FnMut(&mut Self, &str, Key),
    {
        let mut input = String::new();

        loop {
            self.status.info(template.replacen("{}", &input, 1));
            self.refresh_screen()?;

            let key = self.input.read_key()?;
            match key {
                Key::Delete | Key::BACKSPACE | CTRL_H => {
                    input.pop();
                }
                Key::Escape => {
                    self.status.clear();
                    callback(self, &input, key);
                    return Ok(None);
                }
                Key::ENTER if !input.is_empty() => {
                    self.status.clear();
                    callback(self, &input, key);
                    return Ok(Some(input));
                }
                Key::Char(c) if c.is_ascii() && !c.is_ascii_control() => input.push(c),
                _ => {}
            }
            callback(self, &input, key);
        }
    }

    /// Saves the buffer, asking for a file name if there is none.
    pub fn save(&mut self) -> Result<()> {
        if self.editor.file_path().is_none() {
            match self.prompt("Save as: {} (ESC to cancel)", |_, _, _| {})? {
                Some(name) => self.editor.set_file_path(name),
                None => {
                    self.status.info("Save aborted");
                    return Ok(());
                }
            }
        }

        match self.editor.save() {
            Ok(written) => self.status.info(format!("{} bytes written to disk", written)),
            Err(e) => self.status.error(format!("Can't save! {}", e)),
        }
        Ok(())
    }

    /// Runs an incremental search. Escape puts the cursor and scroll
    /// position back where they were.
    pub fn find(&mut self) -> Result<()> {
        let saved = self.editor.view_state();
        let mut search = Search::new();

        let query = self.prompt("Search: {} (Use ESC/Arrows/Enter)", |app, query, key| {
            app.editor.find_step(&mut search, query, key);
        })?;

        self.editor.end_search(&mut search);
        if query.is_none() {
            self.editor.restore_view_state(saved);
        }
        Ok(())
    }
}

/// Runs the editor on the controlling terminal.
///
/// The terminal is restored before this returns, including on error.
pub fn run(path: Option<&Path>, config: Config) -> Result<()> {
    let _raw_mode = RawModeGuard::enable()?;

    let mut app = EditorApp::new(Editor::new(config), io::stdin(), io::stdout());
    app.detect_window_size()?;
    if let Some(path) = path {
        app.editor.open_file(path)?;
    }

    app.status.info(HELP_MESSAGE);
    app.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use termpad_core::Cursor;

    type TestApp<'a> = EditorApp<&'a [u8], Vec<u8>>;

    fn app(input: &[u8]) -> TestApp<'_> {
        let mut app = EditorApp::new(Editor::default(), input, Vec::new());
        app.set_window_size(10, 60);
        app
    }

    fn app_with_text<'a>(input: &'a [u8], text: &str) -> TestApp<'a> {
        let mut app = app(input);
        for ch in text.chars() {
            if ch == '\n' {
                app.editor.insert_newline();
            } else {
                app.editor.insert_char(ch);
            }
        }
        app.editor.set_cursor(Cursor::new());
        app
    }

    fn lines<R, W>(app: &EditorApp<R, W>) -> Vec<String> {
        app.editor.buffer().rows().iter().map(|r| r.text()).collect()
    }

    #[test]
    fn test_type_and_quit() {
        let mut app = app(b"hi\r!\x11\x11\x11\x11");
        app.run().unwrap();
        assert_eq!(lines(&app), ["hi", "!"]);
        assert!(app.output.ends_with(b"\x1b[2J\x1b[H"));
    }

    #[test]
    fn test_quit_needs_confirmation_when_modified() {
        let mut app = app(b"");
        app.editor.insert_char('x');

        for remaining in (1..=3).rev() {
            assert!(!app.handle_key(Key::ctrl('q')).unwrap());
            let message = app.status_message().unwrap();
            assert!(message.contains(&format!("Press Ctrl-Q {} more times", remaining)));
        }
        assert!(app.handle_key(Key::ctrl('q')).unwrap());
    }

    #[test]
    fn test_other_key_resets_quit_count() {
        let mut app = app(b"");
        app.editor.insert_char('x');

        app.handle_key(Key::ctrl('q')).unwrap();
        app.handle_key(Key::ctrl('q')).unwrap();
        app.handle_key(Key::ArrowLeft).unwrap();
        app.handle_key(Key::ctrl('q')).unwrap();
        assert!(app.status_message().unwrap().contains("Press Ctrl-Q 3 more times"));
    }

    #[test]
    fn test_clean_buffer_quits_at_once() {
        let mut app = app(b"");
        assert!(app.handle_key(Key::ctrl('q')).unwrap());
    }

    #[test]
    fn test_save_as_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        let mut keys = path.to_string_lossy().into_owned().into_bytes();
        keys.push(b'\r');

        let mut app = app_with_text(&keys, "hello");
        app.handle_key(Key::ctrl('s')).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "hello\n");
        assert_eq!(app.status_message(), Some("6 bytes written to disk"));
        assert!(!app.editor.is_modified());
        assert_eq!(app.editor.file_path(), Some(path.as_path()));
    }

    #[test]
    fn test_save_as_cancelled() {
        let mut app = app_with_text(b"ab\x7f\x1b", "hello");
        app.handle_key(Key::ctrl('s')).unwrap();
        assert_eq!(app.status_message(), Some("Save aborted"));
        assert!(app.editor.file_path().is_none());
        assert!(app.editor.is_modified());
    }

    #[test]
    fn test_save_error_keeps_dirty() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_text(b"", "hello");
        app.editor.set_file_path(dir.path());
        app.handle_key(Key::ctrl('s')).unwrap();

        let message = app.status_message().unwrap();
        assert!(message.starts_with("Can't save! I/O error:"), "{}", message);
        assert!(app.editor.is_modified());
    }

    #[test]
    fn test_prompt_ignores_enter_on_empty_input() {
        let mut app = app(b"\rx\r");
        let mut seen = Vec::new();
        let result = app
            .prompt("> {}", |_, input, key| seen.push((input.to_string(), key)))
            .unwrap();
        assert_eq!(result.as_deref(), Some("x"));
        assert_eq!(
            seen,
            [
                (String::new(), Key::ENTER),
                ("x".to_string(), Key::Char('x')),
                ("x".to_string(), Key::ENTER),
            ]
        );
    }

    #[test]
    fn test_prompt_skips_non_ascii() {
        let mut app = app("aé\r".as_bytes());
        let result = app.prompt("> {}", |_, _, _| {}).unwrap();
        assert_eq!(result.as_deref(), Some("a"));
    }

    #[test]
    fn test_find_accept_keeps_cursor() {
        let mut app = app_with_text(b"foo\x1b[B\r", "foo\nbar foo\nbaz");
        app.handle_key(Key::ctrl('f')).unwrap();
        assert_eq!(app.editor.cursor(), Cursor::at(4, 1));
        assert!(app.editor.buffer().rows().iter().all(|row| {
            !row.highlight().contains(&termpad_core::Highlight::Match)
        }));
    }

    #[test]
    fn test_find_cancel_restores_cursor() {
        let mut app = app_with_text(b"baz\x1b", "foo\nbar foo\nbaz");
        app.editor.set_cursor(Cursor::at(1, 0));
        app.handle_key(Key::ctrl('f')).unwrap();
        assert_eq!(app.editor.cursor(), Cursor::at(1, 0));
        assert_eq!(app.editor.row_offset(), 0);
    }
}
