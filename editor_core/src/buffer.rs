//! Row-oriented text buffer.

use crate::row::Row;
use crate::syntax::{SyntaxDescriptor, DEFAULT_TAB_STOP};
use std::collections::VecDeque;
use std::fs::{self, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

/// An ordered sequence of rows.
///
/// Every mutation recomputes the render and highlight arrays of the rows it
/// touches before returning, so readers never see stale derived data.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    rows: Vec<Row>,
    /// Bumped by every mutation, reset by load and save.
    dirty: usize,
    tab_stop: usize,
    syntax: Option<&'static SyntaxDescriptor>,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer {
    /// Creates a new empty text buffer.
    pub fn new() -> Self {
        Self::with_tab_stop(DEFAULT_TAB_STOP)
    }

    /// Creates an empty buffer expanding tabs to `tab_stop` columns.
    pub fn with_tab_stop(tab_stop: usize) -> Self {
        Self {
            rows: Vec::new(),
            dirty: 0,
            tab_stop: tab_stop.max(1),
            syntax: None,
        }
    }

    /// Creates a text buffer from a string, one row per line.
    pub fn from_str(text: &str) -> Self {
        // Reading from a byte slice cannot fail.
        Self::from_reader(text.as_bytes(), DEFAULT_TAB_STOP).unwrap_or_default()
    }

    /// Reads rows from `reader`, stripping trailing CR/LF from each line.
    pub fn from_reader<R: BufRead>(mut reader: R, tab_stop: usize) -> io::Result<Self> {
        let mut buffer = Self::with_tab_stop(tab_stop);
        let mut line = Vec::new();

        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line)? == 0 {
                break;
            }
            while matches!(line.last(), Some(b'\n' | b'\r')) {
                line.pop();
            }
            let at = buffer.len();
            buffer.insert_row(at, &String::from_utf8_lossy(&line));
        }

        buffer.dirty = 0;
        Ok(buffer)
    }

    /// Loads a text buffer from a file.
    pub fn from_file<P: AsRef<Path>>(path: P, tab_stop: usize) -> io::Result<Self> {
        let file = fs::File::open(path)?;
        Self::from_reader(BufReader::new(file), tab_stop)
    }

    /// Overwrites `path` with the buffer contents and returns the number of
    /// bytes written. The dirty counter is left alone; see [`Self::mark_clean`].
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> io::Result<usize> {
        let text = self.to_text();

        let mut options = OpenOptions::new();
        options.read(true).write(true).create(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o644);
        }

        let mut file = options.open(path)?;
        file.set_len(text.len() as u64)?;
        file.write_all(text.as_bytes())?;
        Ok(text.len())
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the buffer has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, at: usize) -> Option<&Row> {
        self.rows.get(at)
    }

    pub(crate) fn row_mut(&mut self, at: usize) -> Option<&mut Row> {
        self.rows.get_mut(at)
    }

    /// Number of modifications since the last load or save.
    pub fn dirty(&self) -> usize {
        self.dirty
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty > 0
    }

    pub fn mark_clean(&mut self) {
        self.dirty = 0;
    }

    pub fn tab_stop(&self) -> usize {
        self.tab_stop
    }

    pub fn syntax(&self) -> Option<&'static SyntaxDescriptor> {
        self.syntax
    }

    /// Switches the syntax descriptor and rehighlights every row.
    pub fn set_syntax(&mut self, syntax: Option<&'static SyntaxDescriptor>) {
        self.syntax = syntax;
        let mut prev_open = false;
        for row in &mut self.rows {
            row.update_highlight(prev_open, syntax);
            prev_open = row.open_comment;
        }
    }

    fn prev_open_comment(&self, at: usize) -> bool {
        at > 0 && self.rows.get(at - 1).is_some_and(|row| row.open_comment)
    }

    fn renumber_from(&mut self, at: usize) {
        for (index, row) in self.rows.iter_mut().enumerate().skip(at) {
            row.index = index;
        }
    }

    /// Rehighlights row `at`, then each following row for as long as the
    /// open-comment state handed to it keeps changing.
    fn rehighlight_from(&mut self, at: usize) {
        let mut queue = VecDeque::from([at]);
        while let Some(idx) = queue.pop_front() {
            let prev_open = self.prev_open_comment(idx);
            let syntax = self.syntax;
            let Some(row) = self.rows.get_mut(idx) else {
                break;
            };
            if row.update_highlight(prev_open, syntax) && idx + 1 < self.rows.len() {
                queue.push_back(idx + 1);
            }
        }
    }

    fn update_row(&mut self, at: usize) {
        if let Some(row) = self.rows.get_mut(at) {
            row.update_render(self.tab_stop);
            self.rehighlight_from(at);
        }
    }

    /// Inserts a new row holding `text` before row `at`. Ignored if `at` is
    /// past the end.
    pub fn insert_row(&mut self, at: usize, text: &str) {
        if at > self.rows.len() {
            return;
        }

        let mut row = Row::new(at, text);
        // Start from the state the displaced row was seeded with, so the
        // cascade fires only if this row changes what its successor sees.
        row.open_comment = self.prev_open_comment(at);
        row.update_render(self.tab_stop);
        self.rows.insert(at, row);
        self.renumber_from(at + 1);
        self.rehighlight_from(at);
        self.dirty += 1;
    }

    /// Removes row `at`. Ignored if out of range.
    pub fn delete_row(&mut self, at: usize) {
        if at >= self.rows.len() {
            return;
        }

        let removed = self.rows.remove(at);
        self.renumber_from(at);
        if at < self.rows.len() && self.prev_open_comment(at) != removed.open_comment {
            self.rehighlight_from(at);
        }
        self.dirty += 1;
    }

    /// Inserts `ch` into row `row` at column `at`, appending if `at` is past
    /// the end of the row.
    pub fn insert_char(&mut self, row: usize, at: usize, ch: char) {
        let Some(r) = self.rows.get_mut(row) else {
            return;
        };
        let at = at.min(r.chars.len());
        r.chars.insert(at, ch);
        self.update_row(row);
        self.dirty += 1;
    }

    /// Removes the character at column `at` of row `row`, if any.
    pub fn delete_char(&mut self, row: usize, at: usize) {
        let Some(r) = self.rows.get_mut(row) else {
            return;
        };
        if at >= r.chars.len() {
            return;
        }
        r.chars.remove(at);
        self.update_row(row);
        self.dirty += 1;
    }

    /// Appends `text` to the end of row `row`.
    pub fn append_str(&mut self, row: usize, text: &str) {
        let Some(r) = self.rows.get_mut(row) else {
            return;
        };
        r.chars.extend(text.chars());
        self.update_row(row);
        self.dirty += 1;
    }

    /// Breaks row `cy` at column `cx`. At column zero an empty row is
    /// inserted above instead, which also works one past the last row.
    pub fn split_row(&mut self, cy: usize, cx: usize) {
        if cx == 0 {
            self.insert_row(cy, "");
            return;
        }

        let Some(row) = self.rows.get(cy) else {
            return;
        };
        let cx = cx.min(row.chars.len());
        let suffix: String = row.chars[cx..].iter().collect();

        self.insert_row(cy + 1, &suffix);
        if let Some(row) = self.rows.get_mut(cy) {
            row.chars.truncate(cx);
        }
        self.update_row(cy);
    }

    /// Appends row `cy + 1` onto row `cy` and removes it. Returns the join
    /// point, the former length of row `cy`.
    pub fn join_row(&mut self, cy: usize) -> Option<usize> {
        if cy + 1 >= self.rows.len() {
            return None;
        }

        let at = self.rows[cy].chars.len();
        let text = self.rows[cy + 1].text();
        self.append_str(cy, &text);
        self.delete_row(cy + 1);
        Some(at)
    }

    /// Flattens the buffer into newline-terminated text.
    pub fn to_text(&self) -> String {
        let capacity = self.rows.iter().map(|row| row.chars.len() + 1).sum();
        let mut text = String::with_capacity(capacity);
        for row in &self.rows {
            text.extend(row.chars.iter());
            text.push('\n');
        }
        text
    }
}
