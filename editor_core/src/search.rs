//! Incremental search over rendered rows.

use crate::buffer::TextBuffer;
use crate::input::Key;
use crate::syntax::Highlight;

/// Direction in which the next match is looked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

/// A search match in the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchMatch {
    /// Row of the match.
    pub row: usize,
    /// Offset of the match in render space.
    pub rx: usize,
    /// Offset of the match in character space.
    pub cx: usize,
}

/// Search state for incremental search.
///
/// Each query update may overlay `Match` highlighting on one row. The
/// overlaid row's original highlight is kept and put back before the next
/// step and when the search ends.
#[derive(Debug, Clone, Default)]
pub struct Search {
    last_match: Option<usize>,
    direction: Direction,
    saved_highlight: Option<(usize, Vec<Highlight>)>,
}

fn find_in(render: &[char], query: &[char]) -> Option<usize> {
    if query.is_empty() || query.len() > render.len() {
        return None;
    }
    render.windows(query.len()).position(|window| window == query)
}

impl Search {
    /// Creates a new search state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Row of the current match, if any.
    pub fn last_match(&self) -> Option<usize> {
        self.last_match
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Puts back the highlight replaced by the last match overlay.
    pub fn restore_highlight(&mut self, buffer: &mut TextBuffer) {
        if let Some((row, highlight)) = self.saved_highlight.take() {
            if let Some(row) = buffer.row_mut(row) {
                row.restore_highlight(highlight);
            }
        }
    }

    /// Advances the search after the query changed or a key was pressed.
    ///
    /// Enter and Escape end the search and return `None`. Arrow keys move to
    /// the next or previous match; any other key restarts from the top.
    pub fn update(&mut self, buffer: &mut TextBuffer, query: &str, key: Key) -> Option<SearchMatch> {
        self.restore_highlight(buffer);

        match key {
            Key::ENTER | Key::Escape => {
                self.last_match = None;
                self.direction = Direction::Forward;
                return None;
            }
            Key::ArrowRight | Key::ArrowDown => self.direction = Direction::Forward,
            Key::ArrowLeft | Key::ArrowUp => self.direction = Direction::Backward,
            _ => {
                self.last_match = None;
                self.direction = Direction::Forward;
            }
        }

        if self.last_match.is_none() {
            self.direction = Direction::Forward;
        }

        let query: Vec<char> = query.chars().collect();
        let len = buffer.len();
        if query.is_empty() || len == 0 {
            return None;
        }

        let mut current = self.last_match;
        for _ in 0..len {
            let next = match (current, self.direction) {
                (None, _) => 0,
                (Some(i), Direction::Forward) => (i + 1) % len,
                (Some(0), Direction::Backward) => len - 1,
                (Some(i), Direction::Backward) => (i - 1).min(len - 1),
            };
            current = Some(next);

            let Some(row) = buffer.row(next) else {
                continue;
            };
            let Some(rx) = find_in(row.render(), &query) else {
                continue;
            };
            let cx = row.rx_to_cx(rx, buffer.tab_stop());

            self.last_match = Some(next);
            if let Some(row) = buffer.row_mut(next) {
                self.saved_highlight = Some((next, row.highlight().to_vec()));
                row.overlay(rx, query.len(), Highlight::Match);
            }
            log::debug!("search match at row {} col {}", next, cx);
            return Some(SearchMatch { row: next, rx, cx });
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer() -> TextBuffer {
        TextBuffer::from_str("foo\nbar foo\nbaz")
    }

    #[test]
    fn test_forward_then_wrap() {
        let mut buf = buffer();
        let mut search = Search::new();

        let m = search.update(&mut buf, "foo", Key::Char('o')).unwrap();
        assert_eq!((m.row, m.cx), (0, 0));

        let m = search.update(&mut buf, "foo", Key::ArrowDown).unwrap();
        assert_eq!((m.row, m.cx), (1, 4));

        let m = search.update(&mut buf, "foo", Key::ArrowRight).unwrap();
        assert_eq!((m.row, m.cx), (0, 0));
    }

    #[test]
    fn test_reverse_direction() {
        let mut buf = buffer();
        let mut search = Search::new();

        search.update(&mut buf, "foo", Key::Char('o'));
        search.update(&mut buf, "foo", Key::ArrowDown);
        assert_eq!(search.last_match(), Some(1));

        let m = search.update(&mut buf, "foo", Key::ArrowUp).unwrap();
        assert_eq!(m.row, 0);
        assert_eq!(search.direction(), Direction::Backward);

        // Backward from row 0 wraps to the last matching row.
        let m = search.update(&mut buf, "foo", Key::ArrowLeft).unwrap();
        assert_eq!(m.row, 1);
    }

    #[test]
    fn test_typing_restarts_from_top() {
        let mut buf = buffer();
        let mut search = Search::new();

        search.update(&mut buf, "foo", Key::Char('o'));
        search.update(&mut buf, "foo", Key::ArrowDown);
        let m = search.update(&mut buf, "ba", Key::Char('a')).unwrap();
        assert_eq!(m.row, 1);
    }

    #[test]
    fn test_match_overlay_is_restored() {
        let mut buf = buffer();
        let mut search = Search::new();

        search.update(&mut buf, "foo", Key::Char('o'));
        search.update(&mut buf, "foo", Key::ArrowDown);
        let row = buf.row(1).unwrap();
        assert_eq!(&row.highlight()[4..7], &[Highlight::Match; 3]);
        assert_eq!(row.highlight()[0], Highlight::Normal);

        assert!(search.update(&mut buf, "foo", Key::ENTER).is_none());
        assert!(buf.row(1)
            .unwrap()
            .highlight()
            .iter()
            .all(|&h| h == Highlight::Normal));
        assert_eq!(search.last_match(), None);
    }

    #[test]
    fn test_no_match_and_empty_query() {
        let mut buf = buffer();
        let mut search = Search::new();
        assert!(search.update(&mut buf, "qux", Key::Char('x')).is_none());
        assert!(search.update(&mut buf, "", Key::BACKSPACE).is_none());
        assert_eq!(search.last_match(), None);
    }

    #[test]
    fn test_match_after_tab_maps_to_char_column() {
        let mut buf = TextBuffer::from_str("\tneedle");
        let mut search = Search::new();
        let m = search.update(&mut buf, "needle", Key::Char('e')).unwrap();
        assert_eq!(m.rx, 8);
        assert_eq!(m.cx, 1);
    }
}
