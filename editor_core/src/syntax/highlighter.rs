//! Row-at-a-time syntax highlighter.
//!
//! Scans the render form of a single row left to right. The only state that
//! crosses row boundaries is whether a multi-line comment is still open.

use super::language::{KeywordClass, SyntaxDescriptor};
use super::theme::Highlight;

/// Default tab stop width.
pub const DEFAULT_TAB_STOP: usize = 8;

const SEPARATORS: &str = ",.()+-/*=~%<>[];";

/// Returns true if `c` ends a word for keyword and number matching.
pub fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == '\0' || SEPARATORS.contains(c)
}

/// Expands tabs in `chars` to spaces up to the next multiple of `tab_stop`.
pub fn render_chars(chars: &[char], tab_stop: usize) -> Vec<char> {
    let tab_stop = tab_stop.max(1);
    let tabs = chars.iter().filter(|&&c| c == '\t').count();
    let mut render = Vec::with_capacity(chars.len() + tabs * (tab_stop - 1));

    for &c in chars {
        if c == '\t' {
            render.push(' ');
            while render.len() % tab_stop != 0 {
                render.push(' ');
            }
        } else {
            render.push(c);
        }
    }

    render
}

/// Result of scanning one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineHighlights {
    /// One class per render character.
    pub highlight: Vec<Highlight>,
    /// Whether a multi-line comment is still open at the end of the row.
    pub open_comment: bool,
}

fn starts_with(text: &[char], at: usize, pattern: &str) -> bool {
    let mut i = at;
    for p in pattern.chars() {
        match text.get(i) {
            Some(&c) if c == p => i += 1,
            _ => return false,
        }
    }
    true
}

fn fill(highlight: &mut [Highlight], at: usize, len: usize, class: Highlight) {
    let end = (at + len).min(highlight.len());
    for h in &mut highlight[at..end] {
        *h = class;
    }
}

/// Finds the longest keyword starting at `at` that is followed by a
/// separator or the end of the row.
fn match_keyword(
    render: &[char],
    at: usize,
    syntax: &SyntaxDescriptor,
) -> Option<(usize, KeywordClass)> {
    syntax
        .keywords
        .iter()
        .filter(|keyword| !keyword.text.is_empty())
        .filter_map(|keyword| {
            let len = keyword.text.chars().count();
            let followed_by_separator = render.get(at + len).map_or(true, |&c| is_separator(c));
            if starts_with(render, at, keyword.text) && followed_by_separator {
                Some((len, keyword.class))
            } else {
                None
            }
        })
        .max_by_key(|&(len, _)| len)
}

/// Computes highlight classes for one rendered row.
///
/// `open_comment` is the state left by the previous row. Without a syntax
/// descriptor every character is `Normal` and no comment stays open.
pub fn highlight_line(
    render: &[char],
    open_comment: bool,
    syntax: Option<&SyntaxDescriptor>,
) -> LineHighlights {
    let mut highlight = vec![Highlight::Normal; render.len()];

    let syntax = match syntax {
        Some(s) => s,
        None => {
            return LineHighlights {
                highlight,
                open_comment: false,
            }
        }
    };

    let scs = syntax.single_line_comment.filter(|s| !s.is_empty());
    let mlc = syntax
        .multi_line_comment
        .filter(|(start, end)| !start.is_empty() && !end.is_empty());

    let mut prev_sep = true;
    let mut in_string: Option<char> = None;
    let mut in_comment = open_comment && mlc.is_some();

    let mut i = 0;
    while i < render.len() {
        let c = render[i];
        let prev_hl = if i > 0 { highlight[i - 1] } else { Highlight::Normal };

        if let Some(scs) = scs {
            if in_string.is_none() && !in_comment && starts_with(render, i, scs) {
                fill(&mut highlight, i, render.len() - i, Highlight::Comment);
                break;
            }
        }

        if let Some((mcs, mce)) = mlc {
            if in_string.is_none() {
                if in_comment {
                    highlight[i] = Highlight::MultiLineComment;
                    if starts_with(render, i, mce) {
                        let len = mce.chars().count();
                        fill(&mut highlight, i, len, Highlight::MultiLineComment);
                        i += len;
                        in_comment = false;
                        prev_sep = true;
                    } else {
                        i += 1;
                    }
                    continue;
                } else if starts_with(render, i, mcs) {
                    let len = mcs.chars().count();
                    fill(&mut highlight, i, len, Highlight::MultiLineComment);
                    i += len;
                    in_comment = true;
                    continue;
                }
            }
        }

        if syntax.flags.strings {
            if let Some(quote) = in_string {
                highlight[i] = Highlight::String;
                if c == '\\' && i + 1 < render.len() {
                    highlight[i + 1] = Highlight::String;
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
                highlight[i] = Highlight::String;
                i += 1;
                continue;
            }
        }

        if syntax.flags.numbers
            && ((c.is_ascii_digit() && (prev_sep || prev_hl == Highlight::Number))
                || (c == '.' && prev_hl == Highlight::Number))
        {
            highlight[i] = Highlight::Number;
            i += 1;
            prev_sep = false;
            continue;
        }

        if prev_sep {
            if let Some((len, class)) = match_keyword(render, i, syntax) {
                let class = match class {
                    KeywordClass::Primary => Highlight::Keyword1,
                    KeywordClass::Type => Highlight::Keyword2,
                };
                fill(&mut highlight, i, len, class);
                i += len;
                prev_sep = false;
                continue;
            }
        }

        prev_sep = is_separator(c);
        i += 1;
    }

    LineHighlights {
        highlight,
        open_comment: in_comment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::language::detect;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn c_syntax() -> &'static SyntaxDescriptor {
        detect("test.c").unwrap()
    }

    #[test]
    fn test_render_expands_tabs() {
        assert_eq!(render_chars(&chars("\tx"), 8), chars("        x"));
        assert_eq!(render_chars(&chars("ab\tc"), 4), chars("ab  c"));
        assert_eq!(render_chars(&chars("abcd\t"), 4), chars("abcd    "));
        assert_eq!(render_chars(&chars("plain"), 8), chars("plain"));
    }

    #[test]
    fn test_no_syntax_is_plain() {
        let render = chars("int x = 1; /* open");
        let result = highlight_line(&render, true, None);
        assert!(result.highlight.iter().all(|&h| h == Highlight::Normal));
        assert!(!result.open_comment);
    }

    #[test]
    fn test_keyword_needs_separators() {
        let result = highlight_line(&chars("intx"), false, Some(c_syntax()));
        assert!(result.highlight.iter().all(|&h| h == Highlight::Normal));

        let result = highlight_line(&chars("int x"), false, Some(c_syntax()));
        assert_eq!(&result.highlight[..3], &[Highlight::Keyword2; 3]);
        assert_eq!(result.highlight[3], Highlight::Normal);
        assert_eq!(result.highlight[4], Highlight::Normal);

        let result = highlight_line(&chars("xint"), false, Some(c_syntax()));
        assert!(result.highlight.iter().all(|&h| h == Highlight::Normal));
    }

    #[test]
    fn test_keyword_classes() {
        let result = highlight_line(&chars("return(void)"), false, Some(c_syntax()));
        assert_eq!(&result.highlight[..6], &[Highlight::Keyword1; 6]);
        assert_eq!(result.highlight[6], Highlight::Normal);
        assert_eq!(&result.highlight[7..11], &[Highlight::Keyword2; 4]);
    }

    #[test]
    fn test_longest_keyword_wins() {
        use crate::syntax::{Keyword, SyntaxFlags};

        static KEYWORDS: &[Keyword] = &[Keyword::primary("do"), Keyword::ty("double")];
        static SYNTAX: SyntaxDescriptor = SyntaxDescriptor {
            filetype: "test",
            filematch: &[],
            keywords: KEYWORDS,
            single_line_comment: None,
            multi_line_comment: None,
            flags: SyntaxFlags {
                numbers: false,
                strings: false,
            },
        };

        let result = highlight_line(&chars("double d"), false, Some(&SYNTAX));
        assert_eq!(&result.highlight[..6], &[Highlight::Keyword2; 6]);

        let result = highlight_line(&chars("do x"), false, Some(&SYNTAX));
        assert_eq!(&result.highlight[..2], &[Highlight::Keyword1; 2]);
    }

    #[test]
    fn test_single_line_comment() {
        let result = highlight_line(&chars("x = 1; // note"), false, Some(c_syntax()));
        assert_eq!(&result.highlight[7..], &[Highlight::Comment; 7]);
        assert_eq!(result.highlight[4], Highlight::Number);
        assert!(!result.open_comment);
    }

    #[test]
    fn test_comment_marker_inside_string() {
        let result = highlight_line(&chars("\"//x\" y"), false, Some(c_syntax()));
        assert_eq!(&result.highlight[..5], &[Highlight::String; 5]);
        assert_eq!(result.highlight[6], Highlight::Normal);
    }

    #[test]
    fn test_multi_line_comment_open_and_close() {
        let result = highlight_line(&chars("a /* b"), false, Some(c_syntax()));
        assert!(result.open_comment);
        assert_eq!(result.highlight[0], Highlight::Normal);
        assert_eq!(&result.highlight[2..], &[Highlight::MultiLineComment; 4]);

        let result = highlight_line(&chars("b */ int"), true, Some(c_syntax()));
        assert!(!result.open_comment);
        assert_eq!(&result.highlight[..4], &[Highlight::MultiLineComment; 4]);
        assert_eq!(&result.highlight[5..], &[Highlight::Keyword2; 3]);
    }

    #[test]
    fn test_seeded_comment_covers_row() {
        let result = highlight_line(&chars("int x;"), true, Some(c_syntax()));
        assert!(result.open_comment);
        assert!(result
            .highlight
            .iter()
            .all(|&h| h == Highlight::MultiLineComment));
    }

    #[test]
    fn test_string_escapes() {
        let result = highlight_line(&chars(r#""a\"b" c"#), false, Some(c_syntax()));
        assert_eq!(&result.highlight[..6], &[Highlight::String; 6]);
        assert_eq!(result.highlight[7], Highlight::Normal);

        let result = highlight_line(&chars("'x' 1"), false, Some(c_syntax()));
        assert_eq!(&result.highlight[..3], &[Highlight::String; 3]);
        assert_eq!(result.highlight[4], Highlight::Number);
    }

    #[test]
    fn test_numbers() {
        let result = highlight_line(&chars("x1 12.5 a.1"), false, Some(c_syntax()));
        // "x1": digit after a non-separator is not a number
        assert_eq!(result.highlight[1], Highlight::Normal);
        assert_eq!(&result.highlight[3..7], &[Highlight::Number; 4]);
        // "a.1": the '.' is a separator, so the digit after it is a number
        assert_eq!(result.highlight[10], Highlight::Number);
        assert_eq!(result.highlight[9], Highlight::Normal);
    }

    #[test]
    fn test_highlight_length_matches_render() {
        for line in ["", "\t/* x", "\"unterminated", "int main(void) { return 0; }"] {
            let render = render_chars(&chars(line), 8);
            let result = highlight_line(&render, false, Some(c_syntax()));
            assert_eq!(result.highlight.len(), render.len());
        }
    }
}
