//! Syntax highlighting module.
//!
//! Provides a per-row scanner driven by a small language descriptor
//! database, with multi-line comment state carried from row to row.

mod highlighter;
mod language;
mod theme;

pub use highlighter::{highlight_line, is_separator, render_chars, LineHighlights, DEFAULT_TAB_STOP};
pub use language::{detect, Keyword, KeywordClass, SyntaxDescriptor, SyntaxFlags, SYNTAX_DATABASE};
pub use theme::{Color, Highlight, Theme};
