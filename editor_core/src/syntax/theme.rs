//! Theme system for syntax highlighting.
//!
//! Defines highlight classes and their terminal colors.

use std::collections::HashMap;

/// Highlight classes assigned to each rendered character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Highlight {
    /// Default text (no special highlighting)
    #[default]
    Normal,
    /// Single-line comments
    Comment,
    /// Multi-line comments
    MultiLineComment,
    /// Primary keywords (if, while, return, struct, ...)
    Keyword1,
    /// Type and primitive keywords (int, char, void, ...)
    Keyword2,
    /// String and character literals
    String,
    /// Numeric literals
    Number,
    /// Current search match
    Match,
}

/// ANSI SGR foreground color code.
pub type Color = u8;

/// A syntax highlighting theme mapping classes to terminal colors.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Theme name.
    pub name: String,
    /// Default text color.
    pub foreground: Color,
    /// Colors for each highlight class.
    colors: HashMap<Highlight, Color>,
}

impl Theme {
    /// Creates a new theme with the given name and no class colors.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            foreground: 37, // white
            colors: HashMap::new(),
        }
    }

    /// Sets the color for a highlight class.
    pub fn set_color(&mut self, highlight: Highlight, color: Color) {
        self.colors.insert(highlight, color);
    }

    /// Gets the color for a highlight class, falling back to foreground.
    pub fn color(&self, highlight: Highlight) -> Color {
        self.colors.get(&highlight).copied().unwrap_or(self.foreground)
    }

    /// Creates the classic eight-color ANSI theme.
    pub fn ansi() -> Self {
        let mut theme = Self::new("ANSI");

        theme.set_color(Highlight::Comment, 36); // cyan
        theme.set_color(Highlight::MultiLineComment, 36);
        theme.set_color(Highlight::Keyword1, 33); // yellow
        theme.set_color(Highlight::Keyword2, 32); // green
        theme.set_color(Highlight::String, 35); // magenta
        theme.set_color(Highlight::Number, 31); // red
        theme.set_color(Highlight::Match, 34); // blue

        theme
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::ansi()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ansi_theme() {
        let theme = Theme::ansi();
        assert_eq!(theme.name, "ANSI");
        assert_eq!(theme.color(Highlight::Comment), 36);
        assert_eq!(theme.color(Highlight::MultiLineComment), 36);
        assert_eq!(theme.color(Highlight::Match), 34);
        assert_eq!(theme.color(Highlight::Normal), 37);
    }

    #[test]
    fn test_fallback_color() {
        let theme = Theme::new("Test");
        assert_eq!(theme.color(Highlight::Keyword1), theme.foreground);
    }
}
