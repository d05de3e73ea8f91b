//! Language detection and configuration.
//!
//! Holds the built-in syntax descriptors and selects one from a filename.

/// Priority class of a keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordClass {
    /// Statements and declarations, highlighted as `Keyword1`.
    Primary,
    /// Types and primitives, highlighted as `Keyword2`.
    Type,
}

/// A keyword and the class it is highlighted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keyword {
    pub text: &'static str,
    pub class: KeywordClass,
}

impl Keyword {
    pub const fn primary(text: &'static str) -> Self {
        Self {
            text,
            class: KeywordClass::Primary,
        }
    }

    pub const fn ty(text: &'static str) -> Self {
        Self {
            text,
            class: KeywordClass::Type,
        }
    }
}

/// Highlighting features a language opts into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyntaxFlags {
    pub numbers: bool,
    pub strings: bool,
}

/// Describes how to highlight one filetype.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxDescriptor {
    /// Name shown in the status bar.
    pub filetype: &'static str,
    /// Filename patterns. A pattern starting with `.` must end the filename,
    /// any other pattern may occur anywhere in it.
    pub filematch: &'static [&'static str],
    pub keywords: &'static [Keyword],
    pub single_line_comment: Option<&'static str>,
    /// Multi-line comment `(start, end)` markers.
    pub multi_line_comment: Option<(&'static str, &'static str)>,
    pub flags: SyntaxFlags,
}

impl SyntaxDescriptor {
    /// Returns true if `filename` matches one of this descriptor's patterns.
    pub fn matches(&self, filename: &str) -> bool {
        self.filematch.iter().any(|pattern| {
            if pattern.starts_with('.') {
                filename.ends_with(pattern)
            } else {
                filename.contains(pattern)
            }
        })
    }
}

const ALL_FEATURES: SyntaxFlags = SyntaxFlags {
    numbers: true,
    strings: true,
};

const C_KEYWORDS: &[Keyword] = &[
    Keyword::primary("switch"),
    Keyword::primary("if"),
    Keyword::primary("while"),
    Keyword::primary("for"),
    Keyword::primary("break"),
    Keyword::primary("continue"),
    Keyword::primary("return"),
    Keyword::primary("else"),
    Keyword::primary("struct"),
    Keyword::primary("union"),
    Keyword::primary("typedef"),
    Keyword::primary("static"),
    Keyword::primary("enum"),
    Keyword::primary("class"),
    Keyword::primary("case"),
    Keyword::ty("int"),
    Keyword::ty("long"),
    Keyword::ty("double"),
    Keyword::ty("float"),
    Keyword::ty("char"),
    Keyword::ty("unsigned"),
    Keyword::ty("signed"),
    Keyword::ty("void"),
];

const RUST_KEYWORDS: &[Keyword] = &[
    Keyword::primary("fn"),
    Keyword::primary("let"),
    Keyword::primary("mut"),
    Keyword::primary("const"),
    Keyword::primary("static"),
    Keyword::primary("pub"),
    Keyword::primary("mod"),
    Keyword::primary("use"),
    Keyword::primary("impl"),
    Keyword::primary("trait"),
    Keyword::primary("struct"),
    Keyword::primary("enum"),
    Keyword::primary("type"),
    Keyword::primary("where"),
    Keyword::primary("if"),
    Keyword::primary("else"),
    Keyword::primary("match"),
    Keyword::primary("for"),
    Keyword::primary("while"),
    Keyword::primary("loop"),
    Keyword::primary("break"),
    Keyword::primary("continue"),
    Keyword::primary("return"),
    Keyword::primary("unsafe"),
    Keyword::ty("bool"),
    Keyword::ty("char"),
    Keyword::ty("str"),
    Keyword::ty("u8"),
    Keyword::ty("u16"),
    Keyword::ty("u32"),
    Keyword::ty("u64"),
    Keyword::ty("usize"),
    Keyword::ty("i8"),
    Keyword::ty("i16"),
    Keyword::ty("i32"),
    Keyword::ty("i64"),
    Keyword::ty("isize"),
    Keyword::ty("f32"),
    Keyword::ty("f64"),
    Keyword::ty("Self"),
];

const PYTHON_KEYWORDS: &[Keyword] = &[
    Keyword::primary("def"),
    Keyword::primary("class"),
    Keyword::primary("import"),
    Keyword::primary("from"),
    Keyword::primary("as"),
    Keyword::primary("if"),
    Keyword::primary("elif"),
    Keyword::primary("else"),
    Keyword::primary("for"),
    Keyword::primary("while"),
    Keyword::primary("break"),
    Keyword::primary("continue"),
    Keyword::primary("return"),
    Keyword::primary("with"),
    Keyword::primary("try"),
    Keyword::primary("except"),
    Keyword::primary("finally"),
    Keyword::primary("raise"),
    Keyword::primary("lambda"),
    Keyword::primary("pass"),
    Keyword::ty("int"),
    Keyword::ty("float"),
    Keyword::ty("str"),
    Keyword::ty("bool"),
    Keyword::ty("None"),
    Keyword::ty("True"),
    Keyword::ty("False"),
];

const JAVASCRIPT_KEYWORDS: &[Keyword] = &[
    Keyword::primary("function"),
    Keyword::primary("const"),
    Keyword::primary("let"),
    Keyword::primary("var"),
    Keyword::primary("class"),
    Keyword::primary("extends"),
    Keyword::primary("import"),
    Keyword::primary("export"),
    Keyword::primary("new"),
    Keyword::primary("if"),
    Keyword::primary("else"),
    Keyword::primary("for"),
    Keyword::primary("while"),
    Keyword::primary("switch"),
    Keyword::primary("case"),
    Keyword::primary("break"),
    Keyword::primary("continue"),
    Keyword::primary("return"),
    Keyword::primary("throw"),
    Keyword::ty("this"),
    Keyword::ty("null"),
    Keyword::ty("undefined"),
    Keyword::ty("true"),
    Keyword::ty("false"),
];

/// The built-in syntax database, searched in order.
pub static SYNTAX_DATABASE: &[SyntaxDescriptor] = &[
    SyntaxDescriptor {
        filetype: "c",
        filematch: &[".c", ".h", ".cpp"],
        keywords: C_KEYWORDS,
        single_line_comment: Some("//"),
        multi_line_comment: Some(("/*", "*/")),
        flags: ALL_FEATURES,
    },
    SyntaxDescriptor {
        filetype: "rust",
        filematch: &[".rs"],
        keywords: RUST_KEYWORDS,
        single_line_comment: Some("//"),
        multi_line_comment: Some(("/*", "*/")),
        flags: ALL_FEATURES,
    },
    SyntaxDescriptor {
        filetype: "python",
        filematch: &[".py"],
        keywords: PYTHON_KEYWORDS,
        single_line_comment: Some("#"),
        multi_line_comment: None,
        flags: ALL_FEATURES,
    },
    SyntaxDescriptor {
        filetype: "javascript",
        filematch: &[".js", ".mjs"],
        keywords: JAVASCRIPT_KEYWORDS,
        single_line_comment: Some("//"),
        multi_line_comment: Some(("/*", "*/")),
        flags: ALL_FEATURES,
    },
];

/// Finds the first descriptor whose patterns match `filename`.
pub fn detect(filename: &str) -> Option<&'static SyntaxDescriptor> {
    SYNTAX_DATABASE.iter().find(|syntax| syntax.matches(filename))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_by_extension() {
        assert_eq!(detect("main.c").map(|s| s.filetype), Some("c"));
        assert_eq!(detect("include/editor.h").map(|s| s.filetype), Some("c"));
        assert_eq!(detect("lib.rs").map(|s| s.filetype), Some("rust"));
        assert_eq!(detect("setup.py").map(|s| s.filetype), Some("python"));
        assert_eq!(detect("app.js").map(|s| s.filetype), Some("javascript"));
        assert!(detect("README.md").is_none());
    }

    #[test]
    fn test_extension_must_end_filename() {
        assert!(detect("notes.c.txt").is_none());
        assert!(detect("archive.rs.bak").is_none());
    }

    #[test]
    fn test_keyword_classes() {
        let c = detect("x.c").unwrap();
        let int = c.keywords.iter().find(|k| k.text == "int").unwrap();
        assert_eq!(int.class, KeywordClass::Type);
        let ret = c.keywords.iter().find(|k| k.text == "return").unwrap();
        assert_eq!(ret.class, KeywordClass::Primary);
    }
}
