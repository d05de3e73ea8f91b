//! Editor Core - Pure text editor logic.
//!
//! This crate contains all editor state and behavior without any
//! dependencies on the terminal. Rows, highlighting, key decoding and
//! search live here; drawing and the terminal itself live in `termpad-ui`.

pub mod buffer;
pub mod config;
pub mod cursor;
pub mod editor;
pub mod error;
pub mod input;
pub mod row;
pub mod search;
pub mod syntax;

pub use buffer::TextBuffer;
pub use config::Config;
pub use cursor::Cursor;
pub use editor::{Editor, ViewState};
pub use error::{Error, Result};
pub use input::{Decoded, Key, KeyReader};
pub use row::Row;
pub use search::{Direction, Search, SearchMatch};
pub use syntax::{Highlight, SyntaxDescriptor, Theme};
