//! Input handling and key mapping.

use termpad_core::{Editor, Key};

/// Represents an editor command.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorCommand {
    // File operations
    Save,
    Quit,
    Find,

    // Text input
    InsertChar(char),
    InsertNewline,

    // Deletion
    DeleteBackward,
    DeleteForward,

    // Cursor movement
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    MoveToLineStart,
    MoveToLineEnd,
    MovePageUp,
    MovePageDown,
}

/// Maps a key to an editor command. Ctrl-L and Escape map to nothing.
pub fn map_key(key: Key) -> Option<EditorCommand> {
    const CTRL_F: Key = Key::ctrl('f');
    const CTRL_H: Key = Key::ctrl('h');
    const CTRL_L: Key = Key::ctrl('l');
    const CTRL_Q: Key = Key::ctrl('q');
    const CTRL_S: Key = Key::ctrl('s');

    match key {
        Key::ENTER => Some(EditorCommand::InsertNewline),
        CTRL_Q => Some(EditorCommand::Quit),
        CTRL_S => Some(EditorCommand::Save),
        CTRL_F => Some(EditorCommand::Find),
        Key::BACKSPACE | CTRL_H => Some(EditorCommand::DeleteBackward),
        Key::Delete => Some(EditorCommand::DeleteForward),
        Key::Home => Some(EditorCommand::MoveToLineStart),
        Key::End => Some(EditorCommand::MoveToLineEnd),
        Key::PageUp => Some(EditorCommand::MovePageUp),
        Key::PageDown => Some(EditorCommand::MovePageDown),
        Key::ArrowLeft => Some(EditorCommand::MoveLeft),
        Key::ArrowRight => Some(EditorCommand::MoveRight),
        Key::ArrowUp => Some(EditorCommand::MoveUp),
        Key::ArrowDown => Some(EditorCommand::MoveDown),
        CTRL_L | Key::Escape => None,
        Key::Char(ch) => Some(EditorCommand::InsertChar(ch)),
    }
}

/// Applies an editing or movement command.
///
/// Returns false for commands that need the surrounding app (save, quit,
/// find), leaving the editor untouched.
pub fn execute_command(editor: &mut Editor, command: EditorCommand) -> bool {
    match command {
        EditorCommand::Save | EditorCommand::Quit | EditorCommand::Find => return false,

        EditorCommand::InsertChar(ch) => editor.insert_char(ch),
        EditorCommand::InsertNewline => editor.insert_newline(),

        EditorCommand::DeleteBackward => editor.delete_backward(),
        EditorCommand::DeleteForward => editor.delete_forward(),

        EditorCommand::MoveLeft => editor.move_cursor(Key::ArrowLeft),
        EditorCommand::MoveRight => editor.move_cursor(Key::ArrowRight),
        EditorCommand::MoveUp => editor.move_cursor(Key::ArrowUp),
        EditorCommand::MoveDown => editor.move_cursor(Key::ArrowDown),
        EditorCommand::MoveToLineStart => editor.move_to_line_start(),
        EditorCommand::MoveToLineEnd => editor.move_to_line_end(),
        EditorCommand::MovePageUp => editor.move_page_up(),
        EditorCommand::MovePageDown => editor.move_page_down(),
    }
    true
}
