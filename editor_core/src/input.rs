//! Raw terminal input decoding.
//!
//! [`decode`] is a pure parser over the bytes read so far; it tells apart a
//! complete key from a sequence that still needs more input. [`KeyReader`]
//! drives it from a byte source whose empty reads mean "nothing arrived
//! before the timeout".

use std::collections::VecDeque;
use std::io::{self, Read};

const ESC: u8 = 0x1b;

/// A logical key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A literal character, including control characters such as `\r`.
    Char(char),
    Escape,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
}

impl Key {
    pub const ENTER: Key = Key::Char('\r');
    pub const BACKSPACE: Key = Key::Char('\x7f');

    /// The key produced by holding Ctrl with `c`.
    pub const fn ctrl(c: char) -> Key {
        Key::Char(((c as u8) & 0x1f) as char)
    }

    /// Returns the character for printable keys.
    pub fn printable(self) -> Option<char> {
        match self {
            Key::Char(c) if !c.is_control() => Some(c),
            _ => None,
        }
    }
}

/// Outcome of decoding a prefix of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    /// A key, and how many bytes it consumed.
    Key(Key, usize),
    /// The bytes so far start a sequence that is not finished yet.
    Incomplete,
}

fn utf8_len(lead: u8) -> usize {
    match lead {
        0xc2..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf4 => 4,
        _ => 1,
    }
}

fn decode_utf8(bytes: &[u8]) -> Decoded {
    let len = utf8_len(bytes[0]);
    if len == 1 {
        return Decoded::Key(Key::Char(char::REPLACEMENT_CHARACTER), 1);
    }
    for (i, &b) in bytes.iter().enumerate().take(len).skip(1) {
        if b & 0xc0 != 0x80 {
            return Decoded::Key(Key::Char(char::REPLACEMENT_CHARACTER), i);
        }
    }
    if bytes.len() < len {
        return Decoded::Incomplete;
    }
    match std::str::from_utf8(&bytes[..len]).ok().and_then(|s| s.chars().next()) {
        Some(c) => Decoded::Key(Key::Char(c), len),
        None => Decoded::Key(Key::Char(char::REPLACEMENT_CHARACTER), len),
    }
}

fn decode_escape(bytes: &[u8]) -> Decoded {
    let (Some(&first), Some(&second)) = (bytes.get(1), bytes.get(2)) else {
        // `ESC` alone or `ESC x` where x can still start a sequence.
        return match bytes.get(1) {
            Some(b'[') | Some(b'O') | None => Decoded::Incomplete,
            Some(_) => Decoded::Key(Key::Escape, 1),
        };
    };

    match (first, second) {
        (b'[', b'0'..=b'9') => {
            let Some(&third) = bytes.get(3) else {
                return Decoded::Incomplete;
            };
            let key = match (second, third) {
                (b'1', b'~') | (b'7', b'~') => Key::Home,
                (b'3', b'~') => Key::Delete,
                (b'4', b'~') | (b'8', b'~') => Key::End,
                (b'5', b'~') => Key::PageUp,
                (b'6', b'~') => Key::PageDown,
                _ => Key::Escape,
            };
            Decoded::Key(key, 4)
        }
        (b'[', _) => {
            let key = match second {
                b'A' => Key::ArrowUp,
                b'B' => Key::ArrowDown,
                b'C' => Key::ArrowRight,
                b'D' => Key::ArrowLeft,
                b'H' => Key::Home,
                b'F' => Key::End,
                _ => Key::Escape,
            };
            Decoded::Key(key, 3)
        }
        (b'O', _) => {
            let key = match second {
                b'H' => Key::Home,
                b'F' => Key::End,
                _ => Key::Escape,
            };
            Decoded::Key(key, 3)
        }
        _ => Decoded::Key(Key::Escape, 1),
    }
}

/// Decodes the first key from `bytes`.
///
/// Unrecognized escape sequences decode as [`Key::Escape`] and consume the
/// bytes that were examined. An `ESC` followed by a byte that cannot start a
/// sequence consumes only the `ESC`.
pub fn decode(bytes: &[u8]) -> Decoded {
    match bytes.first() {
        None => Decoded::Incomplete,
        Some(&ESC) => decode_escape(bytes),
        Some(&b) if b.is_ascii() => Decoded::Key(Key::Char(b as char), 1),
        Some(_) => decode_utf8(bytes),
    }
}

/// Reads keys from a byte source.
pub struct KeyReader<R> {
    source: R,
    pending: VecDeque<u8>,
}

impl<R: Read> KeyReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            source,
            pending: VecDeque::new(),
        }
    }

    /// Reads one more byte into the pending queue. Returns false on timeout.
    fn fill(&mut self) -> io::Result<bool> {
        let mut byte = [0u8; 1];
        loop {
            match self.source.read(&mut byte) {
                Ok(0) => return Ok(false),
                Ok(_) => {
                    self.pending.push_back(byte[0]);
                    return Ok(true);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => return Ok(false),
                Err(e) => return Err(e),
            }
        }
    }

    /// Returns the next key, or `None` if no input arrived before the
    /// source timed out.
    ///
    /// A sequence left incomplete by a timeout is dropped and reported as a
    /// literal escape, or as U+FFFD for a truncated UTF-8 character.
    pub fn next_key(&mut self) -> io::Result<Option<Key>> {
        if self.pending.is_empty() && !self.fill()? {
            return Ok(None);
        }

        loop {
            let bytes = self.pending.make_contiguous();
            match decode(bytes) {
                Decoded::Key(key, consumed) => {
                    self.pending.drain(..consumed.min(self.pending.len()));
                    return Ok(Some(key));
                }
                Decoded::Incomplete => {
                    if !self.fill()? {
                        let key = if self.pending.front() == Some(&ESC) {
                            Key::Escape
                        } else {
                            Key::Char(char::REPLACEMENT_CHARACTER)
                        };
                        self.pending.clear();
                        return Ok(Some(key));
                    }
                }
            }
        }
    }

    /// Blocks until a key arrives.
    pub fn read_key(&mut self) -> io::Result<Key> {
        loop {
            if let Some(key) = self.next_key()? {
                return Ok(key);
            }
        }
    }

    /// Reads raw bytes until `terminator` or a timeout, bypassing decoding.
    /// Used for terminal replies such as cursor position reports.
    pub fn read_until(&mut self, terminator: u8, limit: usize) -> io::Result<Vec<u8>> {
        let mut out = Vec::new();
        while out.len() < limit {
            let byte = match self.pending.pop_front() {
                Some(b) => b,
                None => {
                    if !self.fill()? {
                        break;
                    }
                    match self.pending.pop_front() {
                        Some(b) => b,
                        None => break,
                    }
                }
            };
            if byte == terminator {
                break;
            }
            out.push(byte);
        }
        Ok(out)
    }

    /// Returns the underlying source.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.source
    }
}
