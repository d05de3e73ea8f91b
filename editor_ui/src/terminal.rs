//! Terminal setup: raw mode and window size.

use crate::error::{Error, Result};
use std::io::{self, Read, Write};
use std::mem;
use termpad_core::KeyReader;

/// Puts the terminal in raw mode and restores the original settings on drop.
pub struct RawModeGuard {
    original: libc::termios,
}

fn last_error(call: &'static str) -> Error {
    Error::Terminal {
        call,
        source: io::Error::last_os_error(),
    }
}

impl RawModeGuard {
    /// Switches stdin to raw mode with a 100 ms read timeout.
    pub fn enable() -> Result<Self> {
        // SAFETY: termios is plain data and tcgetattr fills it completely on success.
        let mut original: libc::termios = unsafe { mem::zeroed() };
        if unsafe { libc::tcgetattr(libc::STDIN_FILENO, &mut original) } == -1 {
            return Err(last_error("tcgetattr"));
        }

        let mut raw = original;
        raw.c_iflag &= !(libc::BRKINT | libc::ICRNL | libc::INPCK | libc::ISTRIP | libc::IXON);
        raw.c_oflag &= !libc::OPOST;
        raw.c_cflag |= libc::CS8;
        raw.c_lflag &= !(libc::ECHO | libc::ICANON | libc::IEXTEN | libc::ISIG);
        // Return as soon as any input is there, or after 100 ms with nothing.
        raw.c_cc[libc::VMIN] = 0;
        raw.c_cc[libc::VTIME] = 1;

        // SAFETY: raw is a valid termios derived from the current settings.
        if unsafe { libc::tcsetattr(libc::STDIN_FILENO, libc::TCSAFLUSH, &raw) } == -1 {
            return Err(last_error("tcsetattr"));
        }

        log::debug!("Raw mode enabled");
        Ok(Self { original })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        // SAFETY: original was filled by tcgetattr in enable().
        if unsafe { libc::tcsetattr(libc::STDIN_FILENO, libc::TCSAFLUSH, &self.original) } == -1 {
            log::error!("Failed to restore terminal: {}", io::Error::last_os_error());
        } else {
            log::debug!("Raw mode disabled");
        }
    }
}

/// Parses a cursor position report `ESC [ rows ; cols` (the final `R`
/// already stripped).
pub fn parse_cursor_position(reply: &[u8]) -> Option<(usize, usize)> {
    let body = reply.strip_prefix(b"\x1b[")?;
    let body = std::str::from_utf8(body).ok()?;
    let (rows, cols) = body.split_once(';')?;
    Some((rows.parse().ok()?, cols.parse().ok()?))
}

/// Asks the terminal where the cursor is.
pub fn cursor_position<R: Read, W: Write>(
    input: &mut KeyReader<R>,
    output: &mut W,
) -> Result<(usize, usize)> {
    output.write_all(b"\x1b[6n")?;
    output.flush()?;

    let reply = input.read_until(b'R', 32)?;
    parse_cursor_position(&reply)
        .ok_or_else(|| Error::CursorPosition(String::from_utf8_lossy(&reply).into_owned()))
}

/// Returns the window size as `(rows, cols)`.
///
/// Falls back to moving the cursor to the bottom-right corner and reading its
/// position when the size ioctl is unavailable.
pub fn window_size<R: Read, W: Write>(
    input: &mut KeyReader<R>,
    output: &mut W,
) -> Result<(usize, usize)> {
    // SAFETY: winsize is plain data and only read after a successful ioctl.
    let mut ws: libc::winsize = unsafe { mem::zeroed() };
    let ok = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut ws) } != -1;
    if ok && ws.ws_col != 0 {
        return Ok((ws.ws_row as usize, ws.ws_col as usize));
    }

    log::debug!("TIOCGWINSZ unavailable, probing cursor position");
    output.write_all(b"\x1b[999C\x1b[999B")?;
    match cursor_position(input, output) {
        Ok((rows, cols)) if rows > 0 && cols > 0 => Ok((rows, cols)),
        Ok(_) => Err(Error::WindowSize),
        Err(e) => {
            log::warn!("Cursor position probe failed: {}", e);
            Err(Error::WindowSize)
        }
    }
}

/// Clears the screen and homes the cursor.
pub fn clear_screen<W: Write>(output: &mut W) -> io::Result<()> {
    output.write_all(b"\x1b[2J\x1b[H")?;
    output.flush()
}
