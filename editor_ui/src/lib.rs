//! Editor UI - Terminal rendering and input handling.
//!
//! This crate owns everything that touches the terminal: raw mode, window
//! size, frame composition and the key dispatch loop.

pub mod app;
pub mod error;
pub mod input;
pub mod notifications;
pub mod renderer;
pub mod terminal;

pub use app::{run, EditorApp, HELP_MESSAGE};
pub use error::{Error, Result};
pub use input::{execute_command, map_key, EditorCommand};
pub use notifications::{Notification, NotificationManager, NotificationType};
pub use renderer::Renderer;
pub use terminal::RawModeGuard;
