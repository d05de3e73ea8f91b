//! Editor settings.
//!
//! There are no configuration files; everything has a compiled-in default
//! and the tab stop can be overridden from the environment.

use crate::syntax::DEFAULT_TAB_STOP;
use std::env;
use std::time::Duration;

/// Environment variable overriding the tab stop.
pub const TAB_STOP_ENV: &str = "TERMPAD_TAB_STOP";

/// Editor-wide settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Width of a tab stop in render columns.
    pub tab_stop: usize,
    /// Extra Ctrl-Q presses required to quit with unsaved changes.
    pub quit_times: u32,
    /// How long a status message stays visible.
    pub message_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tab_stop: DEFAULT_TAB_STOP,
            quit_times: 3,
            message_timeout: Duration::from_secs(5),
        }
    }
}

impl Config {
    /// Builds the default config, applying `TERMPAD_TAB_STOP` if set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(value) = env::var(TAB_STOP_ENV) {
            match parse_tab_stop(&value) {
                Some(tab_stop) => config.tab_stop = tab_stop,
                None => log::warn!("Ignoring invalid {}={:?}", TAB_STOP_ENV, value),
            }
        }
        config
    }

    /// Sets the tab stop, clamped to at least one column.
    pub fn with_tab_stop(mut self, tab_stop: usize) -> Self {
        self.tab_stop = tab_stop.max(1);
        self
    }
}

fn parse_tab_stop(value: &str) -> Option<usize> {
    value.trim().parse::<usize>().ok().filter(|&n| (1..=64).contains(&n))
}
