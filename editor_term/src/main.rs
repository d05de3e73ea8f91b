//! Termpad - a small terminal text editor.
//!
//! Usage: termpad [FILE]
//!
//! Set `TERMPAD_LOG` to a file path to enable logging; the terminal itself
//! is taken over by the editor.

use std::env;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process;
use termpad_core::Config;
use termpad_ui::terminal;

/// Environment variable naming the log file.
const LOG_ENV: &str = "TERMPAD_LOG";

fn init_logging() {
    let Some(path) = env::var_os(LOG_ENV) else {
        return;
    };

    match File::create(&path) {
        Ok(file) => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        Err(e) => eprintln!("termpad: cannot open log file {:?}: {}", path, e),
    }
}

fn main() {
    init_logging();

    log::info!("Starting Termpad");

    // Parse command line arguments
    let file_path = env::args_os().nth(1).map(PathBuf::from);
    let config = Config::from_env();

    if let Err(e) = termpad_ui::run(file_path.as_deref(), config) {
        let _ = terminal::clear_screen(&mut io::stdout());
        log::error!("Fatal: {}", e);
        eprintln!("termpad: {}", e);
        process::exit(1);
    }

    log::info!("Termpad exited");
}
