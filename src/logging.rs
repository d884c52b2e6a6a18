use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing::Level;

/// CLI logging: compact lines on stderr, warnings only unless `verbose`
pub fn init_cli(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

/// TUI logging goes to a file so the alternate screen stays clean.
/// Falls back to no logging when the file cannot be opened.
pub fn init_tui(log_file: &Path, verbose: bool) {
    if let Some(dir) = log_file.parent()
        && fs::create_dir_all(dir).is_err()
    {
        return;
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(log_file) else {
        return;
    };
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}
