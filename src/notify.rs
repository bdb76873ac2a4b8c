// src/notify.rs

//! User-facing notifications.

use std::path::Path;

pub const CLEAN_INSTALL_ERROR_NOTIFICATION: &str =
    "Could not run the Maven clean install command to build your project. See the build log for details.";
pub const BUILD_SUCCEEDED_NOTIFICATION: &str =
    "Project built successfully; transformation will start soon.";

/// The UI the pipeline reports to.
pub trait Notifier: Send + Sync {
    fn show_error(&self, message: &str);
    fn show_info(&self, message: &str);
    /// Present a log file to the user.
    fn open_document(&self, path: &Path);
}

/// Writes notifications to the terminal.
#[derive(Debug, Clone, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn show_error(&self, message: &str) {
        eprintln!("error: {message}");
    }

    fn show_info(&self, message: &str) {
        println!("{message}");
    }

    fn open_document(&self, path: &Path) {
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                eprintln!("--- {} ---", path.display());
                eprint!("{contents}");
                eprintln!("--- end of build log ---");
            }
            Err(e) => eprintln!("build log written to {} (unreadable: {e})", path.display()),
        }
    }
}
