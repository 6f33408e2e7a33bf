//! Colored stderr implementation of the core notification sink.

use std::io::Write;

use owo_colors::OwoColorize;

use backdesk_core::Notifier;

/// Notifier that writes one colored line per event to stderr.
///
/// Success lines are suppressed in quiet mode; error lines always print.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleNotifier {
    color: bool,
    quiet: bool,
}

impl ConsoleNotifier {
    pub fn new(color: bool, quiet: bool) -> Self {
        Self { color, quiet }
    }

    fn line(&self, prefix: &str, message: &str) {
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(stderr, "{prefix} {message}");
    }
}

impl Notifier for ConsoleNotifier {
    fn success(&self, message: &str) {
        if self.quiet {
            return;
        }
        if self.color {
            self.line(&"✓".green().to_string(), message);
        } else {
            self.line("✓", message);
        }
    }

    fn error(&self, message: &str) {
        if self.color {
            self.line(&"✗".red().to_string(), message);
        } else {
            self.line("✗", message);
        }
    }
}
