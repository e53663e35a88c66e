//! Terminal notifier that prints messages on standard output.

use std::io::Write;

use crate::ports::notify::Notifier;

/// Live notifier that writes one line per message to stdout.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, message: &str) {
        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "{message}");
        let _ = out.flush();
    }
}
