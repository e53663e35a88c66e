//! Log sink that keeps forwarded output in memory.

use std::sync::Mutex;

use crate::ports::log::LogSink;
use crate::ports::shell::OutputStream;

/// Captures output chunks and diagnostics.
#[derive(Default)]
pub struct CapturingLogSink {
    chunks: Mutex<Vec<(OutputStream, String)>>,
    diagnostics: Mutex<Vec<String>>,
}

impl CapturingLogSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all output chunks in arrival order.
    #[must_use]
    pub fn chunks(&self) -> Vec<(OutputStream, String)> {
        self.chunks.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Concatenates every chunk received on `stream`.
    #[must_use]
    pub fn text(&self, stream: OutputStream) -> String {
        self.chunks().into_iter().filter(|(s, _)| *s == stream).map(|(_, c)| c).collect()
    }

    /// Returns recorded diagnostic messages.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<String> {
        self.diagnostics.lock().map(|d| d.clone()).unwrap_or_default()
    }
}

impl LogSink for CapturingLogSink {
    fn output(&self, stream: OutputStream, chunk: &str) {
        if let Ok(mut chunks) = self.chunks.lock() {
            chunks.push((stream, chunk.to_string()));
        }
    }

    fn diagnostic(&self, message: &str) {
        if let Ok(mut diagnostics) = self.diagnostics.lock() {
            diagnostics.push(message.to_string());
        }
    }
}
