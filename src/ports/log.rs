//! Log sink port for background diagnostics.

use crate::ports::shell::OutputStream;

/// Receives diagnostic output that is not shown to the user by default.
pub trait LogSink: Send + Sync {
    /// Records one chunk of child process output, tagged by stream.
    fn output(&self, stream: OutputStream, chunk: &str);

    /// Records a diagnostic message about a run (e.g. a launch error).
    fn diagnostic(&self, message: &str);
}
