//! Shell launcher port for starting the sync command.

use std::fmt;
use std::path::Path;

use tokio::sync::mpsc::UnboundedReceiver;

/// Which of the child's output streams a chunk was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputStream {
    /// Standard output.
    Stdout,
    /// Standard error.
    Stderr,
}

impl OutputStream {
    /// Returns the lowercase tag used in log output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stdout => "stdout",
            Self::Stderr => "stderr",
        }
    }
}

impl fmt::Display for OutputStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Something a launched process reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessEvent {
    /// A chunk read from one of the output streams. Chunks may split lines.
    Output {
        /// The stream the chunk came from.
        stream: OutputStream,
        /// The chunk, decoded lossily as UTF-8.
        chunk: String,
    },
    /// The process terminated. `code` is `None` when it was killed by a
    /// signal or its status could not be collected.
    Exited {
        /// The exit code, if the process exited normally.
        code: Option<i32>,
    },
}

/// Receiving half of a launched process's event channel.
///
/// Delivers zero or more `Output` events and exactly one `Exited` event.
/// `Output` may still arrive after `Exited`; the channel closes once both
/// streams are drained and the exit has been reported.
pub type ProcessEvents = UnboundedReceiver<ProcessEvent>;

/// Launches shell command lines.
pub trait ShellLauncher: Send + Sync {
    /// Starts `command` through the system shell with `working_dir` as its
    /// current directory. An empty `working_dir` inherits the caller's.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be started (missing
    /// directory, shell not found, permission denied).
    fn launch(
        &self,
        command: &str,
        working_dir: &Path,
    ) -> Result<ProcessEvents, Box<dyn std::error::Error + Send + Sync>>;
}
