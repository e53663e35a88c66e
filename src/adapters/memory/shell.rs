//! Launcher that replays a fixed list of process events.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tokio::sync::mpsc;

use crate::ports::shell::{ProcessEvent, ProcessEvents, ShellLauncher};

/// Replays scripted events instead of starting a process.
///
/// Every launch delivers the same script. A launcher built with
/// [`ScriptedLauncher::failing`] refuses to launch at all.
pub struct ScriptedLauncher {
    script: Result<Vec<ProcessEvent>, String>,
    launches: Mutex<Vec<(String, PathBuf)>>,
}

impl ScriptedLauncher {
    /// Creates a launcher that delivers `events` on every launch.
    #[must_use]
    pub fn new(events: Vec<ProcessEvent>) -> Self {
        Self { script: Ok(events), launches: Mutex::new(Vec::new()) }
    }

    /// Creates a launcher whose launches fail with `message`.
    #[must_use]
    pub fn failing(message: &str) -> Self {
        Self { script: Err(message.to_string()), launches: Mutex::new(Vec::new()) }
    }

    /// Returns the `(command, working_dir)` pairs seen so far.
    #[must_use]
    pub fn launches(&self) -> Vec<(String, PathBuf)> {
        self.launches.lock().map(|l| l.clone()).unwrap_or_default()
    }
}

impl ShellLauncher for ScriptedLauncher {
    fn launch(
        &self,
        command: &str,
        working_dir: &Path,
    ) -> Result<ProcessEvents, Box<dyn std::error::Error + Send + Sync>> {
        if let Ok(mut launches) = self.launches.lock() {
            launches.push((command.to_string(), working_dir.to_path_buf()));
        }
        let events = self.script.clone()?;
        let (tx, rx) = mpsc::unbounded_channel();
        for event in events {
            // The receiver is still held locally, so sending cannot fail.
            let _ = tx.send(event);
        }
        Ok(rx)
    }
}
