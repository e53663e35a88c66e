//! In-memory adapters used for deterministic runs and tests.

pub mod filesystem;
pub mod log;
pub mod notify;
pub mod shell;

pub use filesystem::MemFs;
pub use log::CapturingLogSink;
pub use notify::RecordingNotifier;
pub use shell::ScriptedLauncher;
