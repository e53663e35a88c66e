//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the sync core and something it
//! does not own (disk, the OS process table, the user's screen, the
//! diagnostic log). Implementations live in `src/adapters/`.

pub mod filesystem;
pub mod log;
pub mod notify;
pub mod shell;

pub use filesystem::FileSystem;
pub use log::LogSink;
pub use notify::Notifier;
pub use shell::{OutputStream, ProcessEvent, ProcessEvents, ShellLauncher};
