//! Service context bundling all port trait objects.

use crate::adapters::live::filesystem::LiveFileSystem;
use crate::adapters::live::log::TracingLogSink;
use crate::adapters::live::notify::TerminalNotifier;
use crate::adapters::live::shell::LiveShellLauncher;
use crate::ports::filesystem::FileSystem;
use crate::ports::log::LogSink;
use crate::ports::notify::Notifier;
use crate::ports::shell::ShellLauncher;

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors wire
/// up different adapter implementations; tests replace individual fields.
pub struct ServiceContext {
    /// Filesystem holding the settings document.
    pub fs: Box<dyn FileSystem>,
    /// Launcher for the sync command.
    pub shell: Box<dyn ShellLauncher>,
    /// User-facing notification surface.
    pub notifier: Box<dyn Notifier>,
    /// Background diagnostic log.
    pub log: Box<dyn LogSink>,
}

impl ServiceContext {
    /// Creates a live context backed by the real disk, `sh`, the terminal
    /// and the global `tracing` subscriber.
    #[must_use]
    pub fn live() -> Self {
        Self {
            fs: Box::new(LiveFileSystem),
            shell: Box::new(LiveShellLauncher),
            notifier: Box::new(TerminalNotifier),
            log: Box::new(TracingLogSink),
        }
    }
}
