//! `vault-sync sync` command.

use std::path::Path;
use std::sync::Arc;

use crate::context::ServiceContext;
use crate::runner::{CommandRunner, RunResult};
use crate::store::SettingsStore;

/// Execute the `sync` command.
///
/// Loads the settings, triggers a run and waits for it. The outcome has
/// already been shown to the user when this returns.
///
/// # Errors
///
/// Returns an error string if the async runtime cannot be started or the
/// run task panics.
pub fn run(ctx: ServiceContext, settings_path: &Path) -> Result<RunResult, String> {
    let settings = SettingsStore::new(&ctx, settings_path).load();
    let runner = CommandRunner::new(Arc::new(ctx));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {e}"))?;

    runtime
        .block_on(async { runner.trigger(&settings).await })
        .map_err(|e| format!("Sync task failed: {e}"))
}
