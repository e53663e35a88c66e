//! Log sink that forwards child output to `tracing`.

use crate::ports::log::LogSink;
use crate::ports::shell::OutputStream;

/// Target used for forwarded child output, so it can be filtered on its own
/// (e.g. `RUST_LOG=vault_sync::output=info`).
pub const OUTPUT_TARGET: &str = "vault_sync::output";

/// Live log sink backed by the global `tracing` subscriber.
///
/// Everything is emitted at `info`, below the binary's default `warn`
/// filter, so none of it reaches the terminal unless `RUST_LOG` asks.
pub struct TracingLogSink;

impl LogSink for TracingLogSink {
    fn output(&self, stream: OutputStream, chunk: &str) {
        tracing::info!(target: OUTPUT_TARGET, stream = stream.as_str(), "{stream}: {chunk}");
    }

    fn diagnostic(&self, message: &str) {
        tracing::info!("{message}");
    }
}
