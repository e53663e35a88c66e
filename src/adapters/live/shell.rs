//! Live shell launcher using `tokio::process::Command`.

use std::path::Path;
use std::process::Stdio;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::sync::mpsc::{self, UnboundedSender};

use crate::ports::shell::{OutputStream, ProcessEvent, ProcessEvents, ShellLauncher};

const READ_BUF_SIZE: usize = 4096;

/// Live launcher that runs command lines via `sh -c`.
pub struct LiveShellLauncher;

impl ShellLauncher for LiveShellLauncher {
    fn launch(
        &self,
        command: &str,
        working_dir: &Path,
    ) -> Result<ProcessEvents, Box<dyn std::error::Error + Send + Sync>> {
        let mut cmd = Command::new("sh");
        cmd.arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if !working_dir.as_os_str().is_empty() {
            cmd.current_dir(working_dir);
        }
        let mut child = cmd.spawn()?;

        let (tx, rx) = mpsc::unbounded_channel();

        // Either handle may be absent; a missing stream yields no chunks.
        let stdout = child.stdout.take().map(|s| spawn_drain(s, OutputStream::Stdout, tx.clone()));
        let stderr = child.stderr.take().map(|s| spawn_drain(s, OutputStream::Stderr, tx.clone()));

        tokio::spawn(async move {
            let code = child.wait().await.ok().and_then(|status| status.code());
            let _ = tx.send(ProcessEvent::Exited { code });
            // The channel stays open until both drains finish. A background
            // process that inherited the pipes can hold it open indefinitely,
            // so receivers must not wait for the close after `Exited`.
            if let Some(handle) = stdout {
                let _ = handle.await;
            }
            if let Some(handle) = stderr {
                let _ = handle.await;
            }
        });

        Ok(rx)
    }
}

fn spawn_drain<R>(
    mut reader: R,
    stream: OutputStream,
    tx: UnboundedSender<ProcessEvent>,
) -> tokio::task::JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = vec![0u8; READ_BUF_SIZE];
        let mut decoder = ChunkDecoder::default();
        loop {
            let chunk = match reader.read(&mut buf).await {
                Ok(0) | Err(_) => break,
                Ok(n) => decoder.push(&buf[..n]),
            };
            if let Some(chunk) = chunk {
                if tx.send(ProcessEvent::Output { stream, chunk }).is_err() {
                    return;
                }
            }
        }
        if let Some(chunk) = decoder.finish() {
            let _ = tx.send(ProcessEvent::Output { stream, chunk });
        }
    })
}

/// Decodes a byte stream into UTF-8 chunks without splitting characters.
///
/// A multibyte sequence cut off at the end of a read is held back and
/// prefixed to the next read. Bytes that are invalid regardless of what
/// follows are replaced with U+FFFD.
#[derive(Default)]
struct ChunkDecoder {
    pending: Vec<u8>,
}

impl ChunkDecoder {
    fn push(&mut self, bytes: &[u8]) -> Option<String> {
        self.pending.extend_from_slice(bytes);
        let complete = self.pending.len() - incomplete_tail_len(&self.pending);
        if complete == 0 {
            return None;
        }
        let chunk = String::from_utf8_lossy(&self.pending[..complete]).into_owned();
        self.pending.drain(..complete);
        Some(chunk)
    }

    fn finish(self) -> Option<String> {
        if self.pending.is_empty() {
            None
        } else {
            Some(String::from_utf8_lossy(&self.pending).into_owned())
        }
    }
}

/// Length of a trailing lead byte plus continuations that still need more
/// bytes to form a complete character; 0 when the tail is complete.
fn incomplete_tail_len(bytes: &[u8]) -> usize {
    for back in 1..=bytes.len().min(3) {
        let byte = bytes[bytes.len() - back];
        if byte & 0xC0 == 0x80 {
            continue;
        }
        let width = match byte {
            0xF0..=0xF7 => 4,
            0xE0..=0xEF => 3,
            0xC0..=0xDF => 2,
            _ => 1,
        };
        return if width > back { back } else { 0 };
    }
    0
}
