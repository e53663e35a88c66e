//! Command runner: launches the sync command and reports how it ended.
//!
//! A run moves through `Idle -> Starting -> Running -> {Succeeded, Failed}`.
//! The user sees exactly two messages per run: [`STARTING_MESSAGE`] as soon
//! as the run is invoked, then one of [`SUCCESS_MESSAGE`] or
//! [`FAILURE_MESSAGE`]. Everything else (child output, launch errors, exit
//! codes) goes to the log sink only.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::context::ServiceContext;
use crate::ports::shell::ProcessEvent;
use crate::settings::Settings;

/// Shown immediately when a run is invoked.
pub const STARTING_MESSAGE: &str = "Syncing...";
/// Shown when the command exits with status 0.
pub const SUCCESS_MESSAGE: &str = "Done syncing!";
/// Shown for any other outcome, including failure to start.
pub const FAILURE_MESSAGE: &str = "Error while syncing!";

/// How long output is still forwarded after the exit event while the
/// streams stay open, e.g. held by a backgrounded grandchild.
pub const EXIT_GRACE: Duration = Duration::from_millis(250);

/// Outcome of a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunResult {
    /// The process exited with status 0.
    Succeeded,
    /// Non-zero exit, killed by a signal, or never started.
    Failed,
}

impl RunResult {
    /// Maps an exit code to an outcome. Only `Some(0)` is success.
    #[must_use]
    pub fn from_exit_code(code: Option<i32>) -> Self {
        if code == Some(0) {
            Self::Succeeded
        } else {
            Self::Failed
        }
    }

    /// The terminal notification for this outcome.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Succeeded => SUCCESS_MESSAGE,
            Self::Failed => FAILURE_MESSAGE,
        }
    }

    /// Returns `true` for [`RunResult::Succeeded`].
    #[must_use]
    pub fn is_success(self) -> bool {
        self == Self::Succeeded
    }
}

/// Lifecycle of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Not yet invoked.
    Idle,
    /// Starting notice shown; process not yet known to be running.
    Starting,
    /// Process launched; output is being forwarded.
    Running,
    /// Terminal: exited with status 0.
    Succeeded,
    /// Terminal: anything else.
    Failed,
}

impl RunState {
    /// Whether no further transitions are allowed.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }

    fn can_advance_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Starting)
                | (Self::Starting, Self::Running | Self::Failed)
                | (Self::Running, Self::Succeeded | Self::Failed)
        )
    }
}

impl From<RunResult> for RunState {
    fn from(result: RunResult) -> Self {
        match result {
            RunResult::Succeeded => Self::Succeeded,
            RunResult::Failed => Self::Failed,
        }
    }
}

/// Runs the configured command against the ports in a [`ServiceContext`].
///
/// Cloning is cheap; clones share the context. Runs are independent of
/// each other: there is no queue and no mutual exclusion.
#[derive(Clone)]
pub struct CommandRunner {
    ctx: Arc<ServiceContext>,
}

impl CommandRunner {
    /// Creates a runner over `ctx`.
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Starts a run with a snapshot of `settings` and returns immediately.
    ///
    /// Must be called from within a tokio runtime. The handle resolves to
    /// the outcome once the terminal notification has been shown and the
    /// output streams have closed or [`EXIT_GRACE`] has passed.
    #[must_use]
    pub fn trigger(&self, settings: &Settings) -> JoinHandle<RunResult> {
        let runner = self.clone();
        let settings = settings.clone();
        tokio::spawn(async move { runner.run(&settings.command, &settings.working_directory).await })
    }

    /// Runs `command` in `working_directory` and waits for it to exit.
    ///
    /// Output arriving after the exit event is still forwarded until the
    /// streams close, for at most [`EXIT_GRACE`].
    ///
    /// Never returns an error: launch failures and non-zero exits are
    /// reported through the notifier, with detail in the log sink. The
    /// returned outcome matches the terminal notification.
    pub async fn run(&self, command: &str, working_directory: &str) -> RunResult {
        let mut state = RunState::Idle;
        advance(&mut state, RunState::Starting);
        self.ctx.notifier.notify(STARTING_MESSAGE);

        let mut events = match self.ctx.shell.launch(command, Path::new(working_directory)) {
            Ok(events) => events,
            Err(e) => {
                self.ctx.log.diagnostic(&format!(
                    "Failed to start `{command}` in {working_directory:?}: {e}"
                ));
                return self.finish(&mut state, RunResult::Failed);
            }
        };
        advance(&mut state, RunState::Running);

        let mut result = None;
        let mut deadline = None;
        loop {
            let event = match deadline {
                None => events.recv().await,
                Some(deadline) => {
                    if let Ok(event) = tokio::time::timeout_at(deadline, events.recv()).await {
                        event
                    } else {
                        self.ctx.log.diagnostic(&format!(
                            "`{command}` left its output streams open; no longer forwarding"
                        ));
                        break;
                    }
                }
            };
            let Some(event) = event else { break };
            match event {
                ProcessEvent::Output { stream, chunk } => self.ctx.log.output(stream, &chunk),
                ProcessEvent::Exited { code } if result.is_none() => {
                    let outcome = RunResult::from_exit_code(code);
                    if !outcome.is_success() {
                        let status = code.map_or_else(|| "signal".to_string(), |c| c.to_string());
                        self.ctx.log.diagnostic(&format!("`{command}` exited with {status}"));
                    }
                    result = Some(self.finish(&mut state, outcome));
                    deadline = Some(Instant::now() + EXIT_GRACE);
                }
                ProcessEvent::Exited { .. } => {}
            }
        }

        result.unwrap_or_else(|| {
            self.ctx.log.diagnostic(&format!("`{command}` ended without an exit status"));
            self.finish(&mut state, RunResult::Failed)
        })
    }

    fn finish(&self, state: &mut RunState, result: RunResult) -> RunResult {
        advance(state, result.into());
        self.ctx.notifier.notify(result.message());
        result
    }
}

fn advance(state: &mut RunState, next: RunState) {
    debug_assert!(state.can_advance_to(next), "invalid run transition {state:?} -> {next:?}");
    tracing::debug!(from = ?*state, to = ?next, "run state");
    *state = next;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::live::shell::LiveShellLauncher;
    use crate::adapters::memory::{CapturingLogSink, MemFs, RecordingNotifier, ScriptedLauncher};
    use crate::ports::log::LogSink;
    use crate::ports::notify::Notifier;
    use crate::ports::shell::{OutputStream, ProcessEvents, ShellLauncher};

    /// Forwards to a shared inner port so tests keep a handle for asserts.
    struct Shared<T>(Arc<T>);

    impl<T: Notifier> Notifier for Shared<T> {
        fn notify(&self, message: &str) {
            self.0.notify(message);
        }
    }

    impl<T: LogSink> LogSink for Shared<T> {
        fn output(&self, stream: OutputStream, chunk: &str) {
            self.0.output(stream, chunk);
        }
        fn diagnostic(&self, message: &str) {
            self.0.diagnostic(message);
        }
    }

    impl<T: ShellLauncher> ShellLauncher for Shared<T> {
        fn launch(
            &self,
            command: &str,
            working_dir: &Path,
        ) -> Result<ProcessEvents, Box<dyn std::error::Error + Send + Sync>> {
            self.0.launch(command, working_dir)
        }
    }

    struct Harness {
        runner: CommandRunner,
        notes: Arc<RecordingNotifier>,
        log: Arc<CapturingLogSink>,
    }

    fn harness(shell: Box<dyn ShellLauncher>) -> Harness {
        let notes = Arc::new(RecordingNotifier::new());
        let log = Arc::new(CapturingLogSink::new());
        let ctx = ServiceContext {
            fs: Box::new(MemFs::new()),
            shell,
            notifier: Box::new(Shared(Arc::clone(&notes))),
            log: Box::new(Shared(Arc::clone(&log))),
        };
        Harness { runner: CommandRunner::new(Arc::new(ctx)), notes, log }
    }

    fn output(stream: OutputStream, chunk: &str) -> ProcessEvent {
        ProcessEvent::Output { stream, chunk: chunk.to_string() }
    }

    #[tokio::test]
    async fn echo_hello_succeeds_with_tagged_stdout() {
        let h = harness(Box::new(LiveShellLauncher));

        let result = h.runner.run("echo hello", ".").await;

        assert_eq!(result, RunResult::Succeeded);
        assert_eq!(h.notes.messages(), vec![STARTING_MESSAGE, SUCCESS_MESSAGE]);
        assert_eq!(h.notes.count(FAILURE_MESSAGE), 0);
        assert!(h
            .log
            .chunks()
            .iter()
            .any(|(stream, chunk)| *stream == OutputStream::Stdout && chunk.contains("hello")));
    }

    #[tokio::test]
    async fn non_zero_exit_fails_once() {
        let h = harness(Box::new(LiveShellLauncher));

        let result = h.runner.run("exit 3", ".").await;

        assert_eq!(result, RunResult::Failed);
        assert_eq!(h.notes.count(FAILURE_MESSAGE), 1);
        assert_eq!(h.notes.count(SUCCESS_MESSAGE), 0);
        assert!(h.log.diagnostics().iter().any(|d| d.contains("exited with 3")));
    }

    #[tokio::test]
    async fn missing_working_directory_folds_into_failure() {
        let h = harness(Box::new(LiveShellLauncher));

        let result = h.runner.run("echo hello", "/nonexistent/vault-sync-dir").await;

        assert_eq!(result, RunResult::Failed);
        assert_eq!(h.notes.messages(), vec![STARTING_MESSAGE, FAILURE_MESSAGE]);
        assert!(h.log.chunks().is_empty());
        assert!(h.log.diagnostics().iter().any(|d| d.contains("Failed to start")));
    }

    #[tokio::test]
    async fn stderr_is_never_tagged_stdout() {
        let h = harness(Box::new(LiveShellLauncher));

        h.runner.run("echo to-out; echo to-err 1>&2", ".").await;

        let stdout = h.log.text(OutputStream::Stdout);
        let stderr = h.log.text(OutputStream::Stderr);
        assert!(stdout.contains("to-out") && !stdout.contains("to-err"));
        assert!(stderr.contains("to-err") && !stderr.contains("to-out"));
    }

    #[tokio::test]
    async fn empty_command_is_attempted() {
        let launcher = Arc::new(ScriptedLauncher::new(vec![ProcessEvent::Exited { code: Some(0) }]));
        let h = harness(Box::new(Shared(Arc::clone(&launcher))));

        h.runner.run("", "").await;

        assert_eq!(launcher.launches(), vec![(String::new(), std::path::PathBuf::new())]);
    }

    #[tokio::test]
    async fn output_after_exit_is_still_forwarded() {
        let h = harness(Box::new(ScriptedLauncher::new(vec![
            output(OutputStream::Stdout, "early"),
            ProcessEvent::Exited { code: Some(0) },
            output(OutputStream::Stderr, "late"),
        ])));

        let result = h.runner.run("sync", "/vault").await;

        assert_eq!(result, RunResult::Succeeded);
        assert_eq!(h.log.text(OutputStream::Stdout), "early");
        assert_eq!(h.log.text(OutputStream::Stderr), "late");
        assert_eq!(h.notes.messages(), vec![STARTING_MESSAGE, SUCCESS_MESSAGE]);
    }

    #[tokio::test]
    async fn background_child_holding_stdout_does_not_block_run() {
        let h = harness(Box::new(LiveShellLauncher));

        let result =
            tokio::time::timeout(Duration::from_secs(3), h.runner.run("sleep 5 &", ".")).await;

        assert_eq!(result.ok(), Some(RunResult::Succeeded));
        assert_eq!(h.notes.messages(), vec![STARTING_MESSAGE, SUCCESS_MESSAGE]);
    }

    #[tokio::test]
    async fn signal_exit_is_failure() {
        let h = harness(Box::new(ScriptedLauncher::new(vec![ProcessEvent::Exited { code: None }])));

        assert_eq!(h.runner.run("sync", ".").await, RunResult::Failed);
        assert!(h.log.diagnostics().iter().any(|d| d.contains("signal")));
    }

    #[tokio::test]
    async fn missing_exit_event_is_failure() {
        let h = harness(Box::new(ScriptedLauncher::new(vec![output(OutputStream::Stdout, "x")])));

        assert_eq!(h.runner.run("sync", ".").await, RunResult::Failed);
        assert_eq!(h.notes.messages(), vec![STARTING_MESSAGE, FAILURE_MESSAGE]);
    }

    #[tokio::test]
    async fn duplicate_exit_events_notify_once() {
        let h = harness(Box::new(ScriptedLauncher::new(vec![
            ProcessEvent::Exited { code: Some(1) },
            ProcessEvent::Exited { code: Some(0) },
        ])));

        assert_eq!(h.runner.run("sync", ".").await, RunResult::Failed);
        assert_eq!(h.notes.messages(), vec![STARTING_MESSAGE, FAILURE_MESSAGE]);
    }

    #[tokio::test]
    async fn launch_error_goes_to_log_only() {
        let h = harness(Box::new(ScriptedLauncher::failing("permission denied")));

        assert_eq!(h.runner.run("sync", ".").await, RunResult::Failed);
        assert!(h.notes.messages().iter().all(|m| !m.contains("permission denied")));
        assert!(h.log.diagnostics().iter().any(|d| d.contains("permission denied")));
    }

    #[tokio::test]
    async fn overlapping_triggers_are_independent() {
        let h = harness(Box::new(LiveShellLauncher));
        let settings = Settings { command: "echo hi".into(), working_directory: ".".into() };

        let first = h.runner.trigger(&settings);
        let second = h.runner.trigger(&settings);

        assert_eq!(first.await.unwrap(), RunResult::Succeeded);
        assert_eq!(second.await.unwrap(), RunResult::Succeeded);
        assert_eq!(h.notes.count(STARTING_MESSAGE), 2);
        assert_eq!(h.notes.count(SUCCESS_MESSAGE), 2);
    }

    #[test]
    fn only_zero_is_success() {
        assert!(RunResult::from_exit_code(Some(0)).is_success());
        assert!(!RunResult::from_exit_code(Some(1)).is_success());
        assert!(!RunResult::from_exit_code(Some(-1)).is_success());
        assert!(!RunResult::from_exit_code(None).is_success());
    }

    #[test]
    fn terminal_states_accept_no_transitions() {
        for terminal in [RunState::Succeeded, RunState::Failed] {
            assert!(terminal.is_terminal());
            for next in [RunState::Starting, RunState::Running, RunState::Failed] {
                assert!(!terminal.can_advance_to(next));
            }
        }
        assert!(RunState::Starting.can_advance_to(RunState::Failed));
        assert!(!RunState::Idle.can_advance_to(RunState::Running));
    }
}
