//! The codews process module.
//!
//! Defines the [CommandRunner] port the dispatcher hands its commands to, the [RunRequest] it
//! sends, and [ProcessRunner], the runner used by the terminal front end.
//!
//! Requests are fire-and-forget. [ProcessRunner] starts the process on a background thread and
//! streams its stdout and stderr line by line as [RunnerEvent]s over a crossbeam channel; the
//! terminal loop drains that channel into the output pane. Requests marked interactive are not
//! started here at all: they are forwarded to the front end, which hands them the terminal.

use crossbeam_channel::{Receiver, Sender, unbounded};

use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;

/// A command for the runner: working directory plus argument vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    working_dir: Option<PathBuf>,
    argv: Vec<String>,
    interactive: bool,
    clear_output: bool,
    pause_after: bool,
}

impl RunRequest {
    pub fn new(working_dir: Option<PathBuf>, argv: Vec<String>) -> Self {
        Self {
            working_dir,
            argv,
            interactive: false,
            clear_output: false,
            pause_after: false,
        }
    }

    /// Marks the request as needing the controlling terminal (editors and the like).
    pub fn interactive(mut self) -> Self {
        self.interactive = true;
        self
    }

    /// Asks the output sink to clear itself before the command starts.
    pub fn clear_output(mut self) -> Self {
        self.clear_output = true;
        self
    }

    /// For interactive requests: wait for Enter before the front end takes the terminal back.
    pub fn pause_after(mut self) -> Self {
        self.pause_after = true;
        self
    }

    // Accessors

    #[inline]
    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }

    #[inline]
    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    #[inline]
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    #[inline]
    pub fn clears_output(&self) -> bool {
        self.clear_output
    }

    #[inline]
    pub fn pauses_after(&self) -> bool {
        self.pause_after
    }

    /// The argument vector joined with spaces, for logs and the output pane.
    pub fn display(&self) -> String {
        self.argv.join(" ")
    }

    /// Builds a [Command] for the request with the working directory applied.
    ///
    /// Returns `None` for an empty argument vector.
    pub fn to_command(&self) -> Option<Command> {
        let (program, args) = self.argv.split_first()?;
        let mut cmd = Command::new(program);
        cmd.args(args);
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }
        Some(cmd)
    }
}

/// The port every external command goes through.
///
/// Implementations must not block: the caller never learns how the command ended.
pub trait CommandRunner {
    fn spawn(&self, request: RunRequest);
}

/// Output produced by [ProcessRunner] for the display sink.
#[derive(Debug, Clone, PartialEq)]
pub enum RunnerEvent {
    /// Clear the output before the next command.
    Clear,
    /// The command line about to run.
    Started(String),
    /// One line of stdout or stderr.
    Line(String),
    /// The process ended. `None` when killed by a signal.
    Exited(Option<i32>),
    /// A request the front end must run in the foreground.
    Interactive(RunRequest),
}

/// Runs commands on background threads and streams their output over a channel.
#[derive(Clone)]
pub struct ProcessRunner {
    tx: Sender<RunnerEvent>,
}

impl ProcessRunner {
    /// Creates the runner together with the receiving end of its output channel.
    pub fn new() -> (Self, Receiver<RunnerEvent>) {
        let (tx, rx) = unbounded();
        (Self { tx }, rx)
    }
}

impl CommandRunner for ProcessRunner {
    fn spawn(&self, request: RunRequest) {
        if request.argv().is_empty() {
            tracing::warn!("ignoring empty run request");
            return;
        }

        if request.clears_output() {
            let _ = self.tx.send(RunnerEvent::Clear);
        }

        if request.is_interactive() {
            let _ = self.tx.send(RunnerEvent::Interactive(request));
            return;
        }

        tracing::info!(command = %request.display(), cwd = ?request.working_dir(), "spawning");
        let tx = self.tx.clone();
        thread::spawn(move || run_streamed(request, tx));
    }
}

/// Runs one request to completion, forwarding every output line.
fn run_streamed(request: RunRequest, tx: Sender<RunnerEvent>) {
    let _ = tx.send(RunnerEvent::Started(request.display()));

    let program = &request.argv()[0];
    if which::which(program).is_err() && !Path::new(program).exists() {
        tracing::warn!(program = %program, "command not found");
        let _ = tx.send(RunnerEvent::Line(format!("{program}: command not found")));
        let _ = tx.send(RunnerEvent::Exited(Some(127)));
        return;
    }

    let Some(mut cmd) = request.to_command() else {
        return;
    };
    let child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn();

    let mut child = match child {
        Ok(child) => child,
        Err(e) => {
            tracing::warn!(command = %request.display(), error = %e, "spawn failed");
            let _ = tx.send(RunnerEvent::Line(format!("{program}: {e}")));
            let _ = tx.send(RunnerEvent::Exited(None));
            return;
        }
    };

    let readers: Vec<_> = [
        child.stdout.take().map(|s| Box::new(s) as Box<dyn Read + Send>),
        child.stderr.take().map(|s| Box::new(s) as Box<dyn Read + Send>),
    ]
    .into_iter()
    .flatten()
    .map(|stream| {
        let tx = tx.clone();
        thread::spawn(move || forward_lines(stream, &tx))
    })
    .collect();

    for reader in readers {
        let _ = reader.join();
    }

    let code = match child.wait() {
        Ok(status) => status.code(),
        Err(e) => {
            tracing::warn!(error = %e, "wait failed");
            None
        }
    };
    tracing::debug!(command = %request.display(), ?code, "process exited");
    let _ = tx.send(RunnerEvent::Exited(code));
}

fn forward_lines(stream: Box<dyn Read + Send>, tx: &Sender<RunnerEvent>) {
    let reader = BufReader::new(stream);
    for line in reader.lines() {
        let Ok(line) = line else { break };
        if tx.send(RunnerEvent::Line(line)).is_err() {
            break;
        }
    }
}

/// Quotes `text` for a POSIX shell using single quotes.
pub fn shell_quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', r"'\''"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn collect_until_exit(rx: &Receiver<RunnerEvent>) -> Vec<RunnerEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.recv_timeout(Duration::from_secs(5)) {
            let done = matches!(event, RunnerEvent::Exited(_));
            events.push(event);
            if done {
                break;
            }
        }
        events
    }

    #[test]
    fn shell_quote_escapes_single_quotes() {
        assert_eq!(shell_quote("plain"), "'plain'");
        assert_eq!(shell_quote("it's here"), r"'it'\''s here'");
        assert_eq!(shell_quote("a b"), "'a b'");
    }

    #[test]
    fn request_builders() {
        let req = RunRequest::new(None, vec!["nvim".into(), "a.txt".into()])
            .interactive()
            .clear_output();
        assert!(req.is_interactive());
        assert!(req.clears_output());
        assert_eq!(req.display(), "nvim a.txt");
        assert!(RunRequest::new(None, vec![]).to_command().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn runner_streams_output() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = tempfile::tempdir()?;
        let (runner, rx) = ProcessRunner::new();
        runner.spawn(
            RunRequest::new(
                Some(tmp.path().to_path_buf()),
                vec!["sh".into(), "-c".into(), "echo hello; pwd".into()],
            )
            .clear_output(),
        );

        let events = collect_until_exit(&rx);
        assert_eq!(events.first(), Some(&RunnerEvent::Clear));
        assert!(events.contains(&RunnerEvent::Line("hello".into())));
        assert!(events.iter().any(|e| matches!(
            e,
            RunnerEvent::Line(l) if l.ends_with(&*tmp.path().file_name().unwrap().to_string_lossy())
        )));
        assert_eq!(events.last(), Some(&RunnerEvent::Exited(Some(0))));
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn script_without_shebang_runs_under_bash() -> Result<(), Box<dyn std::error::Error>> {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir()?;
        let script = tmp.path().join("run.sh");
        std::fs::write(&script, "echo hello-from-script\n")?;
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755))?;

        let (runner, rx) = ProcessRunner::new();
        runner.spawn(RunRequest::new(
            Some(tmp.path().to_path_buf()),
            vec![
                "bash".into(),
                "-c".into(),
                shell_quote(&script.to_string_lossy()),
            ],
        ));

        let events = collect_until_exit(&rx);
        assert!(events.contains(&RunnerEvent::Line("hello-from-script".into())));
        assert_eq!(events.last(), Some(&RunnerEvent::Exited(Some(0))));
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn background_runs_read_eof() {
        let (runner, rx) = ProcessRunner::new();
        runner.spawn(RunRequest::new(
            None,
            vec![
                "bash".into(),
                "-c".into(),
                "read -r line || echo no-input".into(),
            ],
        ));

        let events = collect_until_exit(&rx);
        assert!(events.contains(&RunnerEvent::Line("no-input".into())));
        assert_eq!(events.last(), Some(&RunnerEvent::Exited(Some(0))));
    }

    #[test]
    fn runner_reports_missing_program() {
        let (runner, rx) = ProcessRunner::new();
        runner.spawn(RunRequest::new(
            None,
            vec!["codews-definitely-not-a-program".into()],
        ));

        let events = collect_until_exit(&rx);
        assert!(events.iter().any(|e| matches!(
            e,
            RunnerEvent::Line(l) if l.contains("command not found")
        )));
        assert_eq!(events.last(), Some(&RunnerEvent::Exited(Some(127))));
    }

    #[test]
    fn interactive_requests_are_forwarded() {
        let (runner, rx) = ProcessRunner::new();
        let req = RunRequest::new(None, vec!["nvim".into(), "x".into()]).interactive();
        runner.spawn(req.clone());
        assert_eq!(rx.try_recv().ok(), Some(RunnerEvent::Interactive(req)));
    }
}
