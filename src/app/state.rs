//! Application state for the codews terminal front end.
//!
//! [AppState] wraps the [WorkspaceSession] together with everything only the TUI needs:
//! - the configuration and the keymap built from it
//! - the [ProcessRunner] and the receiving end of its output channel
//! - the runner output buffer shown in the output pane
//! - the latest log line for the status line
//!
//! The terminal loop calls [AppState::tick] to drain the channels and [AppState::handle_action]
//! for every mapped key press.

use crate::app::actions::Outcome;
use crate::app::keymap::{Action, Keymap};
use crate::app::output::OutputLog;
use crate::app::prompt::Prompter;
use crate::app::session::WorkspaceSession;
use crate::config::Config;
use crate::core::proc::{ProcessRunner, RunRequest, RunnerEvent};

use crossbeam_channel::Receiver;
use crossterm::event::KeyEvent;

pub struct AppState<'a> {
    config: &'a Config,
    keymap: Keymap,
    session: WorkspaceSession,
    runner: ProcessRunner,
    runner_rx: Receiver<RunnerEvent>,
    status_rx: Option<Receiver<String>>,
    output: OutputLog,
    status: String,
    interactive: Vec<RunRequest>,
}

impl<'a> AppState<'a> {
    pub fn new(config: &'a Config, session: WorkspaceSession) -> Self {
        let (runner, runner_rx) = ProcessRunner::new();
        Self {
            config,
            keymap: Keymap::from_keys(config.keys()),
            session,
            runner,
            runner_rx,
            status_rx: None,
            output: OutputLog::new(config.general().scrollback()),
            status: String::new(),
            interactive: Vec::new(),
        }
    }

    /// Shows the latest line arriving on `rx` in the status line.
    pub fn with_status_rx(mut self, rx: Receiver<String>) -> Self {
        self.status_rx = Some(rx);
        self
    }

    // Getters / accessors

    #[inline]
    pub fn config(&self) -> &'a Config {
        self.config
    }

    #[inline]
    pub fn session(&self) -> &WorkspaceSession {
        &self.session
    }

    #[inline]
    pub fn output(&self) -> &OutputLog {
        &self.output
    }

    #[inline]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Opens the README of the startup directory, if the session wants it.
    pub fn open_initial(&mut self) {
        self.session.open_initial(&self.runner);
    }

    /// Drains runner output, log lines and watcher events.
    ///
    /// Returns true if anything visible changed.
    pub fn tick(&mut self) -> bool {
        let mut changed = false;

        while let Ok(event) = self.runner_rx.try_recv() {
            if let Some(request) = self.output.apply(event) {
                self.interactive.push(request);
            }
            changed = true;
        }

        if let Some(rx) = &self.status_rx {
            while let Ok(line) = rx.try_recv() {
                self.status = line;
                changed = true;
            }
        }

        changed |= self.session.refresh_if_changed();
        changed
    }

    /// Requests that need the terminal, in arrival order.
    pub fn take_interactive(&mut self) -> Vec<RunRequest> {
        std::mem::take(&mut self.interactive)
    }

    pub fn lookup(&self, key: KeyEvent) -> Option<Action> {
        self.keymap.lookup(key)
    }

    pub fn handle_action(&mut self, action: Action, prompter: &mut dyn Prompter) -> Outcome {
        self.session.handle(action, &self.runner, prompter)
    }
}
