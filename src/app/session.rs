//! The workspace session for codews.
//!
//! [WorkspaceSession] is the one value the front end holds. It owns the navigation state, the
//! dispatcher and the directory watcher, and turns each [Action] into navigation or a
//! [PendingAction]. Errors stop here: they are logged and the action becomes a no-op.

use crate::app::actions::{Outcome, PendingAction};
use crate::app::dispatch::ActionDispatcher;
use crate::app::keymap::{Action, FileAction, NavAction, SystemAction};
use crate::app::nav::NavState;
use crate::app::prompt::{Prompter, Unattended};
use crate::config::{Config, Viewers};
use crate::core::fm::{Entry, Listing};
use crate::core::proc::CommandRunner;
use crate::core::watch::DirWatcher;
use crate::core::guard;
use crate::error::{Result, WorkspaceError};
use crate::utils::workspace_root;

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

pub struct WorkspaceSession {
    nav: NavState,
    dispatcher: ActionDispatcher,
    watcher: Option<DirWatcher>,
    auto_open_readme: bool,
}

impl WorkspaceSession {
    /// Starts a session at `$HOME/codeWS`, creating the directory if needed.
    ///
    /// # Errors
    /// A missing `HOME`, an uncreatable root, or (with `general.watch` on) a watcher that cannot
    /// be set up. All of these are fatal for the caller.
    pub fn start(config: &Config) -> Result<Self> {
        let root = workspace_root()?;
        let mut session = Self::with_root(root, config.viewers().clone())?
            .auto_open_readme(config.general().auto_open_readme())
            .foreground_runs(config.general().foreground_runs());
        if config.general().watch() {
            session = session.with_watcher(DirWatcher::new()?);
        }
        Ok(session)
    }

    /// Starts a session at an arbitrary root without a watcher.
    ///
    /// The root is created if missing. An unreadable root is logged and starts out empty.
    pub fn with_root(root: PathBuf, viewers: Viewers) -> Result<Self> {
        if !root.is_dir() {
            fs::create_dir_all(&root).map_err(|e| WorkspaceError::io(&root, e))?;
            tracing::info!(root = %root.display(), "created workspace root");
        }

        let mut nav = NavState::new(root);
        if let Err(e) = nav.load() {
            tracing::error!(error = %e, "cannot list workspace root");
        }

        Ok(Self {
            nav,
            dispatcher: ActionDispatcher::new(viewers),
            watcher: None,
            auto_open_readme: false,
        })
    }

    /// Watches the current directory, following it on every change of directory.
    pub fn with_watcher(mut self, mut watcher: DirWatcher) -> Self {
        watcher.follow(self.nav.current_dir());
        self.watcher = Some(watcher);
        self
    }

    /// Whether navigating into a directory opens its README.
    pub fn auto_open_readme(mut self, enabled: bool) -> Self {
        self.auto_open_readme = enabled;
        self
    }

    /// Whether Execute and CompileAndRun take over the terminal.
    pub fn foreground_runs(mut self, enabled: bool) -> Self {
        self.dispatcher = self.dispatcher.with_foreground_runs(enabled);
        self
    }

    // Getters / Accessors

    #[inline]
    pub fn root(&self) -> &Path {
        self.nav.root()
    }

    #[inline]
    pub fn current_dir(&self) -> &Path {
        self.nav.current_dir()
    }

    #[inline]
    pub fn listing(&self) -> &Listing {
        self.nav.listing()
    }

    #[inline]
    pub fn entries(&self) -> &[Entry] {
        self.nav.entries()
    }

    #[inline]
    pub fn selected_idx(&self) -> usize {
        self.nav.selected_idx()
    }

    #[inline]
    pub fn selected_entry(&self) -> Option<&Entry> {
        self.nav.selected_entry()
    }

    #[inline]
    pub fn nav_mut(&mut self) -> &mut NavState {
        &mut self.nav
    }

    // Navigation

    /// Acts on the README of the startup listing. Call once the runner is ready.
    pub fn open_initial(&mut self, runner: &dyn CommandRunner) {
        self.after_navigation(runner);
    }

    /// Enters the child directory `name`, or opens it if it is a file.
    pub fn enter(&mut self, name: &OsStr, runner: &dyn CommandRunner) {
        let path = guard::resolve(self.nav.current_dir(), name);
        let md = match fs::metadata(&path) {
            Ok(md) => md,
            Err(e) => {
                tracing::warn!(error = %WorkspaceError::io(&path, e), "cannot enter");
                return;
            }
        };

        if !md.is_dir() {
            self.open(path, runner);
            return;
        }

        match self.nav.change_dir(path) {
            Ok(()) => self.after_navigation(runner),
            Err(e) => tracing::warn!(error = %e, "cannot enter directory"),
        }
    }

    /// Moves one level up, never above the root.
    pub fn go_up(&mut self, runner: &dyn CommandRunner) {
        match self.nav.go_up() {
            Ok(true) => self.after_navigation(runner),
            Ok(false) => {}
            Err(e) => tracing::warn!(error = %e, "cannot go up"),
        }
    }

    /// Re-reads the current directory, keeping the selection by name.
    pub fn relist(&mut self) {
        if let Err(e) = self.nav.relist() {
            tracing::warn!(error = %e, "cannot re-list directory");
        }
    }

    /// Re-lists if the watcher saw changes since the last call. Never opens the README.
    pub fn refresh_if_changed(&mut self) -> bool {
        let changed = self.watcher.as_ref().is_some_and(DirWatcher::take_pending);
        if changed {
            tracing::debug!(dir = %self.nav.current_dir().display(), "directory changed on disk");
            self.relist();
        }
        changed
    }

    // Actions

    /// Handles one keymap action.
    pub fn handle(
        &mut self,
        action: Action,
        runner: &dyn CommandRunner,
        prompter: &mut dyn Prompter,
    ) -> Outcome {
        match action {
            Action::Nav(nav) => self.handle_nav(nav, runner),
            Action::File(file) => self.handle_file(file, runner, prompter),
            Action::System(SystemAction::Quit) => return Outcome::Quit,
        }
        Outcome::Continue
    }

    /// Runs a pending action through the dispatcher, logging any failure.
    pub fn perform(
        &mut self,
        action: PendingAction,
        runner: &dyn CommandRunner,
        prompter: &mut dyn Prompter,
    ) {
        let what = describe(&action);
        let result = self
            .dispatcher
            .dispatch(&mut self.nav, action, runner, prompter);
        self.log_result(what, result);
    }

    fn handle_nav(&mut self, action: NavAction, runner: &dyn CommandRunner) {
        match action {
            NavAction::SelectNext => {
                self.nav.select_next();
            }
            NavAction::SelectPrev => {
                self.nav.select_prev();
            }
            NavAction::Enter => {
                if let Some(name) = self.selected_entry().map(|e| e.name().to_os_string()) {
                    self.enter(&name, runner);
                }
            }
            NavAction::GoUp => self.go_up(runner),
        }
    }

    fn handle_file(
        &mut self,
        action: FileAction,
        runner: &dyn CommandRunner,
        prompter: &mut dyn Prompter,
    ) {
        let pending = match action {
            FileAction::NewFile => prompter
                .prompt_text("New file name")
                .map(PendingAction::CreateFile),
            FileAction::NewDirectory => prompter
                .prompt_text("New directory name")
                .map(PendingAction::CreateDirectory),
            _ => {
                let Some(path) = self.nav.selected_path() else {
                    tracing::debug!(?action, "no entry selected");
                    return;
                };
                Some(match action {
                    FileAction::CompileAndRun => PendingAction::CompileAndRun(path),
                    FileAction::Execute => PendingAction::Execute(path),
                    FileAction::MakeExecutable => PendingAction::SetExecutable {
                        path,
                        executable: true,
                    },
                    FileAction::MakeNotExecutable => PendingAction::SetExecutable {
                        path,
                        executable: false,
                    },
                    FileAction::Delete => PendingAction::Delete(path),
                    FileAction::NewFile | FileAction::NewDirectory => return,
                })
            }
        };

        if let Some(pending) = pending {
            self.perform(pending, runner, prompter);
        }
    }

    /// Follows the new directory with the watcher and acts on its README.
    fn after_navigation(&mut self, runner: &dyn CommandRunner) {
        if let Some(watcher) = self.watcher.as_mut() {
            watcher.follow(self.nav.current_dir());
        }

        if !self.auto_open_readme {
            return;
        }
        if let Some(readme) = self.nav.listing().readme().map(Path::to_path_buf) {
            self.open(readme, runner);
        }
    }

    fn open(&mut self, path: PathBuf, runner: &dyn CommandRunner) {
        self.perform(PendingAction::Open(path), runner, &mut Unattended);
    }

    fn log_result(&self, what: &str, result: Result<()>) {
        if let Err(e) = result {
            tracing::warn!(error = %e, "{what} failed");
        }
    }
}

fn describe(action: &PendingAction) -> &'static str {
    match action {
        PendingAction::Open(_) => "open",
        PendingAction::Execute(_) => "execute",
        PendingAction::CompileAndRun(_) => "compile and run",
        PendingAction::SetExecutable { .. } => "chmod",
        PendingAction::CreateFile(_) => "create file",
        PendingAction::CreateDirectory(_) => "create directory",
        PendingAction::Delete(_) => "delete",
    }
}
