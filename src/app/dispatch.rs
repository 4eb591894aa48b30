//! The action dispatcher for codews.
//!
//! Turns a [PendingAction] into either a direct filesystem operation (create, delete, chmod) or
//! a [RunRequest] for the [CommandRunner]. Confirmation for destructive or long-running actions
//! is asked through the [Prompter]. Commands are handed off and never waited on.

use crate::app::actions::PendingAction;
use crate::app::nav::NavState;
use crate::app::prompt::Prompter;
use crate::config::Viewers;
use crate::core::fm::is_owner_executable;
use crate::core::lang::{Language, resolve_language};
use crate::core::markup::strip_markup;
use crate::core::proc::{CommandRunner, RunRequest, shell_quote};
use crate::core::{guard, ops};
use crate::error::{Result, WorkspaceError};

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

const DELETE_PROMPT: &str = "Are you sure you want to delete the selected item?";

/// Which configured program opens a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerKind {
    Image,
    Document,
    Editor,
}

/// Picks the viewer from the file extension, case-insensitively.
pub fn viewer_for(path: &Path) -> ViewerKind {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("jpg" | "png") => ViewerKind::Image,
        Some("pdf") => ViewerKind::Document,
        _ => ViewerKind::Editor,
    }
}

/// Builds the shell pipeline that compiles and runs `path` for `language`.
///
/// Every path is stripped of markup and single-quoted. Returns `None` for
/// [Language::Unknown] and for paths without a parent directory or file name.
pub fn compile_command(language: Language, path: &Path) -> Option<String> {
    let dir = path.parent()?;
    let file = path.file_name()?;

    let quote = |text: &str| shell_quote(&strip_markup(text));
    let dir_q = quote(&dir.to_string_lossy());

    let pipeline = match language {
        Language::C => format!("cd {dir_q} && make clean && make"),
        Language::Python3 => format!(
            "cd {dir_q} && python3 {}",
            quote(&path.to_string_lossy())
        ),
        Language::Assembly => {
            let stem = path.file_stem()?.to_string_lossy();
            let stem = strip_markup(&stem);
            format!(
                "cd {dir_q} && nasm -f elf64 {} -o {} && ld {} -o {} && {}",
                quote(&file.to_string_lossy()),
                shell_quote(&format!("{stem}.o")),
                shell_quote(&format!("{stem}.o")),
                shell_quote(&stem),
                shell_quote(&format!("./{stem}")),
            )
        }
        Language::Unknown => return None,
    };
    Some(pipeline)
}

pub struct ActionDispatcher {
    viewers: Viewers,
    foreground_runs: bool,
}

impl ActionDispatcher {
    pub fn new(viewers: Viewers) -> Self {
        Self {
            viewers,
            foreground_runs: false,
        }
    }

    /// Hands Execute and CompileAndRun commands the terminal instead of the output pane, so
    /// programs reading stdin can be answered.
    pub fn with_foreground_runs(mut self, enabled: bool) -> Self {
        self.foreground_runs = enabled;
        self
    }

    /// Performs one pending action against the navigation state.
    ///
    /// Actions that change the current directory's contents re-list it on success. A failed
    /// delete re-lists too, since part of the tree may already be gone.
    pub fn dispatch(
        &self,
        nav: &mut NavState,
        action: PendingAction,
        runner: &dyn CommandRunner,
        prompter: &mut dyn Prompter,
    ) -> Result<()> {
        match action {
            PendingAction::Open(path) => self.open(&path, runner),
            PendingAction::Execute(path) => self.execute(nav.current_dir(), &path, runner),
            PendingAction::CompileAndRun(path) => {
                self.compile_and_run(nav.root(), &path, runner, prompter)
            }
            PendingAction::SetExecutable { path, executable } => {
                ops::set_executable(&path, executable)?;
                nav.relist()
            }
            PendingAction::CreateFile(name) => self.create(nav, &name, false),
            PendingAction::CreateDirectory(name) => self.create(nav, &name, true),
            PendingAction::Delete(path) => self.delete(nav, &path, prompter),
        }
    }

    /// Opens a regular file in the viewer picked by [viewer_for].
    pub fn open(&self, path: &Path, runner: &dyn CommandRunner) -> Result<()> {
        let md = fs::metadata(path).map_err(|e| WorkspaceError::io(path, e))?;
        if md.is_dir() {
            return Err(WorkspaceError::NotAFile(path.to_path_buf()));
        }

        let kind = viewer_for(path);
        let viewer = match kind {
            ViewerKind::Image => self.viewers.image(),
            ViewerKind::Document => self.viewers.document(),
            ViewerKind::Editor => self.viewers.editor(),
        };
        let argv = viewer
            .split_whitespace()
            .map(String::from)
            .chain(std::iter::once(path.to_string_lossy().into_owned()))
            .collect();

        let request = RunRequest::new(None, argv);
        let request = if kind == ViewerKind::Editor {
            request.interactive()
        } else {
            request
        };
        tracing::info!(path = %path.display(), viewer = %viewer, "opening file");
        runner.spawn(request);
        Ok(())
    }

    /// Runs an executable file through bash with `cwd` as its working directory.
    ///
    /// Going through the shell lets scripts without a `#!` line run as bash scripts.
    pub fn execute(&self, cwd: &Path, path: &Path, runner: &dyn CommandRunner) -> Result<()> {
        let md = fs::metadata(path).map_err(|e| WorkspaceError::io(path, e))?;
        if md.is_dir() {
            return Err(WorkspaceError::NotAFile(path.to_path_buf()));
        }
        if !is_owner_executable(&md) {
            return Err(WorkspaceError::NotExecutable(path.to_path_buf()));
        }

        let command = shell_quote(&strip_markup(&path.to_string_lossy()));
        tracing::info!(path = %path.display(), "executing");
        runner.spawn(self.shell_request(Some(cwd.to_path_buf()), command));
        Ok(())
    }

    /// Confirms, then runs the compile pipeline of the file's language directory.
    ///
    /// Unknown languages are rejected before the user is asked anything.
    pub fn compile_and_run(
        &self,
        root: &Path,
        path: &Path,
        runner: &dyn CommandRunner,
        prompter: &mut dyn Prompter,
    ) -> Result<()> {
        let language = resolve_language(root, path);
        let Some(pipeline) = compile_command(language, path) else {
            return Err(WorkspaceError::UnknownLanguage(path.to_path_buf()));
        };

        let question = format!("Are you sure you want to compile and run this {language} program?");
        if !prompter.confirm(&question) {
            tracing::debug!(path = %path.display(), "compile and run declined");
            return Ok(());
        }

        let working_dir = path.parent().map(Path::to_path_buf);
        tracing::info!(%language, path = %path.display(), "compile and run");
        runner.spawn(self.shell_request(working_dir, pipeline));
        Ok(())
    }

    /// A `bash -c` request that clears the output first. In foreground mode it takes the
    /// terminal and waits for a key once the command ends.
    fn shell_request(&self, working_dir: Option<PathBuf>, command: String) -> RunRequest {
        let request = RunRequest::new(working_dir, vec!["bash".into(), "-c".into(), command])
            .clear_output();
        if self.foreground_runs {
            request.interactive().pause_after()
        } else {
            request
        }
    }

    /// Creates an empty file or a 0755 directory named `name` in the current directory and
    /// selects it.
    pub fn create(&self, nav: &mut NavState, name: &str, is_dir: bool) -> Result<()> {
        let path = new_entry_path(nav, name)?;
        if is_dir {
            ops::create_dir(&path)?;
        } else {
            ops::create_file(&path)?;
        }
        tracing::info!(path = %path.display(), is_dir, "created");

        nav.relist()?;
        if let Some(file_name) = path.file_name() {
            nav.select_name(file_name);
        }
        Ok(())
    }

    /// Confirms, then deletes `path`. Directories go recursively, skipping `codeWS`.
    ///
    /// The current directory is re-listed whether or not the removal succeeded; the removal
    /// error takes precedence over a listing error.
    pub fn delete(
        &self,
        nav: &mut NavState,
        path: &Path,
        prompter: &mut dyn Prompter,
    ) -> Result<()> {
        if !prompter.confirm(DELETE_PROMPT) {
            return Ok(());
        }

        let md = fs::symlink_metadata(path).map_err(|e| WorkspaceError::io(path, e))?;
        let removed = if md.is_dir() {
            ops::remove_recursive(path)
        } else {
            ops::remove_file(path)
        };
        match &removed {
            Ok(()) => tracing::info!(path = %path.display(), "deleted"),
            Err(e) => tracing::error!(path = %path.display(), error = %e, "delete incomplete"),
        }

        let relisted = nav.relist();
        removed.and(relisted)
    }
}

fn new_entry_path(nav: &NavState, name: &str) -> Result<PathBuf> {
    let name = name.trim();
    if name.is_empty() {
        return Err(WorkspaceError::EmptyName);
    }
    let path = guard::resolve(nav.current_dir(), OsStr::new(name));
    if !guard::contains(nav.root(), &path) {
        return Err(WorkspaceError::EscapesRoot(path));
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewer_by_extension() {
        assert_eq!(viewer_for(Path::new("/w/a.JPG")), ViewerKind::Image);
        assert_eq!(viewer_for(Path::new("/w/a.png")), ViewerKind::Image);
        assert_eq!(viewer_for(Path::new("/w/a.pdf")), ViewerKind::Document);
        assert_eq!(viewer_for(Path::new("/w/a.c")), ViewerKind::Editor);
        assert_eq!(viewer_for(Path::new("/w/Makefile")), ViewerKind::Editor);
    }

    #[test]
    fn compile_pipelines() {
        let path = Path::new("/h/codeWS/C/hello/main.c");
        assert_eq!(
            compile_command(Language::C, path).as_deref(),
            Some("cd '/h/codeWS/C/hello' && make clean && make")
        );

        let path = Path::new("/h/codeWS/Python3/x.py");
        assert_eq!(
            compile_command(Language::Python3, path).as_deref(),
            Some("cd '/h/codeWS/Python3' && python3 '/h/codeWS/Python3/x.py'")
        );

        let path = Path::new("/h/codeWS/Asm/hi.asm");
        assert_eq!(
            compile_command(Language::Assembly, path).as_deref(),
            Some(
                "cd '/h/codeWS/Asm' && nasm -f elf64 'hi.asm' -o 'hi.o' && ld 'hi.o' -o 'hi' && './hi'"
            )
        );

        assert_eq!(compile_command(Language::Unknown, path), None);
    }

    #[test]
    fn pipeline_paths_are_stripped_and_quoted() {
        let path = Path::new("/h/codeWS/Python3/it's<b>.py");
        assert_eq!(
            compile_command(Language::Python3, path).as_deref(),
            Some(r"cd '/h/codeWS/Python3' && python3 '/h/codeWS/Python3/it'\''s.py'")
        );
    }
}
