//! Pending actions and keypress outcomes for codews.
//!
//! A [PendingAction] is built from a key press and the current selection, handed to the
//! [ActionDispatcher](crate::app::ActionDispatcher) and dropped right after. Nothing here is
//! stored between key presses.

use std::path::PathBuf;

/// One user-initiated operation together with its target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    /// Open a file in the viewer picked by its extension.
    Open(PathBuf),
    /// Run an executable file in the current directory.
    Execute(PathBuf),
    /// Build and run a file with the pipeline of its language directory.
    CompileAndRun(PathBuf),
    /// Set (`true`) or clear (`false`) the execute bits.
    SetExecutable { path: PathBuf, executable: bool },
    /// Create an empty file with this name in the current directory.
    CreateFile(String),
    /// Create a directory with this name in the current directory.
    CreateDirectory(String),
    /// Delete a file, or a directory and everything below it.
    Delete(PathBuf),
}

/// What the terminal loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
}
