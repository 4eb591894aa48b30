//! Error type shared by the codews core.
//!
//! Most of these never leave the session/dispatcher boundary: they are logged and the
//! offending action becomes a no-op. Only [WorkspaceError::HomeUnset] and
//! [WorkspaceError::Watch] are fatal, and only at startup.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkspaceError {
    #[error("environment variable HOME is not set")]
    HomeUnset,

    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to initialize file watcher: {0}")]
    Watch(#[from] notify::Error),

    #[error("no supported language for {0}")]
    UnknownLanguage(PathBuf),

    #[error("{0} is not a regular file")]
    NotAFile(PathBuf),

    #[error("{0} is not executable")]
    NotExecutable(PathBuf),

    #[error("empty name")]
    EmptyName,

    #[error("{0} is outside the workspace root")]
    EscapesRoot(PathBuf),
}

impl WorkspaceError {
    /// Wraps an [io::Error] together with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        WorkspaceError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, WorkspaceError>;
