//! Core runtime logic for codews.
//!
//! The non-UI pieces used by the application:
//! - [guard]: keeps paths inside the workspace root
//! - [fm]: reads and classifies one directory (see [list_dir], [Entry], [Listing])
//! - [lang]: maps a path to its toolchain
//! - [markup]: the label markup of listed entries
//! - [ops]: create, delete and chmod
//! - [proc]: the command runner port and the process runner
//! - [watch]: filesystem change notifications for the current directory
//! - [terminal]: terminal setup/teardown and the main crossterm/ratatui event loop

pub mod fm;
pub mod guard;
pub mod lang;
pub mod markup;
pub mod ops;
pub mod proc;
pub mod terminal;
pub mod watch;

pub use fm::{Entry, EntryKind, Listing, RESERVED_NAME, list_dir};
pub use lang::{Language, resolve_language};
pub use markup::strip_markup;
pub use proc::{CommandRunner, ProcessRunner, RunRequest, RunnerEvent, shell_quote};
pub use watch::DirWatcher;
