//! Internal library crate for codews.
//!
//! The shipped application is the `cws` binary (`src/main.rs`): a terminal browser for the
//! `$HOME/codeWS` workspace that builds and runs C, Python3 and assembly programs from their
//! language directories.
//!
//! This library exists to share code between targets (binary, tests) and to keep modules organized.
//! This API is only used to build the `cws` binary and is not considered a library for external use.

pub mod app;
pub mod config;
pub mod core;
pub mod error;
pub mod ui;
pub mod utils;

pub use config::Config;
pub use error::{Result, WorkspaceError};
