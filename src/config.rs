//! Configuration loading and management for codews.
//!
//! This module holds all the config options and structs:
//! - [general]: behavior of the session (watcher, README auto-open, output scrollback).
//! - [input]: keybindings and the viewer programs used by the open action.
//! - [theme]: colors for entries, selection, header and status line.
//! - [load]: reading `codews.toml` and turning it into [Config].
//!
//! [Config] is the struct everything else reads from.

pub mod general;
pub mod input;
pub mod load;
pub mod theme;

pub use general::{General, InternalGeneral};
pub use input::{Keys, Viewers};
pub use load::Config;
pub use theme::{ColorPair, Theme};
