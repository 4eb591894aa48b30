//! Miscellaneous utility functions for codews.
//!
//! - [helpers]: color parsing, home directory lookup, "~" shortening, scrollback clamping
//! - [cli]: command line flags handled before the TUI starts
//! - [logging]: the tracing subscriber writing to a rolling log file

pub mod cli;
pub mod helpers;
pub mod logging;

pub use helpers::{
    DEFAULT_SCROLLBACK, clamp_scrollback, get_home, parse_color, shorten_home_path,
    workspace_root,
};
