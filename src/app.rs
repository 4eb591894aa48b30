//! Application logic for codews.
//!
//! - [nav]: root, current directory, listing and selection
//! - [dispatch]: turns pending actions into filesystem operations and run requests
//! - [session]: the [WorkspaceSession] tying navigation and dispatch together
//! - [keymap]: key events to [Action]s
//! - [state]: the [AppState] the terminal front end drives
//! - [prompt]: the [Prompter] port for confirmations and text input
//! - [output]: bounded runner output for the output pane

pub mod actions;
pub mod dispatch;
pub mod keymap;
pub mod nav;
pub mod output;
pub mod prompt;
pub mod session;
pub mod state;

pub use actions::{Outcome, PendingAction};
pub use dispatch::{ActionDispatcher, ViewerKind, compile_command, viewer_for};
pub use keymap::{Action, FileAction, Keymap, NavAction, SystemAction};
pub use nav::NavState;
pub use output::OutputLog;
pub use prompt::Prompter;
pub use session::WorkspaceSession;
pub use state::AppState;
