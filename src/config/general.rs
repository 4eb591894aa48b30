//! The general configuration settings for codews.
//!
//! This module defines the [General] struct for deserializing the `[general]` table of
//! codews.toml and the [InternalGeneral] struct used at runtime.

use crate::utils::{DEFAULT_SCROLLBACK, clamp_scrollback};

use serde::Deserialize;

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct General {
    watch: bool,
    auto_open_readme: bool,
    #[serde(default = "default_scrollback")]
    scrollback: usize,
    foreground_runs: bool,
}

impl Default for General {
    fn default() -> Self {
        General {
            watch: true,
            auto_open_readme: true,
            scrollback: DEFAULT_SCROLLBACK,
            foreground_runs: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct InternalGeneral {
    watch: bool,
    auto_open_readme: bool,
    scrollback: usize,
    foreground_runs: bool,
}

impl From<General> for InternalGeneral {
    fn from(g: General) -> Self {
        Self {
            watch: g.watch,
            auto_open_readme: g.auto_open_readme,
            scrollback: clamp_scrollback(g.scrollback),
            foreground_runs: g.foreground_runs,
        }
    }
}

impl InternalGeneral {
    /// Re-list the current directory when it changes on disk.
    #[inline]
    pub fn watch(&self) -> bool {
        self.watch
    }

    /// Open a README.md automatically when navigating into its directory.
    #[inline]
    pub fn auto_open_readme(&self) -> bool {
        self.auto_open_readme
    }

    /// Number of runner output lines kept in the output pane.
    #[inline]
    pub fn scrollback(&self) -> usize {
        self.scrollback
    }

    /// Run Execute and CompileAndRun in the terminal instead of the output pane.
    #[inline]
    pub fn foreground_runs(&self) -> bool {
        self.foreground_runs
    }
}

fn default_scrollback() -> usize {
    DEFAULT_SCROLLBACK
}
