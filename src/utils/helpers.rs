//! Helpers for codews.
//!
//! This module defines the scrollback limits for the output pane and a few utility functions:
//! - Color parsing from strings or hex codes
//! - Reading the home directory from the environment
//! - Displaying home directories as "~" in paths
//! - Clamping the scrollback to safe values

use crate::core::fm::RESERVED_NAME;
use crate::error::{Result, WorkspaceError};

use ratatui::style::Color;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// The smallest scrollback the output pane accepts.
pub const MIN_SCROLLBACK: usize = 100;
/// The default number of runner output lines kept.
pub const DEFAULT_SCROLLBACK: usize = 1000;
/// The largest scrollback the output pane accepts.
pub const MAX_SCROLLBACK: usize = 100_000;

/// Parses a string (color name or hex) into a ratatui::style::Color
///
/// Supports standard names (red, green, etc.) as well as hex values (#RRGGBB or #RGB)
pub fn parse_color(s: &str) -> Color {
    match s.to_lowercase().as_str() {
        "default" | "reset" => Color::Reset,
        "yellow" => Color::Yellow,
        "red" => Color::Red,
        "blue" => Color::Blue,
        "green" => Color::Green,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "black" => Color::Black,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        _ => {
            if let Some(hex) = s.strip_prefix('#') {
                let expanded = match hex.len() {
                    6 => Some(hex.to_string()),
                    3 => Some(hex.chars().flat_map(|c| [c, c]).collect::<String>()),
                    _ => None,
                };
                if let Some(rgb) = expanded.and_then(|h| u32::from_str_radix(&h, 16).ok()) {
                    return Color::Rgb(
                        ((rgb >> 16) & 0xFF) as u8,
                        ((rgb >> 8) & 0xFF) as u8,
                        (rgb & 0xFF) as u8,
                    );
                }
            }
            // fallback
            Color::Reset
        }
    }
}

/// Home directory from the `HOME` environment variable.
///
/// Deliberately does not fall back to the passwd database: the workspace root is defined by
/// `HOME` and an unset variable must be noticed.
pub fn get_home() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}

/// The workspace root, `$HOME/codeWS`.
pub fn workspace_root() -> Result<PathBuf> {
    get_home()
        .map(|home| home.join(RESERVED_NAME))
        .ok_or(WorkspaceError::HomeUnset)
}

/// Util function to shorten home directory to ~.
/// Used by the path header of the UI.
pub fn shorten_home_path<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();
    if let Some(home_dir) = get_home().or_else(dirs::home_dir)
        && let Ok(stripped) = path.strip_prefix(&home_dir)
    {
        if stripped.as_os_str().is_empty() {
            return "~".to_string();
        }
        let mut short = stripped.display().to_string();
        if short.starts_with(MAIN_SEPARATOR) {
            short.remove(0);
        }
        return format!("~{}{}", MAIN_SEPARATOR, short);
    }
    path.display().to_string()
}

/// Safely clamp the scrollback size.
pub fn clamp_scrollback(value: usize) -> usize {
    let clamped = value.clamp(MIN_SCROLLBACK, MAX_SCROLLBACK);
    if clamped != value {
        eprintln!(
            "[Warning] scrollback={} out of range ({}..={}), clamped to {}",
            value, MIN_SCROLLBACK, MAX_SCROLLBACK, clamped
        );
    }
    clamped
}
