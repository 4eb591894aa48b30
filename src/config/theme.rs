//! Theme configuration options for codews
//!
//! This module defines the `[theme]` table of codews.toml. Every field is a [ColorPair];
//! unset colors stay at the terminal default.
//!
//! # Examples
//! ```toml
//! [theme.directory]
//! fg = "blue"
//! [theme.executable]
//! fg = "#cc241d"
//! ```

use crate::utils::parse_color;

use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Theme {
    entry: ColorPair,
    directory: ColorPair,
    executable: ColorPair,
    selection: ColorPair,
    accent: ColorPair,
    path: ColorPair,
    status_line: ColorPair,
    widget: ColorPair,
    selection_icon: String,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            entry: ColorPair::default(),
            directory: ColorPair {
                fg: Color::Blue,
                ..ColorPair::default()
            },
            executable: ColorPair {
                fg: Color::Red,
                ..ColorPair::default()
            },
            selection: ColorPair {
                bg: Color::Indexed(236),
                ..ColorPair::default()
            },
            accent: ColorPair {
                fg: Color::Indexed(238),
                ..ColorPair::default()
            },
            path: ColorPair {
                fg: Color::Magenta,
                ..ColorPair::default()
            },
            status_line: ColorPair {
                fg: Color::Indexed(244),
                ..ColorPair::default()
            },
            widget: ColorPair::default(),
            selection_icon: "> ".into(),
        }
    }
}

impl Theme {
    #[inline]
    pub fn entry_style(&self) -> Style {
        self.entry.as_style()
    }

    /// Directories are bold on top of their color.
    #[inline]
    pub fn directory_style(&self) -> Style {
        self.directory.as_style().add_modifier(Modifier::BOLD)
    }

    #[inline]
    pub fn executable_style(&self) -> Style {
        self.executable.as_style()
    }

    #[inline]
    pub fn selection_style(&self) -> Style {
        self.selection.as_style()
    }

    #[inline]
    pub fn accent_style(&self) -> Style {
        self.accent.as_style()
    }

    #[inline]
    pub fn path_style(&self) -> Style {
        self.path.as_style()
    }

    #[inline]
    pub fn status_line_style(&self) -> Style {
        self.status_line.as_style()
    }

    #[inline]
    pub fn widget_style(&self) -> Style {
        self.widget.as_style()
    }

    #[inline]
    pub fn selection_icon(&self) -> &str {
        &self.selection_icon
    }
}

/// ColorPair struct to hold foreground and background colors.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ColorPair {
    #[serde(default, deserialize_with = "deserialize_color_field")]
    fg: Color,
    #[serde(default, deserialize_with = "deserialize_color_field")]
    bg: Color,
}

impl Default for ColorPair {
    fn default() -> Self {
        Self {
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

impl ColorPair {
    pub fn as_style(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }
}

fn deserialize_color_field<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(parse_color(&s))
}
