//! The main config loading module for codews.
//!
//! Handles loading and deserializing settings from `codews.toml`.
//!
//! Provides the main [Config] struct and the internal [RawConfig] used for parsing. Falls back
//! to internal defaults when `codews.toml` is not present or does not parse.

use crate::config::{General, InternalGeneral, Keys, Theme, Viewers};
use crate::utils::get_home;

use serde::Deserialize;
use std::{fs, io, path::Path, path::PathBuf};

/// Raw configuration as read from the toml file.
/// Converted into [Config] right after parsing.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct RawConfig {
    general: General,
    viewers: Viewers,
    theme: Theme,
    keys: Keys,
}

/// Main configuration struct for codews
#[derive(Debug)]
pub struct Config {
    general: InternalGeneral,
    viewers: Viewers,
    theme: Theme,
    keys: Keys,
}

impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        Self {
            general: InternalGeneral::from(raw.general),
            viewers: raw.viewers,
            theme: raw.theme,
            keys: raw.keys,
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// A missing file or a parse error falls back to the defaults. Called once at startup,
    /// before logging is up, so problems are reported on stderr.
    pub fn load() -> Self {
        let path = Self::default_path();

        if !path.exists() {
            eprintln!(
                "No codews.toml config file found. Using internal defaults. (Tip: run 'cws --init' to generate a config file.)"
            );
            return Self::default();
        }

        match Self::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Reads and parses one config file.
    pub fn from_file(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<RawConfig>(content).map(Config::from)
    }

    // Getters

    #[inline]
    pub fn general(&self) -> &InternalGeneral {
        &self.general
    }

    #[inline]
    pub fn viewers(&self) -> &Viewers {
        &self.viewers
    }

    #[inline]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    #[inline]
    pub fn keys(&self) -> &Keys {
        &self.keys
    }

    /// Determine the default configuration file path.
    /// Checks the CODEWS_CONFIG environment variable first,
    /// then XDG_CONFIG_HOME,
    /// then defaults to ~/.config/codews/codews.toml.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("CODEWS_CONFIG") {
            return PathBuf::from(path);
        }

        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg_config).join("codews/codews.toml");
        }

        if let Some(home) = get_home() {
            return home.join(".config/codews/codews.toml");
        }
        PathBuf::from("codews.toml")
    }

    /// Generate a default configuration file at the specified path.
    /// If the file already exists, returns an error.
    pub fn generate_default(path: &Path) -> io::Result<()> {
        if path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("Config file already exists at {:?}", path),
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_TOML)?;
        println!("Default config generated at {:?}", path);
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::from(RawConfig::default())
    }
}

pub(crate) const DEFAULT_TOML: &str = r##"# codews.toml - default configuration for codews

# Note:
# Commented values are the internal defaults of codews
# Use hex codes (eg. "#RRGGBB") or terminal colors ("cyan")
# The workspace root is always $HOME/codeWS.

[general]
# Re-list the current directory when files change on disk
watch = true
# Open README.md automatically when entering its directory
auto_open_readme = true
# Lines of runner output kept (100 - 100000)
# scrollback = 1000
# Run programs in the terminal instead of the output pane, so they can read input
foreground_runs = false

[viewers]
# image = "feh"          # jpg, png
# document = "zathura"   # pdf
editor = "nvim"          # everything else, runs in the foreground

[theme]
# selection_icon = "> "

# [theme.entry]
# fg = "default"
# bg = "default"

[theme.directory]
fg = "blue"

[theme.executable]
fg = "red"

# [theme.selection]
# bg = "#303030"

# [theme.accent]
# [theme.path]
# [theme.status_line]
# [theme.widget]

# [keys]
# select_next = ["j", "Down"]
# select_prev = ["k", "Up"]
# enter = ["Enter", "l", "Right"]
# go_up = ["Backspace", "h", "Left"]
# compile_run = ["Ctrl+r"]
# make_executable = ["Ctrl+e"]
# make_not_executable = ["Ctrl+x"]
# execute = ["x"]
# new_file = ["Ctrl+f"]
# new_directory = ["Ctrl+n"]
# delete = ["Ctrl+d"]
# quit = ["q", "Esc"]
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_toml_parses() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::from_toml(DEFAULT_TOML)?;
        assert!(config.general().watch());
        assert!(config.general().auto_open_readme());
        assert_eq!(config.viewers().editor(), "nvim");
        assert!(!config.general().foreground_runs());
        Ok(())
    }

    #[test]
    fn foreground_runs_can_be_enabled() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::from_toml("[general]\nforeground_runs = true\n")?;
        assert!(config.general().foreground_runs());
        assert!(config.general().watch());
        Ok(())
    }

    #[test]
    fn generate_refuses_overwrite() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("nested/codews.toml");
        Config::generate_default(&path)?;
        assert!(path.exists());

        let again = Config::generate_default(&path);
        assert_eq!(
            again.err().map(|e| e.kind()),
            Some(io::ErrorKind::AlreadyExists)
        );

        let loaded = Config::from_file(&path)?;
        assert_eq!(loaded.viewers().image(), "feh");
        Ok(())
    }

    #[test]
    fn invalid_file_is_an_error() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("codews.toml");
        fs::write(&path, "[general\nwatch = ")?;
        assert!(Config::from_file(&path).is_err());
        Ok(())
    }
}
