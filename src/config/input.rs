//! Input configuration options for codews
//!
//! This module defines the `[keys]` and `[viewers]` tables of codews.toml.

use serde::Deserialize;

/// Keybindings for every action
#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Keys {
    select_next: Vec<String>,
    select_prev: Vec<String>,
    enter: Vec<String>,
    go_up: Vec<String>,
    compile_run: Vec<String>,
    make_executable: Vec<String>,
    make_not_executable: Vec<String>,
    execute: Vec<String>,
    new_file: Vec<String>,
    new_directory: Vec<String>,
    delete: Vec<String>,
    quit: Vec<String>,
}

/// Programs used by the open action, picked by file extension
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Viewers {
    image: String,
    document: String,
    editor: String,
}

macro_rules! accessor {
    ($($name:ident),+ $(,)?) => {
        impl Keys {
            $(
                #[inline]
                pub fn $name(&self) -> &[String] {
                    &self.$name
                }
            )+
        }
    };
}

accessor!(
    select_next,
    select_prev,
    enter,
    go_up,
    compile_run,
    make_executable,
    make_not_executable,
    execute,
    new_file,
    new_directory,
    delete,
    quit,
);

impl Default for Keys {
    fn default() -> Self {
        Keys {
            select_next: vec!["j".into(), "Down".into()],
            select_prev: vec!["k".into(), "Up".into()],
            enter: vec!["Enter".into(), "l".into(), "Right".into()],
            go_up: vec!["Backspace".into(), "h".into(), "Left".into()],

            compile_run: vec!["Ctrl+r".into()],
            make_executable: vec!["Ctrl+e".into()],
            make_not_executable: vec!["Ctrl+x".into()],
            execute: vec!["x".into()],

            new_file: vec!["Ctrl+f".into()],
            new_directory: vec!["Ctrl+n".into()],
            delete: vec!["Ctrl+d".into()],

            quit: vec!["q".into(), "Esc".into()],
        }
    }
}

impl Viewers {
    /// Viewer for `jpg` and `png` files.
    #[inline]
    pub fn image(&self) -> &str {
        non_empty_or(&self.image, "feh")
    }

    /// Viewer for `pdf` files.
    #[inline]
    pub fn document(&self) -> &str {
        non_empty_or(&self.document, "zathura")
    }

    /// Text editor for everything else. Runs in the foreground.
    #[inline]
    pub fn editor(&self) -> &str {
        non_empty_or(&self.editor, "nvim")
    }

    /// Names of configured viewers that cannot be found on `PATH`.
    pub fn missing(&self) -> Vec<&str> {
        [self.image(), self.document(), self.editor()]
            .into_iter()
            .filter(|cmd| {
                cmd.split_whitespace()
                    .next()
                    .is_some_and(|program| which::which(program).is_err())
            })
            .collect()
    }
}

impl Default for Viewers {
    fn default() -> Self {
        Viewers {
            image: "feh".into(),
            document: "zathura".into(),
            editor: "nvim".into(),
        }
    }
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() { fallback } else { trimmed }
}
