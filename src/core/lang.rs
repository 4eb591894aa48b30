//! Language detection from the workspace layout.
//!
//! The workspace keeps one top-level directory per toolchain (`C/`, `Python3/`, `Asm/`). A
//! file's language is the name of that directory, nothing else: extensions and contents are
//! never looked at.

use phf::phf_map;
use std::fmt;
use std::path::{MAIN_SEPARATOR, Path};

/// Toolchain that owns a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    C,
    Python3,
    Assembly,
    Unknown,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::C => "C",
            Language::Python3 => "Python3",
            Language::Assembly => "Assembly",
            Language::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level workspace directory name to language.
static LANGUAGE_DIRS: phf::Map<&'static str, Language> = phf_map! {
    "C" => Language::C,
    "Python3" => Language::Python3,
    "Asm" => Language::Assembly,
};

/// Returns the first path segment below `root`, or `None` if `path` is not under it.
///
/// This is a plain string operation on the two paths.
pub(crate) fn first_segment<'a>(root: &Path, path: &'a Path) -> Option<&'a str> {
    let root = root.to_str()?;
    let path = path.to_str()?;
    let rest = path.strip_prefix(root)?;
    let rest = rest.strip_prefix(MAIN_SEPARATOR).unwrap_or(rest);
    let segment = match rest.find(MAIN_SEPARATOR) {
        Some(end) => &rest[..end],
        None => rest,
    };
    (!segment.is_empty()).then_some(segment)
}

/// Resolves the language of `path` from its language directory under `root`.
pub fn resolve_language(root: &Path, path: &Path) -> Language {
    first_segment(root, path)
        .and_then(|segment| LANGUAGE_DIRS.get(segment).copied())
        .unwrap_or(Language::Unknown)
}
