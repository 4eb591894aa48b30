//! Directory listing for codews.
//!
//! Provides the [Entry] struct used throughout codews and [list_dir], which reads one directory
//! into a [Listing]. Each entry keeps its raw name for filesystem lookups next to a markup label
//! for display.

use crate::core::markup::{self, CLASS_DIR, CLASS_EXEC};
use crate::error::{Result, WorkspaceError};

use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the workspace directory itself. Never listed and never deleted, at any depth.
pub const RESERVED_NAME: &str = "codeWS";

/// File name that triggers an automatic open when a directory is listed (case-insensitive).
pub(crate) const README_NAME: &str = "readme.md";

/// Owner execute permission bit.
#[cfg(unix)]
pub(crate) const OWNER_EXEC: u32 = 0o100;

/// Classification of a listed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    ExecutableFile,
}

/// One child of a listed directory.
#[derive(Debug, Clone)]
pub struct Entry {
    name: Box<OsStr>,
    label: String,
    kind: EntryKind,
}

impl Entry {
    pub(crate) fn new(name: OsString, kind: EntryKind) -> Self {
        let escaped = markup::escape(&name.to_string_lossy());
        let label = match kind {
            EntryKind::Directory => markup::span(CLASS_DIR, &escaped),
            EntryKind::ExecutableFile => markup::span(CLASS_EXEC, &escaped),
            EntryKind::File => escaped,
        };
        Entry {
            name: name.into_boxed_os_str(),
            label,
            kind,
        }
    }

    // Accessors

    /// Raw on-disk name. Use this for every lookup.
    #[inline]
    pub fn name(&self) -> &OsStr {
        &self.name
    }

    #[inline]
    pub fn name_str(&self) -> Cow<'_, str> {
        self.name.to_string_lossy()
    }

    /// Display label in markup form.
    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    #[inline]
    pub fn is_executable(&self) -> bool {
        self.kind == EntryKind::ExecutableFile
    }
}

/// The result of reading one directory.
#[derive(Debug, Clone, Default)]
pub struct Listing {
    path: PathBuf,
    entries: Vec<Entry>,
    readme: Option<PathBuf>,
}

impl Listing {
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// The README found while listing, if any. At most one per listing.
    #[inline]
    pub fn readme(&self) -> Option<&Path> {
        self.readme.as_deref()
    }

    pub fn position(&self, name: &OsStr) -> Option<usize> {
        self.entries.iter().position(|e| e.name() == name)
    }
}

/// Returns true for names the lister and the recursive delete must never touch.
#[inline]
pub(crate) fn is_reserved(name: &OsStr) -> bool {
    name == "." || name == ".." || name == RESERVED_NAME
}

/// Reads the whole directory at `path` and classifies every child.
///
/// Children that cannot be stat'ed (broken symlinks, permission errors) are left out. Symlinks
/// are classified by their target. The order is the order the OS enumerates them in.
///
/// # Returns
/// A [Listing], or [WorkspaceError::Io] if the directory itself cannot be read.
pub fn list_dir(path: &Path) -> Result<Listing> {
    let reader = fs::read_dir(path).map_err(|e| WorkspaceError::io(path, e))?;
    let mut entries = Vec::with_capacity(64);
    let mut readme = None;

    for entry in reader {
        let Ok(entry) = entry else { continue };
        let name = entry.file_name();
        if is_reserved(&name) {
            continue;
        }

        // follows symlinks, like stat(2)
        let Ok(md) = fs::metadata(entry.path()) else {
            continue;
        };

        let kind = if md.is_dir() {
            EntryKind::Directory
        } else if is_owner_executable(&md) {
            EntryKind::ExecutableFile
        } else {
            EntryKind::File
        };

        if readme.is_none()
            && name
                .to_str()
                .is_some_and(|n| n.eq_ignore_ascii_case(README_NAME))
        {
            readme = Some(entry.path());
        }

        entries.push(Entry::new(name, kind));
    }

    Ok(Listing {
        path: path.to_path_buf(),
        entries,
        readme,
    })
}

#[cfg(unix)]
pub(crate) fn is_owner_executable(md: &fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    md.permissions().mode() & OWNER_EXEC != 0
}

#[cfg(not(unix))]
pub(crate) fn is_owner_executable(_md: &fs::Metadata) -> bool {
    false
}
