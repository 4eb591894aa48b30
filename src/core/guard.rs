//! Path containment for the workspace root.
//!
//! Every directory the session navigates to must sit at or below the root. The check here is a
//! lexical prefix comparison: nothing is canonicalized and symlinks are followed only as far as
//! the later `stat` call follows them. It keeps the session consistent, it does not sandbox it.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

/// Joins a child name onto the current directory.
pub fn resolve(current: &Path, child: &OsStr) -> PathBuf {
    current.join(child)
}

/// Returns true if `path` is the root or lexically below it.
///
/// Paths carrying a `..` component are rejected outright since the prefix test alone would
/// accept `root/..`.
pub fn contains(root: &Path, path: &Path) -> bool {
    path.starts_with(root)
        && !path
            .components()
            .any(|c| matches!(c, Component::ParentDir))
}

/// Computes the directory one level up from `current`, clamped to `root`.
///
/// At the root this is a no-op. A current directory that has no parent or whose parent falls
/// outside the root collapses back to the root.
pub fn navigate_up(root: &Path, current: &Path) -> PathBuf {
    if current == root {
        return root.to_path_buf();
    }

    match current.parent() {
        Some(parent) if contains(root, parent) => parent.to_path_buf(),
        _ => root.to_path_buf(),
    }
}
