//! Navigation state for codews.
//!
//! Holds the root, the current directory, its listing and the selection. Every directory change
//! goes through [NavState::change_dir], which refuses anything outside the root and only commits
//! once the new directory has been listed, so a failed listing leaves the old state intact.

use crate::core::fm::{Entry, Listing, list_dir};
use crate::core::guard;
use crate::error::{Result, WorkspaceError};

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

pub struct NavState {
    root: PathBuf,
    current_dir: PathBuf,
    listing: Listing,
    selected: usize,
}

impl NavState {
    /// Starts at `root` with an empty listing. Call [NavState::load] to read it.
    pub fn new(root: PathBuf) -> Self {
        Self {
            current_dir: root.clone(),
            root,
            listing: Listing::default(),
            selected: 0,
        }
    }

    // Getters / Accessors

    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[inline]
    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    #[inline]
    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    #[inline]
    pub fn entries(&self) -> &[Entry] {
        self.listing.entries()
    }

    #[inline]
    pub fn selected_idx(&self) -> usize {
        self.selected
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.listing.entries().get(self.selected)
    }

    /// Full path of the selected entry.
    pub fn selected_path(&self) -> Option<PathBuf> {
        self.selected_entry()
            .map(|e| guard::resolve(&self.current_dir, e.name()))
    }

    // Listing

    /// Lists the current directory from scratch and selects the first entry.
    pub fn load(&mut self) -> Result<()> {
        self.listing = list_dir(&self.current_dir)?;
        self.selected = 0;
        Ok(())
    }

    /// Re-reads the current directory, keeping the selection on the same name if it survived.
    pub fn relist(&mut self) -> Result<()> {
        let keep = self.selected_entry().map(|e| e.name().to_os_string());
        self.listing = list_dir(&self.current_dir)?;
        self.selected = keep
            .and_then(|name| self.listing.position(&name))
            .unwrap_or_else(|| self.clamped(self.selected));
        Ok(())
    }

    /// Moves to `path` and lists it.
    ///
    /// # Returns
    /// [WorkspaceError::EscapesRoot] if `path` is not inside the root, or the listing error. In
    /// both cases nothing changes.
    pub fn change_dir(&mut self, path: PathBuf) -> Result<()> {
        if !guard::contains(&self.root, &path) {
            return Err(WorkspaceError::EscapesRoot(path));
        }
        let listing = list_dir(&path)?;
        self.current_dir = path;
        self.listing = listing;
        self.selected = 0;
        Ok(())
    }

    /// Moves one level up, clamped to the root, and selects the directory just left.
    ///
    /// Returns `Ok(false)` when already at the root.
    pub fn go_up(&mut self) -> Result<bool> {
        let target = guard::navigate_up(&self.root, &self.current_dir);
        if target == self.current_dir {
            return Ok(false);
        }
        let came_from = self.current_dir.file_name().map(OsStr::to_os_string);
        self.change_dir(target)?;
        if let Some(name) = came_from {
            self.select_name(&name);
        }
        Ok(true)
    }

    // Selection

    /// Moves the selection down by one entry, wrapping around at the end.
    pub fn select_next(&mut self) -> bool {
        let len = self.entries().len();
        if len == 0 {
            return false;
        }
        self.selected = (self.selected + 1) % len;
        true
    }

    /// Moves the selection up by one entry, wrapping around at the top.
    pub fn select_prev(&mut self) -> bool {
        let len = self.entries().len();
        if len == 0 {
            return false;
        }
        self.selected = if self.selected == 0 {
            len - 1
        } else {
            self.selected - 1
        };
        true
    }

    /// Selects the entry called `name`, if listed.
    pub fn select_name(&mut self, name: &OsStr) -> bool {
        match self.listing.position(name) {
            Some(idx) => {
                self.selected = idx;
                true
            }
            None => false,
        }
    }

    fn clamped(&self, idx: usize) -> usize {
        idx.min(self.entries().len().saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn selection_wraps() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        fs::write(dir.path().join("a"), "")?;
        fs::write(dir.path().join("b"), "")?;

        let mut nav = NavState::new(dir.path().to_path_buf());
        nav.load()?;
        assert!(nav.select_prev());
        assert_eq!(nav.selected_idx(), 1);
        assert!(nav.select_next());
        assert_eq!(nav.selected_idx(), 0);
        Ok(())
    }

    #[test]
    fn empty_listing_has_no_selection() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let mut nav = NavState::new(dir.path().to_path_buf());
        nav.load()?;
        assert!(!nav.select_next());
        assert!(nav.selected_entry().is_none());
        assert!(nav.selected_path().is_none());
        Ok(())
    }

    #[test]
    fn relist_keeps_selection_by_name() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        fs::write(dir.path().join("keep.txt"), "")?;
        let mut nav = NavState::new(dir.path().to_path_buf());
        nav.load()?;
        nav.select_name(OsStr::new("keep.txt"));

        for i in 0..5 {
            fs::write(dir.path().join(format!("new{i}")), "")?;
        }
        nav.relist()?;
        assert_eq!(
            nav.selected_entry().map(|e| e.name().to_os_string()),
            Some("keep.txt".into())
        );
        Ok(())
    }

    #[test]
    fn relist_clamps_when_selection_vanishes() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        fs::write(dir.path().join("a"), "")?;
        fs::write(dir.path().join("b"), "")?;
        let mut nav = NavState::new(dir.path().to_path_buf());
        nav.load()?;
        nav.select_next();
        let gone = nav.selected_path().ok_or("no selection")?;
        fs::remove_file(gone)?;

        nav.relist()?;
        assert_eq!(nav.entries().len(), 1);
        assert_eq!(nav.selected_idx(), 0);
        Ok(())
    }

    #[test]
    fn change_dir_refuses_escape() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let root = dir.path().join("root");
        fs::create_dir(&root)?;
        let mut nav = NavState::new(root.clone());
        nav.load()?;

        let escaped = nav.change_dir(root.join(".."));
        assert!(matches!(escaped, Err(WorkspaceError::EscapesRoot(_))));
        assert!(nav.change_dir(dir.path().to_path_buf()).is_err());
        assert_eq!(nav.current_dir(), root);
        Ok(())
    }

    #[test]
    fn failed_listing_keeps_state() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        fs::write(dir.path().join("a"), "")?;
        let mut nav = NavState::new(dir.path().to_path_buf());
        nav.load()?;

        assert!(nav.change_dir(dir.path().join("missing")).is_err());
        assert_eq!(nav.current_dir(), dir.path());
        assert_eq!(nav.entries().len(), 1);
        Ok(())
    }

    #[test]
    fn go_up_selects_previous_dir() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        fs::write(dir.path().join("a"), "")?;
        fs::create_dir(dir.path().join("sub"))?;
        let mut nav = NavState::new(dir.path().to_path_buf());
        nav.load()?;

        nav.change_dir(dir.path().join("sub"))?;
        assert!(nav.go_up()?);
        assert_eq!(nav.current_dir(), dir.path());
        assert_eq!(
            nav.selected_entry().map(|e| e.name().to_os_string()),
            Some("sub".into())
        );
        assert!(!nav.go_up()?);
        Ok(())
    }
}
