//! Filesystem mutations performed directly by the dispatcher.
//!
//! Creation, deletion and executable-bit toggling. Everything else the dispatcher does goes
//! through the command runner.

use crate::core::fm::is_reserved;
use crate::error::{Result, WorkspaceError};

use std::fs;
use std::path::Path;

/// Mode used for newly created directories.
#[cfg(unix)]
pub(crate) const DIR_MODE: u32 = 0o755;

/// Execute bits for user, group and other.
#[cfg(unix)]
pub(crate) const EXEC_BITS: u32 = 0o111;

/// Creates an empty file. Fails if something already exists at `path`.
pub(crate) fn create_file(path: &Path) -> Result<()> {
    fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map(|_| ())
        .map_err(|e| WorkspaceError::io(path, e))
}

/// Creates a single directory with mode 0755.
pub(crate) fn create_dir(path: &Path) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }
    builder.create(path).map_err(|e| WorkspaceError::io(path, e))
}

/// Removes a single non-directory entry.
pub(crate) fn remove_file(path: &Path) -> Result<()> {
    fs::remove_file(path).map_err(|e| WorkspaceError::io(path, e))
}

/// Deletes `path` and everything below it, leaving any `codeWS` directory untouched.
///
/// Stops at the first failure inside a directory and reports it; entries removed before the
/// failure stay removed. A directory that still holds a reserved child cannot be removed
/// itself, which surfaces as an error from the final `rmdir`.
pub(crate) fn remove_recursive(path: &Path) -> Result<()> {
    let reader = fs::read_dir(path).map_err(|e| WorkspaceError::io(path, e))?;

    for entry in reader {
        let entry = entry.map_err(|e| WorkspaceError::io(path, e))?;
        let name = entry.file_name();
        if is_reserved(&name) {
            continue;
        }

        let child = entry.path();
        // file_type does not follow symlinks: a link to a directory is unlinked, not descended
        let is_dir = entry
            .file_type()
            .map_err(|e| WorkspaceError::io(&child, e))?
            .is_dir();

        if is_dir {
            remove_recursive(&child)?;
        } else {
            remove_file(&child)?;
        }
    }

    fs::remove_dir(path).map_err(|e| WorkspaceError::io(path, e))
}

/// Sets or clears the execute bits of `path`, like `chmod +x` / `chmod -x`.
#[cfg(unix)]
pub(crate) fn set_executable(path: &Path, executable: bool) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let md = fs::metadata(path).map_err(|e| WorkspaceError::io(path, e))?;
    if md.is_dir() {
        return Err(WorkspaceError::NotAFile(path.to_path_buf()));
    }

    let mode = md.permissions().mode();
    let next = if executable {
        mode | EXEC_BITS
    } else {
        mode & !EXEC_BITS
    };
    if next == mode {
        return Ok(());
    }
    fs::set_permissions(path, fs::Permissions::from_mode(next))
        .map_err(|e| WorkspaceError::io(path, e))
}

#[cfg(not(unix))]
pub(crate) fn set_executable(path: &Path, _executable: bool) -> Result<()> {
    Err(WorkspaceError::NotAFile(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fm::RESERVED_NAME;
    use std::fs::File;
    use tempfile::TempDir;

    #[test]
    fn create_file_is_empty_and_exclusive() -> std::result::Result<(), Box<dyn std::error::Error>>
    {
        let tmp = TempDir::new()?;
        let path = tmp.path().join("new.c");
        create_file(&path)?;
        assert_eq!(fs::metadata(&path)?.len(), 0);
        assert!(create_file(&path).is_err());
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn create_dir_uses_0755() -> std::result::Result<(), Box<dyn std::error::Error>> {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new()?;
        let path = tmp.path().join("lab1");
        create_dir(&path)?;
        let mode = fs::metadata(&path)?.permissions().mode() & 0o777;
        // umask may only clear bits
        assert_eq!(mode & !DIR_MODE, 0);
        assert!(fs::metadata(&path)?.is_dir());
        Ok(())
    }

    #[test]
    fn remove_recursive_clears_tree() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        let root = tmp.path().join("proj");
        fs::create_dir_all(root.join("src/nested"))?;
        File::create(root.join("Makefile"))?;
        File::create(root.join("src/main.c"))?;
        File::create(root.join("src/nested/x.h"))?;

        remove_recursive(&root)?;
        assert!(!root.exists());
        Ok(())
    }

    #[test]
    fn remove_recursive_keeps_reserved() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let tmp = TempDir::new()?;
        let root = tmp.path().join("proj");
        let reserved = root.join(RESERVED_NAME);
        fs::create_dir_all(&reserved)?;
        File::create(reserved.join("keep.txt"))?;
        File::create(root.join("gone.txt"))?;
        fs::create_dir_all(root.join("other"))?;
        File::create(root.join("other/gone.py"))?;

        let result = remove_recursive(&root);

        // proj/ still holds codeWS, so only its own rmdir fails
        assert!(matches!(result, Err(WorkspaceError::Io { .. })));
        assert!(reserved.join("keep.txt").exists());
        assert!(!root.join("gone.txt").exists());
        assert!(!root.join("other").exists());
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn toggle_executable_bits() -> std::result::Result<(), Box<dyn std::error::Error>> {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new()?;
        let path = tmp.path().join("run.sh");
        File::create(&path)?;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644))?;

        set_executable(&path, true)?;
        assert_eq!(fs::metadata(&path)?.permissions().mode() & 0o777, 0o755);

        set_executable(&path, false)?;
        assert_eq!(fs::metadata(&path)?.permissions().mode() & 0o777, 0o644);

        assert!(matches!(
            set_executable(tmp.path(), true),
            Err(WorkspaceError::NotAFile(_))
        ));
        Ok(())
    }
}
