//! Filesystem operations
//!
//! Handles directory and symlink operations for workspace working areas.

use std::path::Path;

use crate::error::FilesystemError;

/// Create a directory and all parent directories
///
/// Pre-existing directories are not an error.
pub fn create_dir_all(path: &Path) -> Result<(), FilesystemError> {
    std::fs::create_dir_all(path).map_err(|e| FilesystemError::CreateDir {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Remove a directory and all its contents
///
/// A directory that does not exist is treated as already removed.
pub fn remove_dir_all(path: &Path) -> Result<(), FilesystemError> {
    if path.exists() {
        std::fs::remove_dir_all(path).map_err(|e| FilesystemError::RemoveDir {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
    }
    Ok(())
}

/// Create a symlink at `link` pointing to `target` if none exists yet
///
/// An existing link (or any existing file at `link`) is left untouched.
pub fn ensure_symlink(target: &Path, link: &Path) -> Result<(), FilesystemError> {
    if link.symlink_metadata().is_ok() {
        return Ok(());
    }
    #[cfg(unix)]
    let result = std::os::unix::fs::symlink(target, link);
    #[cfg(windows)]
    let result = std::os::windows::fs::symlink_dir(target, link);
    result.map_err(|e| FilesystemError::Symlink {
        path: link.to_path_buf(),
        error: e.to_string(),
    })
}
