//! Content-addressed staleness detection
//!
//! A project's digest captures the checked-out commit, the full working-tree
//! diff against it, and the recursive submodule diff. Untracked files that
//! are excluded by ignore rules do not enter the digest; they are assumed
//! not to affect the build.
//!
//! Stored records are plain digest files, one per (workspace, project).
//! Writes are best-effort: a truncated record can only ever read back as a
//! mismatch and trigger a redundant rebuild, never a false skip.

use sha2::{Digest, Sha256};
use std::path::Path;

use crate::core::context::RunContext;
use crate::core::workspace::Workspace;
use crate::error::ChecksumError;
use crate::infra::git;

/// Compute the content digest of a project's source tree.
///
/// Fails when the directory is not a valid checked-out repository; there is
/// no sensible digest for one.
pub fn compute(source_dir: &Path) -> Result<String, ChecksumError> {
    let head = git::head_commit(source_dir)?;
    let diff = git::working_tree_diff(source_dir)?;
    let submodules = git::submodule_diff(source_dir)?;

    let mut hasher = Sha256::new();
    hasher.update(head.as_bytes());
    hasher.update(&diff);
    hasher.update(&submodules);
    Ok(hex::encode(hasher.finalize()))
}

/// Read the stored digest for a project.
///
/// A missing record is not an error; it means "never built" or "explicitly
/// invalidated". An unreadable record is treated the same way.
pub fn load(ws: &Workspace, project: &str) -> Option<String> {
    match std::fs::read_to_string(ws.checksum_path(project)) {
        Ok(content) => Some(content.trim().to_string()),
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::debug!("unreadable checksum record for {project}: {e}");
            }
            None
        }
    }
}

/// Store the digest for a project after a successful build.
pub fn store(
    ws: &Workspace,
    project: &str,
    digest: &str,
    ctx: &RunContext,
) -> Result<(), ChecksumError> {
    if ctx.dry_run {
        tracing::info!("dry-run: would store checksum for {project}");
        return Ok(());
    }

    let dir = ws.checksum_dir();
    std::fs::create_dir_all(&dir).map_err(|e| ChecksumError::Store {
        path: dir,
        error: e.to_string(),
    })?;
    let path = ws.checksum_path(project);
    std::fs::write(&path, digest).map_err(|e| ChecksumError::Store {
        path,
        error: e.to_string(),
    })
}

/// Delete the stored digest for a project; a missing record is not an error.
pub fn invalidate(ws: &Workspace, project: &str, ctx: &RunContext) -> Result<(), ChecksumError> {
    if ctx.dry_run {
        tracing::info!("dry-run: would invalidate checksum for {project}");
        return Ok(());
    }

    let path = ws.checksum_path(project);
    match std::fs::remove_file(&path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(ChecksumError::Store {
            path,
            error: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_record_is_none() {
        let root = TempDir::new().unwrap();
        let ws = Workspace::create(root.path(), "default").unwrap();

        assert_eq!(load(&ws, "libfoo"), None);
    }

    #[test]
    fn test_store_then_load_roundtrip() {
        let root = TempDir::new().unwrap();
        let ws = Workspace::create(root.path(), "default").unwrap();
        let ctx = RunContext::default();

        store(&ws, "libfoo", "abc123", &ctx).unwrap();
        assert_eq!(load(&ws, "libfoo"), Some("abc123".to_string()));
    }

    #[test]
    fn test_invalidate_removes_record() {
        let root = TempDir::new().unwrap();
        let ws = Workspace::create(root.path(), "default").unwrap();
        let ctx = RunContext::default();

        store(&ws, "libfoo", "abc123", &ctx).unwrap();
        invalidate(&ws, "libfoo", &ctx).unwrap();
        assert_eq!(load(&ws, "libfoo"), None);
    }

    #[test]
    fn test_invalidate_missing_record_is_ok() {
        let root = TempDir::new().unwrap();
        let ws = Workspace::create(root.path(), "default").unwrap();

        invalidate(&ws, "libfoo", &RunContext::default()).unwrap();
    }

    #[test]
    fn test_dry_run_stores_nothing() {
        let root = TempDir::new().unwrap();
        let ws = Workspace::create(root.path(), "default").unwrap();
        let ctx = RunContext::new(true, false, None);

        store(&ws, "libfoo", "abc123", &ctx).unwrap();
        assert_eq!(load(&ws, "libfoo"), None);
    }

    #[test]
    fn test_dry_run_invalidates_nothing() {
        let root = TempDir::new().unwrap();
        let ws = Workspace::create(root.path(), "default").unwrap();

        store(&ws, "libfoo", "abc123", &RunContext::default()).unwrap();
        invalidate(&ws, "libfoo", &RunContext::new(true, false, None)).unwrap();
        assert_eq!(load(&ws, "libfoo"), Some("abc123".to_string()));
    }

    #[test]
    fn test_compute_rejects_non_repository() {
        let dir = TempDir::new().unwrap();

        assert!(matches!(
            compute(dir.path()),
            Err(ChecksumError::InvalidRepository { .. })
        ));
    }
}
