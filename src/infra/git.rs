//! Read-only git queries
//!
//! The checksum engine needs three views of a source tree: the checked-out
//! commit, the full working-tree diff, and the recursive submodule diff.
//! Repository discovery and HEAD resolution use the gix crate; the diff
//! queries shell out to git with captured output.

use std::path::Path;
use std::process::Command;

use crate::error::ChecksumError;

/// Resolve the commit id the source tree is checked out at.
///
/// A directory that is not a valid git repository (or has an unborn HEAD)
/// is fatal for the caller: there is no sensible digest for it.
pub fn head_commit(source_dir: &Path) -> Result<String, ChecksumError> {
    let repo = gix::open(source_dir).map_err(|e| ChecksumError::InvalidRepository {
        path: source_dir.to_path_buf(),
        error: e.to_string(),
    })?;
    let mut reference =
        repo.find_reference("HEAD")
            .map_err(|e| ChecksumError::InvalidRepository {
                path: source_dir.to_path_buf(),
                error: e.to_string(),
            })?;
    let commit = reference
        .peel_to_commit()
        .map_err(|e| ChecksumError::InvalidRepository {
            path: source_dir.to_path_buf(),
            error: e.to_string(),
        })?;
    Ok(commit.id().to_hex().to_string())
}

/// Diff of all tracked content against HEAD, staged and unstaged alike.
///
/// `git diff HEAD` rather than plain `git diff`: a partial diff would
/// silently miss dirty staged state.
pub fn working_tree_diff(source_dir: &Path) -> Result<Vec<u8>, ChecksumError> {
    capture(source_dir, &["diff", "HEAD"])
}

/// Recursive diff of every submodule against its own checked-out commit.
pub fn submodule_diff(source_dir: &Path) -> Result<Vec<u8>, ChecksumError> {
    capture(
        source_dir,
        &["submodule", "--quiet", "foreach", "--recursive", "git diff"],
    )
}

fn capture(source_dir: &Path, args: &[&str]) -> Result<Vec<u8>, ChecksumError> {
    let output = Command::new("git")
        .args(args)
        .current_dir(source_dir)
        .output()
        .map_err(|e| ChecksumError::QueryFailed {
            query: args[0].to_string(),
            path: source_dir.to_path_buf(),
            error: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(ChecksumError::QueryFailed {
            query: args[0].to_string(),
            path: source_dir.to_path_buf(),
            error: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(output.stdout)
}
