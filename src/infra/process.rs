//! External process invocation
//!
//! Build tools are driven as blocking child processes. A nonzero exit is
//! converted into a boolean failure result rather than propagated as an
//! error, so callers can react (e.g. remove a bad build directory).

use std::collections::BTreeMap;
use std::path::Path;
use std::process::Command;

/// Run an external tool to completion, inheriting stdout/stderr.
///
/// Returns `true` only when the process spawned and exited with status zero.
/// In dry-run mode the command is logged and reported as successful without
/// being spawned.
pub fn run_tool(
    program: &str,
    args: &[String],
    cwd: &Path,
    env: &BTreeMap<String, String>,
    dry_run: bool,
) -> bool {
    tracing::debug!("run: {} {} (cwd: {})", program, args.join(" "), cwd.display());

    if dry_run {
        tracing::info!("dry-run: would run {} {}", program, args.join(" "));
        return true;
    }

    let mut cmd = Command::new(program);
    cmd.args(args).current_dir(cwd).env_clear().envs(env);

    match cmd.status() {
        Ok(status) => {
            if !status.success() {
                tracing::error!("{program} exited with {status}");
            }
            status.success()
        }
        Err(e) => {
            tracing::error!("failed to spawn {program}: {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn ambient_env() -> BTreeMap<String, String> {
        std::env::vars().collect()
    }

    #[test]
    fn test_zero_exit_reports_success() {
        let dir = TempDir::new().unwrap();
        assert!(run_tool("true", &[], dir.path(), &ambient_env(), false));
    }

    #[test]
    fn test_nonzero_exit_reports_failure() {
        let dir = TempDir::new().unwrap();
        assert!(!run_tool("false", &[], dir.path(), &ambient_env(), false));
    }

    #[test]
    fn test_missing_program_reports_failure() {
        let dir = TempDir::new().unwrap();
        assert!(!run_tool(
            "wsbuild-no-such-tool",
            &[],
            dir.path(),
            &ambient_env(),
            false
        ));
    }

    #[test]
    fn test_dry_run_spawns_nothing() {
        let dir = TempDir::new().unwrap();
        let marker = dir.path().join("marker");
        let args = vec![marker.display().to_string()];

        assert!(run_tool("touch", &args, dir.path(), &ambient_env(), true));
        assert!(!marker.exists());
    }
}
