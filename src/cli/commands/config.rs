//! Config command implementation
//!
//! Reads or changes the persisted workspace configuration. Changing the
//! build type taints the workspace until it is force-cleaned.

use anyhow::Result;
use std::path::Path;

use crate::cli::output::status;
use crate::core::workspace::{Workspace, WorkspaceConfig, KEY_BUILD_TYPE, KEY_TAINT};

/// Execute the config command
pub fn execute(
    root: &Path,
    workspace: &str,
    key: Option<&str>,
    value: Option<&str>,
) -> Result<()> {
    let ws = Workspace::open(root, workspace)?;
    let mut config = WorkspaceConfig::load(&ws)?;

    match (key, value) {
        (None, _) => {
            for key in [KEY_BUILD_TYPE, KEY_TAINT] {
                println!("{key} = {}", config.get(key)?);
            }
        }
        (Some(key), None) => {
            println!("{}", config.get(key)?);
        }
        (Some(key), Some(value)) => {
            let was_tainted = config.taint;
            config.set(key, value)?;
            config.store(&ws)?;
            if config.taint && !was_tainted {
                println!(
                    "{} workspace '{}' is now tainted; run 'wsbuild clean --force' before building",
                    status::WARNING,
                    ws.name()
                );
            }
        }
    }
    Ok(())
}
