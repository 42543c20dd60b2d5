//! Init command implementation
//!
//! Creates the workspace state directory with a default configuration.

use anyhow::Result;
use std::path::Path;

use crate::cli::output::status;
use crate::core::workspace::{Workspace, MANIFEST_FILE};

/// Execute the init command
pub fn execute(root: &Path, workspace: &str) -> Result<()> {
    let manifest = root.join(MANIFEST_FILE);
    if !manifest.exists() {
        anyhow::bail!(
            "No {MANIFEST_FILE} found at '{}'; run init from the workspace root",
            root.display()
        );
    }

    let existed = Workspace::open(root, workspace).is_ok();
    let ws = Workspace::create(root, workspace)?;

    if existed {
        println!("{} workspace '{}' already initialized", status::INFO, ws.name());
    } else {
        println!(
            "{} initialized workspace '{}' at {}",
            status::SUCCESS,
            ws.name(),
            ws.dir().display()
        );
    }
    Ok(())
}
