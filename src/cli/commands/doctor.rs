//! Doctor command implementation
//!
//! Reports availability of the external tools wsbuild shells out to: git
//! for checksum queries, plus every registered backend's toolchain.

use anyhow::Result;
use std::collections::BTreeSet;

use crate::backend::Registry;
use crate::cli::output::status;

/// Execute the doctor command
pub fn execute() -> Result<()> {
    let registry = Registry::builtin();

    let mut tools: BTreeSet<&str> = BTreeSet::from(["git"]);
    for name in registry.names() {
        if let Some(backend) = registry.get(name) {
            tools.extend(backend.tools());
        }
    }

    let mut missing_git = false;
    for tool in tools {
        match which::which(tool) {
            Ok(path) => println!("{} {tool} ({})", status::SUCCESS, path.display()),
            Err(_) => {
                println!("{} {tool} not found in PATH", status::ERROR);
                if tool == "git" {
                    missing_git = true;
                }
            }
        }
    }

    if missing_git {
        anyhow::bail!("git is required for checksum computation");
    }
    println!(
        "{} backend tools are only needed for the build systems your manifest uses",
        status::INFO
    );
    Ok(())
}
