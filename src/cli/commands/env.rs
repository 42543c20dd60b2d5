//! Env command implementation
//!
//! Prints the variables the environment composer sets up for a project,
//! suitable for inspection or for sourcing into a shell.

use anyhow::Result;
use std::path::Path;

use crate::backend::Registry;
use crate::core::environment::{self, LIB_PATH_VAR, PKG_CONFIG_VAR};
use crate::core::manifest::Graph;
use crate::core::workspace::Workspace;
use crate::error::ResolverError;

/// Execute the env command
pub fn execute(root: &Path, workspace: &str, project: &str) -> Result<()> {
    let ws = Workspace::open(root, workspace)?;
    let registry = Registry::builtin();
    let graph = Graph::load(root, &registry)?;

    let node = graph
        .get(project)
        .ok_or_else(|| ResolverError::UnknownProject {
            name: project.to_string(),
        })?;
    let env = environment::compose(&ws, &graph, project)?;

    let mut keys: Vec<&str> = vec![LIB_PATH_VAR, PKG_CONFIG_VAR];
    keys.extend(node.env.keys().map(String::as_str));
    keys.sort_unstable();
    keys.dedup();

    for key in keys {
        if let Some(value) = env.get(key) {
            println!("{key}={value}");
        }
    }
    Ok(())
}
