//! Clean command implementation
//!
//! Asks each project's backend to clean its build directory and clears the
//! stored checksum. With --force the working directories are deleted
//! outright; a forced clean of the entire workspace also resets the taint
//! flag.

use anyhow::Result;
use std::path::Path;

use crate::backend::Registry;
use crate::cli::output::{create_build_bar, status};
use crate::core::checksum;
use crate::core::context::RunContext;
use crate::core::environment;
use crate::core::manifest::Graph;
use crate::core::resolver;
use crate::core::workspace::{Workspace, WorkspaceConfig};
use crate::infra::fs;

/// Execute the clean command
pub fn execute(
    root: &Path,
    workspace: &str,
    projects: &[String],
    force: bool,
    dry_run: bool,
) -> Result<()> {
    let ws = Workspace::open(root, workspace)?;
    let registry = Registry::builtin();
    let graph = Graph::load(root, &registry)?;
    let ctx = RunContext::new(dry_run, force, None);

    let whole_workspace = projects.is_empty();
    let order = resolver::closure(&graph, projects)?;

    let bar = create_build_bar(order.len() as u64);
    for name in &order {
        bar.set_message(name.clone());
        let project = graph.get(name).expect("closure of validated graph");
        let build_dir = ws.build_dir(name);

        if force {
            if ctx.dry_run {
                tracing::info!("dry-run: would remove {}", ws.project_dir(name).display());
            } else {
                fs::remove_dir_all(&ws.project_dir(name))?;
            }
        } else {
            let env = environment::compose(&ws, &graph, name)?;
            let backend = registry
                .get(&project.build)
                .expect("validated build identifier");
            if !backend.clean(&ctx, name, &build_dir, &env) {
                println!("{} {} (clean failed)", status::WARNING, name);
            }
        }
        checksum::invalidate(&ws, name, &ctx)?;
        bar.inc(1);
    }
    bar.finish_and_clear();
    println!("{} cleaned {} project(s)", status::SUCCESS, order.len());

    // Only a forced clean covering every project makes the workspace
    // trustworthy again after a configuration change.
    if force && whole_workspace {
        let mut config = WorkspaceConfig::load(&ws)?;
        if config.taint && !ctx.dry_run {
            config.taint = false;
            config.store(&ws)?;
            println!("{} workspace taint cleared", status::INFO);
        }
    }

    Ok(())
}
