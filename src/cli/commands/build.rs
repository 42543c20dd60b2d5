//! Build command implementation
//!
//! Loads the graph, opens the workspace, and hands the requested projects to
//! the orchestrator, then reports per-project outcomes.

use anyhow::Result;
use std::path::Path;

use crate::backend::Registry;
use crate::cli::output::status;
use crate::core::context::RunContext;
use crate::core::manifest::Graph;
use crate::core::orchestrator::{Orchestrator, Outcome};
use crate::core::workspace::Workspace;
use crate::error::BuildError;

/// Build options
pub struct BuildOptions {
    /// Projects to build (all projects if empty)
    pub projects: Vec<String>,
    /// Rebuild even when checksums match
    pub force: bool,
    /// Number of parallel jobs
    pub jobs: Option<usize>,
    /// Log decisions without mutating any state
    pub dry_run: bool,
}

/// Execute the build command
pub fn execute(root: &Path, workspace: &str, options: BuildOptions) -> Result<()> {
    let ws = Workspace::open(root, workspace)?;
    let registry = Registry::builtin();
    let graph = Graph::load(root, &registry)?;

    let ctx = RunContext::new(options.dry_run, options.force, options.jobs);
    let orchestrator = Orchestrator::new(&ctx, &ws, &graph, &registry);
    let reports = orchestrator.run(&options.projects)?;

    let mut failed = None;
    for report in &reports {
        match report.outcome {
            Outcome::UpToDate => println!("{} {} (up to date)", status::INFO, report.name),
            Outcome::Built => println!("{} {}", status::SUCCESS, report.name),
            Outcome::Failed(phase) => {
                println!("{} {} ({phase} failed)", status::ERROR, report.name);
                failed = Some((report.name.clone(), phase));
            }
        }
    }

    if let Some((name, phase)) = failed {
        return Err(BuildError::ProjectFailed {
            project: name,
            phase: phase.to_string(),
        }
        .into());
    }
    Ok(())
}
