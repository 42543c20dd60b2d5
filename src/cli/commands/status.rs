//! Status command implementation
//!
//! Reports per-project build state by comparing freshly computed checksums
//! against the stored records. Never writes.

use anyhow::Result;
use serde::Serialize;
use std::path::Path;

use crate::backend::Registry;
use crate::cli::output::{create_spinner, status};
use crate::core::checksum;
use crate::core::manifest::Graph;
use crate::core::resolver;
use crate::core::workspace::Workspace;

/// One project's staleness state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
enum State {
    /// Stored checksum matches the source tree
    UpToDate,
    /// Source changed since the last successful build
    Stale,
    /// Never built or explicitly invalidated
    Unbuilt,
}

#[derive(Debug, Serialize)]
struct ProjectStatus {
    project: String,
    state: State,
    digest: String,
}

/// Execute the status command
pub fn execute(root: &Path, workspace: &str, projects: &[String], json: bool) -> Result<()> {
    let ws = Workspace::open(root, workspace)?;
    let registry = Registry::builtin();
    let graph = Graph::load(root, &registry)?;
    let order = resolver::closure(&graph, projects)?;

    let spinner = create_spinner("Checking project state");
    let mut rows = Vec::with_capacity(order.len());
    for name in &order {
        let project = graph.get(name).expect("closure of validated graph");
        let digest = checksum::compute(&project.path)?;
        let state = match checksum::load(&ws, name) {
            Some(stored) if stored == digest => State::UpToDate,
            Some(_) => State::Stale,
            None => State::Unbuilt,
        };
        rows.push(ProjectStatus {
            project: name.clone(),
            state,
            digest,
        });
    }
    spinner.finish_and_clear();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        for row in &rows {
            let glyph = match row.state {
                State::UpToDate => status::SUCCESS,
                State::Stale => status::WARNING,
                State::Unbuilt => status::INFO,
            };
            let label = match row.state {
                State::UpToDate => "up to date",
                State::Stale => "stale",
                State::Unbuilt => "unbuilt",
            };
            println!("{glyph} {} ({label})", row.project);
        }
    }
    Ok(())
}
