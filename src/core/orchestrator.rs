//! Build orchestration across the dependency graph
//!
//! Drives checksum comparison, directory setup, downstream invalidation,
//! environment composition, and the backend lifecycle for each project in
//! build order. Projects are processed strictly sequentially; the first
//! failure stops scheduling of everything after it.

use crate::backend::Registry;
use crate::core::checksum;
use crate::core::context::RunContext;
use crate::core::environment;
use crate::core::manifest::Graph;
use crate::core::resolver;
use crate::core::workspace::{Workspace, WorkspaceConfig};
use crate::error::{ConfigError, ManifestError, WsError};
use crate::infra::fs;

/// Lifecycle phase in which a project failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Configure,
    Build,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configure => f.write_str("configure"),
            Self::Build => f.write_str("build"),
        }
    }
}

/// Result of one project's build step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Stored checksum matched; nothing to do
    UpToDate,
    /// Configure (when needed) and build succeeded
    Built,
    /// A backend step reported failure
    Failed(Phase),
}

/// Per-project record of an orchestrator run
#[derive(Debug, Clone)]
pub struct ProjectReport {
    pub name: String,
    pub outcome: Outcome,
}

/// Sequential build driver for one workspace
pub struct Orchestrator<'a> {
    ctx: &'a RunContext,
    workspace: &'a Workspace,
    graph: &'a Graph,
    registry: &'a Registry,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        ctx: &'a RunContext,
        workspace: &'a Workspace,
        graph: &'a Graph,
        registry: &'a Registry,
    ) -> Self {
        Self {
            ctx,
            workspace,
            graph,
            registry,
        }
    }

    /// Build the requested projects and their dependency closures in order.
    ///
    /// Backend failures are reported in the returned records, after which no
    /// further projects are scheduled. Validation, taint, and checksum-store
    /// errors abort with `Err`.
    pub fn run(&self, requested: &[String]) -> Result<Vec<ProjectReport>, WsError> {
        let config = WorkspaceConfig::load(self.workspace)?;
        if config.taint {
            return Err(ConfigError::Tainted {
                name: self.workspace.name().to_string(),
            }
            .into());
        }

        let order = resolver::closure(self.graph, requested)?;
        tracing::debug!("build order: {}", order.join(", "));

        let mut reports = Vec::with_capacity(order.len());
        for name in &order {
            let outcome = self.build_project(name, &config)?;
            let failed = matches!(outcome, Outcome::Failed(_));
            reports.push(ProjectReport {
                name: name.clone(),
                outcome,
            });
            if failed {
                tracing::error!("stopping after failure of '{name}'");
                break;
            }
        }
        Ok(reports)
    }

    /// Run the checksum/configure/build state machine for one project.
    fn build_project(
        &self,
        name: &str,
        config: &WorkspaceConfig,
    ) -> Result<Outcome, WsError> {
        let project = self
            .graph
            .get(name)
            .expect("build order only contains validated projects");

        let current = checksum::compute(&project.path)?;
        if !self.ctx.force {
            if let Some(stored) = checksum::load(self.workspace, name) {
                if stored == current {
                    tracing::info!("{name} is up to date");
                    return Ok(Outcome::UpToDate);
                }
            }
        }

        let build_dir = self.workspace.build_dir(name);
        let needs_configure = !build_dir.exists();
        if !self.ctx.dry_run {
            fs::create_dir_all(&build_dir)?;
            fs::create_dir_all(&self.workspace.install_dir(name))?;
            fs::ensure_symlink(&project.path, &self.workspace.source_link(name))?;
        }

        // A rebuild here renders every direct dependent's stored checksum
        // untrustworthy; clearing them ensures a later build of a dependent
        // is not skipped on a stale match. Dependents are not scheduled by
        // this action alone.
        for dependent in &project.downstream {
            tracing::info!("invalidating downstream dependent '{dependent}'");
            checksum::invalidate(self.workspace, dependent, self.ctx)?;
        }

        let env = environment::compose(self.workspace, self.graph, name)?;
        let backend =
            self.registry
                .get(&project.build)
                .ok_or_else(|| ManifestError::UnknownBuildSystem {
                    project: name.to_string(),
                    build: project.build.clone(),
                })?;

        if needs_configure {
            let ok = backend.configure(
                self.ctx,
                name,
                &self.workspace.install_dir(name),
                &build_dir,
                &project.path,
                &env,
                config.build_type,
            );
            if !ok {
                // Leave no partially-configured directory behind; the next
                // run must treat this project as a fresh first build.
                if !self.ctx.dry_run {
                    fs::remove_dir_all(&build_dir)?;
                }
                return Ok(Outcome::Failed(Phase::Configure));
            }
        }

        if backend.build(self.ctx, name, &build_dir, &env) {
            checksum::store(self.workspace, name, &current, self.ctx)?;
            Ok(Outcome::Built)
        } else {
            // The stored checksum is deliberately left untouched so the
            // next run retries this project.
            Ok(Outcome::Failed(Phase::Build))
        }
    }
}
