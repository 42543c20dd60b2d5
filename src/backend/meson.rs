//! Meson backend
//!
//! Configures with `meson setup` and drives the generated Ninja build,
//! installing into the workspace install prefix.

use std::collections::BTreeMap;
use std::path::Path;

use super::Backend;
use crate::core::context::RunContext;
use crate::core::workspace::BuildType;
use crate::infra::process::run_tool;

pub struct MesonBackend;

fn setup_args(
    install_prefix: &Path,
    build_dir: &Path,
    source_dir: &Path,
    build_type: BuildType,
) -> Vec<String> {
    vec![
        "setup".to_string(),
        "--prefix".to_string(),
        install_prefix.display().to_string(),
        "--buildtype".to_string(),
        build_type.meson_name().to_string(),
        build_dir.display().to_string(),
        source_dir.display().to_string(),
    ]
}

fn build_args(jobs: usize) -> Vec<String> {
    vec![format!("-j{jobs}"), "install".to_string()]
}

impl Backend for MesonBackend {
    fn name(&self) -> &'static str {
        "meson"
    }

    fn tools(&self) -> &'static [&'static str] {
        &["meson", "ninja"]
    }

    fn configure(
        &self,
        ctx: &RunContext,
        project: &str,
        install_prefix: &Path,
        build_dir: &Path,
        source_dir: &Path,
        env: &BTreeMap<String, String>,
        build_type: BuildType,
    ) -> bool {
        tracing::info!("configuring {project} with meson");
        run_tool(
            "meson",
            &setup_args(install_prefix, build_dir, source_dir, build_type),
            source_dir,
            env,
            ctx.dry_run,
        )
    }

    fn build(
        &self,
        ctx: &RunContext,
        project: &str,
        build_dir: &Path,
        env: &BTreeMap<String, String>,
    ) -> bool {
        tracing::info!("building {project} with ninja");
        run_tool("ninja", &build_args(ctx.jobs), build_dir, env, ctx.dry_run)
    }

    fn clean(
        &self,
        ctx: &RunContext,
        project: &str,
        build_dir: &Path,
        env: &BTreeMap<String, String>,
    ) -> bool {
        if !build_dir.exists() {
            return true;
        }
        tracing::info!("cleaning {project} with ninja");
        run_tool(
            "ninja",
            &["clean".to_string()],
            build_dir,
            env,
            ctx.dry_run,
        )
    }
}
