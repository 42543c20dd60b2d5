//! CMake backend
//!
//! Configures with the Unix Makefiles generator and drives the build with
//! make, installing into the workspace install prefix.

use std::collections::BTreeMap;
use std::path::Path;

use super::Backend;
use crate::core::context::RunContext;
use crate::core::workspace::BuildType;
use crate::infra::process::run_tool;

pub struct CmakeBackend;

fn configure_args(install_prefix: &Path, source_dir: &Path, build_type: BuildType) -> Vec<String> {
    vec![
        "-G".to_string(),
        "Unix Makefiles".to_string(),
        format!("-DCMAKE_INSTALL_PREFIX={}", install_prefix.display()),
        format!("-DCMAKE_BUILD_TYPE={}", build_type.cmake_name()),
        source_dir.display().to_string(),
    ]
}

fn build_args(jobs: usize) -> Vec<String> {
    vec![format!("-j{jobs}"), "install".to_string()]
}

impl Backend for CmakeBackend {
    fn name(&self) -> &'static str {
        "cmake"
    }

    fn tools(&self) -> &'static [&'static str] {
        &["cmake", "make"]
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
        tracing::info!("configuring {project} with cmake");
        run_tool(
            "cmake",
            &configure_args(install_prefix, source_dir, build_type),
            build_dir,
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
        tracing::info!("building {project} with make");
        run_tool("make", &build_args(ctx.jobs), build_dir, env, ctx.dry_run)
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
        tracing::info!("cleaning {project} with make");
        run_tool(
            "make",
            &["clean".to_string()],
            build_dir,
            env,
            ctx.dry_run,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_configure_args_shape() {
        let args = configure_args(
            &PathBuf::from("/ws/install"),
            &PathBuf::from("/src/libfoo"),
            BuildType::Release,
        );

        assert_eq!(args[0], "-G");
        assert_eq!(args[1], "Unix Makefiles");
        assert!(args.contains(&"-DCMAKE_INSTALL_PREFIX=/ws/install".to_string()));
        assert!(args.contains(&"-DCMAKE_BUILD_TYPE=Release".to_string()));
        assert_eq!(args.last().unwrap(), "/src/libfoo");
    }

    #[test]
    fn test_build_args_include_jobs_and_install() {
        assert_eq!(build_args(4), vec!["-j4", "install"]);
    }

    #[test]
    fn test_clean_missing_build_dir_is_already_clean() {
        let ctx = RunContext::default();
        let env = BTreeMap::new();

        assert!(CmakeBackend.clean(&ctx, "libfoo", Path::new("/nonexistent/build"), &env));
    }
}
