//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests: a temporary
//! workspace root with git-backed projects, and a scripted backend that
//! records lifecycle calls instead of running real build tools.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use wsbuild::backend::{Backend, Registry};
use wsbuild::core::context::RunContext;
use wsbuild::core::workspace::BuildType;

/// Run git in `dir` with identity and signing pinned for reproducibility
pub fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args([
            "-c",
            "user.email=test@example.com",
            "-c",
            "user.name=Test",
            "-c",
            "commit.gpgsign=false",
            "-c",
            "protocol.file.allow=always",
        ])
        .args(args)
        .current_dir(dir)
        .status()
        .expect("failed to run git");
    assert!(status.success(), "git {args:?} failed in {}", dir.display());
}

/// Test workspace root
///
/// Creates a temporary directory holding the manifest, project source
/// repositories, and the `.ws` state directory.
pub struct TestWorkspace {
    /// Temporary directory for the workspace root
    pub dir: TempDir,
}

impl TestWorkspace {
    /// Create a new empty workspace root
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Get the path to the workspace root
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Write the ws.yaml manifest at the root
    #[allow(dead_code)]
    pub fn write_manifest(&self, yaml: &str) {
        std::fs::write(self.dir.path().join("ws.yaml"), yaml).expect("Failed to write manifest");
    }

    /// Create a project source directory as a git repository with one commit
    #[allow(dead_code)]
    pub fn add_git_project(&self, name: &str) -> PathBuf {
        let dir = self.dir.path().join(name);
        std::fs::create_dir_all(&dir).expect("Failed to create project directory");
        git(&dir, &["init"]);
        std::fs::write(dir.join("hello.c"), "int main(void) { return 0; }\n")
            .expect("Failed to write source file");
        git(&dir, &["add", "."]);
        git(&dir, &["commit", "-m", "initial"]);
        dir
    }

    /// Write a file into a project without committing it
    #[allow(dead_code)]
    pub fn write_file(&self, project: &str, file: &str, content: &str) {
        std::fs::write(self.dir.path().join(project).join(file), content)
            .expect("Failed to write file");
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// Backend that records lifecycle calls and fails on demand
///
/// Registered under an existing identifier (usually "cmake") so manifests
/// validate unchanged while tests observe orchestration behavior.
#[allow(dead_code)]
pub struct ScriptedBackend {
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_configure: Vec<String>,
    pub fail_build: Vec<String>,
}

#[allow(dead_code)]
impl ScriptedBackend {
    pub fn new(calls: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            calls,
            fail_configure: Vec::new(),
            fail_build: Vec::new(),
        }
    }

    fn record(&self, step: &str, project: &str) {
        self.calls
            .lock()
            .expect("calls lock")
            .push(format!("{step} {project}"));
    }
}

impl Backend for ScriptedBackend {
    fn name(&self) -> &'static str {
        "cmake"
    }

    fn tools(&self) -> &'static [&'static str] {
        &[]
    }

    fn configure(
        &self,
        _ctx: &RunContext,
        project: &str,
        _install_prefix: &Path,
        _build_dir: &Path,
        _source_dir: &Path,
        _env: &BTreeMap<String, String>,
        _build_type: BuildType,
    ) -> bool {
        self.record("configure", project);
        !self.fail_configure.iter().any(|p| p == project)
    }

    fn build(
        &self,
        _ctx: &RunContext,
        project: &str,
        _build_dir: &Path,
        _env: &BTreeMap<String, String>,
    ) -> bool {
        self.record("build", project);
        !self.fail_build.iter().any(|p| p == project)
    }

    fn clean(
        &self,
        _ctx: &RunContext,
        project: &str,
        _build_dir: &Path,
        _env: &BTreeMap<String, String>,
    ) -> bool {
        self.record("clean", project);
        true
    }
}

/// Registry whose "cmake" entry is a [`ScriptedBackend`]
#[allow(dead_code)]
pub fn scripted_registry(backend: ScriptedBackend) -> Registry {
    let mut registry = Registry::builtin();
    registry.register(Box::new(backend));
    registry
}
