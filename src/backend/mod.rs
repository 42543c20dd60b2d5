//! Build-system backend abstraction
//!
//! A backend adapts one external build tool to the configure/build/clean
//! lifecycle. Nonzero exits from the underlying tool are converted into
//! boolean failure results rather than propagated as errors, so the
//! orchestrator can react (e.g. remove a bad build directory) instead of
//! aborting the whole run.
//!
//! Backends are selected through a [`Registry`] keyed on the manifest's
//! `build` identifier; unknown identifiers are rejected at manifest
//! validation time, not at invocation time.

pub mod cmake;
pub mod meson;

use std::collections::BTreeMap;
use std::path::Path;

use crate::core::context::RunContext;
use crate::core::workspace::BuildType;

/// One supported build system
pub trait Backend {
    /// Registry identifier (the manifest's `build` value)
    fn name(&self) -> &'static str;

    /// External tools this backend shells out to
    fn tools(&self) -> &'static [&'static str];

    /// Generate the build system in a fresh build directory.
    ///
    /// Invoked only when the build directory did not previously exist. On
    /// failure the caller removes the build directory entirely, so the next
    /// attempt is treated as a fresh first build.
    #[allow(clippy::too_many_arguments)]
    fn configure(
        &self,
        ctx: &RunContext,
        project: &str,
        install_prefix: &Path,
        build_dir: &Path,
        source_dir: &Path,
        env: &BTreeMap<String, String>,
        build_type: BuildType,
    ) -> bool;

    /// Run the build and install step. Idempotent and re-runnable.
    fn build(
        &self,
        ctx: &RunContext,
        project: &str,
        build_dir: &Path,
        env: &BTreeMap<String, String>,
    ) -> bool;

    /// Best-effort clean; a missing build directory is already clean.
    fn clean(
        &self,
        ctx: &RunContext,
        project: &str,
        build_dir: &Path,
        env: &BTreeMap<String, String>,
    ) -> bool;
}

/// Backend lookup keyed on the manifest's `build` identifier
pub struct Registry {
    backends: BTreeMap<String, Box<dyn Backend>>,
}

impl Registry {
    /// Registry with every built-in backend
    pub fn builtin() -> Self {
        let mut registry = Self {
            backends: BTreeMap::new(),
        };
        registry.register(Box::new(cmake::CmakeBackend));
        registry.register(Box::new(meson::MesonBackend));
        registry
    }

    /// Add a backend, replacing any previous one with the same name
    pub fn register(&mut self, backend: Box<dyn Backend>) {
        self.backends.insert(backend.name().to_string(), backend);
    }

    /// Look up a backend by identifier
    pub fn get(&self, name: &str) -> Option<&dyn Backend> {
        self.backends.get(name).map(|b| &**b)
    }

    /// True when the identifier is registered
    pub fn contains(&self, name: &str) -> bool {
        self.backends.contains_key(name)
    }

    /// Registered identifiers in stable order
    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.backends.keys()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}
