//! Per-invocation run settings
//!
//! Dry-run and force state is threaded through calls explicitly rather than
//! held as ambient globals, so components stay independently testable.

/// Settings for one orchestrator invocation
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Log decisions but skip every state-mutating call
    pub dry_run: bool,
    /// Rebuild even when the stored checksum matches
    pub force: bool,
    /// Parallel jobs passed to the build tools
    pub jobs: usize,
}

impl RunContext {
    /// Create a run context; `jobs` defaults to the host CPU count
    pub fn new(dry_run: bool, force: bool, jobs: Option<usize>) -> Self {
        Self {
            dry_run,
            force,
            jobs: jobs.unwrap_or_else(num_cpus::get),
        }
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new(false, false, None)
    }
}
