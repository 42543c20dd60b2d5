//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod build;
pub mod clean;
pub mod config;
pub mod doctor;
pub mod env;
pub mod init;
pub mod status;

use anyhow::Result;
use clap::Subcommand;

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a workspace
    Init,

    /// Build projects and their dependency closures
    Build {
        /// Projects to build (all projects if omitted)
        projects: Vec<String>,

        /// Rebuild even when checksums match
        #[arg(short, long)]
        force: bool,

        /// Number of parallel jobs
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Log decisions without mutating any state
        #[arg(long)]
        dry_run: bool,
    },

    /// Clean build artifacts
    Clean {
        /// Projects to clean (all projects if omitted)
        projects: Vec<String>,

        /// Delete working directories outright instead of asking the
        /// backend; cleaning the whole workspace this way clears taint
        #[arg(short, long)]
        force: bool,

        /// Log decisions without mutating any state
        #[arg(long)]
        dry_run: bool,
    },

    /// Read or change workspace configuration
    Config {
        /// Configuration key (prints all keys if omitted)
        key: Option<String>,

        /// New value for the key (prints the current value if omitted)
        value: Option<String>,
    },

    /// Print the composed build environment for a project
    Env {
        /// Project name
        project: String,
    },

    /// Report per-project build state
    Status {
        /// Projects to report on (all projects if omitted)
        projects: Vec<String>,

        /// Output in JSON format for scripting
        #[arg(long)]
        json: bool,
    },

    /// Check availability of external tools
    Doctor,
}

impl Commands {
    /// Execute the command
    pub fn run(self, workspace: &str) -> Result<()> {
        let root = std::env::current_dir()?;
        match self {
            Self::Init => init::execute(&root, workspace),
            Self::Build {
                projects,
                force,
                jobs,
                dry_run,
            } => {
                let options = build::BuildOptions {
                    projects,
                    force,
                    jobs,
                    dry_run,
                };
                build::execute(&root, workspace, options)
            }
            Self::Clean {
                projects,
                force,
                dry_run,
            } => clean::execute(&root, workspace, &projects, force, dry_run),
            Self::Config { key, value } => {
                config::execute(&root, workspace, key.as_deref(), value.as_deref())
            }
            Self::Env { project } => env::execute(&root, workspace, &project),
            Self::Status { projects, json } => status::execute(&root, workspace, &projects, json),
            Self::Doctor => doctor::execute(),
        }
    }
}
