//! Command-line interface module
//!
//! This module handles argument parsing and output formatting.
//! It contains no business logic - that belongs in [`crate::core`].

pub mod commands;
pub mod output;

use anyhow::Result;
use clap::Parser;

use crate::core::workspace::DEFAULT_WORKSPACE;
use commands::Commands;

/// wsbuild - incremental build orchestrator for multi-repo workspaces
///
/// Build interdependent source repositories in dependency order, skipping
/// projects whose sources have not changed.
#[derive(Parser, Debug)]
#[command(name = "wsbuild")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Workspace to operate on
    #[arg(short, long, global = true, default_value = DEFAULT_WORKSPACE)]
    pub workspace: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        if let Some(cmd) = self.command {
            cmd.run(&self.workspace)
        } else {
            // No subcommand provided, show help
            use clap::CommandFactory;
            let mut cmd = Self::command();
            cmd.print_help()?;
            Ok(())
        }
    }
}
