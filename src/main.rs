//! wsbuild CLI - incremental build orchestrator for multi-repo workspaces
//!
//! Entry point for the wsbuild command-line application.

use anyhow::Result;
use clap::Parser;

use wsbuild::cli::output::display_error;
use wsbuild::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // -v raises the default level; RUST_LOG still takes precedence.
    let default_level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(default_level.into()),
        )
        .init();

    match cli.run() {
        Ok(()) => Ok(()),
        Err(e) => {
            display_error(&e);
            std::process::exit(1);
        }
    }
}
