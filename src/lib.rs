//! wsbuild - incremental build orchestrator for multi-repo workspaces
//!
//! Given a declarative manifest describing projects, their build systems,
//! and their dependency edges, wsbuild computes a build order, decides which
//! projects are stale via content checksums, invokes the right build-system
//! backend with a correctly composed environment, and persists enough state
//! to avoid redundant rebuilds across invocations.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Business logic (graph, resolver, checksums, orchestration)
//! - [`backend`] - Build-system adapters (configure/build/clean)
//! - [`infra`] - Infrastructure layer (filesystem, processes, git)
//! - [`error`] - Error types and handling

pub mod backend;
pub mod cli;
pub mod core;
pub mod error;
pub mod infra;
