//! Error types for wsbuild
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Manifest validation errors
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Manifest not found
    #[error("Manifest not found at '{path}'. A ws.yaml is required at the workspace root.")]
    NotFound { path: PathBuf },

    /// YAML parse or schema error (unknown keys, missing build field, wrong types)
    #[error("Failed to parse manifest: {0}")]
    Parse(String),

    /// Dependency names a project absent from the manifest
    #[error("Project '{project}' depends on '{dependency}', which is not in the manifest")]
    MissingDependency { project: String, dependency: String },

    /// Duplicate entry within one project's dependency list
    #[error("Project '{project}' lists dependency '{dependency}' more than once")]
    DuplicateDependency { project: String, dependency: String },

    /// Build-system identifier not present in the backend registry
    #[error("Project '{project}' uses unknown build system '{build}'")]
    UnknownBuildSystem { project: String, build: String },
}

/// Dependency resolution errors
#[derive(Error, Debug)]
pub enum ResolverError {
    /// Circular dependency detected, naming the two colliding projects
    #[error("Circular dependency between '{first}' and '{second}'")]
    CircularDependency { first: String, second: String },

    /// Requested project absent from the manifest
    #[error("Project '{name}' not found in the manifest")]
    UnknownProject { name: String },
}

/// Checksum engine errors
#[derive(Error, Debug)]
pub enum ChecksumError {
    /// Source directory is not a valid checked-out repository
    #[error("'{path}' is not a valid git repository: {error}")]
    InvalidRepository { path: PathBuf, error: String },

    /// A read-only git query failed
    #[error("git {query} failed in '{path}': {error}")]
    QueryFailed {
        query: String,
        path: PathBuf,
        error: String,
    },

    /// IO error on the checksum store
    #[error("Checksum store error for '{path}': {error}")]
    Store { path: PathBuf, error: String },
}

/// Workspace configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Workspace directory absent from disk
    #[error("Workspace '{name}' does not exist. Run 'wsbuild init -w {name}' first.")]
    WorkspaceNotFound { name: String },

    /// Workspace is tainted by a configuration change
    #[error(
        "Workspace '{name}' is tainted by a configuration change; \
         run 'wsbuild clean --force' before building"
    )]
    Tainted { name: String },

    /// Unknown configuration key
    #[error("Unknown configuration key '{key}'")]
    UnknownKey { key: String },

    /// Invalid configuration value
    #[error("Invalid value '{value}' for key '{key}': {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    /// Failed to read config file
    #[error("Failed to read config file '{path}': {error}")]
    Read { path: PathBuf, error: String },

    /// Failed to parse config file
    #[error("Failed to parse config file '{path}': {error}")]
    Parse { path: PathBuf, error: String },

    /// Failed to write config file
    #[error("Failed to write config file '{path}': {error}")]
    Write { path: PathBuf, error: String },
}

/// Build orchestration errors
#[derive(Error, Debug)]
pub enum BuildError {
    /// A project's configure or build step reported failure
    #[error("Build failed for project '{project}' during {phase}")]
    ProjectFailed { project: String, phase: String },
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to create directory
    #[error("Failed to create directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },

    /// Failed to remove directory
    #[error("Failed to remove directory '{path}': {error}")]
    RemoveDir { path: PathBuf, error: String },

    /// Failed to create symlink
    #[error("Failed to create symlink '{path}': {error}")]
    Symlink { path: PathBuf, error: String },
}

/// Top-level wsbuild error type
#[derive(Error, Debug)]
pub enum WsError {
    /// Manifest error
    #[error("{0}")]
    Manifest(#[from] ManifestError),

    /// Resolver error
    #[error("{0}")]
    Resolver(#[from] ResolverError),

    /// Checksum error
    #[error("{0}")]
    Checksum(#[from] ChecksumError),

    /// Config error
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Build error
    #[error("{0}")]
    Build(#[from] BuildError),

    /// Filesystem error
    #[error("{0}")]
    Filesystem(#[from] FilesystemError),

    /// IO error
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}
