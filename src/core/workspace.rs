//! Workspace paths and persisted configuration
//!
//! A workspace is a named build configuration instance sharing one source
//! checkout. All of its state lives under `<root>/.ws/<name>/`: the
//! `config.toml` key/value store, the per-project checksum records, and the
//! per-project working areas (`projects/<name>/{build,install,src}`).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::infra::fs;

/// Manifest file name, expected at the workspace root
pub const MANIFEST_FILE: &str = "ws.yaml";

/// Workspace state directory under the root
const STATE_DIR: &str = ".ws";

/// Default workspace name
pub const DEFAULT_WORKSPACE: &str = "default";

/// A named workspace rooted at a source checkout
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    name: String,
}

impl Workspace {
    /// Open an existing workspace; its state directory must be on disk
    pub fn open(root: &Path, name: &str) -> Result<Self, ConfigError> {
        let ws = Self {
            root: root.to_path_buf(),
            name: name.to_string(),
        };
        if !ws.dir().is_dir() {
            return Err(ConfigError::WorkspaceNotFound {
                name: name.to_string(),
            });
        }
        Ok(ws)
    }

    /// Create a workspace state directory with a default configuration
    ///
    /// Opening an already-initialized workspace is not an error.
    pub fn create(root: &Path, name: &str) -> Result<Self, ConfigError> {
        let ws = Self {
            root: root.to_path_buf(),
            name: name.to_string(),
        };
        if !ws.config_path().exists() {
            fs::create_dir_all(&ws.dir()).map_err(|e| ConfigError::Write {
                path: ws.dir(),
                error: e.to_string(),
            })?;
            WorkspaceConfig::default().store(&ws)?;
        }
        Ok(ws)
    }

    /// Workspace root (the shared source checkout)
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Workspace name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path to the manifest file at the root
    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE)
    }

    /// Workspace state directory: `<root>/.ws/<name>`
    pub fn dir(&self) -> PathBuf {
        self.root.join(STATE_DIR).join(&self.name)
    }

    /// Path to the persisted workspace configuration
    pub fn config_path(&self) -> PathBuf {
        self.dir().join("config.toml")
    }

    /// Directory holding one checksum record per project
    pub fn checksum_dir(&self) -> PathBuf {
        self.dir().join("checksums")
    }

    /// Checksum record for one project
    pub fn checksum_path(&self, project: &str) -> PathBuf {
        self.checksum_dir().join(project)
    }

    /// A project's working area within this workspace
    pub fn project_dir(&self, project: &str) -> PathBuf {
        self.dir().join("projects").join(project)
    }

    /// A project's build directory
    pub fn build_dir(&self, project: &str) -> PathBuf {
        self.project_dir(project).join("build")
    }

    /// A project's install prefix
    pub fn install_dir(&self, project: &str) -> PathBuf {
        self.project_dir(project).join("install")
    }

    /// Convenience symlink from the working area to the live source tree
    pub fn source_link(&self, project: &str) -> PathBuf {
        self.project_dir(project).join("src")
    }

    /// A project's live source tree: `<root>/<project>`
    pub fn source_dir(&self, project: &str) -> PathBuf {
        self.root.join(project)
    }
}

/// Build type selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BuildType {
    #[default]
    Debug,
    Release,
}

impl BuildType {
    /// Value accepted by `cmake -DCMAKE_BUILD_TYPE=`
    pub fn cmake_name(self) -> &'static str {
        match self {
            Self::Debug => "Debug",
            Self::Release => "Release",
        }
    }

    /// Value accepted by `meson setup --buildtype`
    pub fn meson_name(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Release => "release",
        }
    }
}

impl std::fmt::Display for BuildType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.meson_name())
    }
}

impl std::str::FromStr for BuildType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "debug" => Ok(Self::Debug),
            "release" => Ok(Self::Release),
            other => Err(format!("'{other}' is not one of: debug, release")),
        }
    }
}

/// Configuration key for the build type selector
pub const KEY_BUILD_TYPE: &str = "build-type";

/// Configuration key for the taint flag
pub const KEY_TAINT: &str = "taint";

/// Persisted per-workspace key/value state
///
/// Changing the build type invalidates every prior build artifact in the
/// workspace, so the change sets the taint flag; builds refuse to run while
/// the flag is set, until a forced workspace-wide clean resets it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkspaceConfig {
    /// Build type passed to every backend
    #[serde(default)]
    pub build_type: BuildType,

    /// Set when a taint-bearing key changed since the last full clean
    #[serde(default)]
    pub taint: bool,
}

impl WorkspaceConfig {
    /// Load the configuration for a workspace
    ///
    /// A missing file yields the default configuration.
    pub fn load(ws: &Workspace) -> Result<Self, ConfigError> {
        let path = ws.config_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::Read {
            path: path.clone(),
            error: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path,
            error: e.to_string(),
        })
    }

    /// Persist the configuration
    pub fn store(&self, ws: &Workspace) -> Result<(), ConfigError> {
        let path = ws.config_path();
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::Write {
            path: path.clone(),
            error: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::Write {
            path,
            error: e.to_string(),
        })
    }

    /// Read one key as a display string
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        match key {
            KEY_BUILD_TYPE => Ok(self.build_type.to_string()),
            KEY_TAINT => Ok(self.taint.to_string()),
            other => Err(ConfigError::UnknownKey {
                key: other.to_string(),
            }),
        }
    }

    /// Set one key from a string value
    ///
    /// Changing the build type marks the workspace as tainted. The taint
    /// flag itself cannot be set here; it is cleared by a forced clean.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            KEY_BUILD_TYPE => {
                let parsed: BuildType =
                    value.parse().map_err(|reason| ConfigError::InvalidValue {
                        key: key.to_string(),
                        value: value.to_string(),
                        reason,
                    })?;
                if parsed != self.build_type {
                    self.build_type = parsed;
                    self.taint = true;
                }
                Ok(())
            }
            KEY_TAINT => Err(ConfigError::InvalidValue {
                key: key.to_string(),
                value: value.to_string(),
                reason: "taint is managed by wsbuild; clear it with 'wsbuild clean --force'"
                    .to_string(),
            }),
            other => Err(ConfigError::UnknownKey {
                key: other.to_string(),
            }),
        }
    }
}
