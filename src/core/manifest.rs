//! Manifest (ws.yaml) parsing and graph validation
//!
//! The manifest maps each project name to its build system, dependencies,
//! and environment templates. Parsing is strict: unknown keys are rejected,
//! every dependency must name a manifest entry, and the build-system
//! identifier must be known to the backend registry. After validation the
//! reverse-dependency index is computed once; the resulting graph is
//! immutable for the rest of the run.

use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::backend::Registry;
use crate::error::ManifestError;
use crate::core::workspace::MANIFEST_FILE;

/// Raw manifest entry, one per project
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectEntry {
    /// Backend identifier (e.g. "cmake", "meson")
    pub build: String,

    /// Dependencies: a single name or a sequence of names
    #[serde(default)]
    pub deps: Option<DepsField>,

    /// Environment templates; values may contain ${LIBDIR} and ${PREFIX}
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

/// A dependency value that is a single string is normalized into a
/// one-element sequence.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DepsField {
    One(String),
    Many(Vec<String>),
}

impl DepsField {
    fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(name) => vec![name],
            Self::Many(names) => names,
        }
    }
}

/// A validated project node
#[derive(Debug, Clone)]
pub struct Project {
    /// Unique project name (the manifest key)
    pub name: String,
    /// Backend identifier
    pub build: String,
    /// Ordered, duplicate-free dependency names
    pub deps: Vec<String>,
    /// Environment templates from the manifest
    pub env: BTreeMap<String, String>,
    /// Absolute source directory: `<root>/<name>`
    pub path: PathBuf,
    /// Projects that list this one as a dependency
    pub downstream: BTreeSet<String>,
}

/// The validated dependency graph
#[derive(Debug, Clone, Default)]
pub struct Graph {
    projects: BTreeMap<String, Project>,
}

impl Graph {
    /// Load and validate the manifest at `<root>/ws.yaml`
    pub fn load(root: &Path, registry: &Registry) -> Result<Self, ManifestError> {
        let path = root.join(MANIFEST_FILE);
        let content = std::fs::read_to_string(&path)
            .map_err(|_| ManifestError::NotFound { path: path.clone() })?;
        Self::parse(root, &content, registry)
    }

    /// Parse and validate a manifest from YAML text
    pub fn parse(root: &Path, yaml: &str, registry: &Registry) -> Result<Self, ManifestError> {
        let entries: BTreeMap<String, ProjectEntry> = if yaml.trim().is_empty() {
            BTreeMap::new()
        } else {
            serde_yaml::from_str(yaml).map_err(|e| ManifestError::Parse(e.to_string()))?
        };
        Self::from_entries(root, entries, registry)
    }

    /// Validate parsed entries into a graph
    pub fn from_entries(
        root: &Path,
        entries: BTreeMap<String, ProjectEntry>,
        registry: &Registry,
    ) -> Result<Self, ManifestError> {
        let mut projects = BTreeMap::new();

        for (name, entry) in entries {
            if !registry.contains(&entry.build) {
                return Err(ManifestError::UnknownBuildSystem {
                    project: name,
                    build: entry.build,
                });
            }

            let deps = entry.deps.map(DepsField::into_vec).unwrap_or_default();
            let mut seen = BTreeSet::new();
            for dep in &deps {
                if !seen.insert(dep.clone()) {
                    return Err(ManifestError::DuplicateDependency {
                        project: name,
                        dependency: dep.clone(),
                    });
                }
            }

            let path = root.join(&name);
            projects.insert(
                name.clone(),
                Project {
                    name,
                    build: entry.build,
                    deps,
                    env: entry.env,
                    path,
                    downstream: BTreeSet::new(),
                },
            );
        }

        // Every dependency must exist before the reverse index is built.
        for project in projects.values() {
            for dep in &project.deps {
                if !projects.contains_key(dep) {
                    return Err(ManifestError::MissingDependency {
                        project: project.name.clone(),
                        dependency: dep.clone(),
                    });
                }
            }
        }

        let edges: Vec<(String, String)> = projects
            .values()
            .flat_map(|p| p.deps.iter().map(|d| (d.clone(), p.name.clone())))
            .collect();
        for (dep, dependent) in edges {
            if let Some(node) = projects.get_mut(&dep) {
                node.downstream.insert(dependent);
            }
        }

        Ok(Self { projects })
    }

    /// Look up a project by name
    pub fn get(&self, name: &str) -> Option<&Project> {
        self.projects.get(name)
    }

    /// All project names in stable (sorted) order
    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.projects.keys()
    }

    /// All projects in stable (sorted) order
    pub fn projects(&self) -> impl Iterator<Item = &Project> {
        self.projects.values()
    }

    /// Number of projects
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// True when the manifest is empty
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Registry {
        Registry::builtin()
    }

    #[test]
    fn test_parse_minimal_manifest() {
        let yaml = r"
libfoo:
  build: cmake
";
        let graph = Graph::parse(Path::new("/src"), yaml, &registry()).unwrap();

        let project = graph.get("libfoo").unwrap();
        assert_eq!(project.build, "cmake");
        assert!(project.deps.is_empty());
        assert!(project.env.is_empty());
        assert_eq!(project.path, PathBuf::from("/src/libfoo"));
    }

    #[test]
    fn test_single_string_dep_is_normalized() {
        let yaml = r"
libfoo:
  build: cmake
app:
  build: meson
  deps: libfoo
";
        let graph = Graph::parse(Path::new("/src"), yaml, &registry()).unwrap();

        assert_eq!(graph.get("app").unwrap().deps, vec!["libfoo"]);
    }

    #[test]
    fn test_dep_sequence_preserves_order() {
        let yaml = r"
libz:
  build: cmake
liba:
  build: cmake
app:
  build: meson
  deps: [libz, liba]
";
        let graph = Graph::parse(Path::new("/src"), yaml, &registry()).unwrap();

        assert_eq!(graph.get("app").unwrap().deps, vec!["libz", "liba"]);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let yaml = r"
libfoo:
  build: cmake
  bogus: 1
";
        let result = Graph::parse(Path::new("/src"), yaml, &registry());
        assert!(matches!(result, Err(ManifestError::Parse(_))));
    }

    #[test]
    fn test_missing_build_rejected() {
        let yaml = r"
libfoo:
  deps: [libbar]
";
        let result = Graph::parse(Path::new("/src"), yaml, &registry());
        assert!(matches!(result, Err(ManifestError::Parse(_))));
    }

    #[test]
    fn test_unknown_build_system_rejected() {
        let yaml = r"
libfoo:
  build: bazel
";
        let result = Graph::parse(Path::new("/src"), yaml, &registry());
        assert!(matches!(
            result,
            Err(ManifestError::UnknownBuildSystem { .. })
        ));
    }

    #[test]
    fn test_missing_dependency_rejected() {
        let yaml = r"
app:
  build: cmake
  deps: [nope]
";
        let result = Graph::parse(Path::new("/src"), yaml, &registry());
        match result {
            Err(ManifestError::MissingDependency {
                project,
                dependency,
            }) => {
                assert_eq!(project, "app");
                assert_eq!(dependency, "nope");
            }
            other => panic!("expected MissingDependency, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_dependency_rejected() {
        let yaml = r"
libfoo:
  build: cmake
app:
  build: cmake
  deps: [libfoo, libfoo]
";
        let result = Graph::parse(Path::new("/src"), yaml, &registry());
        assert!(matches!(
            result,
            Err(ManifestError::DuplicateDependency { .. })
        ));
    }

    #[test]
    fn test_downstream_index() {
        let yaml = r"
libfoo:
  build: cmake
app:
  build: meson
  deps: [libfoo]
tool:
  build: cmake
  deps: [libfoo]
";
        let graph = Graph::parse(Path::new("/src"), yaml, &registry()).unwrap();

        let downstream = &graph.get("libfoo").unwrap().downstream;
        assert!(downstream.contains("app"));
        assert!(downstream.contains("tool"));
        assert_eq!(downstream.len(), 2);
        assert!(graph.get("app").unwrap().downstream.is_empty());
    }

    #[test]
    fn test_env_templates_parsed() {
        let yaml = r#"
libfoo:
  build: cmake
  env:
    FOO_PLUGIN_PATH: "${LIBDIR}/foo/plugins"
"#;
        let graph = Graph::parse(Path::new("/src"), yaml, &registry()).unwrap();

        assert_eq!(
            graph.get("libfoo").unwrap().env.get("FOO_PLUGIN_PATH"),
            Some(&"${LIBDIR}/foo/plugins".to_string())
        );
    }

    #[test]
    fn test_empty_manifest_is_empty_graph() {
        let graph = Graph::parse(Path::new("/src"), "", &registry()).unwrap();
        assert!(graph.is_empty());
    }
}
