//! Per-project build environment composition
//!
//! Starting from the ambient process environment, the composer makes every
//! transitive dependency's installed libraries and pkg-config metadata
//! findable without manual path configuration, and resolves the project's
//! own environment templates. The same composed environment serves the
//! build step and an interactive inspection shell.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::core::manifest::Graph;
use crate::core::resolver;
use crate::core::workspace::Workspace;
use crate::error::WsError;

/// Library search variable fed from dependency install trees
pub const LIB_PATH_VAR: &str = "LD_LIBRARY_PATH";

/// Package-metadata search variable fed from dependency install trees
pub const PKG_CONFIG_VAR: &str = "PKG_CONFIG_PATH";

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$\{(LIBDIR|PREFIX)\}").expect("valid regex"))
}

/// Append `entry` to a colon-joined search variable, never replacing
/// existing entries.
pub fn merge_var(env: &mut BTreeMap<String, String>, key: &str, entry: &str) {
    match env.get_mut(key) {
        Some(existing) if !existing.is_empty() => {
            existing.push(':');
            existing.push_str(entry);
        }
        _ => {
            env.insert(key.to_string(), entry.to_string());
        }
    }
}

/// Resolve the `${LIBDIR}` and `${PREFIX}` placeholders in a template value.
fn resolve_template(template: &str, libdir: &str, prefix: &str) -> String {
    placeholder_re()
        .replace_all(template, |caps: &regex::Captures<'_>| match &caps[1] {
            "LIBDIR" => libdir.to_string(),
            _ => prefix.to_string(),
        })
        .into_owned()
}

/// Compose the process environment for building or inspecting `project`.
///
/// Every project in the target's dependency closure (the target itself
/// excluded) contributes its install paths to [`LIB_PATH_VAR`] and
/// [`PKG_CONFIG_VAR`]; the target's own manifest env templates are resolved
/// against its install prefix and merged with the same append semantics.
pub fn compose(
    ws: &Workspace,
    graph: &Graph,
    project: &str,
) -> Result<BTreeMap<String, String>, WsError> {
    let mut env: BTreeMap<String, String> = std::env::vars().collect();

    let target = graph
        .get(project)
        .ok_or_else(|| crate::error::ResolverError::UnknownProject {
            name: project.to_string(),
        })?;

    let deps = resolver::closure(graph, std::slice::from_ref(&target.name))?;
    for dep in deps.iter().filter(|name| name.as_str() != project) {
        let install = ws.install_dir(dep);
        merge_var(&mut env, LIB_PATH_VAR, &install.join("lib").display().to_string());
        merge_var(
            &mut env,
            PKG_CONFIG_VAR,
            &install.join("lib").join("pkgconfig").display().to_string(),
        );
    }

    let prefix = ws.install_dir(project);
    let libdir = prefix.join("lib");
    for (key, template) in &target.env {
        let resolved = resolve_template(
            template,
            &libdir.display().to_string(),
            &prefix.display().to_string(),
        );
        merge_var(&mut env, key, &resolved);
    }

    Ok(env)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Registry;
    use proptest::prelude::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn fixture(yaml: &str) -> (TempDir, Workspace, Graph) {
        let root = TempDir::new().unwrap();
        let ws = Workspace::create(root.path(), "default").unwrap();
        let graph = Graph::parse(root.path(), yaml, &Registry::builtin()).unwrap();
        (root, ws, graph)
    }

    #[test]
    fn test_merge_var_appends() {
        let mut env = BTreeMap::new();
        merge_var(&mut env, "X", "/a");
        merge_var(&mut env, "X", "/b");

        assert_eq!(env.get("X").unwrap(), "/a:/b");
    }

    #[test]
    fn test_merge_var_keeps_existing_value() {
        let mut env = BTreeMap::new();
        env.insert("X".to_string(), "/pre".to_string());
        merge_var(&mut env, "X", "/a");

        assert_eq!(env.get("X").unwrap(), "/pre:/a");
    }

    #[test]
    fn test_dependency_paths_are_appended() {
        let (_root, ws, graph) = fixture(
            r"
q:
  build: cmake
r:
  build: cmake
p:
  build: cmake
  deps: [q, r]
",
        );

        let env = compose(&ws, &graph, "p").unwrap();

        let libs = env.get(LIB_PATH_VAR).unwrap();
        assert!(libs.contains(&ws.install_dir("q").join("lib").display().to_string()));
        assert!(libs.contains(&ws.install_dir("r").join("lib").display().to_string()));

        let pkg = env.get(PKG_CONFIG_VAR).unwrap();
        assert!(pkg.contains(
            &ws.install_dir("q")
                .join("lib")
                .join("pkgconfig")
                .display()
                .to_string()
        ));
    }

    #[test]
    fn test_target_own_paths_not_in_search_vars() {
        let (_root, ws, graph) = fixture(
            r"
p:
  build: cmake
",
        );

        let env = compose(&ws, &graph, "p").unwrap();
        let own_lib = ws.install_dir("p").join("lib").display().to_string();
        assert!(!env
            .get(LIB_PATH_VAR)
            .map(|v| v.contains(&own_lib))
            .unwrap_or(false));
    }

    #[test]
    fn test_transitive_dependency_paths_included() {
        let (_root, ws, graph) = fixture(
            r"
base:
  build: cmake
mid:
  build: cmake
  deps: [base]
top:
  build: cmake
  deps: [mid]
",
        );

        let env = compose(&ws, &graph, "top").unwrap();
        let libs = env.get(LIB_PATH_VAR).unwrap();
        assert!(libs.contains(&ws.install_dir("base").join("lib").display().to_string()));
        assert!(libs.contains(&ws.install_dir("mid").join("lib").display().to_string()));
    }

    #[test]
    fn test_templates_resolve_placeholders() {
        let (_root, ws, graph) = fixture(
            r#"
p:
  build: cmake
  env:
    PLUGIN_PATH: "${LIBDIR}/plugins"
    ROOT: "${PREFIX}"
"#,
        );

        let env = compose(&ws, &graph, "p").unwrap();
        assert_eq!(
            env.get("PLUGIN_PATH").unwrap(),
            &ws.install_dir("p").join("lib").join("plugins").display().to_string()
        );
        assert_eq!(
            env.get("ROOT").unwrap(),
            &ws.install_dir("p").display().to_string()
        );
    }

    #[test]
    fn test_template_appends_to_ambient_value() {
        let (_root, ws, graph) = fixture(
            r#"
p:
  build: cmake
  env:
    WSBUILD_TEST_TTAV: "${PREFIX}/share"
"#,
        );

        // Ambient variable must survive at the front of the merged value.
        std::env::set_var("WSBUILD_TEST_TTAV", "/ambient");
        let env = compose(&ws, &graph, "p").unwrap();
        std::env::remove_var("WSBUILD_TEST_TTAV");

        let value = env.get("WSBUILD_TEST_TTAV").unwrap();
        assert!(value.starts_with("/ambient:"));
        assert!(value.ends_with("/share"));
    }

    #[test]
    fn test_resolve_template_leaves_other_text() {
        assert_eq!(
            resolve_template("a/${LIBDIR}/b/${PREFIX}/c", "L", "P"),
            "a/L/b/P/c"
        );
        assert_eq!(resolve_template("plain", "L", "P"), "plain");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Appending never removes or reorders what was already present.
        #[test]
        fn prop_merge_preserves_prefix(
            existing in "[a-z/]{1,12}",
            entries in proptest::collection::vec("[a-z/]{1,12}", 1..6),
        ) {
            let mut env = BTreeMap::new();
            env.insert("V".to_string(), existing.clone());
            for entry in &entries {
                merge_var(&mut env, "V", entry);
            }

            let value = env.get("V").unwrap();
            prop_assert!(value.starts_with(&existing));
            let parts: Vec<&str> = value.split(':').collect();
            prop_assert_eq!(parts.len(), entries.len() + 1);
        }
    }
}
