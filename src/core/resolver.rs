//! Build-order computation and cycle detection
//!
//! Computes the dependency closure of a requested project set as a
//! post-order DFS: dependencies are appended to the order before their
//! dependents. The traversal uses an explicit frame stack and in-progress /
//! finished marking, so behavior stays bounded on deep graphs and the cycle
//! error can name exactly the two projects that collided.

use std::collections::BTreeSet;

use crate::core::manifest::Graph;
use crate::error::ResolverError;

enum Frame<'a> {
    Enter {
        name: &'a str,
        parent: Option<&'a str>,
    },
    Leave {
        name: &'a str,
    },
}

/// Compute a safe build order for the requested projects and all of their
/// transitive dependencies.
///
/// An empty request is equivalent to requesting every known project. The
/// result is deterministic for a fixed manifest and request.
pub fn closure(graph: &Graph, requested: &[String]) -> Result<Vec<String>, ResolverError> {
    let roots: Vec<&str> = if requested.is_empty() {
        graph.names().map(String::as_str).collect()
    } else {
        for name in requested {
            if graph.get(name).is_none() {
                return Err(ResolverError::UnknownProject { name: name.clone() });
            }
        }
        requested.iter().map(String::as_str).collect()
    };

    let mut in_progress: BTreeSet<&str> = BTreeSet::new();
    let mut finished: BTreeSet<&str> = BTreeSet::new();
    let mut order = Vec::new();
    let mut stack: Vec<Frame<'_>> = Vec::new();

    for root in roots {
        stack.push(Frame::Enter {
            name: root,
            parent: None,
        });

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Enter { name, parent } => {
                    if finished.contains(name) {
                        continue;
                    }
                    if in_progress.contains(name) {
                        // Reaching a project that is being visited but not
                        // yet finished means the dependency chain loops back
                        // through it.
                        return Err(ResolverError::CircularDependency {
                            first: name.to_string(),
                            second: parent.unwrap_or(name).to_string(),
                        });
                    }

                    in_progress.insert(name);
                    stack.push(Frame::Leave { name });

                    let project = graph.get(name).expect("validated graph");
                    for dep in project.deps.iter().rev() {
                        stack.push(Frame::Enter {
                            name: dep.as_str(),
                            parent: Some(name),
                        });
                    }
                }
                Frame::Leave { name } => {
                    in_progress.remove(name);
                    finished.insert(name);
                    order.push(name.to_string());
                }
            }
        }
    }

    Ok(order)
}
