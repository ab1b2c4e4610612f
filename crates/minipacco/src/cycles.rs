//! Listing every cycle in a graph at once.
//!
//! The traversals stop at the first cycle they meet. This module instead
//! reports one per strongly connected component, found with Tarjan's
//! algorithm from petgraph, each as a real path of requiring files.

use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;
use std::path::PathBuf;

use petgraph::algo::tarjan_scc;

use crate::graph::Graph;

/// A closed dependency path: each file requires the next, and the last
/// requires the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle {
    /// Files involved in the cycle, in dependency order
    pub files: Vec<PathBuf>,
}

impl Cycle {
    /// Returns `true` if this is a single file requiring itself.
    #[must_use]
    pub fn is_self_loop(&self) -> bool {
        self.files.len() == 1
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for file in &self.files {
            write!(f, "{} -> ", file.display())?;
        }
        // Close the loop on the first file
        match self.files.first() {
            Some(first) => write!(f, "{}", first.display()),
            None => Ok(()),
        }
    }
}

/// Find one cycle per tangle of mutually dependent files in `graph`.
///
/// Each strongly connected component with more than one file holds a cycle,
/// as does any single file that requires itself. For each component the
/// reported cycle is the shortest closed path through its earliest-discovered
/// file, using only edges inside the component. Cycles are ordered by the
/// discovery position of that file.
#[must_use]
pub fn find_cycles(graph: &Graph) -> Vec<Cycle> {
    let pg = graph.to_petgraph();

    let mut components: Vec<Vec<usize>> = tarjan_scc(&pg)
        .into_iter()
        .filter(|component| match component.as_slice() {
            [single] => pg.find_edge(*single, *single).is_some(),
            _ => true,
        })
        .map(|component| component.iter().map(|n| n.index()).collect())
        .collect();
    for ids in &mut components {
        ids.sort_unstable();
    }
    components.sort_unstable_by_key(|ids| ids.first().copied());

    components
        .iter()
        .filter_map(|ids| closed_path(graph, ids))
        .map(|ids| Cycle {
            files: ids
                .into_iter()
                .map(|id| graph.node_at(id).path().to_path_buf())
                .collect(),
        })
        .collect()
}

/// Shortest path from the first member of `component` back to itself.
///
/// Breadth-first over edges whose target is in the component. Always finds
/// a path for a genuine component; `None` only for an empty one.
fn closed_path(graph: &Graph, component: &[usize]) -> Option<Vec<usize>> {
    let &start = component.first()?;
    let members: HashSet<usize> = component.iter().copied().collect();

    let mut parent: HashMap<usize, usize> = HashMap::new();
    let mut queue = VecDeque::from([start]);

    while let Some(id) = queue.pop_front() {
        for &dep in graph.dependency_ids(id) {
            if dep == start {
                let mut path = vec![id];
                let mut current = id;
                while let Some(&prev) = parent.get(&current) {
                    path.push(prev);
                    current = prev;
                }
                path.reverse();
                return Some(path);
            }
            if members.contains(&dep) && !parent.contains_key(&dep) {
                parent.insert(dep, id);
                queue.push_back(dep);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::DirectiveExtractor;
    use crate::graph::GraphBuilder;
    use crate::provider::MemoryProvider;
    use std::path::Path;

    fn build(files: &[(&str, &str)]) -> Graph {
        let mut provider = MemoryProvider::new();
        for (name, content) in files {
            provider.insert(format!("/p/{name}"), *content);
        }
        GraphBuilder::new(&provider, DirectiveExtractor::default_marker())
            .build(Path::new(&format!("/p/{}", files[0].0)))
            .expect("graph should build")
    }

    #[test]
    fn acyclic_graph_has_no_cycles() {
        let graph = build(&[
            ("a", "@require ./b @require ./c"),
            ("b", "@require ./c"),
            ("c", ""),
        ]);

        assert!(find_cycles(&graph).is_empty());
    }

    #[test]
    fn finds_every_independent_cycle() {
        let graph = build(&[
            ("entry", "@require ./a @require ./x"),
            ("a", "@require ./b"),
            ("b", "@require ./a"),
            ("x", "@require ./y"),
            ("y", "@require ./z"),
            ("z", "@require ./x"),
        ]);

        let cycles = find_cycles(&graph);

        assert_eq!(cycles.len(), 2);
        assert_eq!(cycles[0].files, [PathBuf::from("/p/a"), PathBuf::from("/p/b")]);
        assert_eq!(
            cycles[1].files,
            [PathBuf::from("/p/x"), PathBuf::from("/p/y"), PathBuf::from("/p/z")]
        );
    }

    #[test]
    fn self_requiring_file_is_a_cycle() {
        let graph = build(&[("entry", "@require ./a"), ("a", "@require ./a")]);

        let cycles = find_cycles(&graph);

        assert_eq!(cycles.len(), 1);
        assert!(cycles[0].is_self_loop());
        assert_eq!(cycles[0].to_string(), "/p/a -> /p/a");
    }

    #[test]
    fn display_closes_the_loop() {
        let cycle = Cycle {
            files: vec![PathBuf::from("a"), PathBuf::from("b")],
        };

        assert_eq!(cycle.to_string(), "a -> b -> a");
    }

    #[test]
    fn tangled_component_reports_a_real_path() {
        // a requires b and c, both of which require a; there is no b -> c edge
        let graph = build(&[
            ("a", "@require ./b @require ./c"),
            ("b", "@require ./a"),
            ("c", "@require ./a"),
        ]);

        let cycles = find_cycles(&graph);

        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].files, [PathBuf::from("/p/a"), PathBuf::from("/p/b")]);
        assert_eq!(cycles[0].to_string(), "/p/a -> /p/b -> /p/a");
    }

    #[test]
    fn every_step_of_a_reported_cycle_is_an_edge() {
        let graph = build(&[
            ("entry", "@require ./a"),
            ("a", "@require ./b @require ./d"),
            ("b", "@require ./c"),
            ("c", "@require ./a @require ./d"),
            ("d", "@require ./b"),
        ]);

        for cycle in find_cycles(&graph) {
            let n = cycle.files.len();
            for i in 0..n {
                let from = graph.node(&cycle.files[i]).unwrap();
                let to = &cycle.files[(i + 1) % n];
                assert!(
                    from.dependencies().contains(to),
                    "{} does not require {}",
                    from.path().display(),
                    to.display()
                );
            }
        }
    }
}
