//! Property tests for the traversals over randomly generated graphs.
//!
//! Files only ever require files with a higher index, so every generated
//! project is acyclic unless a back edge is added explicitly.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use minipacco::traverse::{walk_edges, walk_nodes};
use minipacco::{Config, DirectiveExtractor, Error, GraphBuilder, MemoryProvider, Minipacco};
use proptest::prelude::*;

fn file(i: usize) -> String {
    format!("/p/f{i}.js")
}

/// Adjacency rows for `n` files; only entries above the diagonal are used.
fn arb_adjacency() -> impl Strategy<Value = Vec<Vec<bool>>> {
    (1usize..12).prop_flat_map(|n| {
        proptest::collection::vec(proptest::collection::vec(any::<bool>(), n), n)
    })
}

fn project(adjacency: &[Vec<bool>], back_edge: bool) -> MemoryProvider {
    let n = adjacency.len();
    let mut provider = MemoryProvider::new();

    for (i, row) in adjacency.iter().enumerate() {
        let mut content = format!("body {i}\n");
        for (j, &required) in row.iter().enumerate().skip(i + 1) {
            if required {
                content.push_str(&format!("// @require ./f{j}.js\n"));
            }
        }
        if back_edge && i == n - 1 {
            content.push_str("// @require ./f0.js\n");
        }
        provider.insert(file(i), content);
    }

    // The entry requires the last file directly so the back edge always
    // closes a loop through it
    if back_edge && n > 1 {
        provider.insert(file(0), format!("body 0\n// @require ./f{}.js\n", n - 1));
    }

    provider
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn bottom_up_fires_each_node_once_after_its_dependencies(adjacency in arb_adjacency()) {
        let provider = project(&adjacency, false);
        let graph = GraphBuilder::new(&provider, DirectiveExtractor::default_marker())
            .build(Path::new(&file(0)))
            .unwrap();

        let mut order: Vec<PathBuf> = Vec::new();
        walk_nodes(&graph, |node| order.push(node.path().to_path_buf())).unwrap();

        prop_assert_eq!(order.len(), graph.len());
        let position: HashMap<&PathBuf, usize> =
            order.iter().enumerate().map(|(i, p)| (p, i)).collect();
        prop_assert_eq!(position.len(), graph.len());

        for node in graph.nodes() {
            let own = position[&node.path().to_path_buf()];
            for dep in node.dependencies() {
                prop_assert!(position[dep] < own);
            }
        }
        prop_assert_eq!(order.last().map(PathBuf::as_path), Some(graph.entry_path()));
    }

    #[test]
    fn top_down_reaches_every_node(adjacency in arb_adjacency()) {
        let provider = project(&adjacency, false);
        let graph = GraphBuilder::new(&provider, DirectiveExtractor::default_marker())
            .build(Path::new(&file(0)))
            .unwrap();

        let mut reached: HashSet<PathBuf> = HashSet::new();
        let mut edges = 0usize;
        walk_edges(&graph, |parent, child| {
            if parent.is_some() {
                edges += 1;
            }
            reached.insert(child.path().to_path_buf());
        })
        .unwrap();

        prop_assert_eq!(reached.len(), graph.len());
        prop_assert!(edges >= graph.len() - 1);
        prop_assert_eq!(graph.roots().count(), 1);
    }

    #[test]
    fn closing_a_loop_back_to_the_entry_always_fails(adjacency in arb_adjacency()) {
        let provider = project(&adjacency, true);
        let pacco = Minipacco::with_provider(provider, Config::default()).unwrap();
        let entry = file(0);

        let result = pacco.bundle(Path::new(&entry));
        prop_assert!(matches!(result, Err(Error::NoRootsFound)));

        let cycles = pacco.cycles(Path::new(&entry)).unwrap();
        prop_assert!(!cycles.is_empty());
        prop_assert!(cycles[0].files.contains(&PathBuf::from(&entry)));
    }
}
