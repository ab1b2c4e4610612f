//! The dependency graph between files.
//!
//! A [`Graph`] is built once per invocation by [`GraphBuilder`] and is
//! read-only afterwards. Nodes are keyed by absolute, normalized path and are
//! kept in discovery order, so every derived listing (roots, leaves, cycle
//! members) is deterministic for a given tree of files.
//!
//! ## Edge Direction
//!
//! - `dependencies`: the files a node requires, one entry per directive
//!   (repeated directives give repeated entries)
//! - `dependants`: the reverse index, one entry per directive pointing at the
//!   node, filled in a single pass after every node exists

mod analyze;
mod build;

pub use analyze::{compute_leaves, compute_roots};
pub use build::GraphBuilder;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use petgraph::graph::{DiGraph, NodeIndex};

/// One file in the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    path: PathBuf,
    content: String,
    dependencies: Vec<PathBuf>,
    dependants: Vec<PathBuf>,
}

impl Node {
    pub(crate) fn new(path: PathBuf, content: String, dependencies: Vec<PathBuf>) -> Self {
        Self {
            path,
            content,
            dependencies,
            dependants: Vec::new(),
        }
    }

    /// Absolute path, the node's key.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw file text, exactly as read.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Files this node requires, in directive order.
    #[must_use]
    pub fn dependencies(&self) -> &[PathBuf] {
        &self.dependencies
    }

    /// Files that require this node, one entry per requiring directive.
    #[must_use]
    pub fn dependants(&self) -> &[PathBuf] {
        &self.dependants
    }

    /// Returns `true` if this node requires nothing.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.dependencies.is_empty()
    }
}

/// A resolved dependency graph.
#[derive(Debug, Clone)]
pub struct Graph {
    entry_path: PathBuf,
    root_dir: PathBuf,
    nodes: Vec<Node>,
    index: HashMap<PathBuf, usize>,
    edges: Vec<Vec<usize>>,
    reverse: Vec<Vec<usize>>,
    roots: Vec<usize>,
    leaves: Vec<usize>,
}

impl Graph {
    /// Assemble a graph from fully discovered nodes.
    ///
    /// Every dependency of every node must itself be one of `nodes`; the
    /// builder guarantees this by reading every path it resolves.
    pub(crate) fn from_nodes(entry_path: PathBuf, root_dir: PathBuf, nodes: Vec<Node>) -> Self {
        let index: HashMap<PathBuf, usize> = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.path.clone(), i))
            .collect();

        let edges: Vec<Vec<usize>> = nodes
            .iter()
            .map(|node| {
                node.dependencies
                    .iter()
                    .filter_map(|dep| {
                        let id = index.get(dep).copied();
                        debug_assert!(id.is_some(), "dependency {} was never built", dep.display());
                        id
                    })
                    .collect()
            })
            .collect();

        let mut graph = Self {
            entry_path,
            root_dir,
            nodes,
            index,
            edges,
            reverse: Vec::new(),
            roots: Vec::new(),
            leaves: Vec::new(),
        };
        graph.link_dependants();

        graph.roots = graph.ids_of(&compute_roots(&graph));
        graph.leaves = graph.ids_of(&compute_leaves(&graph));
        graph
    }

    /// Reverse-edge pass: fill in every node's dependants.
    fn link_dependants(&mut self) {
        let mut reverse = vec![Vec::new(); self.nodes.len()];
        for (id, deps) in self.edges.iter().enumerate() {
            for &dep in deps {
                reverse[dep].push(id);
            }
        }

        for (dep, dependants) in reverse.iter().enumerate() {
            let paths: Vec<PathBuf> = dependants
                .iter()
                .map(|&id| self.nodes[id].path.clone())
                .collect();
            self.nodes[dep].dependants = paths;
        }
        self.reverse = reverse;
    }

    fn ids_of(&self, paths: &[PathBuf]) -> Vec<usize> {
        paths
            .iter()
            .filter_map(|p| self.index.get(p).copied())
            .collect()
    }

    /// The entry path exactly as the caller gave it.
    #[must_use]
    pub fn entry_path(&self) -> &Path {
        &self.entry_path
    }

    /// Directory containing the entry file.
    ///
    /// Bare identifiers resolve against it and diagram labels are relative
    /// to it.
    #[must_use]
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Number of files in the graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the graph has no files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node by absolute path.
    #[must_use]
    pub fn node(&self, path: &Path) -> Option<&Node> {
        self.index.get(path).map(|&id| &self.nodes[id])
    }

    /// Returns `true` if a node exists for `path`.
    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.index.contains_key(path)
    }

    /// All nodes in discovery order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Nodes nothing else requires, in discovery order.
    pub fn roots(&self) -> impl Iterator<Item = &Node> {
        self.roots.iter().map(|&id| &self.nodes[id])
    }

    /// Nodes that require nothing, in discovery order.
    pub fn leaves(&self) -> impl Iterator<Item = &Node> {
        self.leaves.iter().map(|&id| &self.nodes[id])
    }

    /// Convert to a petgraph graph with one edge per directive.
    ///
    /// Node indices follow discovery order, so `NodeIndex::new(0)` is the
    /// entry file.
    #[must_use]
    pub fn to_petgraph(&self) -> DiGraph<PathBuf, ()> {
        let mut graph = DiGraph::with_capacity(self.nodes.len(), self.edges.iter().map(Vec::len).sum());
        for node in &self.nodes {
            graph.add_node(node.path.clone());
        }
        for (from, deps) in self.edges.iter().enumerate() {
            for &to in deps {
                graph.add_edge(NodeIndex::new(from), NodeIndex::new(to), ());
            }
        }
        graph
    }

    pub(crate) fn node_at(&self, id: usize) -> &Node {
        &self.nodes[id]
    }

    pub(crate) fn dependency_ids(&self, id: usize) -> &[usize] {
        &self.edges[id]
    }

    pub(crate) fn dependant_ids(&self, id: usize) -> &[usize] {
        &self.reverse[id]
    }

    pub(crate) fn root_ids(&self) -> &[usize] {
        &self.roots
    }

    pub(crate) fn leaf_ids(&self) -> &[usize] {
        &self.leaves
    }
}
