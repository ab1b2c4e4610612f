//! Root and leaf derivation.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::{Graph, Node};

/// Files no other file requires, in discovery order.
///
/// These are the valid entry points of a bundle. The set is empty only when
/// every file sits on, or behind, a cycle; that is not an error here but is
/// reported as [`crate::Error::NoRootsFound`] by the top-down walk.
#[must_use]
pub fn compute_roots(graph: &Graph) -> Vec<PathBuf> {
    let required: HashSet<&Path> = graph
        .nodes()
        .flat_map(|node| node.dependencies().iter().map(PathBuf::as_path))
        .collect();

    graph
        .nodes()
        .filter(|node| !required.contains(node.path()))
        .map(|node| node.path().to_path_buf())
        .collect()
}

/// Files that require nothing, in discovery order.
#[must_use]
pub fn compute_leaves(graph: &Graph) -> Vec<PathBuf> {
    graph
        .nodes()
        .filter(|node| node.is_leaf())
        .map(Node::path)
        .map(Path::to_path_buf)
        .collect()
}
