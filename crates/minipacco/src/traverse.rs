//! Cycle-aware traversals over a built [`Graph`].
//!
//! | Walk | Direction | Callback | Cycle report |
//! |------|-----------|----------|--------------|
//! | [`walk_edges`] | roots → leaves | once per edge occurrence | exact path |
//! | [`walk_nodes`] | leaves → roots | once per node | leftover count |
//!
//! Both walks keep their own explicit stack, so graph depth is bounded by
//! memory rather than by the call stack.

use std::path::PathBuf;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::graph::{Graph, Node};

/// One file on the active top-down walk.
#[derive(Debug, Clone, Copy)]
struct Frame {
    node: usize,
    next: usize,
}

struct EdgeWalk<'g, F> {
    graph: &'g Graph,
    visit: F,
    expanded: Vec<bool>,
    on_stack: Vec<bool>,
    stack: Vec<Frame>,
}

impl<'g, F> EdgeWalk<'g, F>
where
    F: FnMut(Option<&'g Node>, &'g Node),
{
    fn new(graph: &'g Graph, visit: F) -> Self {
        Self {
            graph,
            visit,
            expanded: vec![false; graph.len()],
            on_stack: vec![false; graph.len()],
            stack: Vec::new(),
        }
    }

    fn run(&mut self, root: usize) -> Result<()> {
        self.enter(None, root)?;

        while let Some(frame) = self.stack.last_mut() {
            let node = frame.node;
            if let Some(&child) = self.graph.dependency_ids(node).get(frame.next) {
                frame.next += 1;
                self.enter(Some(node), child)?;
            } else {
                self.stack.pop();
                self.on_stack[node] = false;
            }
        }

        Ok(())
    }

    /// Report the edge, then expand `child` unless it was expanded before.
    fn enter(&mut self, parent: Option<usize>, child: usize) -> Result<()> {
        if self.on_stack[child] {
            return Err(self.cycle_through(child));
        }

        let graph = self.graph;
        (self.visit)(parent.map(|p| graph.node_at(p)), graph.node_at(child));

        if !self.expanded[child] {
            self.expanded[child] = true;
            self.on_stack[child] = true;
            self.stack.push(Frame {
                node: child,
                next: 0,
            });
        }

        Ok(())
    }

    /// The stack from `repeated` onwards, closed by `repeated` again.
    fn cycle_through(&self, repeated: usize) -> Error {
        let start = self
            .stack
            .iter()
            .position(|frame| frame.node == repeated)
            .unwrap_or(0);

        let mut path: Vec<PathBuf> = self.stack[start..]
            .iter()
            .map(|frame| self.graph.node_at(frame.node).path().to_path_buf())
            .collect();
        path.push(self.graph.node_at(repeated).path().to_path_buf());

        debug!(length = path.len() - 1, "Cycle found on active walk");
        Error::CyclicDependencyPath { path }
    }
}

/// Walk every edge from the roots down, depth-first.
///
/// `visit(parent, child)` fires once per edge occurrence, with `parent` set to
/// `None` for the roots themselves. A file reached a second time through a
/// different edge is reported again but not descended into again.
///
/// # Errors
///
/// - [`Error::NoRootsFound`] before any callback if the graph has no roots
/// - [`Error::CyclicDependencyPath`] as soon as a file on the active walk is
///   reached again; callbacks already made are not undone
pub fn walk_edges<'g, F>(graph: &'g Graph, visit: F) -> Result<()>
where
    F: FnMut(Option<&'g Node>, &'g Node),
{
    let roots = graph.root_ids();
    if roots.is_empty() {
        return Err(Error::NoRootsFound);
    }

    let mut walk = EdgeWalk::new(graph, visit);
    for &root in roots {
        trace!(root = %graph.node_at(root).path().display(), "Walking from root");
        walk.run(root)?;
    }

    Ok(())
}

/// Visit every node once, each only after all of its dependencies.
///
/// Starts from the leaves. A node becomes ready when its last outstanding
/// dependency completes; dependants of a completed node are tried in
/// declaration order before anything queued earlier.
///
/// # Errors
///
/// Returns [`Error::UnreachableNodes`] if some nodes never became ready,
/// which happens exactly when they lie on or behind a cycle. Callbacks for
/// the nodes that did complete have already fired.
pub fn walk_nodes<'g, F>(graph: &'g Graph, mut visit: F) -> Result<()>
where
    F: FnMut(&'g Node),
{
    let mut completed = vec![false; graph.len()];
    let mut done = 0usize;

    let mut ready: Vec<usize> = graph.leaf_ids().iter().rev().copied().collect();

    while let Some(id) = ready.pop() {
        if completed[id] {
            continue;
        }
        if !graph.dependency_ids(id).iter().all(|&dep| completed[dep]) {
            continue;
        }

        visit(graph.node_at(id));
        completed[id] = true;
        done += 1;

        ready.extend(graph.dependant_ids(id).iter().rev().copied());
    }

    if done < graph.len() {
        let paths: Vec<PathBuf> = completed
            .iter()
            .enumerate()
            .filter(|&(_, &complete)| !complete)
            .map(|(id, _)| graph.node_at(id).path().to_path_buf())
            .collect();

        debug!(leftover = paths.len(), "Bottom-up walk stalled");
        return Err(Error::UnreachableNodes {
            count: paths.len(),
            paths,
        });
    }

    Ok(())
}

/// Fail on the first cycle reachable from a root.
///
/// Runs before bundling or rendering so that a cycle is reported with its
/// exact path rather than as a leftover count.
///
/// # Errors
///
/// Same as [`walk_edges`].
pub fn check_cycles(graph: &Graph) -> Result<()> {
    walk_edges(graph, |_, _| {})
}
