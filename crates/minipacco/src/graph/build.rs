//! Graph construction from an entry file.

use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use super::{Graph, Node};
use crate::error::Result;
use crate::extractor::DirectiveExtractor;
use crate::provider::FileProvider;
use crate::resolver::{absolutize, resolve_identifier};

/// Discovers every file reachable from an entry file.
///
/// Each path is read at most once. Diamonds and cycles are deduplicated here
/// but never reported; cycle detection belongs to the traversals.
pub struct GraphBuilder<'a, P> {
    provider: P,
    extractor: &'a DirectiveExtractor,
}

impl<'a, P: FileProvider> GraphBuilder<'a, P> {
    /// Create a builder reading through `provider`.
    pub fn new(provider: P, extractor: &'a DirectiveExtractor) -> Self {
        Self {
            provider,
            extractor,
        }
    }

    /// Build the graph rooted at `entry`.
    ///
    /// `entry` may be relative to the current directory. Its directory becomes
    /// the graph's root directory.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::FileNotFound`] or [`crate::Error::ReadFailure`]
    /// for the first file that cannot be read, whether it is the entry file or
    /// one required along the way.
    pub fn build(&self, entry: &Path) -> Result<Graph> {
        let entry_file = absolutize(entry)?;
        let root_dir = entry_file
            .parent()
            .map_or_else(|| entry_file.clone(), Path::to_path_buf);

        debug!(
            entry = %entry_file.display(),
            root = %root_dir.display(),
            "Building dependency graph"
        );

        let mut queue = VecDeque::from([entry_file]);
        let mut built: HashSet<PathBuf> = HashSet::new();
        let mut nodes = Vec::new();

        while let Some(path) = queue.pop_front() {
            if built.contains(&path) {
                continue;
            }

            let content = self.provider.read(&path)?;
            let folder = path.parent().unwrap_or(&root_dir);
            let dependencies: Vec<PathBuf> = self
                .extractor
                .extract(&content)
                .iter()
                .map(|identifier| resolve_identifier(&root_dir, folder, identifier))
                .collect();

            trace!(
                path = %path.display(),
                dependencies = dependencies.len(),
                "Discovered file"
            );

            // Front of the queue, declaration order preserved
            for dep in dependencies.iter().rev() {
                if !built.contains(dep) {
                    queue.push_front(dep.clone());
                }
            }

            built.insert(path.clone());
            nodes.push(Node::new(path, content, dependencies));
        }

        let graph = Graph::from_nodes(entry.to_path_buf(), root_dir, nodes);
        debug!(
            files = graph.len(),
            roots = graph.root_ids().len(),
            leaves = graph.leaf_ids().len(),
            "Dependency graph built"
        );
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::provider::MemoryProvider;

    fn build(provider: &MemoryProvider, entry: &str) -> Result<Graph> {
        GraphBuilder::new(provider, DirectiveExtractor::default_marker()).build(Path::new(entry))
    }

    fn paths<'g>(nodes: impl Iterator<Item = &'g Node>) -> Vec<&'g Path> {
        nodes.map(Node::path).collect()
    }

    #[test]
    fn builds_diamond_once_per_file() {
        let provider = MemoryProvider::new()
            .with_file("/p/a.js", "// @require ./b.js\n// @require ./c.js\n")
            .with_file("/p/b.js", "// @require ./d.js\n")
            .with_file("/p/c.js", "// @require ./d.js\n")
            .with_file("/p/d.js", "d");

        let graph = build(&provider, "/p/a.js").expect("build should succeed");

        assert_eq!(graph.len(), 4);
        assert_eq!(
            paths(graph.nodes()),
            ["/p/a.js", "/p/b.js", "/p/d.js", "/p/c.js"].map(Path::new)
        );
        assert_eq!(paths(graph.roots()), [Path::new("/p/a.js")]);
        assert_eq!(paths(graph.leaves()), [Path::new("/p/d.js")]);
    }

    #[test]
    fn keeps_content_and_entry_as_given() {
        let provider = MemoryProvider::new().with_file("/p/a.js", "  raw\n\ttext  ");

        let graph = build(&provider, "/p/./a.js").unwrap();

        assert_eq!(graph.entry_path(), Path::new("/p/./a.js"));
        assert_eq!(graph.root_dir(), Path::new("/p"));
        let a = graph.node(Path::new("/p/a.js")).unwrap();
        assert_eq!(a.content(), "  raw\n\ttext  ");
    }

    #[test]
    fn bare_identifiers_resolve_against_entry_directory() {
        let provider = MemoryProvider::new()
            .with_file("/p/a.js", "// @require lib/b.js")
            .with_file("/p/lib/b.js", "// @require lib/c.js\n// @require ./d.js")
            .with_file("/p/lib/c.js", "c")
            .with_file("/p/lib/d.js", "d");

        let graph = build(&provider, "/p/a.js").unwrap();

        let b = graph.node(Path::new("/p/lib/b.js")).unwrap();
        assert_eq!(
            b.dependencies(),
            [PathBuf::from("/p/lib/c.js"), PathBuf::from("/p/lib/d.js")]
        );
    }

    #[test]
    fn cycles_are_built_without_error() {
        let provider = MemoryProvider::new()
            .with_file("/p/a.js", "// @require ./b.js")
            .with_file("/p/b.js", "// @require ./a.js");

        let graph = build(&provider, "/p/a.js").expect("cycles are not a build error");

        assert_eq!(graph.len(), 2);
        assert_eq!(graph.roots().count(), 0);
        assert_eq!(graph.leaves().count(), 0);
    }

    #[test]
    fn repeated_directive_keeps_both_edges() {
        let provider = MemoryProvider::new()
            .with_file("/p/a.js", "// @require ./b.js\n// @require ./b.js")
            .with_file("/p/b.js", "b");

        let graph = build(&provider, "/p/a.js").unwrap();

        let a = graph.node(Path::new("/p/a.js")).unwrap();
        assert_eq!(a.dependencies().len(), 2);
        let b = graph.node(Path::new("/p/b.js")).unwrap();
        assert_eq!(b.dependants().len(), 2);
    }

    #[test]
    fn missing_entry_file_is_fatal() {
        let provider = MemoryProvider::new();

        let result = build(&provider, "/p/a.js");
        assert!(matches!(result, Err(Error::FileNotFound { path }) if path == Path::new("/p/a.js")));
    }

    #[test]
    fn missing_required_file_is_fatal() {
        let provider = MemoryProvider::new().with_file("/p/a.js", "// @require ./gone.js");

        let result = build(&provider, "/p/a.js");
        assert!(
            matches!(result, Err(Error::FileNotFound { path }) if path == Path::new("/p/gone.js"))
        );
    }

    #[test]
    fn custom_marker_changes_what_is_followed() {
        let provider = MemoryProvider::new()
            .with_file("/p/a.h", "#include b.h\n// @require ./c.js")
            .with_file("/p/b.h", "b");
        let extractor = DirectiveExtractor::new("#include").unwrap();

        let graph = GraphBuilder::new(&provider, &extractor)
            .build(Path::new("/p/a.h"))
            .unwrap();

        assert_eq!(graph.len(), 2);
        assert!(graph.contains(Path::new("/p/b.h")));
    }
}
