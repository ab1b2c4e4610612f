//! Final outputs: the concatenated bundle and the DOT diagram.

use crate::error::Result;
use crate::graph::{Graph, Node};
use crate::resolver::display_relative;
use crate::traverse::{walk_edges, walk_nodes};

/// Fill color for files nothing requires.
pub const ROOT_COLOR: &str = "indianred1";

/// Fill color for every other file.
pub const INTERIOR_COLOR: &str = "palegreen1";

const DOT_PREAMBLE: [&str; 4] = [
    "digraph {",
    "nodesep=.5",
    r#"node [style="filled",color="gray89"]"#,
    r#"edge [color="gray43"]"#,
];

/// Concatenate every file, dependencies first.
///
/// Contents are joined with a single newline and are otherwise untouched:
/// no trimming, no deduplication of identical bodies.
///
/// # Errors
///
/// Returns [`crate::Error::UnreachableNodes`] if the graph has a cycle.
pub fn bundle(graph: &Graph) -> Result<String> {
    let mut contents: Vec<&str> = Vec::with_capacity(graph.len());
    walk_nodes(graph, |node| contents.push(node.content()))?;
    Ok(contents.join("\n"))
}

/// Render the graph as Graphviz DOT text.
///
/// One node line per edge walked (so a shared file may appear several
/// times; the last line wins when rendered) and one edge line per
/// parent/child pair.
///
/// # Errors
///
/// Returns [`crate::Error::NoRootsFound`] or
/// [`crate::Error::CyclicDependencyPath`] if the graph has a cycle.
pub fn render_dot(graph: &Graph) -> Result<String> {
    let mut lines: Vec<String> = DOT_PREAMBLE.iter().map(ToString::to_string).collect();

    walk_edges(graph, |parent, child| {
        lines.push(node_line(graph, parent.is_none(), child));
        if let Some(parent) = parent {
            lines.push(format!(
                "{} -> {}",
                quote(&parent.path().display().to_string()),
                quote(&child.path().display().to_string())
            ));
        }
    })?;

    lines.push("}".to_string());
    Ok(lines.join("\n"))
}

fn node_line(graph: &Graph, is_root: bool, node: &Node) -> String {
    let color = if is_root { ROOT_COLOR } else { INTERIOR_COLOR };
    let label = display_relative(node.path(), graph.root_dir());

    format!(
        "{} [color=\"{color}\", label={}]",
        quote(&node.path().display().to_string()),
        quote(&label.display().to_string())
    )
}

/// Quote a DOT identifier.
fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        if matches!(c, '"' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}
