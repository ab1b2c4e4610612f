//! Error types for minipacco operations.
//!
//! Every failure in the core is fatal to the requested operation: a bundle or
//! a diagram is either produced in full or not at all. Nothing here is
//! collected and skipped the way a best-effort indexer would.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for minipacco operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for minipacco operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The entry file or a required file does not exist
    #[error("file not found: \"{}\"", .path.display())]
    FileNotFound {
        /// Absolute path that was requested
        path: PathBuf,
    },

    /// The file exists but could not be read as UTF-8 text
    #[error("failed to read file: \"{}\"", .path.display())]
    ReadFailure {
        /// Absolute path that was requested
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Every node is required by another node, so no walk can start
    #[error("circular dependencies detected, no root files found")]
    NoRootsFound,

    /// A file was reached again while it was still on the active walk
    #[error("circular dependencies detected: {}", format_cycle(.path))]
    CyclicDependencyPath {
        /// The cycle, starting and ending at the repeated file
        path: Vec<PathBuf>,
    },

    /// Some files never had all their dependencies satisfied
    #[error(
        "circular dependencies detected, {count} leftover non-leaf {}",
        node_noun(.count)
    )]
    UnreachableNodes {
        /// Number of files left over
        count: usize,
        /// The leftover files, in discovery order
        paths: Vec<PathBuf>,
    },

    /// Invalid configuration or arguments
    #[error("configuration error: {0}")]
    Config(String),

    /// Writing the produced output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build the right error for a failed read of `path`.
    ///
    /// `NotFound` becomes [`Error::FileNotFound`]; anything else, including
    /// invalid UTF-8, becomes [`Error::ReadFailure`].
    #[must_use]
    pub fn from_read(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::ReadFailure {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    /// Returns `true` if this error reports a dependency cycle.
    #[must_use]
    pub fn is_cycle(&self) -> bool {
        matches!(
            self,
            Self::NoRootsFound | Self::CyclicDependencyPath { .. } | Self::UnreachableNodes { .. }
        )
    }
}

/// Render a cycle as `a -> b -> a`.
fn format_cycle(path: &[PathBuf]) -> String {
    path.iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

fn node_noun(count: &usize) -> &'static str {
    if *count == 1 { "node" } else { "nodes" }
}
