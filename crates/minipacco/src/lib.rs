//! # minipacco: a little dependency-graph bundler
//!
//! minipacco follows `@require` directives from an entry file, resolves the
//! files they name into a dependency graph, and then either concatenates the
//! files so that every dependency precedes the files requiring it, or renders
//! the graph as a Graphviz diagram.
//!
//! ## Directives
//!
//! ```text
//! // @require ./sibling.js      resolved against this file's directory
//! // @require lib/shared.js     resolved against the entry file's directory
//! ```
//!
//! ## Quick Start
//!
//! ```no_run
//! use minipacco::{Config, Minipacco};
//! use std::path::Path;
//!
//! let pacco = Minipacco::new(Config::default())?;
//!
//! // Dependencies first, entry file last
//! let bundle = pacco.bundle(Path::new("src/main.js"))?;
//!
//! // Graphviz source, one node line per edge
//! let dot = pacco.graph(Path::new("src/main.js"))?;
//! # Ok::<(), minipacco::Error>(())
//! ```
//!
//! ## Pipeline
//!
//! | Stage | Module |
//! |-------|--------|
//! | Directive extraction | [`extractor`] |
//! | Path resolution | [`resolver`] |
//! | Graph construction | [`graph`] |
//! | Traversal and cycle checks | [`traverse`], [`cycles`] |
//! | Bundle and diagram output | [`emit`] |

pub mod config;
pub mod cycles;
pub mod emit;
mod error;
pub mod extractor;
pub mod graph;
pub mod provider;
pub mod resolver;
pub mod traverse;

pub use config::Config;
pub use cycles::Cycle;
pub use error::{Error, Result};
pub use extractor::DirectiveExtractor;
pub use graph::{Graph, GraphBuilder, Node};
pub use provider::{FileProvider, FsProvider, MemoryProvider};

use std::path::Path;

use tracing::debug;

/// Entry point tying configuration, file access and the pipeline together.
///
/// Every operation builds a fresh graph from its entry file; nothing is
/// cached between calls.
#[derive(Debug)]
pub struct Minipacco<P = FsProvider> {
    config: Config,
    provider: P,
    extractor: DirectiveExtractor,
}

impl Minipacco<FsProvider> {
    /// Create an instance reading from the local file system.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configured marker cannot be compiled.
    pub fn new(config: Config) -> Result<Self> {
        Self::with_provider(FsProvider, config)
    }
}

impl<P: FileProvider> Minipacco<P> {
    /// Create an instance reading through a custom provider.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configured marker cannot be compiled.
    pub fn with_provider(provider: P, config: Config) -> Result<Self> {
        let extractor = DirectiveExtractor::new(&config.marker)?;
        Ok(Self {
            config,
            provider,
            extractor,
        })
    }

    /// The configuration this instance was created with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build the dependency graph of `entry` without checking it for cycles.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileNotFound`] or [`Error::ReadFailure`] for the first
    /// file that cannot be read.
    pub fn build_graph(&self, entry: &Path) -> Result<Graph> {
        GraphBuilder::new(&self.provider, &self.extractor).build(entry)
    }

    /// Concatenate `entry` and everything it requires, dependencies first.
    ///
    /// # Errors
    ///
    /// Fails on any unreadable file, and on any cycle: the cycle's exact path
    /// is reported when it is reachable from a root.
    pub fn bundle(&self, entry: &Path) -> Result<String> {
        let graph = self.build_graph(entry)?;
        traverse::check_cycles(&graph)?;

        let bundle = emit::bundle(&graph)?;
        debug!(files = graph.len(), bytes = bundle.len(), "Bundle assembled");
        Ok(bundle)
    }

    /// Render the dependency graph of `entry` as DOT text.
    ///
    /// # Errors
    ///
    /// Fails on any unreadable file and on any cycle.
    pub fn graph(&self, entry: &Path) -> Result<String> {
        let graph = self.build_graph(entry)?;
        traverse::check_cycles(&graph)?;

        emit::render_dot(&graph)
    }

    /// List every cycle in the dependency graph of `entry`.
    ///
    /// # Errors
    ///
    /// Fails only on unreadable files; cycles are the result, not an error.
    pub fn cycles(&self, entry: &Path) -> Result<Vec<Cycle>> {
        let graph = self.build_graph(entry)?;
        Ok(cycles::find_cycles(&graph))
    }
}
