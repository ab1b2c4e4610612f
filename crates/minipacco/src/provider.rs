//! File content providers.
//!
//! The graph builder never touches the file system directly. It asks a
//! [`FileProvider`] for the text behind each absolute path, which keeps the
//! core testable against in-memory trees.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::error::{Error, Result};

/// Source of file text, keyed by absolute path.
pub trait FileProvider {
    /// Return the full text of the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileNotFound`] when nothing exists at `path`, or
    /// [`Error::ReadFailure`] when it exists but cannot be read as text.
    fn read(&self, path: &Path) -> Result<String>;
}

impl<P: FileProvider + ?Sized> FileProvider for &P {
    fn read(&self, path: &Path) -> Result<String> {
        (**self).read(path)
    }
}

/// Reads files from the local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProvider;

impl FileProvider for FsProvider {
    fn read(&self, path: &Path) -> Result<String> {
        trace!(path = %path.display(), "Reading file");
        std::fs::read_to_string(path).map_err(|e| Error::from_read(path, e))
    }
}

/// Serves files from an in-memory map.
///
/// Paths must be given in the same absolute, normalized form the builder
/// produces (see [`crate::resolver::normalize`]).
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    files: HashMap<PathBuf, String>,
}

impl MemoryProvider {
    /// Create an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file, builder style.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    /// Add or replace a file.
    pub fn insert(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files.insert(path.into(), content.into());
    }
}

impl FileProvider for MemoryProvider {
    fn read(&self, path: &Path) -> Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| Error::FileNotFound {
                path: path.to_path_buf(),
            })
    }
}
