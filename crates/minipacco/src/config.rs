//! Configuration for a minipacco invocation.

use crate::error::{Error, Result};

/// Directive marker recognized when none is configured.
pub const DEFAULT_MARKER: &str = "@require";

/// Settings shared by every operation of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Token that introduces a dependency directive, e.g. `@require`
    pub marker: String,
}

impl Config {
    /// Create a configuration with a custom directive marker.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the marker is empty or contains whitespace,
    /// since no directive could ever be written with it.
    pub fn new(marker: impl Into<String>) -> Result<Self> {
        let marker = marker.into();

        if marker.is_empty() {
            return Err(Error::Config("directive marker must not be empty".into()));
        }
        if marker.chars().any(char::is_whitespace) {
            return Err(Error::Config(format!(
                "directive marker must not contain whitespace: {marker:?}"
            )));
        }

        Ok(Self { marker })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
        }
    }
}
