//! Directive extraction from file text.
//!
//! A directive is the marker token, at least one whitespace character, then
//! an identifier that runs until the next whitespace or semicolon:
//!
//! ```text
//! // @require ./lib/util.js
//! /* @require vendor/jquery.js; */
//! ```
//!
//! Extraction is purely lexical. Directives inside comments, strings or code
//! all count, duplicates are kept, and order of appearance is preserved.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::DEFAULT_MARKER;
use crate::error::{Error, Result};

static DEFAULT_EXTRACTOR: LazyLock<DirectiveExtractor> = LazyLock::new(|| {
    DirectiveExtractor::new(DEFAULT_MARKER).expect("default marker is a valid pattern")
});

/// Pulls raw dependency identifiers out of file text.
#[derive(Debug, Clone)]
pub struct DirectiveExtractor {
    pattern: Regex,
}

impl DirectiveExtractor {
    /// Compile an extractor for the given marker token.
    ///
    /// The marker is matched literally, so tokens such as `#include` or
    /// `//=require` need no escaping.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the pattern cannot be compiled.
    pub fn new(marker: &str) -> Result<Self> {
        let source = format!(r"{}\s+([^\s;]+)", regex::escape(marker));
        let pattern = Regex::new(&source)
            .map_err(|e| Error::Config(format!("invalid directive marker {marker:?}: {e}")))?;
        Ok(Self { pattern })
    }

    /// The extractor for the default `@require` marker.
    #[must_use]
    pub fn default_marker() -> &'static Self {
        &DEFAULT_EXTRACTOR
    }

    /// Extract every identifier in order of appearance, duplicates included.
    #[must_use]
    pub fn extract(&self, text: &str) -> Vec<String> {
        self.pattern
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

/// Extract `@require` identifiers from `text`.
#[must_use]
pub fn extract_directives(text: &str) -> Vec<String> {
    DirectiveExtractor::default_marker().extract(text)
}
