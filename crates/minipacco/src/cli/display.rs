//! Common output utilities for CLI commands.

use std::io::Write;
use std::path::Path;

use minipacco::Result;
use tracing::info;

/// Print `text` to standard output, or write it to `output` when given.
///
/// Standard output gets a trailing newline; a file gets `text` exactly.
/// A failed write on either is returned as [`minipacco::Error::Io`].
pub fn emit(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text)?;
            info!(path = %path.display(), bytes = text.len(), "Wrote output");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{text}")?;
            stdout.flush()?;
        }
    }
    Ok(())
}
