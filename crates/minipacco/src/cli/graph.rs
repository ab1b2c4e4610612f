//! `minipacco graph` command implementation.

use std::path::Path;

use minipacco::{FileProvider, Minipacco};

use super::display::emit;

/// Run the graph command.
pub fn run<P: FileProvider>(
    pacco: &Minipacco<P>,
    entry: &Path,
    output: Option<&Path>,
) -> Result<(), minipacco::Error> {
    let dot = pacco.graph(entry)?;
    emit(&dot, output)
}
