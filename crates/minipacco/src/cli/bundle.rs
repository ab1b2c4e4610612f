//! `minipacco bundle` command implementation.

use std::path::Path;

use minipacco::{FileProvider, Minipacco};

use super::display::emit;

/// Run the bundle command.
pub fn run<P: FileProvider>(
    pacco: &Minipacco<P>,
    entry: &Path,
    output: Option<&Path>,
) -> Result<(), minipacco::Error> {
    let bundle = pacco.bundle(entry)?;
    emit(&bundle, output)
}
