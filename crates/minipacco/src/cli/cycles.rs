//! `minipacco cycles` command implementation.

use std::io::Write;
use std::path::Path;

use colored::Colorize;
use minipacco::{FileProvider, Minipacco};

/// Run the cycles command.
pub fn run<P: FileProvider>(pacco: &Minipacco<P>, entry: &Path) -> Result<(), minipacco::Error> {
    let cycles = pacco.cycles(entry)?;
    let mut out = std::io::stdout().lock();

    if cycles.is_empty() {
        writeln!(out, "{}", "No circular dependencies detected.".green())?;
        out.flush()?;
        return Ok(());
    }

    writeln!(
        out,
        "Found {} circular dependencies:",
        cycles.len().to_string().red().bold()
    )?;
    writeln!(out)?;

    for (i, cycle) in cycles.iter().enumerate() {
        writeln!(out, "  {} {}:", "Cycle".yellow().bold(), i + 1)?;
        writeln!(out, "    {}", cycle.to_string().dimmed())?;
    }

    out.flush()?;
    Ok(())
}
