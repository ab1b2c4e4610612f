//! minipacco CLI - bundle or graph files linked by `@require` directives.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use minipacco::{Config, Minipacco, config::DEFAULT_MARKER};
use tracing_subscriber::EnvFilter;

mod cli;

/// minipacco: a little bundler for resolving dependency graphs into a single
/// concatenated file.
#[derive(Parser)]
#[command(name = "minipacco")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Token that introduces a dependency directive
    #[arg(long, global = true, default_value = DEFAULT_MARKER)]
    marker: String,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Bundle a project into a file
    Bundle {
        /// Entry file; bare identifiers resolve against its directory
        entry_file: PathBuf,

        /// Write to this file instead of standard output
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Graph a project into a dot chart
    Graph {
        /// Entry file; bare identifiers resolve against its directory
        entry_file: PathBuf,

        /// Write to this file instead of standard output
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List every circular dependency reachable from the entry file
    Cycles {
        /// Entry file; bare identifiers resolve against its directory
        entry_file: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = Config::new(cli.marker)
        .and_then(Minipacco::new)
        .and_then(|pacco| match cli.command {
            Commands::Bundle { entry_file, output } => {
                cli::bundle::run(&pacco, &entry_file, output.as_deref())
            }
            Commands::Graph { entry_file, output } => {
                cli::graph::run(&pacco, &entry_file, output.as_deref())
            }
            Commands::Cycles { entry_file } => cli::cycles::run(&pacco, &entry_file),
        });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {e}", "error".red().bold());
            // Show cause chain for nested errors
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                eprintln!("  {}: {cause}", "caused by".dimmed());
                source = std::error::Error::source(cause);
            }
            ExitCode::FAILURE
        }
    }
}
