//! tabdelta CLI
//!
//! Command-line interface for keyed table diffs

use clap::{Parser, Subcommand};
use tabdelta_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "tabdelta")]
#[command(about = "tabdelta - Keyed diff of two tables", long_about = None)]
struct Cli {
    /// Human-readable debug logging on stderr (default: JSON, info level)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Diff two JSON datasets on one or more key columns
    Diff(commands::diff::DiffArgs),
}

fn main() {
    let cli = Cli::parse();

    init(if cli.verbose {
        Profile::Development
    } else {
        Profile::Production
    });

    let result = match cli.command {
        Commands::Diff(args) => commands::diff::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
