//! condiff CLI
//!
//! Command-line interface for comparing the contracts of two source trees

use clap::{Parser, Subcommand};
use condiff_core::logging_facility::{self, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "condiff")]
#[command(about = "condiff - Design-by-contract diff of two source trees", long_about = None)]
struct Cli {
    /// Human-readable debug logging on stderr instead of JSON lines
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compare the contracts of two trees
    Compare(commands::compare::CompareArgs),
    /// Print aggregated contract statistics of one tree
    Stats(commands::stats::StatsArgs),
}

fn main() {
    let cli = Cli::parse();

    logging_facility::init(if cli.verbose {
        Profile::Development
    } else {
        Profile::Production
    });

    let result = match cli.command {
        Commands::Compare(args) => commands::compare::execute(args),
        Commands::Stats(args) => commands::stats::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
