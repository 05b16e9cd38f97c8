//! Verstool CLI - command-line interface
//!
//! Parses command-line arguments and dispatches to subcommand handlers
//! in the `commands` module. All domain logic lives in the `verstool`
//! library crate.

mod commands;
mod error;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::config::ConfigCommands;
use commands::emit::EmitArgs;
use commands::expand::ExpandArgs;
use commands::format::FormatArgs;
use commands::query::QueryArgs;
use error::CliError;

/// Verstool - a single, useful project version
///
/// Formats five-component version tuples into natural version strings
/// and enriches development versions with revision data from the source
/// tree's version control system (git, mercurial or bazaar).
#[derive(Parser, Debug)]
#[command(name = "verstool", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve and print a formatted version string
    Format(FormatArgs),

    /// Show VCS revision data for a source tree
    Query(QueryArgs),

    /// Run the manifest hook on a raw value
    Expand(ExpandArgs),

    /// Print cargo:rustc-env lines for use from a build script
    Emit(EmitArgs),

    /// View and modify configuration settings
    #[command(subcommand)]
    Config(ConfigCommands),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level; RUST_LOG overrides.
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result: Result<(), CliError> = match cli.command {
        Commands::Format(args) => commands::format::run(args),
        Commands::Query(args) => commands::query::run(args),
        Commands::Expand(args) => commands::expand::run(args),
        Commands::Emit(args) => commands::emit::run(args),
        Commands::Config(command) => commands::config::run(command),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
