//! Command-line interface for harness-input
//!
//! Provides `show`, `env` and `check` subcommands over a single input file.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod check;
mod env;
mod show;
mod source;

/// Parse test harness input files and merge master config into the environment
#[derive(Parser)]
#[command(name = "harness-input")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the tests, tasks and path to tests parsed from an input file
    Show(show::ShowArgs),

    /// Print the environment merged from the master config as shell exports
    Env(env::EnvArgs),

    /// Fail when the input file has warnings or yields no tasks
    Check(check::CheckArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Show(args) => show::run(args),
        Commands::Env(args) => env::run(args),
        Commands::Check(args) => check::run(args),
    }
}
