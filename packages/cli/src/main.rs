mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    info, init, new, reorder, replay, InfoArgs, InitArgs, NewArgs, ReorderArgs, ReplayArgs,
};
use config::Config;
use std::path::Path;

/// Folio CLI - page reordering for .folio documents
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default folio.config.json
    Init(InitArgs),

    /// Create a document with numbered or labeled pages
    New(NewArgs),

    /// Print a document's pages
    Info(InfoArgs),

    /// Move pages to an insertion slot
    Reorder(ReorderArgs),

    /// Replay a recorded interaction script against a document
    Replay(ReplayArgs),
}

fn run(cli: Cli, cwd: &Path) -> anyhow::Result<()> {
    let config = Config::load(cwd)?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Init(args) => init(args, cwd),
        Command::New(args) => new(args, cwd),
        Command::Info(args) => info(args, cwd),
        Command::Reorder(args) => reorder(args, cwd, &config),
        Command::Replay(args) => replay(args, cwd, &config),
    }
}

fn main() {
    let cli = Cli::parse();

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| run(cli, &cwd));

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
