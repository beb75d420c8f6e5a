//! Cratedock CLI - configure-time manifest assembly and crate staging

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("cratedock=debug")
    } else {
        EnvFilter::new("cratedock=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    // Execute command
    match cli.command {
        Commands::Stage(args) => commands::stage::execute(args),
        Commands::Locations(args) => commands::locations::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
