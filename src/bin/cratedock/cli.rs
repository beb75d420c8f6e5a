//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Cratedock - configure-time manifest assembly and crate staging
#[derive(Parser)]
#[command(name = "cratedock")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Assemble the manifest and stage the export directory
    Stage(StageArgs),

    /// Print the deduplicated crate locations, one per line
    Locations(LocationsArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct StageArgs {
    /// Configuration file (defaults to ./cratedock.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the export directory
    #[arg(long)]
    pub export_dir: Option<PathBuf>,

    /// Override the crate index root
    #[arg(long)]
    pub index: Option<PathBuf>,

    /// Additional crate location, appended after discovered ones
    #[arg(long = "with", value_name = "LOCATION")]
    pub with_locations: Vec<String>,

    /// Plan the run without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct LocationsArgs {
    /// Configuration file (defaults to ./cratedock.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the crate index root
    #[arg(long)]
    pub index: Option<PathBuf>,

    /// Additional crate location, appended after discovered ones
    #[arg(long = "with", value_name = "LOCATION")]
    pub with_locations: Vec<String>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
