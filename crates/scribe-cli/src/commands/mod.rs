//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod generate;
pub mod init;
pub mod list;

/// Scribe - Documentation Suite
#[derive(Parser)]
#[command(name = "scribe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to project directory (defaults to current directory)
    #[arg(long, global = true)]
    pub project: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan the project and generate documentation
    Generate(generate::GenerateArgs),

    /// Initialize ~/.scribe with default plan and skill templates
    Init,

    /// List installed local plans and skills
    List,
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let project_dir = self
            .project
            .unwrap_or_else(|| std::env::current_dir().unwrap());

        match self.command {
            Commands::Generate(args) => generate::execute(args, &project_dir).await,
            Commands::Init => init::execute().await,
            Commands::List => list::execute().await,
        }
    }
}
